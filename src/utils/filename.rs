//! Output filename templates per asset kind

use crate::domain::{AssetKind, FilenameHash, OutputConfig};

const DEFAULT_HASH: &str = ".[contenthash:8]";

fn hash_segment(hash: &FilenameHash) -> String {
    match hash {
        FilenameHash::Enabled(true) => DEFAULT_HASH.to_string(),
        FilenameHash::Enabled(false) => String::new(),
        FilenameHash::Template(template) if template.is_empty() => String::new(),
        FilenameHash::Template(template) => format!(".[{template}]"),
    }
}

/// Filename template for an emitted asset. Explicit `output.filename`
/// entries win; otherwise JS is only hashed in production client builds and
/// CSS only in production.
pub fn filename(output: &OutputConfig, kind: AssetKind, is_prod: bool, is_server: bool) -> String {
    if let Some(explicit) = output.filename.get(kind) {
        return explicit.to_string();
    }

    let hash = hash_segment(&output.filename_hash);
    match kind {
        AssetKind::Js => {
            let hash = if is_prod && !is_server { hash.as_str() } else { "" };
            format!("[name]{hash}.js")
        }
        AssetKind::Css => {
            let hash = if is_prod { hash.as_str() } else { "" };
            format!("[name]{hash}.css")
        }
        AssetKind::Svg => format!("[name]{hash}.svg"),
        AssetKind::Font | AssetKind::Image | AssetKind::Media => format!("[name]{hash}[ext]"),
    }
}
