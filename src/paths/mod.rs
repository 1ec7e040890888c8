//! Public path and asset prefix resolution

use crate::domain::{PublicPath, AUTO_PUBLIC_PATH, DEFAULT_ASSET_PREFIX};
use ::url::Url;

pub fn remove_leading_slash(s: &str) -> &str {
    s.trim_start_matches('/')
}

pub fn remove_trailing_slash(s: &str) -> &str {
    s.trim_end_matches('/')
}

pub fn add_trailing_slash(s: &str) -> String {
    if s.ends_with('/') {
        s.to_string()
    } else {
        format!("{s}/")
    }
}

/// Normalize a public path. `"auto"` is left alone: the bundler resolves it
/// at runtime and a slash would break that.
pub fn format_public_path(public_path: &str, with_slash: bool) -> String {
    if public_path == AUTO_PUBLIC_PATH {
        return public_path.to_string();
    }

    if with_slash {
        add_trailing_slash(public_path)
    } else {
        remove_trailing_slash(public_path).to_string()
    }
}

/// Public path configured on the bundler chain, or the default prefix when
/// it is unset or computed by a function.
pub fn public_path_from_chain(configured: Option<&PublicPath>, with_slash: bool) -> String {
    match configured {
        Some(PublicPath::Static(path)) => format_public_path(path, with_slash),
        _ => format_public_path(DEFAULT_ASSET_PREFIX, with_slash),
    }
}

/// Whether `url` parses as a complete URL (scheme and the rest).
pub fn can_parse(url: &str) -> bool {
    Url::parse(url).is_ok()
}

pub fn is_url(s: &str) -> bool {
    s.starts_with("http") || s.starts_with("//:")
}

pub fn create_virtual_module(content: &str) -> String {
    format!("data:text/javascript,{content}")
}

/// Prefix an emitted asset reference with the asset prefix.
///
/// Absolute URLs (including protocol-relative ones) are returned as-is, and
/// so is everything when the prefix is `"auto"`.
pub fn ensure_asset_prefix(url: &str, asset_prefix: &str) -> String {
    // Protocol-relative URLs are valid references but do not parse as URLs.
    if url.starts_with("//") {
        return url.to_string();
    }

    if can_parse(url) {
        return url.to_string();
    }

    if asset_prefix == AUTO_PUBLIC_PATH {
        return url.to_string();
    }

    if asset_prefix.starts_with("http") {
        if let Some(joined) = url_join(asset_prefix, url) {
            return joined;
        }
    }

    if asset_prefix.starts_with("//") {
        if let Some(joined) = url_join(&format!("https:{asset_prefix}"), url) {
            return joined.replacen("https:", "", 1);
        }
    }

    posix_join(&[asset_prefix, url])
}

fn url_join(base: &str, path: &str) -> Option<String> {
    let mut full = Url::parse(base).ok()?;
    let joined = posix_join(&[full.path(), path]);
    full.set_path(&joined);
    Some(full.to_string())
}

/// Join path segments with `/` and normalize, like POSIX `path.join`.
pub fn posix_join(parts: &[&str]) -> String {
    let joined = parts.iter().filter(|p| !p.is_empty()).copied().collect::<Vec<_>>().join("/");
    if joined.is_empty() {
        return ".".to_string();
    }
    posix_normalize(&joined)
}

/// Resolve `.`/`..` segments and collapse repeated slashes.
pub fn posix_normalize(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let absolute = path.starts_with('/');
    let trailing_slash = path.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let mut normalized = segments.join("/");
    if normalized.is_empty() {
        if absolute {
            return "/".to_string();
        }
        return if trailing_slash { "./".to_string() } else { ".".to_string() };
    }
    if trailing_slash {
        normalized.push('/');
    }
    if absolute {
        normalized.insert(0, '/');
    }
    normalized
}
