//! Configuration loading
//!
//! Layers, lowest to highest: built-in defaults, the first config file found
//! (or the explicit `--config` file), then `BUNDLE_HELPERS_*` environment
//! variables. CLI flags are merged on top by [`merge_cli_with_config`].

use crate::domain::Config;
use crate::error::{HelperError, Result};
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};

mod merge;

pub use merge::{merge_cli_with_config, CliOverrides};

/// File names looked up under the project root, in priority order.
pub const CONFIG_FILE_NAMES: &[&str] =
    &["bundle-helpers.toml", ".bundle-helpers.toml", ".bundle-helpers.yml", ".bundle-helpers.yaml"];

pub const ENV_PREFIX: &str = "BUNDLE_HELPERS_";

pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    let file = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(HelperError::MissingConfig(path.to_path_buf()));
            }
            Some(path.to_path_buf())
        }
        None => discover_config(root),
    };

    if let Some(path) = file {
        tracing::debug!(path = %path.display(), "loading config file");
        figment = merge_config_file(figment, &path)?;
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
    figment.extract().map_err(|err| HelperError::Config(Box::new(err)))
}

pub fn discover_config(root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES.iter().map(|name| root.join(name)).find(|candidate| candidate.is_file())
}

fn merge_config_file(figment: Figment, path: &Path) -> Result<Figment> {
    let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("toml") => Ok(figment.merge(Toml::file(path))),
        Some("yml" | "yaml") => Ok(figment.merge(Yaml::file(path))),
        _ => Err(HelperError::UnsupportedConfig(path.to_path_buf())),
    }
}
