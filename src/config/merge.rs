//! CLI argument merging with config

use crate::domain::{BuildMode, Config};

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub mode: Option<BuildMode>,
    pub asset_prefix: Option<String>,
    pub public_path: Option<String>,
    pub verbose: Option<bool>,
}

pub fn merge_cli_with_config(mut base_config: Config, cli: CliOverrides) -> Config {
    if let Some(mode) = cli.mode {
        base_config.mode = mode;
    }
    if let Some(asset_prefix) = cli.asset_prefix {
        base_config.asset_prefix = asset_prefix;
    }
    if let Some(public_path) = cli.public_path {
        base_config.public_path = Some(public_path);
    }
    if let Some(verbose) = cli.verbose {
        base_config.verbose = verbose;
    }

    base_config
}
