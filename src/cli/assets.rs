//! Asset URL, public path and filename commands

use anyhow::Result;
use clap::Args;

use crate::domain::{AssetKind, Config, PublicPath};
use crate::paths::{ensure_asset_prefix, public_path_from_chain};
use crate::utils::{filename, is_web_target};

#[derive(Args)]
pub struct AssetUrlArgs {
    /// Asset reference to resolve
    #[arg(value_name = "URL")]
    pub url: String,

    /// Asset prefix (defaults to `asset_prefix` from config)
    #[arg(short, long, value_name = "PREFIX")]
    pub prefix: Option<String>,
}

#[derive(Args)]
pub struct PublicPathArgs {
    /// Public path value (defaults to `public_path` from config)
    #[arg(value_name = "VALUE")]
    pub value: Option<String>,

    /// Strip trailing slashes instead of adding one
    #[arg(long)]
    pub no_slash: bool,
}

#[derive(Args)]
pub struct FilenameArgs {
    /// Asset kind: js, css, svg, font, image, or media
    #[arg(value_name = "KIND")]
    pub kind: AssetKind,

    /// Template for a server-side bundle (implied when no target is a web target)
    #[arg(long)]
    pub server: bool,
}

// `--prefix` and `VALUE` reach these through `CliOverrides`.

pub fn run_asset_url(args: AssetUrlArgs, config: &Config) -> Result<()> {
    println!("{}", ensure_asset_prefix(&args.url, &config.asset_prefix));
    Ok(())
}

pub fn run_public_path(args: PublicPathArgs, config: &Config) -> Result<()> {
    let configured = config.public_path.as_deref().map(PublicPath::from);
    println!("{}", public_path_from_chain(configured.as_ref(), !args.no_slash));
    Ok(())
}

pub fn run_filename(args: FilenameArgs, config: &Config) -> Result<()> {
    let is_server = args.server || !is_web_target(&config.targets());
    println!("{}", filename(&config.output, args.kind, config.mode.is_prod(), is_server));
    Ok(())
}
