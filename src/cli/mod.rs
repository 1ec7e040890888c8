//! Command-line interface for bundle-helpers
//!
//! Provides `summary`, `asset-url`, `public-path`, `filename` and
//! `completions` subcommands.

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::{BuildMode, Config};

mod assets;
mod summary;

/// Stats formatting and asset URL helpers for web build tooling
#[derive(Parser)]
#[command(name = "bundle-helpers")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(Args)]
struct GlobalArgs {
    /// Enable verbose logging and verbose stats messages
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (bundle-helpers.toml or .bundle-helpers.yml)
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Build mode: development, production, or none
    #[arg(long, value_name = "MODE", global = true)]
    mode: Option<BuildMode>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize errors and warnings from a stats JSON file
    Summary(summary::SummaryArgs),

    /// Prefix an asset URL with the configured asset prefix
    AssetUrl(assets::AssetUrlArgs),

    /// Normalize a public path
    PublicPath(assets::PublicPathArgs),

    /// Print the output filename template for an asset kind
    Filename(assets::FilenameArgs),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.global.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "bundle-helpers",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        Commands::Summary(args) => {
            let config = resolve_config(&cli.global, CliOverrides::default())?;
            summary::run(args, &config)
        }
        Commands::AssetUrl(args) => {
            let overrides =
                CliOverrides { asset_prefix: args.prefix.clone(), ..CliOverrides::default() };
            let config = resolve_config(&cli.global, overrides)?;
            assets::run_asset_url(args, &config)
        }
        Commands::PublicPath(args) => {
            let overrides =
                CliOverrides { public_path: args.value.clone(), ..CliOverrides::default() };
            let config = resolve_config(&cli.global, overrides)?;
            assets::run_public_path(args, &config)
        }
        Commands::Filename(args) => {
            let config = resolve_config(&cli.global, CliOverrides::default())?;
            assets::run_filename(args, &config)
        }
    }
}

fn resolve_config(global: &GlobalArgs, overrides: CliOverrides) -> Result<Config> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let file_config = load_config(&cwd, global.config.as_deref())?;

    let overrides = CliOverrides {
        mode: global.mode,
        verbose: if global.verbose { Some(true) } else { None },
        ..overrides
    };
    let config = merge_cli_with_config(file_config, overrides);
    tracing::debug!(mode = %config.mode, asset_prefix = %config.asset_prefix, "resolved config");
    Ok(config)
}
