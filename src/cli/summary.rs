//! Summary command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::domain::{Config, Level};
use crate::stats::{apply_stats_option, extract_errors, format_compilation_summary, load_stats};

#[derive(Args)]
pub struct SummaryArgs {
    /// Stats JSON written by the bundler (`stats.toJson()`)
    #[arg(value_name = "STATS_JSON")]
    pub stats: PathBuf,
}

pub fn run(args: SummaryArgs, config: &Config) -> Result<()> {
    let mut stats = load_stats(&args.stats)?;
    apply_stats_option(&mut stats, config.stats.as_ref());
    let summary = format_compilation_summary(&stats, config.verbose);

    match (summary.level, summary.message) {
        (Some(Level::Error), Some(message)) => {
            eprintln!("{message}");
            let count = extract_errors(&stats).len().max(stats.errors_count);
            anyhow::bail!("Compilation failed with {count} error(s)");
        }
        (_, Some(message)) => {
            println!("{message}");
            Ok(())
        }
        (_, None) => {
            println!("Compiled successfully");
            Ok(())
        }
    }
}
