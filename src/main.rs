//! bundle-helpers: stats summaries and asset URL helpers from the command line

use anyhow::Result;

fn main() -> Result<()> {
    bundle_helpers::cli::run()
}
