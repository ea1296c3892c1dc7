//! Output cleanup command.

use std::path::PathBuf;

use anyhow::Result;
use showcase_static::OutputTree;

use crate::config::ConfigFile;

/// Run the clean command.
pub fn run(config: &ConfigFile, output: Option<PathBuf>) -> Result<()> {
    let root = output.unwrap_or_else(|| config.paths.output_dir.clone());

    let report = OutputTree::new(root).clear()?;

    tracing::info!("Removed {} generated paths", report.removed.len());

    Ok(())
}
