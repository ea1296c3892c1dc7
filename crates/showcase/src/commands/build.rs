//! Full site build command.

use std::path::PathBuf;

use anyhow::Result;
use showcase_exec::{CpCommand, GopherJs};
use showcase_static::{Catalog, StaticBuilder};

use crate::config::ConfigFile;

/// Run the build command.
pub fn run(config: &ConfigFile, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building site...");

    let context = super::build_context(config)?;

    let mut build_config = config.build_config();
    if let Some(output) = output {
        build_config.output_dir = output;
    }
    if let Some(minify) = minify {
        build_config.minify = minify;
    }

    let catalog = Catalog::builtin();
    let compiler = GopherJs::new(config.compiler.program.as_str());

    let result = StaticBuilder::new(build_config, &context, &catalog, &compiler, &CpCommand).build()?;

    tracing::info!(
        "Built {} pages and {} examples in {}ms",
        result.pages,
        result.examples,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
