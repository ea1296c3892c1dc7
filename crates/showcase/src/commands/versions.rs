//! Version report command.

use anyhow::Result;

use crate::config::ConfigFile;

/// Run the versions command.
pub fn run(config: &ConfigFile) -> Result<()> {
    let versions = super::resolve_versions(config)?;
    println!("{}", versions.display());
    Ok(())
}
