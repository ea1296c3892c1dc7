pub mod build;
pub mod clean;
pub mod versions;

use std::fs;

use anyhow::{Context, Result};
use showcase_exec::GitCli;
use showcase_static::context::{copyright_notice, license_year};
use showcase_static::{BuildContext, VersionInfo, VersionResolver};

use crate::config::ConfigFile;

/// Resolve versions from the configured repository.
fn resolve_versions(config: &ConfigFile) -> Result<VersionInfo> {
    let git = GitCli::new(&config.versions.repo_dir);
    let versions = VersionResolver::new(&git, config.version_source())
        .resolve()
        .context("Failed to resolve versions")?;
    Ok(versions)
}

/// Copyright line dated by the configured license file.
fn copyright(config: &ConfigFile) -> Result<String> {
    let path = &config.site.license_file;
    let license = fs::read_to_string(path)
        .with_context(|| format!("Failed to read license {}", path.display()))?;
    let year = license_year(&license)
        .with_context(|| format!("No copyright year in {}", path.display()))?;
    Ok(copyright_notice(year, &config.site.copyright_holder))
}

/// Everything fixed for the duration of a build.
fn build_context(config: &ConfigFile) -> Result<BuildContext> {
    Ok(BuildContext::new(
        config.site.url.as_str(),
        copyright(config)?,
        resolve_versions(config)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copyright_is_dated_by_license() {
        let temp = tempdir().unwrap();
        let license = temp.path().join("LICENSE");
        fs::write(&license, "Copyright 2014 Hajime Hoshi\n\nApache License").unwrap();

        let mut config = ConfigFile::default();
        config.site.license_file = license;

        assert_eq!(copyright(&config).unwrap(), "© 2014 Hajime Hoshi");
    }

    #[test]
    fn license_without_year_is_an_error() {
        let temp = tempdir().unwrap();
        let license = temp.path().join("LICENSE");
        fs::write(&license, "All rights reserved").unwrap();

        let mut config = ConfigFile::default();
        config.site.license_file = license;

        assert!(copyright(&config).is_err());
    }
}
