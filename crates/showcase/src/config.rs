//! Configuration file structure (site.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use showcase_static::{BuildConfig, VersionSource};

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub versions: VersionsConfig,
    #[serde(default)]
    pub compiler: CompilerConfig,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_copyright_holder")]
    pub copyright_holder: String,
    /// License whose first `Copyright <year>` line dates the site
    #[serde(default = "default_license_file")]
    pub license_file: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,
    #[serde(default = "default_examples_src")]
    pub examples_src: PathBuf,
    #[serde(default = "default_resources_src")]
    pub resources_src: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct VersionsConfig {
    #[serde(default = "default_repo_dir")]
    pub repo_dir: PathBuf,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default = "default_marker_file")]
    pub marker_file: String,
}

#[derive(Debug, Deserialize)]
pub struct CompilerConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_package_prefix")]
    pub package_prefix: String,
    #[serde(default = "default_minify")]
    pub minify: bool,
}

fn default_url() -> String {
    "https://hajimehoshi.github.io/ebiten/".to_string()
}
fn default_copyright_holder() -> String {
    "Hajime Hoshi".to_string()
}
fn default_license_file() -> PathBuf {
    PathBuf::from("../LICENSE")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("public")
}
fn default_templates_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_examples_src() -> PathBuf {
    PathBuf::from("../examples")
}
fn default_resources_src() -> PathBuf {
    PathBuf::from("../examples/_resources")
}
fn default_repo_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_branch() -> String {
    "master".to_string()
}
fn default_marker_file() -> String {
    "version.txt".to_string()
}
fn default_program() -> String {
    "gopherjs".to_string()
}
fn default_package_prefix() -> String {
    "github.com/hajimehoshi/ebiten/examples".to_string()
}
fn default_minify() -> bool {
    true
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            copyright_holder: default_copyright_holder(),
            license_file: default_license_file(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            templates_dir: default_templates_dir(),
            examples_src: default_examples_src(),
            resources_src: default_resources_src(),
        }
    }
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self {
            repo_dir: default_repo_dir(),
            branch: default_branch(),
            marker_file: default_marker_file(),
        }
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            package_prefix: default_package_prefix(),
            minify: default_minify(),
        }
    }
}

impl ConfigFile {
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig {
            output_dir: self.paths.output_dir.clone(),
            templates_dir: self.paths.templates_dir.clone(),
            examples_src: self.paths.examples_src.clone(),
            resources_src: self.paths.resources_src.clone(),
            package_prefix: self.compiler.package_prefix.clone(),
            minify: self.compiler.minify,
        }
    }

    pub fn version_source(&self) -> VersionSource {
        VersionSource {
            branch: self.versions.branch.clone(),
            marker_file: self.versions.marker_file.clone(),
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    tracing::debug!("No config at {}; using defaults", path.display());
    Ok(ConfigFile::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = load_config(&temp.path().join("site.toml")).unwrap();

        assert_eq!(config.paths.output_dir, PathBuf::from("public"));
        assert_eq!(config.versions.branch, "master");
        assert_eq!(config.compiler.program, "gopherjs");
        assert!(config.compiler.minify);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(
            &path,
            "[paths]\noutput_dir = \"dist\"\n\n[compiler]\nminify = false\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        let build = config.build_config();

        assert_eq!(build.output_dir, PathBuf::from("dist"));
        assert_eq!(build.templates_dir, PathBuf::from("."));
        assert!(!build.minify);
        assert_eq!(config.site.copyright_holder, "Hajime Hoshi");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(&path, "[paths\noutput_dir = ").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn version_source_follows_config() {
        let config: ConfigFile =
            toml::from_str("[versions]\nbranch = \"main\"\nmarker_file = \"VERSION\"\n").unwrap();

        let source = config.version_source();

        assert_eq!(source.branch, "main");
        assert_eq!(source.marker_file, "VERSION");
    }
}
