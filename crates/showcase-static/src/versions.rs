//! Resolution of the stable and development version strings.

use showcase_exec::{ExecError, SourceControl};

/// Version strings shown on the home page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionInfo {
    /// Version of the most recently committed release tag, or empty
    pub stable: String,

    /// Contents of the version marker on the development branch
    pub dev: String,
}

impl VersionInfo {
    /// Human readable form, e.g. `v1.3.0 (dev: v1.4.0-alpha)`.
    pub fn display(&self) -> String {
        format!("v{} (dev: v{})", self.stable, self.dev)
    }
}

/// Where the development version is recorded.
#[derive(Debug, Clone)]
pub struct VersionSource {
    /// Branch reference the marker is read from
    pub branch: String,

    /// Repository path of the marker file
    pub marker_file: String,
}

impl Default for VersionSource {
    fn default() -> Self {
        Self {
            branch: "master".to_string(),
            marker_file: "version.txt".to_string(),
        }
    }
}

/// Errors that can occur while resolving versions.
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    #[error("Failed to list tags: {0}")]
    ListTags(#[source] ExecError),

    #[error("Failed to read commit time of {tag}: {source}")]
    Timestamp {
        tag: String,
        #[source]
        source: ExecError,
    },

    #[error("Failed to read {path} at {rev}: {source}")]
    Marker {
        rev: String,
        path: String,
        #[source]
        source: ExecError,
    },
}

/// Returns the version carried by a release tag.
///
/// A release tag is a literal `v` followed by at least one character; the
/// characters after the `v` are the version.
pub fn stable_tag_version(tag: &str) -> Option<&str> {
    tag.strip_prefix('v').filter(|rest| !rest.is_empty())
}

/// Computes version strings from source-control history.
pub struct VersionResolver<'a> {
    scm: &'a dyn SourceControl,
    source: VersionSource,
}

impl<'a> VersionResolver<'a> {
    pub fn new(scm: &'a dyn SourceControl, source: VersionSource) -> Self {
        Self { scm, source }
    }

    /// Resolve both version strings.
    pub fn resolve(&self) -> Result<VersionInfo, VersionError> {
        let info = VersionInfo {
            stable: self.resolve_stable()?,
            dev: self.resolve_dev()?,
        };
        tracing::info!("Resolved versions: {}", info.display());
        Ok(info)
    }

    /// The release tag with the latest commit time, without its `v`.
    ///
    /// Ties go to the tag listed first. Returns an empty string when no tag
    /// looks like a release.
    pub fn resolve_stable(&self) -> Result<String, VersionError> {
        let tags = self.scm.list_tags().map_err(VersionError::ListTags)?;

        let mut latest: Option<(i64, &str)> = None;
        for tag in &tags {
            let Some(version) = stable_tag_version(tag) else {
                continue;
            };
            let time = self
                .scm
                .commit_timestamp(tag)
                .map_err(|source| VersionError::Timestamp {
                    tag: tag.clone(),
                    source,
                })?;

            if latest.map_or(true, |(seen, _)| time > seen) {
                latest = Some((time, version));
            }
        }

        match latest {
            Some((_, version)) => Ok(version.to_string()),
            None => {
                tracing::warn!("No release tags found; stable version is empty");
                Ok(String::new())
            }
        }
    }

    /// The trimmed contents of the version marker on the configured branch.
    pub fn resolve_dev(&self) -> Result<String, VersionError> {
        let marker_error = |source: ExecError| VersionError::Marker {
            rev: self.source.branch.clone(),
            path: self.source.marker_file.clone(),
            source,
        };

        let bytes = self
            .scm
            .read_file_at_ref(&self.source.branch, &self.source.marker_file)
            .map_err(marker_error)?;
        let text = String::from_utf8(bytes).map_err(|e| {
            marker_error(ExecError::Output {
                program: "git".to_string(),
                message: format!("marker is not UTF-8: {e}"),
            })
        })?;
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use showcase_exec::fake::FakeRepo;

    fn stable(repo: &FakeRepo) -> String {
        VersionResolver::new(repo, VersionSource::default())
            .resolve_stable()
            .unwrap()
    }

    #[test]
    fn picks_latest_commit_not_latest_name() {
        let repo = FakeRepo::new()
            .with_tag("v1.0", 100)
            .with_tag("v2.0", 200)
            .with_tag("v0.9", 50);

        assert_eq!(stable(&repo), "2.0");
    }

    #[test]
    fn ties_keep_first_listed() {
        let repo = FakeRepo::new()
            .with_tag("v1.1", 300)
            .with_tag("v1.0", 100)
            .with_tag("v1.2", 300);

        assert_eq!(stable(&repo), "1.1");
    }

    #[test]
    fn no_release_tags_is_empty_not_error() {
        let repo = FakeRepo::new()
            .with_tag("experimental", 500)
            .with_tag("v", 600);

        assert_eq!(stable(&repo), "");
    }

    #[test]
    fn ignores_non_release_tags_when_comparing() {
        let repo = FakeRepo::new()
            .with_tag("v1.0", 100)
            .with_tag("nightly", 900);

        assert_eq!(stable(&repo), "1.0");
    }

    #[test]
    fn first_release_tag_wins_even_at_epoch() {
        let repo = FakeRepo::new().with_tag("v0.1", 0);

        assert_eq!(stable(&repo), "0.1");
    }

    #[test]
    fn listing_failure_is_fatal() {
        let repo = FakeRepo::new().failing();

        let err = VersionResolver::new(&repo, VersionSource::default())
            .resolve_stable()
            .unwrap_err();

        assert!(matches!(err, VersionError::ListTags(_)));
    }

    #[test]
    fn timestamp_failure_is_fatal() {
        let repo = FakeRepo::new()
            .with_tag("v1.0", 100)
            .with_dangling_tag("v1.1");

        let err = VersionResolver::new(&repo, VersionSource::default())
            .resolve_stable()
            .unwrap_err();

        assert!(matches!(err, VersionError::Timestamp { ref tag, .. } if tag == "v1.1"));
    }

    #[test]
    fn dev_version_is_trimmed_marker() {
        let repo = FakeRepo::new().with_file("master", "version.txt", "  1.4.0-alpha\n");

        let dev = VersionResolver::new(&repo, VersionSource::default())
            .resolve_dev()
            .unwrap();

        assert_eq!(dev, "1.4.0-alpha");
    }

    #[test]
    fn dev_version_honours_configured_source() {
        let repo = FakeRepo::new().with_file("main", "VERSION", "2.0.0");
        let source = VersionSource {
            branch: "main".to_string(),
            marker_file: "VERSION".to_string(),
        };

        let info = VersionResolver::new(&repo, source).resolve().unwrap();

        assert_eq!(
            info,
            VersionInfo {
                stable: String::new(),
                dev: "2.0.0".to_string(),
            }
        );
    }

    #[test]
    fn missing_marker_is_fatal() {
        let repo = FakeRepo::new();

        let err = VersionResolver::new(&repo, VersionSource::default())
            .resolve_dev()
            .unwrap_err();

        assert!(matches!(err, VersionError::Marker { .. }));
    }

    #[test]
    fn non_utf8_marker_is_fatal() {
        let repo = FakeRepo::new().with_file("master", "version.txt", vec![0xff, 0xfe, b'\n']);

        let err = VersionResolver::new(&repo, VersionSource::default())
            .resolve_dev()
            .unwrap_err();

        match err {
            VersionError::Marker { rev, path, source } => {
                assert_eq!(rev, "master");
                assert_eq!(path, "version.txt");
                assert!(matches!(source, ExecError::Output { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn recognises_release_tags() {
        assert_eq!(stable_tag_version("v1.2.3"), Some("1.2.3"));
        assert_eq!(stable_tag_version("vNext"), Some("Next"));
        assert_eq!(stable_tag_version("v"), None);
        assert_eq!(stable_tag_version("1.2.3"), None);
    }

    #[test]
    fn displays_both_versions() {
        let info = VersionInfo {
            stable: "1.3.0".to_string(),
            dev: "1.4.0".to_string(),
        };

        assert_eq!(info.display(), "v1.3.0 (dev: v1.4.0)");
    }
}
