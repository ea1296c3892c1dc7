//! Reconciliation of the output directory with a fresh build.
//!
//! Generated pages and copied resources are removed before a build, while
//! everything else checked into the output directory (stylesheets, images,
//! editor backups) is kept.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use showcase_exec::{Copier, ExecError};
use walkdir::{DirEntry, WalkDir};

/// What to do with one entry of the output tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Keep the entry and descend into it
    Continue,
    /// Keep the entry and do not descend into it
    Skip,
    /// Remove the entry
    Delete,
    /// Remove the entry and everything below it without visiting
    DeleteTree,
}

/// Errors that can occur while reconciling the output tree.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Failed to walk output directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to inspect {path}: {source}")]
    Inspect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: ExecError,
    },
}

/// Paths removed by a reconciliation pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClearReport {
    pub removed: Vec<PathBuf>,
}

/// Editor backup files end in `~`.
pub fn is_backup_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with('~'))
}

/// Generated pages end in `.html`.
pub fn is_generated_html(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(".html"))
}

/// The site output directory and its fixed sub-layout.
#[derive(Debug, Clone)]
pub struct OutputTree {
    root: PathBuf,
}

impl OutputTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_page(&self) -> PathBuf {
        self.root.join("index.html")
    }

    pub fn examples_dir(&self) -> PathBuf {
        self.root.join("examples")
    }

    pub fn resources_dir(&self) -> PathBuf {
        self.examples_dir().join("_resources")
    }

    /// Images copied in with the shared resources.
    pub fn shared_images_dir(&self) -> PathBuf {
        self.resources_dir().join("images")
    }

    pub fn example_page(&self, name: &str) -> PathBuf {
        self.examples_dir().join(format!("{name}.html"))
    }

    pub fn example_content(&self, name: &str) -> PathBuf {
        self.examples_dir().join(format!("{name}.content.html"))
    }

    pub fn example_bundle(&self, name: &str) -> PathBuf {
        self.examples_dir().join(format!("{name}.js"))
    }

    /// Decide what `clear` does with `path`.
    pub fn classify(&self, path: &Path) -> Visit {
        if is_backup_file(path) {
            Visit::Skip
        } else if is_generated_html(path) {
            Visit::Delete
        } else if path == self.shared_images_dir() {
            Visit::DeleteTree
        } else {
            Visit::Continue
        }
    }

    /// Walk the tree, applying the action `visit` returns for each entry.
    ///
    /// The root itself is visited first. A missing root is an empty tree.
    pub fn walk<F>(&self, mut visit: F) -> Result<ClearReport, ReconcileError>
    where
        F: FnMut(&DirEntry) -> Visit,
    {
        let mut report = ClearReport::default();
        match fs::symlink_metadata(&self.root) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Output directory {} does not exist", self.root.display());
                return Ok(report);
            }
            Err(source) => {
                return Err(ReconcileError::Inspect {
                    path: self.root.clone(),
                    source,
                })
            }
        }

        let mut entries = WalkDir::new(&self.root).into_iter();
        while let Some(entry) = entries.next() {
            let entry = entry?;
            let is_dir = entry.file_type().is_dir();

            match visit(&entry) {
                Visit::Continue => continue,
                Visit::Skip => {}
                Visit::Delete => {
                    remove(entry.path(), is_dir, false)?;
                    report.removed.push(entry.path().to_path_buf());
                }
                Visit::DeleteTree => {
                    remove(entry.path(), is_dir, true)?;
                    report.removed.push(entry.path().to_path_buf());
                }
            }

            // Only prune directories: on a file this would skip its siblings.
            if is_dir {
                entries.skip_current_dir();
            }
        }

        Ok(report)
    }

    /// Remove generated pages and copied images from a previous build.
    pub fn clear(&self) -> Result<ClearReport, ReconcileError> {
        let report = self.walk(|entry| self.classify(entry.path()))?;
        for path in &report.removed {
            tracing::debug!("Removed {}", path.display());
        }
        tracing::info!("Cleared {} stale paths", report.removed.len());
        Ok(report)
    }

    /// Recreate the examples directory empty.
    pub fn create_examples_dir(&self) -> Result<(), ReconcileError> {
        let dir = self.examples_dir();

        match fs::remove_dir_all(&dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(ReconcileError::Remove { path: dir, source }),
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder
            .create(&dir)
            .map_err(|source| ReconcileError::Create { path: dir, source })
    }

    /// Copy the shared example resources into the examples directory.
    pub fn copy_resources(&self, copier: &dyn Copier, from: &Path) -> Result<(), ReconcileError> {
        let to = self.resources_dir();
        tracing::info!("Copying resources from {}", from.display());

        copier
            .copy_tree(from, &to)
            .map_err(|source| ReconcileError::Copy {
                from: from.to_path_buf(),
                to,
                source,
            })
    }
}

fn remove(path: &Path, is_dir: bool, recursive: bool) -> Result<(), ReconcileError> {
    let result = match (is_dir, recursive) {
        (true, true) => fs::remove_dir_all(path),
        (true, false) => fs::remove_dir(path),
        (false, _) => fs::remove_file(path),
    };
    result.map_err(|source| ReconcileError::Remove {
        path: path.to_path_buf(),
        source,
    })
}
