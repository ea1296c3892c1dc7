//! In-memory collaborators for exercising a build without git, a compiler or cp.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::traits::{CompileRequest, Compiler, Copier, ExecError, SourceControl};

/// A repository described entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct FakeRepo {
    tags: Vec<String>,
    timestamps: HashMap<String, i64>,
    files: HashMap<(String, String), Vec<u8>>,
    fail_listing: bool,
}

impl FakeRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag pointing at a commit made at `timestamp`.
    pub fn with_tag(mut self, name: &str, timestamp: i64) -> Self {
        self.tags.push(name.to_string());
        self.timestamps.insert(name.to_string(), timestamp);
        self
    }

    /// Add a tag whose commit cannot be resolved.
    pub fn with_dangling_tag(mut self, name: &str) -> Self {
        self.tags.push(name.to_string());
        self
    }

    /// Commit `contents` at `path` on `rev`.
    pub fn with_file(mut self, rev: &str, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.files
            .insert((rev.to_string(), path.to_string()), contents.into());
        self
    }

    /// Make `list_tags` fail as if git could not run.
    pub fn failing(mut self) -> Self {
        self.fail_listing = true;
        self
    }
}

impl SourceControl for FakeRepo {
    fn list_tags(&self) -> Result<Vec<String>, ExecError> {
        if self.fail_listing {
            return Err(git_fatal("not a git repository"));
        }
        Ok(self.tags.clone())
    }

    fn commit_timestamp(&self, rev: &str) -> Result<i64, ExecError> {
        self.timestamps
            .get(rev)
            .copied()
            .ok_or_else(|| git_fatal(&format!("bad revision '{rev}'")))
    }

    fn read_file_at_ref(&self, rev: &str, path: &str) -> Result<Vec<u8>, ExecError> {
        self.files
            .get(&(rev.to_string(), path.to_string()))
            .cloned()
            .ok_or_else(|| git_fatal(&format!("path '{path}' does not exist in '{rev}'")))
    }
}

fn git_fatal(message: &str) -> ExecError {
    ExecError::Failed {
        program: "git".to_string(),
        status: "exit status: 128".to_string(),
        stderr: format!("fatal: {message}"),
    }
}

/// Records compile requests and writes a placeholder bundle for each.
#[derive(Debug, Default)]
pub struct RecordingCompiler {
    requests: RefCell<Vec<CompileRequest>>,
    fail_on: Option<String>,
}

impl RecordingCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any request whose package path ends with `/<name>`.
    pub fn failing_on(name: &str) -> Self {
        Self {
            requests: RefCell::default(),
            fail_on: Some(format!("/{name}")),
        }
    }

    /// Requests seen so far, in call order.
    pub fn requests(&self) -> Vec<CompileRequest> {
        self.requests.borrow().clone()
    }
}

impl Compiler for RecordingCompiler {
    fn name(&self) -> &str {
        "recording-compiler"
    }

    fn compile(&self, request: &CompileRequest) -> Result<(), ExecError> {
        self.requests.borrow_mut().push(request.clone());

        if let Some(suffix) = &self.fail_on {
            if request.package.ends_with(suffix.as_str()) {
                return Err(ExecError::Failed {
                    program: self.name().to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: format!("cannot compile {}", request.package),
                });
            }
        }

        fs::write(&request.output, "// bundle\n").map_err(|e| ExecError::Output {
            program: self.name().to_string(),
            message: format!("cannot write {}: {e}", request.output.display()),
        })
    }
}

/// Records copy requests without touching the filesystem.
#[derive(Debug, Default)]
pub struct RecordingCopier {
    copies: RefCell<Vec<(PathBuf, PathBuf)>>,
    fail: bool,
}

impl RecordingCopier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every request and fail it as `cp` would.
    pub fn failing() -> Self {
        Self {
            copies: RefCell::default(),
            fail: true,
        }
    }

    pub fn copies(&self) -> Vec<(PathBuf, PathBuf)> {
        self.copies.borrow().clone()
    }
}

impl Copier for RecordingCopier {
    fn copy_tree(&self, from: &Path, to: &Path) -> Result<(), ExecError> {
        self.copies
            .borrow_mut()
            .push((from.to_path_buf(), to.to_path_buf()));

        if self.fail {
            return Err(ExecError::Failed {
                program: "cp".to_string(),
                status: "exit status: 1".to_string(),
                stderr: format!("cp: cannot stat '{}'", from.display()),
            });
        }
        Ok(())
    }
}
