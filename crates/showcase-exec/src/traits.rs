//! Trait definitions for the external collaborators of a site build.

use std::path::{Path, PathBuf};

/// Errors raised by an external collaborator.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Unexpected output from {program}: {message}")]
    Output { program: String, message: String },
}

/// Arguments for one compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    /// Build tags passed to the compiler (e.g. "example")
    pub tags: String,

    /// Minify the generated bundle
    pub minify: bool,

    /// Where the bundle is written
    pub output: PathBuf,

    /// Package path of the program entry point
    pub package: String,
}

/// Read-only access to source-control history.
pub trait SourceControl {
    /// All tag names, in listing order.
    fn list_tags(&self) -> Result<Vec<String>, ExecError>;

    /// Unix commit time of the commit `rev` points to.
    fn commit_timestamp(&self, rev: &str) -> Result<i64, ExecError>;

    /// Contents of `path` as committed at `rev`.
    fn read_file_at_ref(&self, rev: &str, path: &str) -> Result<Vec<u8>, ExecError>;
}

/// Compiles one example program into a browser bundle.
pub trait Compiler {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    /// Run the compiler to completion.
    fn compile(&self, request: &CompileRequest) -> Result<(), ExecError>;
}

/// Recursive directory copy.
pub trait Copier {
    /// Copy the tree at `from` to `to`, preserving structure.
    fn copy_tree(&self, from: &Path, to: &Path) -> Result<(), ExecError>;
}
