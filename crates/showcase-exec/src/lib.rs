//! External collaborators for the showcase site build.
//!
//! Source control, the example compiler and the resource copier are modelled as
//! traits with a process-backed implementation and an in-memory fake.

pub mod compiler;
#[cfg(any(test, feature = "testing"))]
pub mod fake;
pub mod git;
pub mod process;
pub mod traits;

pub use compiler::{CpCommand, GopherJs};
pub use git::GitCli;
pub use process::execute;
pub use traits::{CompileRequest, Compiler, Copier, ExecError, SourceControl};
