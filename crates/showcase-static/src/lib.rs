//! Static site builder for the example gallery.
//!
//! Builds the project home page and one page, content fragment and compiled
//! bundle per example into an output directory.

pub mod builder;
pub mod catalog;
pub mod comment;
pub mod compile;
pub mod context;
pub mod pages;
pub mod reconcile;
pub mod templates;
pub mod versions;

pub use builder::{BuildConfig, BuildError, BuildResult, Stage, StaticBuilder};
pub use catalog::{Catalog, Example, SourceTree};
pub use context::BuildContext;
pub use reconcile::{ClearReport, OutputTree, Visit};
pub use versions::{VersionError, VersionInfo, VersionResolver, VersionSource};
