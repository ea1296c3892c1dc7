//! Static site builder.

use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use showcase_exec::{Compiler, Copier, ExecError};

use crate::catalog::{Catalog, SourceTree};
use crate::compile::ExampleBuilder;
use crate::context::BuildContext;
use crate::pages::{PageError, PageRenderer};
use crate::reconcile::{OutputTree, ReconcileError};
use crate::templates::TemplateEngine;

/// Configuration for building the site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Output directory
    pub output_dir: PathBuf,

    /// Directory holding the page templates
    pub templates_dir: PathBuf,

    /// Directory with one source directory per example
    pub examples_src: PathBuf,

    /// Shared example resources copied next to the bundles
    pub resources_src: PathBuf,

    /// Package path prefix of the example programs
    pub package_prefix: String,

    /// Minify compiled bundles
    pub minify: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("public"),
            templates_dir: PathBuf::from("."),
            examples_src: PathBuf::from("../examples"),
            resources_src: PathBuf::from("../examples/_resources"),
            package_prefix: "github.com/hajimehoshi/ebiten/examples".to_string(),
            minify: true,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages written, fragments included
    pub pages: usize,

    /// Number of examples compiled
    pub examples: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Output(#[from] ReconcileError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error("Failed to compile example {example}: {source}")]
    Compile {
        example: String,
        #[source]
        source: ExecError,
    },
}

/// Steps of a build, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Clear,
    RenderHome,
    ResetExamplesDir,
    CopyResources,
    RenderContent,
    Build,
    RenderFullPage,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Clear => "clear",
            Stage::RenderHome => "render home",
            Stage::ResetExamplesDir => "reset examples dir",
            Stage::CopyResources => "copy resources",
            Stage::RenderContent => "render content",
            Stage::Build => "build",
            Stage::RenderFullPage => "render full page",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Static site builder.
///
/// Runs every stage once, in order, and stops at the first error. Files
/// written before a failure stay on disk.
pub struct StaticBuilder<'a> {
    config: BuildConfig,
    context: &'a BuildContext,
    catalog: &'a Catalog,
    compiler: &'a dyn Compiler,
    copier: &'a dyn Copier,
}

impl<'a> StaticBuilder<'a> {
    /// Create a new static builder.
    pub fn new(
        config: BuildConfig,
        context: &'a BuildContext,
        catalog: &'a Catalog,
        compiler: &'a dyn Compiler,
        copier: &'a dyn Copier,
    ) -> Self {
        Self {
            config,
            context,
            catalog,
            compiler,
            copier,
        }
    }

    /// Build the site.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let output = OutputTree::new(&self.config.output_dir);
        let renderer = PageRenderer::new(
            TemplateEngine::new(&self.config.templates_dir),
            SourceTree::new(&self.config.examples_src),
            self.context,
            &output,
        );
        let examples = ExampleBuilder::new(
            self.compiler,
            &output,
            self.config.package_prefix.as_str(),
            self.config.minify,
        );

        let mut pages = 0;
        let mut built = 0;

        enter(Stage::Clear, None);
        output.clear()?;

        enter(Stage::RenderHome, None);
        renderer.write_home(self.catalog)?;
        pages += 1;

        enter(Stage::ResetExamplesDir, None);
        output.create_examples_dir()?;

        enter(Stage::CopyResources, None);
        output.copy_resources(self.copier, &self.config.resources_src)?;

        for example in self.catalog.iter() {
            let name = example.name.as_str();

            enter(Stage::RenderContent, Some(name));
            renderer.write_example_content(example)?;
            pages += 1;

            enter(Stage::Build, Some(name));
            examples
                .build(example)
                .map_err(|source| BuildError::Compile {
                    example: example.name.clone(),
                    source,
                })?;
            built += 1;

            enter(Stage::RenderFullPage, Some(name));
            renderer.write_example_page(example)?;
            pages += 1;
        }

        enter(Stage::Done, None);

        Ok(BuildResult {
            pages,
            examples: built,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }
}

fn enter(stage: Stage, example: Option<&str>) {
    match example {
        Some(name) => tracing::debug!("{stage}: {name}"),
        None => tracing::info!("Stage: {stage}"),
    }
}
