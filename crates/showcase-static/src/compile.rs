//! Compilation of example programs into browser bundles.

use showcase_exec::{CompileRequest, Compiler, ExecError};

use crate::catalog::Example;
use crate::reconcile::OutputTree;

/// Build tag that switches example programs into gallery mode.
pub const EXAMPLE_BUILD_TAG: &str = "example";

/// Runs the compiler for each example.
pub struct ExampleBuilder<'a> {
    compiler: &'a dyn Compiler,
    output: &'a OutputTree,
    package_prefix: String,
    minify: bool,
}

impl<'a> ExampleBuilder<'a> {
    pub fn new(
        compiler: &'a dyn Compiler,
        output: &'a OutputTree,
        package_prefix: impl Into<String>,
        minify: bool,
    ) -> Self {
        Self {
            compiler,
            output,
            package_prefix: package_prefix.into(),
            minify,
        }
    }

    /// The compiler invocation for `example`.
    pub fn request(&self, example: &Example) -> CompileRequest {
        CompileRequest {
            tags: EXAMPLE_BUILD_TAG.to_string(),
            minify: self.minify,
            output: self.output.example_bundle(&example.name),
            package: format!(
                "{}/{}",
                self.package_prefix.trim_end_matches('/'),
                example.name
            ),
        }
    }

    /// Compile `example`, blocking until the compiler exits.
    pub fn build(&self, example: &Example) -> Result<CompileRequest, ExecError> {
        let request = self.request(example);
        tracing::info!("Compiling {} with {}", request.package, self.compiler.name());
        self.compiler.compile(&request)?;
        Ok(request)
    }
}
