//! Template engine for rendering site pages.

use std::path::PathBuf;

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use crate::catalog::Example;
use crate::comment::{comment, safe_html};

/// Template for the site home page.
pub const HOME_TEMPLATE: &str = "index.tmpl.html";

/// Template for the embeddable part of an example page.
pub const CONTENT_TEMPLATE: &str = "examplecontent.tmpl.html";

/// Template for a standalone example page.
pub const EXAMPLE_TEMPLATE: &str = "example.tmpl.html";

/// An example as seen by templates: stored fields plus derived ones.
#[derive(Debug, Clone, Serialize)]
pub struct ExampleView<'a> {
    #[serde(flatten)]
    pub example: &'a Example,
    pub width: u32,
    pub height: u32,
    /// Program text, only present where a template shows it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl<'a> ExampleView<'a> {
    pub fn new(example: &'a Example) -> Self {
        Self {
            example,
            width: example.width(),
            height: example.height(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: String) -> Self {
        self.source = Some(source);
        self
    }
}

/// Context for the home page.
#[derive(Debug, Clone, Serialize)]
pub struct HomeContext<'a> {
    pub url: &'a str,
    pub copyright: &'a str,
    pub stable_version: &'a str,
    pub dev_version: &'a str,
    pub graphics_examples: Vec<ExampleView<'a>>,
    pub input_examples: Vec<ExampleView<'a>>,
    pub audio_examples: Vec<ExampleView<'a>>,
    pub games_examples: Vec<ExampleView<'a>>,
}

/// Context for an example content fragment.
#[derive(Debug, Clone, Serialize)]
pub struct ContentContext<'a> {
    pub copyright: &'a str,
    pub example: ExampleView<'a>,
}

/// Context for a standalone example page.
#[derive(Debug, Clone, Serialize)]
pub struct ExampleContext<'a> {
    pub url: &'a str,
    pub copyright: &'a str,
    pub example: ExampleView<'a>,
}

/// Template engine using minijinja.
///
/// Templates are loaded from a directory on first use. `comment` and
/// `safeHTML` are available as functions, `.html` templates are
/// HTML-escaped, and referencing an undefined value is an error.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create an engine reading templates from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let mut env = Environment::new();

        env.set_loader(minijinja::path_loader(dir.into()));
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_function("comment", comment);
        env.add_function("safeHTML", safe_html);

        Self { env }
    }

    /// Render `template` with `context`.
    pub fn render<S: Serialize>(
        &self,
        template: &str,
        context: &S,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;
        tmpl.render(context)
    }
}
