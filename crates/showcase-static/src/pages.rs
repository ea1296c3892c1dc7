//! Rendering of the home page and the per-example pages.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::catalog::{Catalog, CatalogError, Example, SourceTree};
use crate::context::BuildContext;
use crate::reconcile::OutputTree;
use crate::templates::{
    ContentContext, ExampleContext, ExampleView, HomeContext, TemplateEngine, CONTENT_TEMPLATE,
    EXAMPLE_TEMPLATE, HOME_TEMPLATE,
};

/// Errors that can occur while writing pages.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Failed to render template {template}: {source}")]
    Template {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    #[error(transparent)]
    Source(#[from] CatalogError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes pages for one build.
pub struct PageRenderer<'a> {
    templates: TemplateEngine,
    sources: SourceTree,
    context: &'a BuildContext,
    output: &'a OutputTree,
}

impl<'a> PageRenderer<'a> {
    pub fn new(
        templates: TemplateEngine,
        sources: SourceTree,
        context: &'a BuildContext,
        output: &'a OutputTree,
    ) -> Self {
        Self {
            templates,
            sources,
            context,
            output,
        }
    }

    /// Write `index.html` listing every example.
    pub fn write_home(&self, catalog: &Catalog) -> Result<PathBuf, PageError> {
        let ctx = HomeContext {
            url: &self.context.url,
            copyright: &self.context.copyright,
            stable_version: &self.context.versions.stable,
            dev_version: &self.context.versions.dev,
            graphics_examples: catalog.graphics.iter().map(ExampleView::new).collect(),
            input_examples: catalog.input.iter().map(ExampleView::new).collect(),
            audio_examples: catalog.audio.iter().map(ExampleView::new).collect(),
            games_examples: catalog.games.iter().map(ExampleView::new).collect(),
        };

        let path = self.output.index_page();
        self.write(HOME_TEMPLATE, &ctx, &path)?;
        Ok(path)
    }

    /// Write `<name>.content.html`, including the example's program text.
    pub fn write_example_content(&self, example: &Example) -> Result<PathBuf, PageError> {
        let source = self.sources.source(example)?;
        let ctx = ContentContext {
            copyright: &self.context.copyright,
            example: ExampleView::new(example).with_source(source),
        };

        let path = self.output.example_content(&example.name);
        self.write(CONTENT_TEMPLATE, &ctx, &path)?;
        Ok(path)
    }

    /// Write the standalone `<name>.html` page.
    pub fn write_example_page(&self, example: &Example) -> Result<PathBuf, PageError> {
        let ctx = ExampleContext {
            url: &self.context.url,
            copyright: &self.context.copyright,
            example: ExampleView::new(example),
        };

        let path = self.output.example_page(&example.name);
        self.write(EXAMPLE_TEMPLATE, &ctx, &path)?;
        Ok(path)
    }

    fn write<S: Serialize>(&self, template: &str, ctx: &S, path: &Path) -> Result<(), PageError> {
        let html = self
            .templates
            .render(template, ctx)
            .map_err(|source| PageError::Template {
                template: template.to_string(),
                source,
            })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| PageError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, html).map_err(|source| PageError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}
