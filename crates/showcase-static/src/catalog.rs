//! The example gallery: which examples exist, how big they are and what
//! source text is shown next to them.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

const SOURCE_FOR_2048: &str = "// Please read examples/2048/main.go and examples/2048/2048/*.go";

const SOURCE_FOR_BLOCKS: &str = "// Please read examples/blocks/main.go and examples/blocks/blocks/*.go
// NOTE: If Gamepad API is available in your browswer, you can use gamepads. Try it out!";

const TAB_WIDTH: &str = "        ";

/// One gallery entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    /// Unique name; also the output file stem and source directory
    pub name: String,
    pub thumb_width: u32,
    pub thumb_height: u32,
    /// Screen width override, 0 when unset
    pub screen_width: u32,
    /// Screen height override, 0 when unset
    pub screen_height: u32,
}

impl Example {
    /// An example whose screen is twice its thumbnail.
    pub fn new(name: impl Into<String>, thumb_width: u32, thumb_height: u32) -> Self {
        Self {
            name: name.into(),
            thumb_width,
            thumb_height,
            screen_width: 0,
            screen_height: 0,
        }
    }

    /// Override the screen size.
    pub fn with_screen(mut self, width: u32, height: u32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    pub fn width(&self) -> u32 {
        if self.screen_width == 0 {
            self.thumb_width * 2
        } else {
            self.screen_width
        }
    }

    pub fn height(&self) -> u32 {
        if self.screen_height == 0 {
            self.thumb_height * 2
        } else {
            self.screen_height
        }
    }
}

/// Errors that can occur while reading example sources.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read example source {path}: {source}")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Finds the program text for each example.
#[derive(Debug, Clone)]
pub struct SourceTree {
    root: PathBuf,
}

impl SourceTree {
    /// `root` holds one directory per example, each with a `main.go`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn main_file(&self, example: &Example) -> PathBuf {
        self.root.join(&example.name).join("main.go")
    }

    /// Display text for `example`, read fresh on every call.
    pub fn source(&self, example: &Example) -> Result<String, CatalogError> {
        match example.name.as_str() {
            "2048" => return Ok(SOURCE_FOR_2048.to_string()),
            "blocks" => return Ok(SOURCE_FOR_BLOCKS.to_string()),
            _ => {}
        }

        let path = self.main_file(example);
        let text = fs::read_to_string(&path)
            .map_err(|source| CatalogError::ReadSource { path, source })?;

        Ok(strip_header(&text).replace('\t', TAB_WIDTH))
    }
}

/// Drop everything up to and including the first blank line.
///
/// The leading block is the license comment. Text with no blank line is
/// treated as all header.
pub fn strip_header(text: &str) -> &str {
    match text.find("\n\n") {
        Some(pos) => &text[pos + 2..],
        None => "",
    }
}

/// All gallery examples, grouped and ordered for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub graphics: Vec<Example>,
    pub input: Vec<Example>,
    pub audio: Vec<Example>,
    pub games: Vec<Example>,
}

impl Catalog {
    /// A catalog with no examples.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The gallery published on the project site.
    pub fn builtin() -> Self {
        let standard = |name: &str| Example::new(name, 320, 240);

        Self {
            graphics: vec![
                standard("alphablending"),
                standard("flood"),
                standard("font"),
                standard("highdpi"),
                standard("hsv"),
                standard("hue"),
                standard("infinitescroll"),
                standard("life"),
                Example::new("mandelbrot", 320, 320).with_screen(640, 640),
                standard("masking"),
                standard("mosaic"),
                standard("noise"),
                standard("paint"),
                standard("perspective"),
                standard("rotate"),
                standard("sprites"),
                Example::new("tiles", 240, 240),
            ],
            input: vec![standard("gamepad"), standard("keyboard"), standard("typewriter")],
            audio: vec![standard("audio"), standard("piano"), standard("sinewave")],
            games: vec![Example::new("2048", 210, 300), Example::new("blocks", 256, 240)],
        }
    }

    /// Every example in build order: graphics, input, audio, then games.
    pub fn iter(&self) -> impl Iterator<Item = &Example> {
        self.graphics
            .iter()
            .chain(&self.input)
            .chain(&self.audio)
            .chain(&self.games)
    }

    pub fn len(&self) -> usize {
        self.graphics.len() + self.input.len() + self.audio.len() + self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use tempfile::tempdir;

    #[test]
    fn screen_defaults_to_double_thumbnail() {
        let e = Example::new("life", 100, 50);

        assert_eq!((e.width(), e.height()), (200, 100));
    }

    #[test]
    fn screen_overrides_apply_per_axis() {
        let e = Example::new("wide", 100, 50).with_screen(300, 0);

        assert_eq!((e.width(), e.height()), (300, 100));
    }

    #[test]
    fn builtin_iterates_in_category_order() {
        let catalog = Catalog::builtin();
        let names: Vec<&str> = catalog.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names.first(), Some(&"alphablending"));
        assert_eq!(names[17], "gamepad");
        assert_eq!(names[20], "audio");
        assert_eq!(&names[names.len() - 2..], &["2048", "blocks"]);
        assert_eq!(catalog.len(), 25);
    }

    #[test]
    fn builtin_names_are_unique() {
        let catalog = Catalog::builtin();
        let names: HashSet<&str> = catalog.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names.len(), catalog.len());
    }

    #[test]
    fn mandelbrot_has_explicit_screen() {
        let catalog = Catalog::builtin();
        let m = catalog.iter().find(|e| e.name == "mandelbrot").unwrap();

        assert_eq!((m.width(), m.height()), (640, 640));
    }

    #[test]
    fn strips_license_header() {
        let text = "// Copyright 2016\n// License\n\npackage main\n\nfunc main() {}\n";

        assert_eq!(strip_header(text), "package main\n\nfunc main() {}\n");
    }

    #[test]
    fn text_without_blank_line_is_all_header() {
        assert_eq!(strip_header("package main\nfunc main() {}\n"), "");
    }

    #[test]
    fn leading_blank_line_strips_only_itself() {
        assert_eq!(strip_header("\n\npackage main\n"), "package main\n");
    }

    #[test]
    fn reads_and_expands_source() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("life")).unwrap();
        fs::write(
            temp.path().join("life").join("main.go"),
            "// header\n\nfunc main() {\n\tupdate()\n}\n",
        )
        .unwrap();

        let tree = SourceTree::new(temp.path());
        let source = tree.source(&Example::new("life", 320, 240)).unwrap();

        assert_eq!(source, "func main() {\n        update()\n}\n");
    }

    #[test]
    fn special_examples_skip_the_filesystem() {
        let tree = SourceTree::new("/nonexistent");

        let source = tree.source(&Example::new("2048", 210, 300)).unwrap();
        assert!(source.contains("examples/2048/2048/*.go"));

        let source = tree.source(&Example::new("blocks", 256, 240)).unwrap();
        assert!(source.contains("Gamepad API"));
    }

    #[test]
    fn missing_source_is_an_error() {
        let tree = SourceTree::new("/nonexistent");

        let err = tree.source(&Example::new("life", 320, 240)).unwrap_err();

        assert!(matches!(err, CatalogError::ReadSource { .. }));
    }
}
