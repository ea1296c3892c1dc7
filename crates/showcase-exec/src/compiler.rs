//! Compiler and copy collaborators backed by external programs.

use std::path::Path;

use crate::process::execute;
use crate::traits::{CompileRequest, Compiler, Copier, ExecError};

/// Invokes a GopherJS-compatible compiler.
///
/// The command line is `<program> build --tags <tags> [-m] -o <output> <package>`.
#[derive(Debug, Clone)]
pub struct GopherJs {
    program: String,
}

impl GopherJs {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args(request: &CompileRequest) -> Vec<String> {
        let mut args = vec![
            "build".to_string(),
            "--tags".to_string(),
            request.tags.clone(),
        ];
        if request.minify {
            args.push("-m".to_string());
        }
        args.push("-o".to_string());
        args.push(request.output.display().to_string());
        args.push(request.package.clone());
        args
    }
}

impl Default for GopherJs {
    fn default() -> Self {
        Self::new("gopherjs")
    }
}

impl Compiler for GopherJs {
    fn name(&self) -> &str {
        &self.program
    }

    fn compile(&self, request: &CompileRequest) -> Result<(), ExecError> {
        execute(&self.program, &Self::args(request), None)?;
        Ok(())
    }
}

/// Recursive copy through `cp -R`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpCommand;

impl Copier for CpCommand {
    fn copy_tree(&self, from: &Path, to: &Path) -> Result<(), ExecError> {
        let from = from.display().to_string();
        let to = to.display().to_string();
        execute("cp", &["-R", from.as_str(), to.as_str()], None)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn builds_minified_command_line() {
        let request = CompileRequest {
            tags: "example".to_string(),
            minify: true,
            output: PathBuf::from("public/examples/life.js"),
            package: "github.com/hajimehoshi/ebiten/examples/life".to_string(),
        };

        assert_eq!(
            GopherJs::args(&request),
            vec![
                "build",
                "--tags",
                "example",
                "-m",
                "-o",
                "public/examples/life.js",
                "github.com/hajimehoshi/ebiten/examples/life",
            ]
        );
    }

    #[test]
    fn omits_minify_flag_when_disabled() {
        let request = CompileRequest {
            tags: "example".to_string(),
            minify: false,
            output: PathBuf::from("out.js"),
            package: "pkg".to_string(),
        };

        assert!(!GopherJs::args(&request).contains(&"-m".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn cp_copies_nested_tree() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("_resources");
        fs::create_dir_all(src.join("images")).unwrap();
        fs::write(src.join("images").join("gopher.png"), b"png").unwrap();

        let dst = temp.path().join("out").join("_resources");
        fs::create_dir_all(temp.path().join("out")).unwrap();

        CpCommand.copy_tree(&src, &dst).unwrap();

        assert_eq!(fs::read(dst.join("images").join("gopher.png")).unwrap(), b"png");
    }

    #[cfg(unix)]
    #[test]
    fn cp_fails_on_missing_source() {
        let temp = tempdir().unwrap();

        let err = CpCommand
            .copy_tree(&temp.path().join("missing"), &temp.path().join("dst"))
            .unwrap_err();

        assert!(matches!(err, ExecError::Failed { .. }));
    }
}
