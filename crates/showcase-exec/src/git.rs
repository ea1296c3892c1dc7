//! Source control backed by the `git` command line.

use std::path::PathBuf;

use crate::process::execute;
use crate::traits::{ExecError, SourceControl};

const GIT: &str = "git";

/// Queries a git checkout by shelling out to `git`.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_dir: PathBuf,
}

impl GitCli {
    /// Create a client that runs git inside `repo_dir`.
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<Vec<u8>, ExecError> {
        Ok(execute(GIT, args, Some(self.repo_dir.as_path()))?.stdout)
    }
}

impl SourceControl for GitCli {
    fn list_tags(&self) -> Result<Vec<String>, ExecError> {
        let out = self.run(&["tag"])?;
        Ok(parse_tag_list(&String::from_utf8_lossy(&out)))
    }

    fn commit_timestamp(&self, rev: &str) -> Result<i64, ExecError> {
        let out = self.run(&["log", rev, "-1", "--format=%ct"])?;
        parse_timestamp(&String::from_utf8_lossy(&out))
    }

    fn read_file_at_ref(&self, rev: &str, path: &str) -> Result<Vec<u8>, ExecError> {
        self.run(&["show", &format!("{rev}:{path}")])
    }
}

/// One tag per line; blank lines are dropped.
fn parse_tag_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn parse_timestamp(output: &str) -> Result<i64, ExecError> {
    let trimmed = output.trim();
    trimmed.parse().map_err(|e| ExecError::Output {
        program: GIT.to_string(),
        message: format!("invalid commit timestamp {trimmed:?}: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_tag_listing() {
        let tags = parse_tag_list("v1.0\nv1.1\nexperimental\n");

        assert_eq!(tags, vec!["v1.0", "v1.1", "experimental"]);
    }

    #[test]
    fn empty_listing_has_no_tags() {
        assert!(parse_tag_list("").is_empty());
        assert!(parse_tag_list("\n").is_empty());
    }

    #[test]
    fn parses_timestamp_with_newline() {
        assert_eq!(parse_timestamp("1467331200\n").unwrap(), 1467331200);
    }

    #[test]
    fn rejects_garbage_timestamp() {
        let err = parse_timestamp("fatal: bad revision\n").unwrap_err();

        assert!(matches!(err, ExecError::Output { .. }));
    }
}
