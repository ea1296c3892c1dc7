//! Blocking external process execution.

use std::path::Path;
use std::process::{Command, Output};

use crate::traits::ExecError;

/// Run `program` with `args` to completion and return its output.
///
/// Standard output and standard error are both captured and fully drained
/// before this returns. A nonzero exit becomes [`ExecError::Failed`] with the
/// captured standard error folded into the message. There is no timeout.
pub fn execute<S: AsRef<str>>(
    program: &str,
    args: &[S],
    cwd: Option<&Path>,
) -> Result<Output, ExecError> {
    let mut cmd = Command::new(program);
    cmd.args(args.iter().map(|a| a.as_ref()));
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    tracing::debug!(
        "Running {} {}",
        program,
        args.iter().map(|a| a.as_ref()).collect::<Vec<_>>().join(" ")
    );

    let output = cmd.output().map_err(|source| ExecError::Spawn {
        program: program.to_string(),
        source,
    })?;

    if !output.status.success() {
        return Err(ExecError::Failed {
            program: program.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        });
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn captures_stdout_on_success() {
        let output = execute("sh", &["-c", "echo hello"], None).unwrap();

        assert_eq!(String::from_utf8_lossy(&output.stdout), "hello\n");
    }

    #[cfg(unix)]
    #[test]
    fn folds_stderr_into_failure() {
        let err = execute("sh", &["-c", "echo broken >&2; exit 3"], None).unwrap_err();

        match err {
            ExecError::Failed {
                program, stderr, ..
            } => {
                assert_eq!(program, "sh");
                assert_eq!(stderr, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reports_missing_program() {
        let err = execute::<&str>("definitely-not-a-real-program-xyz", &[], None).unwrap_err();

        assert!(matches!(err, ExecError::Spawn { .. }));
    }
}
