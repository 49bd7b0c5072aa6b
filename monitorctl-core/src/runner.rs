//! Subprocess execution for ddcutil.

use crate::error::{DdcError, Result};

use log::{debug, trace};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Default executable name, resolved through `PATH`.
pub const DEFAULT_PROGRAM: &str = "ddcutil";

/// Longest wait honoured for a single command; larger timeouts are capped to this.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Captured output of a successful external command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResult {
    /// Standard output, lossily decoded as UTF-8.
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8.
    pub stderr: String,
    /// Process exit code.
    pub exit_code: i32,
}

impl CommandResult {
    /// A successful result carrying only `stdout`.
    pub fn from_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Default::default()
        }
    }
}

/// Trait for executing the display-control tool.
///
/// This allows for recording fakes in tests.
pub trait CommandRunner: Send + Sync {
    /// Run the tool with `args`, waiting at most `timeout`.
    ///
    /// Fails with [`DdcError::Command`] when the tool cannot be started, runs
    /// past the timeout, or exits non-zero. No output is returned on failure.
    fn run(&self, args: &[String], timeout: Duration) -> Result<CommandResult>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, args: &[String], timeout: Duration) -> Result<CommandResult> {
        (**self).run(args, timeout)
    }
}

/// Runs a real `ddcutil` executable, one process per call.
#[derive(Debug, Clone)]
pub struct DdcutilRunner {
    program: PathBuf,
}

impl DdcutilRunner {
    /// Use `ddcutil` from `PATH`.
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Use a specific executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The executable this runner spawns.
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn spawn(&self, args: &[String]) -> Result<Child> {
        Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => DdcError::command(
                    format!(
                        "{} not found. Install it (e.g. sudo dnf install ddcutil).",
                        self.program.display()
                    ),
                    "",
                ),
                _ => DdcError::command(
                    format!("Failed to start {}: {}", self.program.display(), e),
                    "",
                ),
            })
    }

    fn wait(&self, child: &mut Child, timeout: Duration) -> Result<()> {
        let timeout = timeout.min(MAX_TIMEOUT);
        let status = child.wait_timeout(timeout).map_err(|e| {
            DdcError::command(
                format!("Failed to wait for {}: {}", self.program.display(), e),
                "",
            )
        })?;
        if status.is_none() {
            // Reap the child so it does not linger as a zombie.
            let _ = child.kill();
            let _ = child.wait();
            return Err(DdcError::command(
                format!(
                    "{} command timed out after {} seconds.",
                    self.program.display(),
                    timeout.as_secs_f32()
                ),
                "",
            ));
        }
        Ok(())
    }
}

impl Default for DdcutilRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for DdcutilRunner {
    fn run(&self, args: &[String], timeout: Duration) -> Result<CommandResult> {
        debug!("running {} {}", self.program.display(), args.join(" "));

        let mut child = self.spawn(args)?;
        self.wait(&mut child, timeout)?;

        let output = child.wait_with_output().map_err(|e| {
            DdcError::command(
                format!("Failed to read {} output: {}", self.program.display(), e),
                "",
            )
        })?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let status = output.status;
        trace!("{} exited with {}", self.program.display(), status);

        match status.code() {
            Some(0) => Ok(CommandResult {
                stdout,
                stderr,
                exit_code: 0,
            }),
            Some(code) => Err(DdcError::command(
                format!(
                    "{} command failed with return code {}.",
                    self.program.display(),
                    code
                ),
                stderr,
            )),
            None => Err(DdcError::command(
                format!("{} command was terminated by a signal.", self.program.display()),
                stderr,
            )),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Instant;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_run_captures_stdout() {
        let runner = DdcutilRunner::with_program("sh");
        let res = runner
            .run(&args(&["-c", "echo hello"]), Duration::from_secs(5))
            .unwrap();
        assert_eq!(res.stdout, "hello\n");
        assert_eq!(res.exit_code, 0);
    }

    #[test]
    fn test_run_missing_program() {
        let runner = DdcutilRunner::with_program("monitorctl-no-such-program");
        let err = runner.run(&[], Duration::from_secs(1)).unwrap_err();
        match err {
            DdcError::Command { message, .. } => assert!(message.contains("not found")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_run_non_zero_exit_keeps_stderr() {
        let runner = DdcutilRunner::with_program("sh");
        let err = runner
            .run(
                &args(&["-c", "echo out; echo 'Display not found' >&2; exit 3"]),
                Duration::from_secs(5),
            )
            .unwrap_err();
        assert!(err.to_string().contains("return code 3"));
        assert_eq!(err.stderr(), Some("Display not found\n"));
    }

    #[test]
    fn test_run_timeout() {
        let runner = DdcutilRunner::with_program("sleep");
        let started = Instant::now();
        let err = runner
            .run(&args(&["5"]), Duration::from_millis(200))
            .unwrap_err();
        assert!(err.to_string().contains("timed out"));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_run_with_oversized_timeout() {
        let runner = DdcutilRunner::with_program("sh");
        let res = runner
            .run(&args(&["-c", "echo ok"]), Duration::from_secs(u64::MAX))
            .unwrap();
        assert_eq!(res.stdout, "ok\n");
    }
}
