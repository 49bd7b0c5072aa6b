//! Mock runner for testing.

use crate::error::{DdcError, Result};
use crate::runner::{CommandResult, CommandRunner};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// A single invocation observed by [`MockRunner`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Arguments passed to the tool.
    pub args: Vec<String>,
    /// Timeout the caller asked for.
    pub timeout: Duration,
}

/// A recording command runner for testing.
///
/// This allows testing code that depends on [`CommandRunner`] without
/// requiring ddcutil or a DDC/CI capable monitor. Queued responses are
/// returned in order; once the queue is empty the fixed output (if any) is
/// returned for every further call.
///
/// # Example
///
/// ```
/// use monitorctl_core::{MockRunner, MonitorController, Target};
///
/// let mock = MockRunner::new();
/// mock.push_output("VCP code 0x10 (Brightness): current value = 50, max value = 100");
///
/// let controller = MonitorController::new(&mock);
/// assert_eq!(controller.get_brightness(Target::Display(1)).unwrap(), (50, 100));
/// assert_eq!(mock.calls()[0].args, ["--display=1", "getvcp", "10"]);
/// ```
#[derive(Default)]
pub struct MockRunner {
    responses: Mutex<VecDeque<Result<CommandResult>>>,
    fixed: Option<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockRunner {
    /// Create a mock with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers every call with the same `stdout`.
    pub fn with_fixed_output(stdout: impl Into<String>) -> Self {
        Self {
            fixed: Some(stdout.into()),
            ..Self::default()
        }
    }

    /// Queue a successful response.
    pub fn push_output(&self, stdout: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(CommandResult::from_stdout(stdout)));
    }

    /// Queue a command failure.
    pub fn push_failure(&self, message: impl Into<String>, stderr: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(DdcError::command(message, stderr)));
    }

    /// All invocations seen so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of invocations seen so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, args: &[String], timeout: Duration) -> Result<CommandResult> {
        self.calls.lock().unwrap().push(RecordedCall {
            args: args.to_vec(),
            timeout,
        });

        if let Some(response) = self.responses.lock().unwrap().pop_front() {
            return response;
        }
        match &self.fixed {
            Some(stdout) => Ok(CommandResult::from_stdout(stdout.clone())),
            None => Err(DdcError::command(
                format!("MockRunner has no response for: {}", args.join(" ")),
                "",
            )),
        }
    }
}
