//! Error types for the ddcutil-backed monitor controller.

/// Errors that can occur while talking to monitors through ddcutil.
#[derive(Debug, thiserror::Error)]
pub enum DdcError {
    /// ddcutil was missing, timed out, or exited with a non-zero status.
    #[error("{message}")]
    Command {
        /// Human-readable description of the failure.
        message: String,
        /// Standard error captured from ddcutil, empty when none was available.
        stderr: String,
    },

    /// ddcutil output did not match any recognized shape.
    #[error("{message}")]
    Parse {
        /// Human-readable description of the failure.
        message: String,
        /// The offending output text.
        raw: String,
        /// The display whose block failed to parse, if applicable.
        display: Option<u32>,
    },

    /// A caller-supplied selector or value violated its constraints.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No detected monitor matched the requested selector.
    #[error("{0}")]
    NotFound(String),
}

impl DdcError {
    pub(crate) fn command(message: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::Command {
            message: message.into(),
            stderr: stderr.into(),
        }
    }

    /// The stderr captured from ddcutil, if this is a command failure and any was captured.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Command { stderr, .. } if !stderr.trim().is_empty() => Some(stderr),
            _ => None,
        }
    }
}

/// Result type alias for [`DdcError`].
pub type Result<T> = std::result::Result<T, DdcError>;
