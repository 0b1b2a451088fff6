//! Error types for the extension publisher CLI.
//!
//! Each variant maps to one failure category of a publish run: bad input,
//! a missing or broken `gext`, or a rejected upload. Every error is fatal to
//! the run; nothing is retried.

use camino::Utf8PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can occur while publishing an extension archive.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The archive path does not exist.
    #[error("archive '{path}' does not exist")]
    ArchiveNotFound {
        /// Path supplied by the caller.
        path: Utf8PathBuf,
    },

    /// The archive path exists but is not a regular file.
    #[error("archive '{path}' is not a file")]
    ArchiveNotAFile {
        /// Path supplied by the caller.
        path: Utf8PathBuf,
    },

    /// The API key was empty once surrounding whitespace was removed.
    #[error("the API key must not be empty")]
    EmptyApiKey,

    /// A required request field was empty.
    #[error("the {field} must not be empty")]
    EmptyField {
        /// Human-readable name of the field.
        field: &'static str,
    },

    /// The publishing tool is not on the executable search path.
    #[error("required executable '{tool}' was not found on PATH")]
    ToolNotFound {
        /// Name of the missing executable.
        tool: String,
    },

    /// The publishing tool exists but its `--help` probe failed.
    #[error("{tool} failed its sanity check: {reason}")]
    ToolProbeFailed {
        /// Name of the probed executable.
        tool: String,
        /// Exit status and captured diagnostics, or the launch error.
        reason: String,
    },

    /// The publishing tool could not be started for the publish step.
    #[error("failed to launch {tool}")]
    ToolLaunch {
        /// Name of the executable.
        tool: String,
        /// The underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The publish subcommand ran and exited unsuccessfully.
    #[error("{tool} publish failed ({status})")]
    PublishFailed {
        /// Name of the executable.
        tool: String,
        /// Exit status reported by the tool.
        status: ExitStatus,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Relaying captured output to the caller's streams failed.
    #[error("failed to write {stream}")]
    WriteFailed {
        /// Which stream could not be written (`stdout` or `stderr`).
        stream: &'static str,
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },

    /// Test stub received an unexpected or mismatched command invocation.
    #[cfg(any(test, feature = "test-support"))]
    #[error("stub mismatch: {message}")]
    StubMismatch {
        /// Description of what was expected versus what was received.
        message: String,
    },
}

impl PublishError {
    /// Returns the process exit code to report for this error.
    ///
    /// A failed publish propagates the tool's own exit code; every other
    /// failure, including a tool killed by a signal, maps to `1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gnome_extension_publish::error::PublishError;
    ///
    /// assert_eq!(PublishError::EmptyApiKey.exit_code(), 1);
    /// ```
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::PublishFailed { status, .. } => {
                status.code().filter(|code| *code != 0).unwrap_or(1)
            }
            _ => 1,
        }
    }
}

/// Result type alias using [`PublishError`].
pub type Result<T> = std::result::Result<T, PublishError>;
