//! Abstraction over spawning external commands.
//!
//! The publisher talks to `gext` exclusively through [`CommandExecutor`], so
//! tests can replay canned outputs instead of spawning real processes.

use crate::error::Result;
use std::process::{Command, ExitStatus, Output, Stdio};

/// Abstraction for running external commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor {
    /// Runs a command with arguments and returns the captured output.
    ///
    /// Both output streams are collected in full before this returns.
    ///
    /// # Errors
    ///
    /// Returns any I/O errors encountered while spawning or running the command.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gnome_extension_publish::executor::{CommandExecutor, SystemCommandExecutor};
    ///
    /// let executor = SystemCommandExecutor;
    /// let output = executor.run("gext", &["--help"])?;
    /// assert!(output.status.success());
    /// # Ok::<(), gnome_extension_publish::error::PublishError>(())
    /// ```
    fn run<'a>(&self, cmd: &str, args: &[&'a str]) -> Result<Output>;

    /// Runs a command with the caller's stdout and stderr inherited.
    ///
    /// # Errors
    ///
    /// Returns any I/O errors encountered while spawning or waiting on the
    /// command.
    fn run_inherited<'a>(&self, cmd: &str, args: &[&'a str]) -> Result<ExitStatus>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output> {
        Ok(Command::new(cmd)
            .args(args)
            .stdin(Stdio::null())
            .output()?)
    }

    fn run_inherited(&self, cmd: &str, args: &[&str]) -> Result<ExitStatus> {
        Ok(Command::new(cmd)
            .args(args)
            .stdin(Stdio::null())
            .status()?)
    }
}
