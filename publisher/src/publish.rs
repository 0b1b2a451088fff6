//! Publish orchestration.
//!
//! Runs the linear publish sequence: resolve `gext`, probe it, then run
//! `gext publish` and relay what it printed. Any failing step aborts the
//! rest; nothing is retried.

use crate::error::{PublishError, Result};
use crate::executor::CommandExecutor;
use crate::output::{dry_run_text, publishing_message, relay_output, write_stderr_line};
use crate::request::PublishRequest;
use crate::tool::{ExternalTool, GEXT, ToolResolver};
use log::{debug, info, warn};
use std::io::Write;

/// How the publish subcommand's output reaches the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Capture both streams in full and relay them once the tool exits.
    #[default]
    Captured,
    /// Let the tool write straight to the caller's terminal.
    Streamed,
}

/// Options controlling a publish run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishOptions {
    /// Suppress progress messages on stderr.
    pub quiet: bool,
    /// Resolve and probe the tool, then stop before publishing.
    pub dry_run: bool,
    /// How the publish subcommand's output is delivered.
    pub output: OutputMode,
}

/// Publishes extension archives through an external tool.
pub struct Publisher<'a> {
    resolver: &'a dyn ToolResolver,
    executor: &'a dyn CommandExecutor,
}

impl<'a> Publisher<'a> {
    /// Creates a publisher that delegates to [`GEXT`].
    #[must_use]
    pub fn new(resolver: &'a dyn ToolResolver, executor: &'a dyn CommandExecutor) -> Self {
        Self { resolver, executor }
    }

    /// Publishes `request`, writing relayed and progress output to the given
    /// streams.
    ///
    /// # Errors
    ///
    /// - [`PublishError::ToolNotFound`] if the tool is not on the search path.
    /// - [`PublishError::ToolProbeFailed`] if the tool fails its probe; the
    ///   publish subcommand is then never run.
    /// - [`PublishError::ToolLaunch`] if the publish subcommand cannot start.
    /// - [`PublishError::PublishFailed`] if the publish subcommand exits
    ///   unsuccessfully. Captured output is relayed before this is returned.
    /// - [`PublishError::WriteFailed`] if relaying output fails.
    pub fn publish(
        &self,
        request: &PublishRequest,
        options: PublishOptions,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<()> {
        let tool = ExternalTool::resolve(self.resolver, GEXT)?;
        tool.probe(self.executor)?;

        if options.dry_run {
            write_stderr_line(stderr, dry_run_text(request, tool.path().as_str()));
            return Ok(());
        }

        if !options.quiet {
            write_stderr_line(stderr, publishing_message(request, tool.name()));
        }
        info!(
            "publishing {} for {} (version {})",
            request.archive(),
            request.uuid(),
            request.version()
        );

        let args = ["publish", request.archive().as_str(), "--api-key", request.api_key()];
        let status = match options.output {
            OutputMode::Captured => {
                let output = self
                    .executor
                    .run(tool.path().as_str(), &args)
                    .map_err(|err| launch_failed(&tool, err))?;
                debug!(
                    "{} exited with {}; relaying {} stdout and {} stderr bytes",
                    tool.name(),
                    output.status,
                    output.stdout.len(),
                    output.stderr.len()
                );
                relay_output(&output, stdout, stderr)?;
                output.status
            }
            OutputMode::Streamed => self
                .executor
                .run_inherited(tool.path().as_str(), &args)
                .map_err(|err| launch_failed(&tool, err))?,
        };

        if !status.success() {
            warn!("{} publish exited with {status}", tool.name());
            return Err(PublishError::PublishFailed {
                tool: tool.name().to_owned(),
                status,
            });
        }

        info!("{} published successfully", request.uuid());
        Ok(())
    }
}

fn launch_failed(tool: &ExternalTool, err: PublishError) -> PublishError {
    match err {
        PublishError::Io(source) => PublishError::ToolLaunch {
            tool: tool.name().to_owned(),
            source,
        },
        other => other,
    }
}

#[cfg(test)]
#[path = "publish_tests.rs"]
mod tests;
