//! Output formatting and relaying for the publisher CLI.
//!
//! Progress lines go to stderr so that stdout carries only what `gext`
//! printed.

use crate::error::{PublishError, Result};
use crate::request::PublishRequest;
use std::io::Write;
use std::process::Output;

/// Placeholder printed in place of the API key.
pub const REDACTED: &str = "********";

/// Format the progress line announced before publishing.
///
/// # Example
///
/// ```no_run
/// use camino::Utf8PathBuf;
/// use gnome_extension_publish::output::publishing_message;
/// use gnome_extension_publish::request::PublishRequest;
///
/// let request = PublishRequest::new(
///     Utf8PathBuf::from("dist/lockscreen.shell-extension.zip"),
///     "lockscreen@example.org",
///     "secret",
///     "7",
/// )?;
/// assert_eq!(
///     publishing_message(&request, "gext"),
///     "Publishing lockscreen.shell-extension.zip for lockscreen@example.org (version 7) via gext...",
/// );
/// # Ok::<(), gnome_extension_publish::error::PublishError>(())
/// ```
#[must_use]
pub fn publishing_message(request: &PublishRequest, tool: &str) -> String {
    format!(
        "Publishing {} for {} (version {}) via {tool}...",
        request.archive_name(),
        request.uuid(),
        request.version()
    )
}

/// Format the dry-run summary, with the API key redacted.
#[must_use]
pub fn dry_run_text(request: &PublishRequest, tool: &str) -> String {
    [
        "Dry run - no extension will be published".to_owned(),
        String::new(),
        format!("Extension UUID: {}", request.uuid()),
        format!("Version: {}", request.version()),
        format!("Archive: {}", request.archive()),
        format!("Command: {tool} publish {} --api-key {REDACTED}", request.archive()),
    ]
    .join("\n")
}

/// Writes captured command output to the caller's streams unchanged.
///
/// Stdout is written first, then stderr; both are flushed.
///
/// # Errors
///
/// Returns [`PublishError::WriteFailed`] naming the stream that could not be
/// written.
pub fn relay_output(output: &Output, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<()> {
    write_all(stdout, &output.stdout, "stdout")?;
    write_all(stderr, &output.stderr, "stderr")
}

/// Writes one line to `stderr`, ignoring write failures.
///
/// Used for progress and error lines, which must never abort a run.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}

fn write_all(stream: &mut dyn Write, bytes: &[u8], name: &'static str) -> Result<()> {
    stream
        .write_all(bytes)
        .and_then(|()| stream.flush())
        .map_err(|source| PublishError::WriteFailed {
            stream: name,
            source,
        })
}
