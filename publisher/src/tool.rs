//! Locating and sanity-checking the external publishing tool.
//!
//! The publisher never speaks the registry's upload protocol itself. It finds
//! `gext` on the executable search path, confirms that it starts, and hands
//! the real work over to it.

use crate::error::{PublishError, Result};
use crate::executor::CommandExecutor;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::ffi::OsString;

/// Name of the `gnome-extensions-cli` executable.
pub const GEXT: &str = "gext";

/// Flag used to confirm the tool runs before publishing.
pub const PROBE_FLAG: &str = "--help";

/// Resolves executable names to absolute paths.
#[cfg_attr(test, mockall::automock)]
pub trait ToolResolver {
    /// Returns the absolute path of the executable called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::ToolNotFound`] when no matching executable
    /// exists, or [`PublishError::Io`] if the working directory cannot be
    /// read.
    fn resolve(&self, name: &str) -> Result<Utf8PathBuf>;
}

/// Resolves executables by walking a `PATH`-style search path.
///
/// Only files the current user may execute are accepted. On Windows the
/// extensions listed in `PATHEXT` are tried.
///
/// # Examples
///
/// ```no_run
/// use gnome_extension_publish::tool::{SearchPathResolver, ToolResolver};
///
/// let resolver = SearchPathResolver::new("/usr/local/bin:/usr/bin");
/// let gext = resolver.resolve("gext")?;
/// assert!(gext.is_absolute());
/// # Ok::<(), gnome_extension_publish::error::PublishError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchPathResolver {
    search_path: Option<OsString>,
}

impl SearchPathResolver {
    /// Creates a resolver over an explicit search path.
    #[must_use]
    pub fn new(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    /// Creates a resolver over the current process's `PATH`.
    ///
    /// The variable is read once; later changes to the environment are not
    /// observed.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            search_path: std::env::var_os("PATH"),
        }
    }
}

impl ToolResolver for SearchPathResolver {
    fn resolve(&self, name: &str) -> Result<Utf8PathBuf> {
        let not_found = || PublishError::ToolNotFound {
            tool: name.to_owned(),
        };

        let cwd = std::env::current_dir()?;
        let found = which::which_in(name, self.search_path.as_ref(), &cwd).map_err(|err| {
            debug!("{name} not found on search path: {err}");
            not_found()
        })?;

        let absolute = std::path::absolute(&found)?;
        Utf8PathBuf::from_path_buf(absolute).map_err(|path| {
            debug!("ignoring non-UTF-8 path for {name}: {}", path.display());
            not_found()
        })
    }
}

/// A resolved external tool: its fixed name and absolute location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTool {
    name: &'static str,
    path: Utf8PathBuf,
}

impl ExternalTool {
    /// Resolves `name` with the given resolver.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::ToolNotFound`] if the resolver cannot find the
    /// executable.
    pub fn resolve(resolver: &dyn ToolResolver, name: &'static str) -> Result<Self> {
        let path = resolver.resolve(name)?;
        debug!("resolved {name} to {path}");
        Ok(Self { name, path })
    }

    /// Returns the executable name the tool was resolved from.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the absolute path of the executable.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Runs the tool with [`PROBE_FLAG`] to confirm that it works.
    ///
    /// The probe output is captured and discarded on success.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::ToolProbeFailed`] if the tool cannot be
    /// launched or exits unsuccessfully. The error carries the captured
    /// diagnostics.
    pub fn probe(&self, executor: &dyn CommandExecutor) -> Result<()> {
        debug!("probing {} with {PROBE_FLAG}", self.name);

        let output = executor
            .run(self.path.as_str(), &[PROBE_FLAG])
            .map_err(|err| self.probe_failed(err.to_string()))?;

        if output.status.success() {
            return Ok(());
        }

        let diagnostics = captured_diagnostics(&output.stderr, &output.stdout);
        let reason = if diagnostics.is_empty() {
            output.status.to_string()
        } else {
            format!("{}: {diagnostics}", output.status)
        };
        Err(self.probe_failed(reason))
    }

    fn probe_failed(&self, reason: String) -> PublishError {
        PublishError::ToolProbeFailed {
            tool: self.name.to_owned(),
            reason,
        }
    }
}

/// Picks the most useful captured stream for an error message.
///
/// Prefers stderr; falls back to stdout when stderr is blank.
fn captured_diagnostics(stderr: &[u8], stdout: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::from_utf8_lossy(stdout).trim().to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
#[path = "tool_tests.rs"]
mod tests;
