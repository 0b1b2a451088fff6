//! CLI argument definitions for the extension publisher.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use crate::error::Result;
use crate::publish::{OutputMode, PublishOptions};
use crate::request::PublishRequest;
use camino::Utf8PathBuf;
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use secrecy::{ExposeSecret, SecretString};
use std::convert::Infallible;

/// Environment variable consulted when `--api-key` is not given.
pub const API_KEY_ENV: &str = "GNOME_EXTENSIONS_API_KEY";

/// Upload a packaged GNOME Shell extension to extensions.gnome.org.
#[derive(Parser, Debug)]
#[command(name = "gnome-extension-publish")]
#[command(about)]
#[command(long_about = concat!(
    "Upload a packaged GNOME Shell extension to extensions.gnome.org.\n\n",
    "The upload itself is delegated to `gext` from the gnome-extensions-cli ",
    "project, which must be installed and on PATH. This wrapper validates the ",
    "archive and API key first, checks that `gext` starts, and then runs ",
    "`gext publish`, relaying its output unchanged.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Publish a release:\n",
    "    $ gnome-extension-publish --archive dist/lockscreen.shell-extension.zip \\\n",
    "        --uuid lockscreen@example.org --version 7 --api-key \"$KEY\"\n\n",
    "  Read the API key from the environment:\n",
    "    $ GNOME_EXTENSIONS_API_KEY=... gnome-extension-publish --archive ext.zip \\\n",
    "        --uuid lockscreen@example.org --version 7\n\n",
    "  Check the setup without uploading:\n",
    "    $ gnome-extension-publish --dry-run --archive ext.zip \\\n",
    "        --uuid lockscreen@example.org --version 7 --api-key \"$KEY\"",
))]
pub struct Cli {
    /// Path to the packaged extension archive.
    #[arg(long, value_name = "PATH")]
    pub archive: Utf8PathBuf,

    /// Extension UUID.
    #[arg(long, value_name = "UUID", value_parser = NonEmptyStringValueParser::new())]
    pub uuid: String,

    /// API key for extensions.gnome.org.
    #[arg(
        long,
        value_name = "KEY",
        env = API_KEY_ENV,
        hide_env_values = true,
        value_parser = parse_secret
    )]
    pub api_key: SecretString,

    /// Extension version.
    #[arg(long, value_name = "VERSION", value_parser = NonEmptyStringValueParser::new())]
    pub version: String,

    /// Validate inputs and check gext, but do not publish.
    #[arg(long)]
    pub dry_run: bool,

    /// Let gext write directly to the terminal instead of capturing output.
    #[arg(long)]
    pub stream_output: bool,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors and gext output still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// Validates the arguments into a [`PublishRequest`].
    ///
    /// # Errors
    ///
    /// Returns the validation error from [`PublishRequest::new`].
    pub fn publish_request(&self) -> Result<PublishRequest> {
        PublishRequest::new(
            self.archive.clone(),
            self.uuid.as_str(),
            self.api_key.expose_secret(),
            self.version.as_str(),
        )
    }

    /// Returns the run options selected by the flags.
    #[must_use]
    pub fn publish_options(&self) -> PublishOptions {
        PublishOptions {
            quiet: self.quiet,
            dry_run: self.dry_run,
            output: if self.stream_output {
                OutputMode::Streamed
            } else {
                OutputMode::Captured
            },
        }
    }
}

fn parse_secret(raw: &str) -> std::result::Result<SecretString, Infallible> {
    Ok(SecretString::from(raw))
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
