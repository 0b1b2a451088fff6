//! GNOME Shell extension publisher library.
//!
//! This crate validates a packaged extension archive and API key, then hands
//! the upload to `gext` (gnome-extensions-cli). It is used by the
//! `gnome-extension-publish` CLI binary and can be driven programmatically
//! with substitute resolvers and executors for testing.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Semantic error types and exit codes
//! - [`executor`] - External command execution abstraction
//! - [`output`] - Progress messages and output relaying
//! - [`publish`] - Publish sequence orchestration
//! - [`request`] - Validated publish requests
//! - [`tool`] - `gext` resolution and sanity probing

pub mod cli;
pub mod error;
pub mod executor;
pub mod output;
pub mod publish;
pub mod request;
pub mod tool;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
