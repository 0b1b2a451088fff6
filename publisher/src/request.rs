//! Validated publish requests.
//!
//! A [`PublishRequest`] can only be built from inputs that pass every
//! precondition, so holding one means nothing needs re-checking before the
//! external tool is spawned.

use crate::error::{PublishError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use secrecy::{ExposeSecret, SecretString};

/// The validated parameters for one publish attempt.
///
/// The API key is stored trimmed and wrapped in a [`SecretString`], so the
/// request's `Debug` output never reveals it.
#[derive(Debug)]
pub struct PublishRequest {
    archive: Utf8PathBuf,
    uuid: String,
    api_key: SecretString,
    version: String,
}

impl PublishRequest {
    /// Validates the inputs and builds a request.
    ///
    /// Checks run in order: the archive must be an existing file, the API
    /// key must be non-empty once trimmed, and the UUID and version must be
    /// non-empty.
    ///
    /// # Errors
    ///
    /// - [`PublishError::ArchiveNotFound`] if the archive does not exist.
    /// - [`PublishError::ArchiveNotAFile`] if the archive is a directory or
    ///   other non-file entry.
    /// - [`PublishError::EmptyApiKey`] if the key is empty or all whitespace.
    /// - [`PublishError::EmptyField`] if the UUID or version is empty.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use camino::Utf8PathBuf;
    /// use gnome_extension_publish::request::PublishRequest;
    ///
    /// let request = PublishRequest::new(
    ///     Utf8PathBuf::from("dist/lockscreen@example.org.shell-extension.zip"),
    ///     "lockscreen@example.org",
    ///     "  secret123  ",
    ///     "7",
    /// )?;
    /// assert_eq!(request.uuid(), "lockscreen@example.org");
    /// # Ok::<(), gnome_extension_publish::error::PublishError>(())
    /// ```
    pub fn new(
        archive: Utf8PathBuf,
        uuid: impl Into<String>,
        api_key: &str,
        version: impl Into<String>,
    ) -> Result<Self> {
        validate_archive(&archive)?;

        let trimmed_key = api_key.trim();
        if trimmed_key.is_empty() {
            return Err(PublishError::EmptyApiKey);
        }

        let uuid = non_empty(uuid.into(), "extension UUID")?;
        let version = non_empty(version.into(), "extension version")?;

        Ok(Self {
            archive,
            uuid,
            api_key: SecretString::from(trimmed_key.to_owned()),
            version,
        })
    }

    /// Returns the archive path.
    #[must_use]
    pub fn archive(&self) -> &Utf8Path {
        &self.archive
    }

    /// Returns the archive's file name, or the full path if it has none.
    #[must_use]
    pub fn archive_name(&self) -> &str {
        self.archive.file_name().unwrap_or(self.archive.as_str())
    }

    /// Returns the extension UUID.
    #[must_use]
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Returns the release version label.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the trimmed API key.
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

fn validate_archive(archive: &Utf8Path) -> Result<()> {
    if !archive.exists() {
        return Err(PublishError::ArchiveNotFound {
            path: archive.to_owned(),
        });
    }
    if !archive.is_file() {
        return Err(PublishError::ArchiveNotAFile {
            path: archive.to_owned(),
        });
    }
    Ok(())
}

fn non_empty(value: String, field: &'static str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(PublishError::EmptyField { field });
    }
    Ok(value)
}
