//! Uploaded file storage.
//!
//! Listing images and proof documents are referenced from the database by their
//! public path, `uploads/<object name>`. Depending on configuration the objects
//! themselves live either in a local directory served by the API server, or
//! inside of an S3-compatible bucket.

use std::{
    io::ErrorKind,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use bytes::Bytes;
use derive_more::{Display, Error, From};
use rand::{
    distributions::{Alphanumeric, DistString},
    thread_rng,
};
use tracing::{debug, warn};

use crate::config;

/// Path prefix shared by all stored files.
pub const PUBLIC_PREFIX: &str = "uploads";

/// Max length of the original file name kept in an object name.
const MAX_NAME_LENGTH: usize = 100;

/// Errors that may occur while storing or removing files.
#[derive(Debug, Display, From, Error)]
pub enum StorageError {
    /// Local filesystem error.
    Io(std::io::Error),

    /// AWS S3-related error.
    #[cfg(feature = "s3")]
    S3(crate::s3::Error),

    /// Provided path does not point to a stored file.
    #[display(fmt = "invalid file path")]
    InvalidPath,

    /// S3 storage is configured, but support for it was not compiled in.
    #[display(fmt = "S3 storage support is not enabled")]
    S3Disabled,
}

/// Configured file storage.
#[derive(Clone)]
pub enum FileStorage {
    /// Files stored inside of a local directory.
    Local { root: PathBuf },

    /// Files stored inside of an S3 bucket.
    #[cfg(feature = "s3")]
    S3(crate::s3::ConfiguredClient),
}

impl FileStorage {
    /// Create new [`FileStorage`] from the provided [`Storage`] configuration.
    ///
    /// [`Storage`]: config::Storage
    pub async fn new(config: &config::Storage) -> Result<FileStorage, StorageError> {
        match config {
            config::Storage::Local { path } => Ok(FileStorage::Local { root: path.clone() }),
            #[cfg(feature = "s3")]
            config::Storage::S3(s3) => Ok(FileStorage::S3(
                crate::s3::ConfiguredClient::new(s3).await,
            )),
            #[cfg(not(feature = "s3"))]
            config::Storage::S3(_) => Err(StorageError::S3Disabled),
        }
    }

    /// Store file contents and return the public path of the stored file.
    pub async fn store(
        &self,
        original_name: &str,
        content_type: &str,
        contents: Bytes,
    ) -> Result<String, StorageError> {
        let name = object_name(original_name);

        match self {
            FileStorage::Local { root } => {
                tokio::fs::create_dir_all(root).await?;
                tokio::fs::write(root.join(&name), &contents).await?;
            }
            #[cfg(feature = "s3")]
            FileStorage::S3(client) => {
                client
                    .upload_file(&format!("{PUBLIC_PREFIX}/{name}"), content_type, contents)
                    .await?;
            }
        }

        #[cfg(not(feature = "s3"))]
        let _ = content_type;

        debug!(%name, "stored uploaded file");

        Ok(format!("{PUBLIC_PREFIX}/{name}"))
    }

    /// Remove a stored file by its public path.
    ///
    /// Removing a file that does not exist is not an error.
    pub async fn remove(&self, path: &str) -> Result<(), StorageError> {
        let name = object_key(path)?;

        match self {
            FileStorage::Local { root } => match tokio::fs::remove_file(root.join(name)).await {
                Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
                _ => Ok(()),
            },
            #[cfg(feature = "s3")]
            FileStorage::S3(client) => {
                client.delete_file(path).await?;
                Ok(())
            }
        }
    }

    /// Remove the provided files in a background task.
    ///
    /// Cleanup is best effort: failures are logged and otherwise ignored.
    pub fn spawn_cleanup<I>(&self, paths: I)
    where
        I: IntoIterator<Item = String>,
    {
        let paths: Vec<String> = paths.into_iter().collect();

        if paths.is_empty() {
            return;
        }

        let storage = self.clone();

        tokio::spawn(async move {
            for path in paths {
                if let Err(err) = storage.remove(&path).await {
                    warn!(%path, %err, "unable to delete uploaded file");
                }
            }
        });
    }
}

/// Generate a unique object name for an uploaded file.
///
/// Object names start with the upload timestamp, followed by a random
/// suffix and a sanitized version of the original file name.
pub fn object_name(original_name: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or_default();

    let suffix = Alphanumeric.sample_string(&mut thread_rng(), 6);

    format!("{millis}-{suffix}-{}", sanitize_file_name(original_name))
}

/// Strip any directories and unusual characters from a client-provided file name.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default();

    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_LENGTH)
        .collect();

    let sanitized = sanitized.trim_start_matches('.');

    if sanitized.is_empty() {
        String::from("file")
    } else {
        sanitized.to_string()
    }
}

/// Convert a public path into an object name.
fn object_key(path: &str) -> Result<&str, StorageError> {
    let name = path
        .strip_prefix(PUBLIC_PREFIX)
        .and_then(|name| name.strip_prefix('/'))
        .ok_or(StorageError::InvalidPath)?;

    if name.is_empty() || name.contains(|c: char| c == '/' || c == '\\') || name.starts_with('.') {
        return Err(StorageError::InvalidPath);
    }

    Ok(name)
}
