//! Remote storage seam for `notes upload`
//!
//! Backends take their settings at construction. Nothing here reads
//! credentials or tokens from process-wide state.

use crate::error::{NotesError, Result};
use crate::infrastructure::config::UploadSettings;
use std::fs;
use std::path::{Path, PathBuf};

/// A local file handed to a storage backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Stable name used as the key in links.json ("notes", "lec01")
    pub name: String,
    /// Absolute path of the file to upload
    pub path: PathBuf,
}

/// Uploads one artifact and returns the link under which it is published
#[cfg_attr(test, mockall::automock)]
pub trait StorageUploader {
    fn upload(&self, artifact: &Artifact) -> Result<String>;
}

/// Copies artifacts into a directory, e.g. a locally synced drive folder
#[derive(Debug, Clone)]
pub struct DirectoryUploader {
    directory: PathBuf,
    link_prefix: Option<String>,
}

impl DirectoryUploader {
    pub fn new(settings: &UploadSettings) -> Self {
        DirectoryUploader {
            directory: settings.directory.clone(),
            link_prefix: settings.link_prefix.clone(),
        }
    }

    fn link_for(&self, destination: &Path, file_name: &str) -> String {
        match &self.link_prefix {
            Some(prefix) if prefix.ends_with('/') => format!("{}{}", prefix, file_name),
            Some(prefix) => format!("{}/{}", prefix, file_name),
            None => format!("file://{}", destination.display()),
        }
    }
}

impl StorageUploader for DirectoryUploader {
    fn upload(&self, artifact: &Artifact) -> Result<String> {
        let file_name = artifact
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                NotesError::Upload(format!("'{}' has no file name", artifact.path.display()))
            })?;

        fs::create_dir_all(&self.directory).map_err(|e| {
            NotesError::Upload(format!(
                "cannot create upload directory {}: {}",
                self.directory.display(),
                e
            ))
        })?;

        let destination = self.directory.join(file_name);
        fs::copy(&artifact.path, &destination).map_err(|e| {
            NotesError::Upload(format!(
                "failed to copy {} to {}: {}",
                artifact.path.display(),
                destination.display(),
                e
            ))
        })?;

        let destination = destination.canonicalize().unwrap_or(destination);
        tracing::debug!(artifact = %artifact.name, to = %destination.display(), "copied");
        Ok(self.link_for(&destination, file_name))
    }
}
