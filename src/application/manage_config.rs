//! Config management use case

use crate::application::generate::plan_generated_files;
use crate::domain::render::validate_date_format;
use crate::error::{NotesError, Result};
use crate::infrastructure::{
    Config, FileOp, FileSystemRepository, FileTransaction, NotesRepository, UploadSettings,
};
use std::path::PathBuf;

const VALID_KEYS: &str =
    "title, author, document_class, date_format, upload.directory, upload.link_prefix";

/// Service for managing class configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value (empty string when unset)
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;
        let upload = config.upload.as_ref();

        match key {
            "title" => Ok(config.title.clone()),
            "author" => Ok(config.author.clone().unwrap_or_default()),
            "document_class" => Ok(config.document_class.clone()),
            "date_format" => Ok(config.date_format.clone()),
            "upload.directory" => Ok(upload
                .map(|u| u.directory.display().to_string())
                .unwrap_or_default()),
            "upload.link_prefix" => Ok(upload
                .and_then(|u| u.link_prefix.clone())
                .unwrap_or_default()),
            _ => Err(NotesError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, VALID_KEYS
            ))),
        }
    }

    /// Set a config value and regenerate the files that depend on it.
    /// An empty value clears optional keys.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "title" => config.title = value.to_string(),
            "author" => {
                config.author = (!value.is_empty()).then(|| value.to_string());
            }
            "document_class" => {
                if value.trim().is_empty() {
                    return Err(NotesError::Config(
                        "document_class cannot be empty".to_string(),
                    ));
                }
                config.document_class = value.trim().to_string();
            }
            "date_format" => {
                validate_date_format(value)?;
                config.date_format = value.to_string();
            }
            "upload.directory" => {
                config.upload = if value.is_empty() {
                    None
                } else {
                    Some(UploadSettings {
                        directory: PathBuf::from(value),
                        link_prefix: config.upload.and_then(|u| u.link_prefix),
                    })
                };
            }
            "upload.link_prefix" => {
                let settings = config.upload.as_mut().ok_or_else(|| {
                    NotesError::Config(
                        "Set upload.directory before upload.link_prefix".to_string(),
                    )
                })?;
                settings.link_prefix = (!value.is_empty()).then(|| value.to_string());
            }
            _ => {
                return Err(NotesError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, VALID_KEYS
                )));
            }
        }

        let ledger = self.repository.load_ledger()?;
        let mut ops = vec![FileOp::Write {
            path: Config::relative_path(),
            contents: config.to_toml()?,
        }];
        ops.extend(plan_generated_files(&self.repository, &ledger, &config)?);

        FileTransaction::execute(self.repository.root(), &ops)?;
        tracing::info!(key, "config updated");
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
