//! Configuration management

use crate::domain::ledger::LEDGER_DIR;
use crate::domain::render::{
    validate_date_format, DocumentStyle, DEFAULT_DATE_FORMAT, DEFAULT_DOCUMENT_CLASS,
};
use crate::error::{NotesError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where `notes upload` copies artifacts and how it builds their links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSettings {
    pub directory: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_prefix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default = "default_document_class")]
    pub document_class: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<UploadSettings>,
}

fn default_document_class() -> String {
    DEFAULT_DOCUMENT_CLASS.to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Config {
    /// Create a new config with default values
    pub fn new(title: impl Into<String>) -> Self {
        Config {
            title: title.into(),
            author: None,
            document_class: default_document_class(),
            date_format: default_date_format(),
            upload: None,
        }
    }

    /// Default title for a class directory: its directory name ("math202a")
    pub fn default_title(root: &Path) -> String {
        // The directory may not exist yet when init is about to create it
        let resolved = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        resolved
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("Lecture Notes")
            .to_string()
    }

    /// Relative path of the config file
    pub fn relative_path() -> PathBuf {
        PathBuf::from(LEDGER_DIR).join("config.toml")
    }

    /// Load config from .notes/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(Self::relative_path());

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NotesError::NotNotesDirectory(path.to_path_buf())
            } else {
                NotesError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)?;
        validate_date_format(&config.date_format)?;
        Ok(config)
    }

    /// Serialize to the config.toml text
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Settings used when rendering generated files
    pub fn style(&self) -> DocumentStyle {
        DocumentStyle {
            title: self.title.clone(),
            author: self.author.clone(),
            document_class: self.document_class.clone(),
            date_format: self.date_format.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn save(config: &Config, dir: &Path) {
        fs::create_dir_all(dir.join(LEDGER_DIR)).unwrap();
        fs::write(dir.join(Config::relative_path()), config.to_toml().unwrap()).unwrap();
    }

    #[test]
    fn test_new_config() {
        let config = Config::new("Math 202A");
        assert_eq!(config.title, "Math 202A");
        assert_eq!(config.document_class, "article");
        assert_eq!(config.date_format, "%B %d, %Y");
        assert!(config.author.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::new("CS 270");
        config.author = Some("Me".to_string());
        config.upload = Some(UploadSettings {
            directory: PathBuf::from("/drive/cs270"),
            link_prefix: Some("https://example.org/cs270/".to_string()),
        });

        save(&config, temp.path());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".notes")).unwrap();
        fs::write(temp.path().join(".notes/config.toml"), "title = \"Bare\"\n").unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded, Config::new("Bare"));
    }

    #[test]
    fn test_optional_fields_not_serialized() {
        let text = Config::new("Plain").to_toml().unwrap();
        assert!(text.contains("title = \"Plain\""));
        assert!(!text.contains("author"));
        assert!(!text.contains("upload"));
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        let result = Config::load_from_dir(temp.path());

        match result.unwrap_err() {
            NotesError::NotNotesDirectory(_) => {}
            other => panic!("Expected NotNotesDirectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_bad_date_format() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::new("x");
        config.date_format = "%Q".to_string();
        save(&config, temp.path());

        assert!(matches!(
            Config::load_from_dir(temp.path()),
            Err(NotesError::Config(_))
        ));
    }

    #[test]
    fn test_load_malformed_toml() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(LEDGER_DIR)).unwrap();
        fs::write(temp.path().join(Config::relative_path()), "title = [unclosed").unwrap();

        match Config::load_from_dir(temp.path()) {
            Err(err @ NotesError::TomlDeserialize(_)) => assert_eq!(err.exit_code(), 1),
            other => panic!("Expected TomlDeserialize error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_title_is_directory_name() {
        let temp = TempDir::new().unwrap();
        let class_dir = temp.path().join("math202a");
        fs::create_dir(&class_dir).unwrap();
        assert_eq!(Config::default_title(&class_dir), "math202a");
    }

    #[test]
    fn test_default_title_for_missing_directory() {
        let temp = TempDir::new().unwrap();
        assert_eq!(Config::default_title(&temp.path().join("phys7b")), "phys7b");
    }
}
