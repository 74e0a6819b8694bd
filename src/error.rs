//! Error types for class-notes

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the notes application
#[derive(Debug, Error)]
pub enum NotesError {
    #[error("Notes already exist in this project: {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Not a notes directory: {0}")]
    NotNotesDirectory(PathBuf),

    #[error("Lecture not found: {0}")]
    NotFound(usize),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Corrupt ledger: {0}")]
    Ledger(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl NotesError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            NotesError::NotNotesDirectory(_) => 2,
            NotesError::AlreadyInitialized(_) => 3,
            NotesError::NotFound(_) => 4,
            NotesError::InvalidDate(_) | NotesError::InvalidSchedule(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            NotesError::AlreadyInitialized(path) => {
                format!(
                    "Notes already exist in this project: {}\n\n\
                    Suggestions:\n\
                    • Use 'notes modify' to insert or remove lectures\n\
                    • Use 'notes modify regenerate' to rebuild generated files\n\
                    • Delete the .notes directory by hand to start over",
                    path.display()
                )
            }
            NotesError::NotNotesDirectory(path) => {
                format!(
                    "Not a notes directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'notes init' in this directory to set up a class\n\
                    • Navigate to an existing class directory\n\
                    • Set NOTES_ROOT environment variable to your class path",
                    path.display()
                )
            }
            NotesError::NotFound(number) => {
                format!(
                    "Lecture not found: {}\n\n\
                    Suggestions:\n\
                    • Use 'notes list' to see lecture numbers",
                    number
                )
            }
            NotesError::InvalidDate(msg) => {
                format!(
                    "Invalid date: {}\n\n\
                    Dates use the format YYYY-MM-DD and must fall on a meeting day\n\
                    between the first and last day of class.\n\
                    Example: notes modify insert 2024-01-05",
                    msg
                )
            }
            NotesError::InvalidSchedule(msg) => {
                format!(
                    "Invalid schedule: {}\n\n\
                    Meeting days: M, T, W, Th (or R), F, Sa, Su (e.g., MW, TTh, MWF)\n\
                    Example: notes init --days TTh --first 2024-01-16 --last 2024-05-02",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using NotesError
pub type Result<T> = std::result::Result<T, NotesError>;
