//! File system repository

use crate::domain::ledger::{ledger_record_path, CONTENT_DIR, LEDGER_DIR};
use crate::domain::Ledger;
use crate::error::{NotesError, Result};
use crate::infrastructure::Config;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

/// Environment variable that pins the class root
pub const ROOT_ENV: &str = "NOTES_ROOT";

fn lecture_file_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^lec(\d+)\.tex$").unwrap())
}

/// Lecture number encoded in a `lecNN.tex` file name
pub fn lecture_number_from_filename(filename: &str) -> Option<usize> {
    lecture_file_regex()
        .captures(filename)
        .and_then(|captures| captures[1].parse().ok())
}

/// A `lecNN.tex` file found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LectureFile {
    pub number: usize,
    /// Path relative to the class root
    pub path: PathBuf,
}

/// Abstract repository for class notes
pub trait NotesRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .notes/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Load the lecture ledger from .notes/lectures.json
    fn load_ledger(&self) -> Result<Ledger>;

    /// Check if .notes directory exists
    fn is_initialized(&self) -> bool;
}

/// File system implementation of NotesRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Class root named by `NOTES_ROOT`, else the nearest ancestor of the
    /// working directory holding `.notes/`. An empty `NOTES_ROOT` counts as unset.
    pub fn discover() -> Result<Self> {
        match std::env::var_os(ROOT_ENV).filter(|value| !value.is_empty()) {
            Some(root) => Self::pinned(PathBuf::from(root)),
            None => Self::discover_from(&std::env::current_dir()?),
        }
    }

    fn pinned(root: PathBuf) -> Result<Self> {
        if !Self::has_notes_dir(&root) {
            return Err(NotesError::Config(format!(
                "{} points at '{}', which has no .notes directory. \
                Run 'notes init' there or unset {}.",
                ROOT_ENV,
                root.display(),
                ROOT_ENV
            )));
        }
        Ok(FileSystemRepository::new(root))
    }

    /// Nearest ancestor of `start`, itself included, that holds `.notes/`
    pub fn discover_from(start: &Path) -> Result<Self> {
        start
            .ancestors()
            .find(|dir| Self::has_notes_dir(dir))
            .map(|dir| FileSystemRepository::new(dir.to_path_buf()))
            .ok_or_else(|| NotesError::NotNotesDirectory(start.to_path_buf()))
    }

    /// Check if a path contains a .notes directory
    fn has_notes_dir(path: &Path) -> bool {
        path.join(LEDGER_DIR).is_dir()
    }

    /// Whether a file or directory exists at a root-relative path
    pub fn exists(&self, rel: &Path) -> bool {
        self.root.join(rel).exists()
    }

    /// Read a root-relative file as bytes
    pub fn read(&self, rel: &Path) -> Result<Vec<u8>> {
        fs::read(self.root.join(rel)).map_err(NotesError::Io)
    }

    /// Whether a root-relative file has no authored text
    pub fn is_blank(&self, rel: &Path) -> Result<bool> {
        let bytes = self.read(rel)?;
        Ok(bytes.iter().all(u8::is_ascii_whitespace))
    }

    fn collect_lecture_files(&self, dir: &str, recursive: bool) -> Vec<LectureFile> {
        let base = self.root.join(dir);
        if !base.is_dir() {
            return Vec::new();
        }

        let walker = WalkDir::new(&base)
            .max_depth(if recursive { usize::MAX } else { 1 })
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || entry
                        .file_name()
                        .to_str()
                        .is_none_or(|name| !name.starts_with('.'))
            });

        let mut files = Vec::new();
        for entry in walker {
            let Ok(entry) = entry else {
                continue;
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(number) = entry
                .file_name()
                .to_str()
                .and_then(lecture_number_from_filename)
            else {
                continue;
            };
            let Ok(rel) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            files.push(LectureFile {
                number,
                path: rel.to_path_buf(),
            });
        }

        files.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.path.cmp(&b.path)));
        files
    }

    /// Every `lecNN.tex` under the content directory, including nested folders
    pub fn content_files(&self) -> Vec<LectureFile> {
        self.collect_lecture_files(CONTENT_DIR, true)
    }

    /// Generated `lecNN.tex` wrappers directly inside the ledger directory
    pub fn wrapper_files(&self) -> Vec<LectureFile> {
        self.collect_lecture_files(LEDGER_DIR, false)
    }
}

impl NotesRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn load_ledger(&self) -> Result<Ledger> {
        let path = self.root.join(ledger_record_path());

        let contents = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                if self.is_initialized() {
                    NotesError::Ledger(format!("missing ledger record {}", path.display()))
                } else {
                    NotesError::NotNotesDirectory(self.root.clone())
                }
            } else {
                NotesError::Io(e)
            }
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            if e.is_data() {
                NotesError::Ledger(e.to_string())
            } else {
                NotesError::Json(e)
            }
        })
    }

    fn is_initialized(&self) -> bool {
        Self::has_notes_dir(&self.root)
    }
}
