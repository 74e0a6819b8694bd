//! All-or-nothing application of planned file operations
//!
//! Callers build the complete list of [`FileOp`]s first. [`FileTransaction::execute`]
//! applies them in order and, if any step fails, undoes the applied steps in
//! reverse before returning the original error.

use crate::error::{NotesError, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A single planned change, with paths relative to the class root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOp {
    /// Create a directory (and any missing parents)
    CreateDir(PathBuf),
    /// Create or replace a generated file
    Write { path: PathBuf, contents: String },
    /// Create a file only if nothing exists at the path yet
    CreateIfAbsent { path: PathBuf, contents: String },
    /// Move a file; fails if the destination exists
    Rename { from: PathBuf, to: PathBuf },
    /// Delete a file
    Remove(PathBuf),
}

impl fmt::Display for FileOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOp::CreateDir(path) => write!(f, "mkdir  {}", path.display()),
            FileOp::Write { path, .. } => write!(f, "write  {}", path.display()),
            FileOp::CreateIfAbsent { path, .. } => write!(f, "create {}", path.display()),
            FileOp::Rename { from, to } => {
                write!(f, "move   {} -> {}", from.display(), to.display())
            }
            FileOp::Remove(path) => write!(f, "remove {}", path.display()),
        }
    }
}

/// Undo record for an applied step
#[derive(Debug)]
enum Applied {
    CreatedDir(PathBuf),
    CreatedFile(PathBuf),
    Replaced { path: PathBuf, previous: Vec<u8> },
    Renamed { from: PathBuf, to: PathBuf },
    Removed { path: PathBuf, previous: Vec<u8> },
}

/// Applies file operations under a root directory, rolling back on failure
pub struct FileTransaction {
    root: PathBuf,
    applied: Vec<Applied>,
}

impl FileTransaction {
    fn new(root: &Path) -> Self {
        FileTransaction {
            root: root.to_path_buf(),
            applied: Vec::new(),
        }
    }

    /// Apply every operation or none of them
    pub fn execute(root: &Path, ops: &[FileOp]) -> Result<()> {
        let mut tx = FileTransaction::new(root);

        for op in ops {
            if let Err(e) = tx.apply(op) {
                tracing::warn!(op = %op, error = %e, "file operation failed, rolling back");
                tx.rollback();
                return Err(e);
            }
        }

        tracing::debug!(steps = tx.applied.len(), "file transaction committed");
        Ok(())
    }

    fn apply(&mut self, op: &FileOp) -> Result<()> {
        tracing::debug!(op = %op, "applying");

        match op {
            FileOp::CreateDir(rel) => self.create_dir(rel),
            FileOp::Write { path, contents } => self.write(path, contents),
            FileOp::CreateIfAbsent { path, contents } => {
                let full = self.root.join(path);
                if full.exists() {
                    return Ok(());
                }
                self.ensure_parent(&full)?;
                fs::write(&full, contents)?;
                self.applied.push(Applied::CreatedFile(full));
                Ok(())
            }
            FileOp::Rename { from, to } => {
                let from = self.root.join(from);
                let to = self.root.join(to);

                if !from.is_file() {
                    return Err(NotesError::Io(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("Cannot move missing file: {}", from.display()),
                    )));
                }
                if to.exists() {
                    return Err(NotesError::Io(std::io::Error::new(
                        std::io::ErrorKind::AlreadyExists,
                        format!("Destination already exists: {}", to.display()),
                    )));
                }

                self.ensure_parent(&to)?;
                fs::rename(&from, &to)?;
                self.applied.push(Applied::Renamed { from, to });
                Ok(())
            }
            FileOp::Remove(rel) => {
                let full = self.root.join(rel);
                let previous = fs::read(&full)?;
                fs::remove_file(&full)?;
                self.applied.push(Applied::Removed {
                    path: full,
                    previous,
                });
                Ok(())
            }
        }
    }

    fn create_dir(&mut self, rel: &Path) -> Result<()> {
        let full = self.root.join(rel);

        // Record each directory we create so rollback removes only those
        let mut missing = Vec::new();
        let mut current = full.as_path();
        while !current.exists() {
            missing.push(current.to_path_buf());
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        for dir in missing.into_iter().rev() {
            fs::create_dir(&dir)?;
            self.applied.push(Applied::CreatedDir(dir));
        }
        Ok(())
    }

    fn ensure_parent(&mut self, full: &Path) -> Result<()> {
        if let Some(parent) = full.parent() {
            if !parent.exists() {
                let rel = parent.strip_prefix(&self.root).unwrap_or(parent).to_path_buf();
                self.create_dir(&rel)?;
            }
        }
        Ok(())
    }

    /// Write through a temp file in the same directory, then rename into place
    fn write(&mut self, rel: &Path, contents: &str) -> Result<()> {
        let full = self.root.join(rel);

        let previous = if full.exists() {
            let bytes = fs::read(&full)?;
            if bytes == contents.as_bytes() {
                return Ok(());
            }
            Some(bytes)
        } else {
            None
        };

        self.ensure_parent(&full)?;

        let tmp_name = format!(
            "{}.notes-tmp-{}",
            full.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("file"),
            std::process::id()
        );
        let tmp_path = full.with_file_name(tmp_name);
        fs::write(&tmp_path, contents)?;

        // rename replaces an existing target atomically
        if let Err(e) = fs::rename(&tmp_path, &full) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        self.applied.push(match previous {
            Some(previous) => Applied::Replaced {
                path: full,
                previous,
            },
            None => Applied::CreatedFile(full),
        });
        Ok(())
    }

    fn rollback(mut self) {
        while let Some(step) = self.applied.pop() {
            let result = match &step {
                Applied::CreatedDir(path) => fs::remove_dir(path),
                Applied::CreatedFile(path) => fs::remove_file(path),
                Applied::Replaced { path, previous } => fs::write(path, previous),
                Applied::Renamed { from, to } => fs::rename(to, from),
                Applied::Removed { path, previous } => fs::write(path, previous),
            };
            if let Err(e) = result {
                tracing::warn!(step = ?step, error = %e, "rollback step failed");
            }
        }
    }
}
