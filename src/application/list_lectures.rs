//! List lectures use case

use crate::domain::Lecture;
use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, NotesRepository};
use std::collections::HashSet;
use std::path::PathBuf;

/// A lecture plus whether its content file is on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LectureEntry {
    pub lecture: Lecture,
    pub content_present: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LectureListing {
    pub entries: Vec<LectureEntry>,
    /// `lecNN.tex` files under notes/ that no lecture points at
    pub unreferenced: Vec<PathBuf>,
}

/// List lectures in sequence order along with stray content files.
pub fn list_lectures(repository: &FileSystemRepository) -> Result<LectureListing> {
    let ledger = repository.load_ledger()?;

    let entries: Vec<LectureEntry> = ledger
        .lectures()
        .into_iter()
        .map(|lecture| LectureEntry {
            content_present: repository.exists(&lecture.content_path()),
            lecture,
        })
        .collect();

    let referenced: HashSet<PathBuf> = entries
        .iter()
        .map(|entry| entry.lecture.content_path())
        .collect();

    let unreferenced = repository
        .content_files()
        .into_iter()
        .map(|file| file.path)
        .filter(|path| !referenced.contains(path))
        .collect();

    Ok(LectureListing {
        entries,
        unreferenced,
    })
}
