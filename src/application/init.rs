//! Initialize class notes use case

use crate::application::generate::plan_generated_files;
use crate::domain::ledger::{CONTENT_DIR, LEDGER_DIR, OUTPUT_DIR};
use crate::domain::{ClassSchedule, Ledger};
use crate::error::{NotesError, Result};
use crate::infrastructure::{
    Config, FileOp, FileSystemRepository, FileTransaction, NotesRepository,
};
use std::path::{Path, PathBuf};

/// What `init` created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub root: PathBuf,
    pub lectures: usize,
    /// Content files that already existed and were kept as they were
    pub adopted: usize,
}

/// Initialize class notes at the specified path.
///
/// Existing `notes/lecNN.tex` files are adopted rather than replaced, which
/// lets a class be set up around notes written before the ledger existed.
pub fn init(path: &Path, schedule: ClassSchedule, title: Option<String>) -> Result<InitReport> {
    let repo = FileSystemRepository::new(path.to_path_buf());

    if repo.is_initialized() {
        return Err(NotesError::AlreadyInitialized(path.to_path_buf()));
    }

    let ledger = Ledger::initialize(schedule);
    let config = Config::new(title.unwrap_or_else(|| Config::default_title(path)));

    // A missing class directory is created (and rolled back) with .notes/
    let mut ops = vec![
        FileOp::CreateDir(PathBuf::from(LEDGER_DIR)),
        FileOp::CreateDir(PathBuf::from(CONTENT_DIR)),
        FileOp::CreateDir(PathBuf::from(OUTPUT_DIR)),
        FileOp::Write {
            path: Config::relative_path(),
            contents: config.to_toml()?,
        },
    ];

    let mut adopted = 0;
    for lecture in ledger.lectures() {
        if repo.exists(&lecture.content_path()) {
            adopted += 1;
        }
        ops.push(FileOp::CreateIfAbsent {
            path: lecture.content_path(),
            contents: String::new(),
        });
    }

    ops.extend(plan_generated_files(&repo, &ledger, &config)?);

    FileTransaction::execute(path, &ops)?;

    if ledger.is_empty() {
        tracing::warn!(schedule = ?schedule, "schedule has no meeting dates");
    }
    tracing::info!(
        root = %path.display(),
        lectures = ledger.len(),
        adopted,
        "initialized class notes"
    );

    Ok(InitReport {
        root: path.to_path_buf(),
        lectures: ledger.len(),
        adopted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MeetingDays;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;
    use walkdir::WalkDir;

    fn schedule() -> ClassSchedule {
        let days: MeetingDays = "MW".parse().unwrap();
        ClassSchedule::new(
            days,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        )
        .unwrap()
    }

    fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| {
                let contents = if e.file_type().is_file() {
                    fs::read(e.path()).unwrap()
                } else {
                    Vec::new()
                };
                (e.path().to_path_buf(), contents)
            })
            .collect()
    }

    #[test]
    fn test_init_creates_layout() {
        let temp = TempDir::new().unwrap();
        let report = init(temp.path(), schedule(), Some("Math 202A".to_string())).unwrap();

        assert_eq!(report.lectures, 4);
        assert_eq!(report.adopted, 0);

        for dir in [".notes", "notes", "outputs"] {
            assert!(temp.path().join(dir).is_dir(), "{} missing", dir);
        }
        for n in 1..=4 {
            let content = temp.path().join(format!("notes/lec{:02}.tex", n));
            assert_eq!(fs::read_to_string(content).unwrap(), "");
            assert!(temp.path().join(format!(".notes/lec{:02}.tex", n)).exists());
        }
        assert!(!temp.path().join("notes/lec05.tex").exists());

        let wrapper = fs::read_to_string(temp.path().join(".notes/lec02.tex")).unwrap();
        assert!(wrapper.contains("\\setcounter{section}{1}"));
        assert!(wrapper.contains("\\section{January 03, 2024}"));
        assert!(wrapper.contains("\\input{../notes/lec02.tex}"));

        let aggregate = fs::read_to_string(temp.path().join(".notes/notes.tex")).unwrap();
        assert!(aggregate.contains("\\title{Math 202A}"));
        assert!(aggregate.contains("\\input{lec04.tex}"));

        let config = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(config.title, "Math 202A");
    }

    #[test]
    fn test_init_records_ledger() {
        let temp = TempDir::new().unwrap();
        init(temp.path(), schedule(), None).unwrap();

        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        let dates: Vec<String> = repo
            .load_ledger()
            .unwrap()
            .lectures()
            .iter()
            .map(|l| l.date.to_string())
            .collect();
        assert_eq!(
            dates,
            vec!["2024-01-01", "2024-01-03", "2024-01-08", "2024-01-10"]
        );
    }

    #[test]
    fn test_init_twice_changes_nothing() {
        let temp = TempDir::new().unwrap();
        init(temp.path(), schedule(), None).unwrap();
        fs::write(temp.path().join("notes/lec01.tex"), "Definitions").unwrap();

        let before = snapshot(temp.path());
        let result = init(temp.path(), schedule(), Some("Other".to_string()));

        assert!(matches!(result, Err(NotesError::AlreadyInitialized(_))));
        assert_eq!(snapshot(temp.path()), before);
    }

    #[test]
    fn test_init_adopts_existing_notes() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("notes")).unwrap();
        fs::write(temp.path().join("notes/lec02.tex"), "Already written").unwrap();

        let report = init(temp.path(), schedule(), None).unwrap();

        assert_eq!(report.adopted, 1);
        assert_eq!(
            fs::read_to_string(temp.path().join("notes/lec02.tex")).unwrap(),
            "Already written"
        );
    }

    #[test]
    fn test_init_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let class_dir = temp.path().join("cs270");

        init(&class_dir, schedule(), None).unwrap();

        assert!(class_dir.join(".notes/lectures.json").exists());
        let config = Config::load_from_dir(&class_dir).unwrap();
        assert_eq!(config.title, "cs270");
    }
}
