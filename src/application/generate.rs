//! Planning of generated files (wrappers, aggregate, ledger record)

use crate::domain::ledger::{aggregate_path, ledger_record_path, wrapper_path};
use crate::domain::{load_wrapper_template, render_aggregate, Ledger};
use crate::error::Result;
use crate::infrastructure::{Config, FileOp, FileSystemRepository, NotesRepository};

/// Operations that bring every generated file in line with `ledger` and `config`.
///
/// Writes of unchanged content are skipped when applied, so the plan can be
/// re-run safely.
pub fn plan_generated_files(
    repository: &FileSystemRepository,
    ledger: &Ledger,
    config: &Config,
) -> Result<Vec<FileOp>> {
    let template = load_wrapper_template(repository.root())?;
    let style = config.style();
    let lectures = ledger.lectures();

    let mut ops: Vec<FileOp> = lectures
        .iter()
        .map(|lecture| FileOp::Write {
            path: lecture.wrapper_path(),
            contents: template.render(lecture, &style),
        })
        .collect();

    // Wrappers left over from a longer ledger
    ops.extend(
        repository
            .wrapper_files()
            .into_iter()
            .filter(|wrapper| {
                wrapper.number == 0
                    || wrapper.number > ledger.len()
                    || wrapper.path != wrapper_path(wrapper.number)
            })
            .map(|wrapper| FileOp::Remove(wrapper.path)),
    );

    ops.push(FileOp::Write {
        path: aggregate_path(),
        contents: render_aggregate(&lectures, &style),
    });
    ops.push(FileOp::Write {
        path: ledger_record_path(),
        contents: format!("{}\n", serde_json::to_string_pretty(ledger)?),
    });

    Ok(ops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClassSchedule, MeetingDays};
    use chrono::NaiveDate;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn ledger() -> Ledger {
        let days: MeetingDays = "TTh".parse().unwrap();
        let schedule = ClassSchedule::new(
            days,
            NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 25).unwrap(),
        )
        .unwrap();
        Ledger::initialize(schedule)
    }

    #[test]
    fn test_plan_writes_wrappers_aggregate_and_record() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());

        let ops = plan_generated_files(&repo, &ledger(), &Config::new("x")).unwrap();
        let paths: Vec<PathBuf> = ops
            .iter()
            .map(|op| match op {
                FileOp::Write { path, .. } => path.clone(),
                other => panic!("unexpected op {:?}", other),
            })
            .collect();

        assert_eq!(
            paths,
            vec![
                PathBuf::from(".notes/lec01.tex"),
                PathBuf::from(".notes/lec02.tex"),
                PathBuf::from(".notes/lec03.tex"),
                PathBuf::from(".notes/lec04.tex"),
                PathBuf::from(".notes/notes.tex"),
                PathBuf::from(".notes/lectures.json"),
            ]
        );
    }

    #[test]
    fn test_plan_removes_stale_wrappers() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".notes")).unwrap();
        fs::write(temp.path().join(".notes/lec05.tex"), "old").unwrap();
        fs::write(temp.path().join(".notes/lec1.tex"), "odd name").unwrap();

        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        let ops = plan_generated_files(&repo, &ledger(), &Config::new("x")).unwrap();

        assert!(ops.contains(&FileOp::Remove(PathBuf::from(".notes/lec05.tex"))));
        assert!(ops.contains(&FileOp::Remove(PathBuf::from(".notes/lec1.tex"))));
    }
}
