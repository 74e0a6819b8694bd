//! Modify lectures use case (insert, remove, redate, regenerate)
//!
//! Every change is planned in full against the current tree and then applied
//! through a single [`FileTransaction`], so a failure leaves the tree as it was.

use crate::application::generate::plan_generated_files;
use crate::domain::ledger::{content_path, ARCHIVE_DIR, CONTENT_DIR, LEDGER_DIR, OUTPUT_DIR};
use crate::domain::{EditOutcome, Lecture, LedgerEdit};
use crate::error::Result;
use crate::infrastructure::{FileOp, FileSystemRepository, FileTransaction, NotesRepository};
use std::path::PathBuf;

/// Result of a modify run
#[derive(Debug, Clone)]
pub struct ModifyReport {
    pub outcome: Option<EditOutcome>,
    /// Where removed authored content was moved, if it held any text
    pub archived: Option<PathBuf>,
    pub ops: Vec<FileOp>,
    pub dry_run: bool,
}

/// Service for amending an existing ledger
pub struct ModifyService {
    repository: FileSystemRepository,
}

impl ModifyService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ModifyService { repository }
    }

    /// Apply one ledger edit, or only plan it when `dry_run` is set
    pub fn execute(&self, edit: LedgerEdit, dry_run: bool) -> Result<ModifyReport> {
        let config = self.repository.load_config()?;
        let ledger = self.repository.load_ledger()?;

        let outcome = ledger.apply(edit)?;

        let mut ops = Vec::new();
        let mut archived = None;

        if let Some(removed) = outcome.removed {
            archived = self.plan_removed_content(&removed, &mut ops)?;
        }

        for (from, to) in &outcome.renames {
            let from_path = content_path(*from);
            if self.repository.exists(&from_path) {
                ops.push(FileOp::Rename {
                    from: from_path,
                    to: content_path(*to),
                });
            } else {
                tracing::warn!(
                    path = %from_path.display(),
                    "content file missing, nothing to renumber"
                );
            }
        }

        if let Some(inserted) = outcome.inserted {
            ops.push(FileOp::CreateIfAbsent {
                path: inserted.content_path(),
                contents: String::new(),
            });
        }

        ops.extend(plan_generated_files(
            &self.repository,
            &outcome.ledger,
            &config,
        )?);

        if !dry_run {
            FileTransaction::execute(self.repository.root(), &ops)?;
            tracing::info!(edit = ?edit, lectures = outcome.ledger.len(), "ledger modified");
        }

        Ok(ModifyReport {
            outcome: Some(outcome),
            archived,
            ops,
            dry_run,
        })
    }

    /// Rewrite every generated file from the ledger record, restoring missing
    /// directories and content files
    pub fn regenerate(&self, dry_run: bool) -> Result<ModifyReport> {
        let config = self.repository.load_config()?;
        let ledger = self.repository.load_ledger()?;

        let mut ops = vec![
            FileOp::CreateDir(PathBuf::from(CONTENT_DIR)),
            FileOp::CreateDir(PathBuf::from(OUTPUT_DIR)),
        ];
        for lecture in ledger.lectures() {
            if !self.repository.exists(&lecture.content_path()) {
                ops.push(FileOp::CreateIfAbsent {
                    path: lecture.content_path(),
                    contents: String::new(),
                });
            }
        }
        ops.extend(plan_generated_files(&self.repository, &ledger, &config)?);

        if !dry_run {
            FileTransaction::execute(self.repository.root(), &ops)?;
            tracing::info!(lectures = ledger.len(), "generated files regenerated");
        }

        Ok(ModifyReport {
            outcome: None,
            archived: None,
            ops,
            dry_run,
        })
    }

    /// Blank content is deleted; authored content is moved to the archive
    fn plan_removed_content(
        &self,
        removed: &Lecture,
        ops: &mut Vec<FileOp>,
    ) -> Result<Option<PathBuf>> {
        let path = removed.content_path();
        if !self.repository.exists(&path) {
            return Ok(None);
        }

        if self.repository.is_blank(&path)? {
            ops.push(FileOp::Remove(path));
            return Ok(None);
        }

        let archive_dir = PathBuf::from(LEDGER_DIR).join(ARCHIVE_DIR);
        let base = format!("{}-{}", removed.stem(), removed.date.format("%Y-%m-%d"));
        let mut target = archive_dir.join(format!("{}.tex", base));
        let mut suffix = 2;
        while self.repository.exists(&target) {
            target = archive_dir.join(format!("{}-{}.tex", base, suffix));
            suffix += 1;
        }

        ops.push(FileOp::Rename {
            from: path,
            to: target.clone(),
        });
        Ok(Some(target))
    }
}
