//! Upload use case
//!
//! Hands the aggregate and every lecture to a [`StorageUploader`] and records
//! the returned links in `.notes/links.json` for downstream publishing.

use crate::domain::ledger::{aggregate_path, lecture_stem, LEDGER_DIR};
use crate::error::{NotesError, Result};
use crate::infrastructure::{
    Artifact, FileOp, FileSystemRepository, FileTransaction, NotesRepository, StorageUploader,
};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Artifact name -> published link
pub type LinkManifest = BTreeMap<String, String>;

pub const AGGREGATE_NAME: &str = "notes";

/// Relative path of the link manifest
pub fn links_path() -> PathBuf {
    PathBuf::from(LEDGER_DIR).join("links.json")
}

/// Service for publishing notes through a storage backend
pub struct UploadService<U: StorageUploader> {
    repository: FileSystemRepository,
    uploader: U,
}

impl<U: StorageUploader> UploadService<U> {
    pub fn new(repository: FileSystemRepository, uploader: U) -> Self {
        UploadService {
            repository,
            uploader,
        }
    }

    /// Artifacts in publishing order: the aggregate, then each lecture's
    /// content file by number. Paths come from the ledger, so a name always
    /// matches the lecture that currently holds that number.
    pub fn artifacts(&self) -> Result<Vec<Artifact>> {
        let ledger = self.repository.load_ledger()?;
        let root = self.repository.root();

        let mut candidates = vec![(AGGREGATE_NAME.to_string(), aggregate_path())];
        candidates.extend(
            ledger
                .lectures()
                .iter()
                .map(|lecture| (lecture_stem(lecture.number), lecture.content_path())),
        );

        let mut artifacts = Vec::new();
        for (name, rel) in candidates {
            if self.repository.exists(&rel) {
                artifacts.push(Artifact {
                    name,
                    path: root.join(rel),
                });
            } else {
                tracing::warn!(artifact = %name, path = %rel.display(), "nothing to upload");
            }
        }
        Ok(artifacts)
    }

    /// Upload every artifact and write the link manifest
    pub fn execute(&self) -> Result<LinkManifest> {
        let mut links = LinkManifest::new();

        for artifact in self.artifacts()? {
            let link = self.uploader.upload(&artifact).map_err(|e| match e {
                NotesError::Upload(msg) => {
                    NotesError::Upload(format!("{}: {}", artifact.name, msg))
                }
                other => other,
            })?;
            tracing::info!(artifact = %artifact.name, link = %link, "uploaded");
            links.insert(artifact.name, link);
        }

        let ops = [FileOp::Write {
            path: links_path(),
            contents: format!("{}\n", serde_json::to_string_pretty(&links)?),
        }];
        FileTransaction::execute(self.repository.root(), &ops)?;

        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init::init;
    use crate::application::modify::ModifyService;
    use crate::domain::LedgerEdit;
    use crate::domain::{ClassSchedule, MeetingDays};
    use crate::infrastructure::uploader::MockStorageUploader;
    use chrono::NaiveDate;
    use mockall::predicate::function;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let temp = TempDir::new().unwrap();
        let days: MeetingDays = "MW".parse().unwrap();
        let schedule = ClassSchedule::new(
            days,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
        )
        .unwrap();
        init(temp.path(), schedule, None).unwrap();
        temp
    }

    #[test]
    fn test_upload_writes_link_manifest() {
        let temp = setup();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());

        let mut uploader = MockStorageUploader::new();
        uploader
            .expect_upload()
            .times(3)
            .returning(|artifact| Ok(format!("https://drive.example/{}", artifact.name)));

        let links = UploadService::new(repo, uploader).execute().unwrap();

        assert_eq!(links.len(), 3);
        assert_eq!(links["notes"], "https://drive.example/notes");
        assert_eq!(links["lec02"], "https://drive.example/lec02");

        let written = fs::read_to_string(temp.path().join(".notes/links.json")).unwrap();
        let parsed: LinkManifest = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, links);
    }

    #[test]
    fn test_artifacts_follow_ledger_after_renumbering() {
        let temp = setup();
        fs::write(temp.path().join("notes/lec01.tex"), "first").unwrap();
        fs::write(temp.path().join("notes/lec02.tex"), "second").unwrap();
        fs::write(temp.path().join("outputs/lec01.pdf"), "%PDF first").unwrap();
        fs::write(temp.path().join("outputs/lec02.pdf"), "%PDF second").unwrap();

        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        ModifyService::new(repo.clone())
            .execute(LedgerEdit::Remove(1), false)
            .unwrap();

        let artifacts = UploadService::new(repo, MockStorageUploader::new())
            .artifacts()
            .unwrap();

        let names: Vec<&str> = artifacts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["notes", "lec01"]);
        assert!(artifacts[1].path.ends_with("notes/lec01.tex"));
        assert_eq!(fs::read_to_string(&artifacts[1].path).unwrap(), "second");
    }

    #[test]
    fn test_upload_failure_names_artifact_and_writes_nothing() {
        let temp = setup();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());

        let mut uploader = MockStorageUploader::new();
        uploader
            .expect_upload()
            .with(function(|a: &Artifact| a.name == "notes"))
            .returning(|_| Ok("https://drive.example/notes".to_string()));
        uploader
            .expect_upload()
            .with(function(|a: &Artifact| a.name == "lec01"))
            .returning(|_| Err(NotesError::Upload("quota exceeded".to_string())));

        let result = UploadService::new(repo, uploader).execute();

        match result {
            Err(NotesError::Upload(msg)) => {
                assert!(msg.contains("lec01"));
                assert!(msg.contains("quota exceeded"));
            }
            other => panic!("Expected Upload error, got {:?}", other),
        }
        assert!(!temp.path().join(".notes/links.json").exists());
    }
}
