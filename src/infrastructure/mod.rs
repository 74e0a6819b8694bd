//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod repository;
pub mod transaction;
pub mod uploader;

pub use config::{Config, UploadSettings};
pub use repository::{FileSystemRepository, LectureFile, NotesRepository};
pub use transaction::{FileOp, FileTransaction};
pub use uploader::{Artifact, DirectoryUploader, StorageUploader};
