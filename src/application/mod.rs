//! Application layer - Use cases and orchestration

pub mod generate;
pub mod init;
pub mod list_lectures;
pub mod manage_config;
pub mod modify;
pub mod upload;

pub use init::{init, InitReport};
pub use list_lectures::{list_lectures, LectureEntry, LectureListing};
pub use manage_config::ConfigService;
pub use modify::{ModifyReport, ModifyService};
pub use upload::{LinkManifest, UploadService};
