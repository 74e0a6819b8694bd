//! Domain layer - Schedules, the lecture ledger and generated-file rendering

pub mod ledger;
pub mod render;
pub mod schedule;

pub use ledger::{EditOutcome, Lecture, Ledger, LedgerEdit};
pub use render::{load_wrapper_template, render_aggregate, DocumentStyle, WrapperTemplate};
pub use schedule::{parse_date, ClassSchedule, MeetingDays};
