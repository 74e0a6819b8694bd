//! CLI layer - Command-line interface

pub mod commands;
pub mod output;
pub mod prompt;

pub use commands::{Cli, Commands, ModifyAction};
pub use output::{format_lecture_list, format_links, format_modify_report};
pub use prompt::gather_schedule;
