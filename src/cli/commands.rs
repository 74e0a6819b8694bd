//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notes")]
#[command(about = "Lecture notes scaffolding for a semester", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// Declared in name order so help lists them sorted
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Prints the available commands
    Help,

    /// Initializes a new set of notes
    Init {
        /// Class directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Meeting days, e.g. MW, TTh, MWF (prompted if omitted)
        #[arg(short, long)]
        days: Option<String>,

        /// First day of class, YYYY-MM-DD (prompted if omitted)
        #[arg(long)]
        first: Option<String>,

        /// Last day of class, YYYY-MM-DD (prompted if omitted)
        #[arg(long)]
        last: Option<String>,

        /// Document title (default: directory name)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// List lectures with their dates and note files
    List,

    /// Modify the current set of notes
    Modify {
        #[command(subcommand)]
        action: ModifyAction,

        /// Print the planned file changes without applying them
        #[arg(long, global = true)]
        dry_run: bool,
    },

    /// Upload notes and record their links in .notes/links.json
    Upload {
        /// Directory to copy notes into (overrides upload.directory)
        #[arg(long)]
        to: Option<PathBuf>,

        /// Prefix for published links (overrides upload.link_prefix)
        #[arg(long)]
        link_prefix: Option<String>,
    },

    /// Prints out the version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ModifyAction {
    /// Add a lecture on a meeting date, renumbering later lectures
    Insert {
        /// Lecture date, YYYY-MM-DD
        date: String,
    },

    /// Remove a lecture, renumbering later lectures
    Remove {
        /// Lecture number
        number: usize,
    },

    /// Move a lecture to another date without renumbering
    Redate {
        /// Lecture number
        number: usize,

        /// New date, YYYY-MM-DD
        date: String,
    },

    /// Rewrite wrappers and the aggregate from the ledger
    Regenerate,
}
