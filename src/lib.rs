//! class-notes - Lecture notes scaffolding for a semester
//!
//! Generates one content file per lecture and an aggregate document that
//! includes them all, and keeps lecture numbering, dates and file names
//! consistent as lectures are inserted, removed or moved.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::NotesError;
