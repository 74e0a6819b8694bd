//! Output formatting utilities

use crate::application::{LectureListing, LinkManifest, ModifyReport};
use crate::infrastructure::FileOp;

/// Format the lecture listing for display
pub fn format_lecture_list(listing: &LectureListing) -> String {
    let mut output = String::new();

    if listing.entries.is_empty() {
        output.push_str("No lectures found\n");
    }

    for entry in &listing.entries {
        let lecture = &entry.lecture;
        output.push_str(&format!(
            "{:>3}  {}  {:<9}  {}",
            lecture.number,
            lecture.date.format("%Y-%m-%d"),
            lecture.date.format("%A").to_string(),
            lecture.content_path().display()
        ));
        if !entry.content_present {
            output.push_str("  (missing)");
        }
        output.push('\n');
    }

    if !listing.unreferenced.is_empty() {
        output.push_str("\nNote files not in the ledger:\n");
        for path in &listing.unreferenced {
            output.push_str(&format!("  {}\n", path.display()));
        }
    }

    output
}

/// Format planned file operations, one per line
pub fn format_ops(ops: &[FileOp]) -> String {
    let mut output = String::new();
    for op in ops {
        output.push_str(&format!("  {}\n", op));
    }
    output
}

/// Summarize a modify run
pub fn format_modify_report(report: &ModifyReport) -> String {
    let mut output = String::new();

    if report.dry_run {
        output.push_str("Dry run, planned changes:\n");
        output.push_str(&format_ops(&report.ops));
        return output;
    }

    if let Some(outcome) = &report.outcome {
        if let Some(removed) = outcome.removed {
            output.push_str(&format!(
                "Removed lecture {} ({})\n",
                removed.number, removed.date
            ));
        }
        if let Some(inserted) = outcome.inserted {
            output.push_str(&format!(
                "Inserted lecture {} ({})\n",
                inserted.number, inserted.date
            ));
        }
        if !outcome.renames.is_empty() {
            output.push_str(&format!(
                "Renumbered {} lecture(s)\n",
                outcome.renames.len()
            ));
        }
        output.push_str(&format!("{} lecture(s) in total\n", outcome.ledger.len()));
    } else {
        output.push_str("Regenerated wrappers and aggregate\n");
    }

    if let Some(path) = &report.archived {
        output.push_str(&format!("Archived removed notes to {}\n", path.display()));
    }

    output
}

/// Format uploaded links
pub fn format_links(links: &LinkManifest) -> String {
    let mut output = String::new();
    for (name, link) in links {
        output.push_str(&format!("{:<6} {}\n", name, link));
    }
    output.push_str("Links written to .notes/links.json\n");
    output
}
