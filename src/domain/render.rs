//! Generated file rendering: per-lecture wrappers and the aggregate document
//!
//! Wrappers and the aggregate are compiled from inside the ledger directory,
//! so wrappers reach content files through `../notes/`.

use crate::domain::ledger::{lecture_stem, Lecture, CONTENT_DIR, LEDGER_DIR};
use crate::error::{NotesError, Result};
use chrono::format::{Item, StrftimeItems};
use std::fs;
use std::path::Path;

const WRAPPER_TEMPLATE: &str =
    "\\setcounter{section}{{COUNTER}}\n\\section{{DATE}}\n\\input{{CONTENT}}\n";

pub const DEFAULT_DATE_FORMAT: &str = "%B %d, %Y";
pub const DEFAULT_DOCUMENT_CLASS: &str = "article";

/// Document-level settings that flow into generated files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStyle {
    pub title: String,
    pub author: Option<String>,
    pub document_class: String,
    pub date_format: String,
}

impl DocumentStyle {
    pub fn new(title: impl Into<String>) -> Self {
        DocumentStyle {
            title: title.into(),
            author: None,
            document_class: DEFAULT_DOCUMENT_CLASS.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Reject strftime strings chrono cannot render
pub fn validate_date_format(format: &str) -> Result<()> {
    if format.is_empty() || StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(NotesError::Config(format!(
            "Invalid date format: '{}'",
            format
        )));
    }
    Ok(())
}

/// Escape characters with special meaning in TeX
pub fn escape_tex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrapper file template
#[derive(Debug)]
pub struct WrapperTemplate {
    content: String,
}

impl WrapperTemplate {
    pub fn builtin() -> Self {
        WrapperTemplate {
            content: WRAPPER_TEMPLATE.to_string(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            NotesError::Config(format!("Failed to read wrapper template: {}", e))
        })?;
        Ok(WrapperTemplate { content })
    }

    /// Render the wrapper for one lecture
    pub fn render(&self, lecture: &Lecture, style: &DocumentStyle) -> String {
        let content_ref = format!("../{}/{}.tex", CONTENT_DIR, lecture.stem());

        self.content
            .replace("{COUNTER}", &(lecture.number - 1).to_string())
            .replace("{NUMBER}", &lecture.number.to_string())
            .replace("{DATE}", &lecture.date.format(&style.date_format).to_string())
            .replace("{ISO_DATE}", &lecture.date.format("%Y-%m-%d").to_string())
            .replace("{DAY_NAME}", &lecture.date.format("%A").to_string())
            .replace("{CONTENT}", &content_ref)
    }
}

/// Load `.notes/templates/wrapper.tex` if present, else the built-in template
pub fn load_wrapper_template(root: &Path) -> Result<WrapperTemplate> {
    let custom_path = root.join(LEDGER_DIR).join("templates").join("wrapper.tex");

    if custom_path.exists() {
        WrapperTemplate::from_file(&custom_path)
    } else {
        Ok(WrapperTemplate::builtin())
    }
}

/// Render the aggregate document including every wrapper in sequence order
pub fn render_aggregate(lectures: &[Lecture], style: &DocumentStyle) -> String {
    let mut out = String::new();
    out.push_str(&format!("\\documentclass{{{}}}\n", style.document_class));
    out.push_str(&format!("\\title{{{}}}\n", escape_tex(&style.title)));
    if let Some(author) = &style.author {
        out.push_str(&format!("\\author{{{}}}\n", escape_tex(author)));
    }
    out.push_str("\\date{}\n");
    out.push_str("\\begin{document}\n");
    out.push_str("\\maketitle\n");
    for lecture in lectures {
        out.push_str(&format!("\\input{{{}.tex}}\n", lecture_stem(lecture.number)));
    }
    out.push_str("\\end{document}\n");
    out
}
