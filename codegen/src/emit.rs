//! Output helpers: a line-oriented source buffer and file writing.

use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// A generated source file under construction.
pub struct SourceFile {
    /// The text emitted so far.
    pub buf: String,
}

impl SourceFile {
    /// Starts a file with a `//!` module doc and the generated-file banner.
    #[must_use]
    pub fn new(module_doc: &str) -> Self {
        let mut f = Self { buf: String::new() };
        for line in module_doc.lines() {
            if line.is_empty() {
                f.line("//!");
            } else {
                let _ = writeln!(f.buf, "//! {line}");
            }
        }
        f.line("//!");
        f.line("//! @generated by shaclc. Do not edit.");
        f.blank();
        f
    }

    /// Appends one line.
    pub fn line(&mut self, line: &str) {
        self.buf.push_str(line);
        self.buf.push('\n');
    }

    /// Appends an empty line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Appends a `///` doc comment, one line per input line.
    pub fn doc_comment(&mut self, text: &str) {
        self.doc_comment_at("", text);
    }

    /// Appends a `///` doc comment indented one level.
    pub fn indented_doc_comment(&mut self, text: &str) {
        self.doc_comment_at("    ", text);
    }

    fn doc_comment_at(&mut self, indent: &str, text: &str) {
        if text.is_empty() {
            let _ = writeln!(self.buf, "{indent}///");
            return;
        }
        for line in text.lines() {
            if line.is_empty() {
                let _ = writeln!(self.buf, "{indent}///");
            } else {
                let _ = writeln!(self.buf, "{indent}/// {line}");
            }
        }
    }

    /// Returns the finished text with exactly one trailing newline.
    #[must_use]
    pub fn finish(mut self) -> String {
        let trimmed = self.buf.trim_end().len();
        self.buf.truncate(trimmed);
        self.buf.push('\n');
        self.buf
    }
}

/// Collapses runs of whitespace so schema comments fit on doc lines.
#[must_use]
pub fn normalize_comment(comment: &str) -> String {
    comment.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Writes `content` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be written.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
