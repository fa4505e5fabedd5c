//! shaclc code generators.
//!
//! Each [`Target`] renders a [`Model`] into a single text artifact. The
//! model is already fully resolved, so targets never consult the shape
//! graph or the JSON-LD context.
//!
//! ```
//! use shaclc_codegen::{render, RenderOptions, Target};
//! use shaclc_model::Model;
//!
//! let out = render(Target::JsonSchema, &Model::default(), &RenderOptions::default())
//!     .expect("render");
//! assert!(out.contains("2020-12"));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod emit;
pub mod jsonschema;
pub mod mapping;
pub mod raw;
pub mod rust;

use std::fmt;
use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use shaclc_model::Model;
use tracing::info;

/// A built-in output target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The IR itself, as pretty-printed JSON.
    Raw,
    /// A JSON Schema (2020-12) document.
    JsonSchema,
    /// Rust traits over a primitive type family.
    Rust,
}

impl Target {
    /// Every target, in listing order.
    pub const ALL: [Target; 3] = [Target::JsonSchema, Target::Raw, Target::Rust];

    /// The name used on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Target::Raw => "raw",
            Target::JsonSchema => "jsonschema",
            Target::Rust => "rust",
        }
    }

    /// One-line description for `list`.
    #[must_use]
    pub fn help(self) -> &'static str {
        match self {
            Target::Raw => "Dump the intermediate representation as JSON",
            Target::JsonSchema => "JSON Schema for validating JSON-LD documents",
            Target::Rust => "Rust traits, one per class, with enums for closed value sets",
        }
    }

    /// Looks up a target by its command-line name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options shared by all targets.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Document title.
    pub title: Option<String>,
    /// Identifier for the generated document (e.g. the schema `$id`).
    pub id: Option<String>,
}

/// Report of what was generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Target that was rendered.
    pub target: Target,
    /// Number of classes rendered.
    pub class_count: usize,
    /// Number of properties rendered.
    pub property_count: usize,
    /// Bytes written.
    pub bytes: usize,
    /// Where the output went (`-` for stdout).
    pub output: String,
}

/// Renders `model` for `target`.
///
/// # Errors
///
/// Returns an error if the target cannot serialize the model.
pub fn render(target: Target, model: &Model, options: &RenderOptions) -> Result<String> {
    let rendered = match target {
        Target::Raw => raw::render(model, options),
        Target::JsonSchema => jsonschema::render(model, options),
        Target::Rust => Ok(rust::render(model, options)),
    };
    rendered.with_context(|| format!("failed to render {target} output"))
}

/// Renders `model` and writes it to `output`, or to stdout when `output`
/// is `-`.
///
/// # Errors
///
/// Returns an error if rendering fails or the output cannot be written.
pub fn generate(
    target: Target,
    model: &Model,
    options: &RenderOptions,
    output: &Path,
) -> Result<GenerationReport> {
    let content = render(target, model, options)?;

    if output.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|()| stdout.flush())
            .context("failed to write to stdout")?;
    } else {
        emit::write_file(output, &content)?;
    }

    let report = GenerationReport {
        target,
        class_count: model.class_count(),
        property_count: model.property_count(),
        bytes: content.len(),
        output: output.display().to_string(),
    };
    info!(
        target = %report.target,
        classes = report.class_count,
        bytes = report.bytes,
        output = %report.output,
        "generated"
    );
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn target_names_round_trip() {
        for target in Target::ALL {
            assert_eq!(Target::from_name(target.name()), Some(target));
            assert!(!target.help().is_empty());
        }
        assert_eq!(Target::from_name("golang"), None);
    }

    #[test]
    fn generate_writes_file() {
        let dir = std::env::temp_dir().join(format!("shaclc-codegen-{}", std::process::id()));
        let path = dir.join("nested").join("model.json");
        let report = generate(
            Target::Raw,
            &Model::default(),
            &RenderOptions::default(),
            &path,
        )
        .unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(report.bytes, written.len());
        assert_eq!(report.class_count, 0);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
