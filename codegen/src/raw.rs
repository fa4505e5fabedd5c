//! `raw` target: the IR as pretty-printed JSON.

use anyhow::Result;
use serde::Serialize;
use shaclc_model::{Class, Model};

use crate::RenderOptions;

#[derive(Serialize)]
struct RawDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    classes: &'a [Class],
}

/// Serializes `model`, with the title and id from `options` if set.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(model: &Model, options: &RenderOptions) -> Result<String> {
    let doc = RawDocument {
        title: options.title.as_deref(),
        id: options.id.as_deref(),
        classes: &model.classes,
    };
    let mut out = serde_json::to_string_pretty(&doc)?;
    out.push('\n');
    Ok(out)
}
