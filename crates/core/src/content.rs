//! The content normalizer.

use nexus_model::{ContentBlock, ModelContent};
use serde_json::Value;

/// Converts a raw reply payload into a single flat string.
///
/// Block payloads concatenate, in order, every plain-string block and
/// every record's `"text"` field (records without one are skipped),
/// joined by a single space. Any other payload shape falls back to a
/// generic stringification.
///
/// Flattening is idempotent: a payload that is already a plain string
/// is returned unchanged.
pub fn flatten(content: &ModelContent) -> String {
    match content {
        ModelContent::Text(text) => text.clone(),
        ModelContent::Blocks(blocks) => {
            let parts: Vec<&str> =
                blocks.iter().filter_map(block_text).collect();
            parts.join(" ")
        }
        ModelContent::Other(value) => stringify(value),
    }
}

fn block_text(block: &ContentBlock) -> Option<&str> {
    match block {
        ContentBlock::Text(text) => Some(text),
        ContentBlock::Record(record) => {
            record.get("text").and_then(Value::as_str)
        }
    }
}

fn stringify(value: &Value) -> String {
    // A bare JSON string renders as its inner text, so flattening the
    // fallback shape stays idempotent too.
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
