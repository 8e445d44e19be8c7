use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The raw reply payload of an assistant turn.
///
/// Providers return whatever shape the upstream API produced; deciding
/// how to render it as plain text is the job of one well-defined
/// conversion point in the core crate, not of each provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ModelContent {
    /// A plain string.
    Text(String),
    /// An ordered sequence of mixed blocks.
    Blocks(Vec<ContentBlock>),
    /// Any other payload shape the provider could not classify.
    Other(Value),
}

impl Default for ModelContent {
    #[inline]
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// One element of a block-shaped reply payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ContentBlock {
    /// A plain string block.
    Text(String),
    /// A structured record, which may carry a `"text"` field.
    Record(Map<String, Value>),
}
