use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::content::ModelContent;

/// A mapping from parameter name to argument value, as emitted by the
/// model in a tool call request.
pub type ArgMap = Map<String, Value>;

/// A complete assistant turn returned by a model provider.
///
/// When `tool_calls` is empty the turn is a final answer; otherwise the
/// caller is expected to answer every request before sending the next
/// [`ModelRequest`].
///
/// [`ModelRequest`]: crate::ModelRequest
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssistantTurn {
    /// The reply payload.
    pub content: ModelContent,
    /// Tool calls requested by the model, in emitted order.
    pub tool_calls: Vec<ToolCallRequest>,
}

impl AssistantTurn {
    /// Creates a text-only turn with no tool calls.
    #[inline]
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            content: ModelContent::Text(text.into()),
            tool_calls: vec![],
        }
    }
}

/// Describes a tool call request from the model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// The identifier for the tool call request, unique within its turn.
    pub id: String,
    /// The name of the tool to call.
    pub name: String,
    /// The arguments to pass to the tool.
    pub arguments: ArgMap,
}
