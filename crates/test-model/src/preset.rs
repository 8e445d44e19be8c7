use nexus_model::{ModelContent, ToolCallRequest};
use serde::{Deserialize, Serialize};

/// The preset reply for an assistant step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetReply {
    /// The reply payload.
    pub content: ModelContent,
    /// Tool calls requested in this reply, in order.
    pub tool_calls: Vec<ToolCallRequest>,
    /// If set, the provider fails instead of replying when it reaches
    /// this step.
    pub failing: bool,
}

impl PresetReply {
    /// Creates a text-only reply.
    #[inline]
    pub fn with_text<S: Into<String>>(text: S) -> Self {
        Self::with_content(ModelContent::Text(text.into()))
    }

    /// Creates a reply with the specified payload.
    #[inline]
    pub fn with_content(content: ModelContent) -> Self {
        Self {
            content,
            tool_calls: vec![],
            failing: false,
        }
    }

    /// Creates a reply that fails the request.
    #[inline]
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    /// Appends a tool call request to the reply.
    #[inline]
    pub fn with_tool_call(mut self, call: ToolCallRequest) -> Self {
        self.tool_calls.push(call);
        self
    }
}
