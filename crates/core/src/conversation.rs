//! Conversation-related types.

use nexus_model::{
    AssistantTurn, ModelMessage, ModelRequest, ModelTool, ToolCallResult,
};

/// The ordered, append-only message history of one request.
///
/// A conversation is created fresh for every incoming request and is
/// exclusively owned by the loop driving it; it never outlives the
/// request.
#[derive(Clone, Debug, Default)]
pub struct Conversation {
    messages: Vec<ModelMessage>,
}

impl Conversation {
    /// Creates a history containing only the user's message.
    #[inline]
    pub fn with_user_input<S: Into<String>>(input: S) -> Self {
        Self {
            messages: vec![ModelMessage::User(input.into())],
        }
    }

    /// Returns the messages in this conversation, oldest first.
    #[inline]
    pub fn messages(&self) -> &[ModelMessage] {
        &self.messages
    }

    pub(crate) fn push_assistant_turn(&mut self, turn: AssistantTurn) {
        self.messages.push(ModelMessage::Assistant(turn));
    }

    pub(crate) fn push_tool_result(&mut self, result: ToolCallResult) {
        self.messages.push(ModelMessage::Tool(result));
    }

    /// Builds a request snapshot carrying the full history.
    pub(crate) fn to_request(&self, tools: Vec<ModelTool>) -> ModelRequest {
        ModelRequest {
            messages: self.messages.clone(),
            tools,
        }
    }
}
