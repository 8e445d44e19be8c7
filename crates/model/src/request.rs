use serde_json::Value;

use crate::response::AssistantTurn;

/// A request to be sent to the model provider.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelRequest {
    /// The input messages.
    pub messages: Vec<ModelMessage>,
    /// Tools that are available to the model.
    pub tools: Vec<ModelTool>,
}

/// A complete message in the conversation history.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelMessage {
    /// A user input text.
    User(String),
    /// An assistant turn, with or without tool call requests.
    Assistant(AssistantTurn),
    /// A tool call result.
    Tool(ToolCallResult),
}

/// The result of calling a tool.
///
/// Each result answers exactly one [`ToolCallRequest`] from the
/// preceding assistant turn, identified by `id`.
///
/// [`ToolCallRequest`]: crate::ToolCallRequest
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ToolCallResult {
    /// The unique identifier of the answered tool call request.
    pub id: String,
    /// The name of the tool that produced this result.
    pub tool_name: String,
    /// The result of the tool call.
    pub content: String,
}

/// Describes a tool that can be used by the model.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModelTool {
    /// Name of the tool.
    pub name: String,
    /// Description of the tool.
    pub description: String,
    /// Parameters definition of the tool.
    ///
    /// For most model providers, the parameters should typically be
    /// defined by a [JSON schema](https://json-schema.org/).
    pub parameters: Value,
}
