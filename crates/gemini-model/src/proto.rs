use nexus_model::{
    AssistantTurn, ContentBlock, ModelContent, ModelMessage, ModelRequest,
    ToolCallRequest,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::GeminiConfig;

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

// -----------------------------
// Types used in both directions
// -----------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub name: String,
    pub response: Value,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ToolDeclarations>,
    generation_config: GenerationConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolDeclarations {
    function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct FunctionDeclaration {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct GenerationConfig {
    temperature: f64,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(
    req: &ModelRequest,
    config: &GeminiConfig,
) -> GenerateContentRequest {
    let tools = if req.tools.is_empty() {
        vec![]
    } else {
        // The API nests all declarations under one `tools` entry.
        vec![ToolDeclarations {
            function_declarations: req
                .tools
                .iter()
                .map(|tool| FunctionDeclaration {
                    name: tool.name.clone(),
                    description: tool.description.clone(),
                    parameters: tool.parameters.clone(),
                })
                .collect(),
        }]
    };
    GenerateContentRequest {
        contents: req.messages.iter().map(create_content).collect(),
        tools,
        generation_config: GenerationConfig {
            temperature: config.temperature,
        },
    }
}

fn create_content(msg: &ModelMessage) -> Content {
    match msg {
        ModelMessage::User(text) => Content {
            role: Some("user".to_owned()),
            parts: vec![text_part(text)],
        },
        ModelMessage::Assistant(turn) => {
            let mut parts = text_parts(&turn.content);
            parts.extend(turn.tool_calls.iter().map(|call| Part {
                function_call: Some(FunctionCall {
                    name: call.name.clone(),
                    args: call.arguments.clone(),
                }),
                ..Default::default()
            }));
            Content {
                role: Some("model".to_owned()),
                parts,
            }
        }
        ModelMessage::Tool(result) => Content {
            role: Some("user".to_owned()),
            parts: vec![Part {
                function_response: Some(FunctionResponse {
                    name: result.tool_name.clone(),
                    response: json!({ "result": result.content }),
                }),
                ..Default::default()
            }],
        },
    }
}

fn text_part(text: &str) -> Part {
    Part {
        text: Some(text.to_owned()),
        ..Default::default()
    }
}

fn text_parts(content: &ModelContent) -> Vec<Part> {
    match content {
        ModelContent::Text(text) if text.is_empty() => vec![],
        ModelContent::Text(text) => vec![text_part(text)],
        ModelContent::Blocks(blocks) => blocks
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text(text) => Some(text_part(text)),
                ContentBlock::Record(record) => record
                    .get("text")
                    .and_then(Value::as_str)
                    .map(text_part),
            })
            .collect(),
        ModelContent::Other(Value::String(text)) => vec![text_part(text)],
        ModelContent::Other(_) => vec![],
    }
}

/// Converts a wire response into an assistant turn, minting an id for
/// every function call with `next_id` (the wire format has none).
pub fn parse_response(
    resp: GenerateContentResponse,
    mut next_id: impl FnMut() -> String,
) -> AssistantTurn {
    let parts = resp
        .candidates
        .into_iter()
        .flatten()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .unwrap_or_default();

    let mut texts = Vec::new();
    let mut tool_calls = Vec::new();
    for part in parts {
        if let Some(text) = part.text {
            texts.push(text);
        }
        if let Some(call) = part.function_call {
            tool_calls.push(ToolCallRequest {
                id: next_id(),
                name: call.name,
                arguments: call.args,
            });
        }
    }

    let content = match texts.len() {
        0 => ModelContent::default(),
        1 => ModelContent::Text(texts.remove(0)),
        _ => ModelContent::Blocks(
            texts.into_iter().map(ContentBlock::Text).collect(),
        ),
    };

    AssistantTurn {
        content,
        tool_calls,
    }
}
