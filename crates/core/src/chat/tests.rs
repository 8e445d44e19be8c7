use std::future::ready;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use nexus_model::{
    ArgMap, ContentBlock, ModelContent, ModelMessage, ToolCallRequest,
};
use nexus_test_model::{PresetReply, TestModelProvider};
use serde::Deserialize;
use serde_json::{Value, json};

use super::*;
use crate::tool::{Error as ToolError, Tool, ToolResult, sole_argument};

#[derive(Deserialize)]
struct WeatherInput {
    city: String,
}

struct FakeWeatherTool {
    parameter_schema: Value,
    invocations: Arc<AtomicUsize>,
}

impl FakeWeatherTool {
    fn new(invocations: Arc<AtomicUsize>) -> Self {
        Self {
            parameter_schema: json!({
                "type": "object",
                "properties": { "city": { "type": "string" } }
            }),
            invocations,
        }
    }
}

impl Tool for FakeWeatherTool {
    type Input = WeatherInput;

    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Checks the current weather of a city."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: WeatherInput,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        self.invocations.fetch_add(1, Ordering::Relaxed);
        ready(Ok(format!("Cerah di {}", input.city)))
    }
}

struct FailingTool {
    parameter_schema: Value,
}

impl FailingTool {
    fn new() -> Self {
        Self {
            parameter_schema: json!({ "type": "object" }),
        }
    }
}

impl Tool for FailingTool {
    type Input = String;

    fn name(&self) -> &str {
        "broken"
    }

    fn description(&self) -> &str {
        "Always fails."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn bind(&self, arguments: ArgMap) -> Result<String, ToolError> {
        Ok(sole_argument(&arguments))
    }

    fn execute(
        &self,
        _input: String,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        ready(Err(ToolError::execution_error()
            .with_reason("connection refused")))
    }
}

fn args(value: Value) -> ArgMap {
    let Value::Object(map) = value else {
        panic!("not an object");
    };
    map
}

fn weather_call(id: &str, city: &str) -> ToolCallRequest {
    ToolCallRequest {
        id: id.to_owned(),
        name: "get_weather".to_owned(),
        arguments: args(json!({ "city": city })),
    }
}

#[tokio::test]
async fn test_immediate_final_answer() {
    let mut provider = TestModelProvider::default();
    provider.add_input_step();
    provider.add_reply_step(PresetReply::with_text("Hi, what can I do?"));

    let chat = ChatLoop::new(
        ModelGateway::new(provider.clone()),
        Registry::new(),
    );
    let reply = chat.run("Hello").await.unwrap();

    assert_eq!(reply, "Hi, what can I do?");
    assert_eq!(provider.invocations(), 1);
}

#[tokio::test]
async fn test_block_payload_is_normalized() {
    let mut provider = TestModelProvider::default();
    provider.add_input_step();
    provider.add_reply_step(PresetReply::with_content(
        ModelContent::Blocks(vec![
            ContentBlock::Text("Hello".to_owned()),
            ContentBlock::Record(args(json!({ "text": "there" }))),
        ]),
    ));

    let chat = ChatLoop::new(
        ModelGateway::new(provider),
        Registry::new(),
    );
    let reply = chat.run("Hello").await.unwrap();
    assert_eq!(reply, "Hello there");
}

#[tokio::test]
async fn test_weather_scenario() {
    let mut provider = TestModelProvider::default();
    provider.add_input_step();
    provider.add_reply_step(
        PresetReply::default()
            .with_tool_call(weather_call("call:1", "Bandung")),
    );
    provider.add_input_step();
    provider.add_reply_step(PresetReply::with_text(
        "Cuaca Bandung saat ini cerah.",
    ));

    let tool_invocations = Arc::new(AtomicUsize::new(0));
    let registry = Registry::new()
        .register(FakeWeatherTool::new(Arc::clone(&tool_invocations)));
    let chat = ChatLoop::new(ModelGateway::new(provider.clone()), registry);

    let mut conversation =
        Conversation::with_user_input("What's the weather in Bandung?");
    let reply = chat.drive(&mut conversation).await.unwrap();

    assert_eq!(reply, "Cuaca Bandung saat ini cerah.");
    assert_eq!(provider.invocations(), 2);
    assert_eq!(tool_invocations.load(Ordering::Relaxed), 1);

    // One assistant-with-tool-calls entry, one result per call, in
    // order, correlated by id and name.
    let messages = conversation.messages();
    assert_eq!(messages.len(), 3);
    assert!(matches!(messages[0], ModelMessage::User(_)));
    let ModelMessage::Assistant(turn) = &messages[1] else {
        panic!("expected an assistant entry");
    };
    assert_eq!(turn.tool_calls.len(), 1);
    let ModelMessage::Tool(result) = &messages[2] else {
        panic!("expected a tool result entry");
    };
    assert_eq!(result.id, "call:1");
    assert_eq!(result.tool_name, "get_weather");
    assert_eq!(result.content, "Cerah di Bandung");
}

#[tokio::test]
async fn test_multiple_calls_answered_in_order() {
    let mut provider = TestModelProvider::default();
    provider.add_input_step();
    provider.add_reply_step(
        PresetReply::default()
            .with_tool_call(weather_call("call:1", "Bandung"))
            .with_tool_call(weather_call("call:2", "Jakarta")),
    );
    provider.add_input_step();
    provider.add_input_step();
    provider.add_reply_step(PresetReply::with_text("Done."));

    let registry = Registry::new()
        .register(FakeWeatherTool::new(Default::default()));
    let chat = ChatLoop::new(ModelGateway::new(provider), registry);

    let mut conversation = Conversation::with_user_input("Two cities");
    chat.drive(&mut conversation).await.unwrap();

    let ids: Vec<&str> = conversation
        .messages()
        .iter()
        .filter_map(|msg| match msg {
            ModelMessage::Tool(result) => Some(result.id.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(ids, ["call:1", "call:2"]);
}

#[tokio::test]
async fn test_turn_budget_exhaustion() {
    let mut provider = TestModelProvider::default();
    provider.add_input_step();
    for _ in 0..DEFAULT_MAX_TURNS {
        provider.add_reply_step(
            PresetReply::default()
                .with_tool_call(weather_call("call:n", "Bandung")),
        );
        provider.add_input_step();
    }

    let registry = Registry::new()
        .register(FakeWeatherTool::new(Default::default()));
    let chat = ChatLoop::new(ModelGateway::new(provider.clone()), registry);

    let reply = chat.run("Loop forever").await.unwrap();
    assert_eq!(reply, TURN_LIMIT_REPLY);
    assert_eq!(provider.invocations(), DEFAULT_MAX_TURNS);
}

#[tokio::test]
async fn test_unknown_tool_yields_sentinel() {
    let mut provider = TestModelProvider::default();
    provider.add_input_step();
    provider.add_reply_step(PresetReply::default().with_tool_call(
        ToolCallRequest {
            id: "call:1".to_owned(),
            name: "time_machine".to_owned(),
            arguments: args(json!({})),
        },
    ));
    provider.add_input_step();
    provider.add_reply_step(PresetReply::with_text("Sorry."));

    let chat = ChatLoop::new(
        ModelGateway::new(provider),
        Registry::new(),
    );

    let mut conversation = Conversation::with_user_input("Go back in time");
    let reply = chat.drive(&mut conversation).await.unwrap();

    assert_eq!(reply, "Sorry.");
    let ModelMessage::Tool(result) = &conversation.messages()[2] else {
        panic!("expected a tool result entry");
    };
    assert_eq!(result.content, TOOL_NOT_FOUND);
}

#[tokio::test]
async fn test_failed_tool_yields_prefixed_result() {
    let mut provider = TestModelProvider::default();
    provider.add_input_step();
    provider.add_reply_step(PresetReply::default().with_tool_call(
        ToolCallRequest {
            id: "call:1".to_owned(),
            name: "broken".to_owned(),
            arguments: args(json!({ "value": "x" })),
        },
    ));
    provider.add_input_step();
    provider.add_reply_step(PresetReply::with_text("Could not do it."));

    let registry = Registry::new().register(FailingTool::new());
    let chat = ChatLoop::new(ModelGateway::new(provider), registry);

    let mut conversation = Conversation::with_user_input("Break something");
    let reply = chat.drive(&mut conversation).await.unwrap();

    assert_eq!(reply, "Could not do it.");
    let ModelMessage::Tool(result) = &conversation.messages()[2] else {
        panic!("expected a tool result entry");
    };
    assert_eq!(
        result.content,
        format!("{TOOL_ERROR_PREFIX}connection refused")
    );
}

#[tokio::test]
async fn test_gateway_fault_is_fatal() {
    let mut provider = TestModelProvider::default();
    provider.add_input_step();
    provider.add_reply_step(PresetReply::failing());

    let chat = ChatLoop::new(
        ModelGateway::new(provider),
        Registry::new(),
    );
    let reply_or_err = chat.run("Hello").await;
    assert!(reply_or_err.is_err());
}

#[test]
fn test_truncated_respects_char_boundaries() {
    assert_eq!(truncated("hello", 50), "hello");
    assert_eq!(truncated("hello", 3), "hel");
    assert_eq!(truncated("héllo", 2), "hé");
}
