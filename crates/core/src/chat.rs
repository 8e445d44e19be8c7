//! The tool-augmented conversation loop.

use nexus_model::ToolCallResult;

use crate::content::flatten;
use crate::conversation::Conversation;
use crate::gateway::{GatewayError, ModelGateway};
use crate::tool::Registry;

/// Fixed result for a tool call naming no registered tool.
pub const TOOL_NOT_FOUND: &str = "Tool tidak ditemukan.";

/// Prefix of a result produced from a failed tool call.
pub const TOOL_ERROR_PREFIX: &str = "Error Tool: ";

/// Fixed reply returned when the turn budget runs out.
pub const TURN_LIMIT_REPLY: &str = "Maaf, proses terlalu rumit.";

/// The default turn budget.
pub const DEFAULT_MAX_TURNS: usize = 5;

const LOGGED_OUTPUT_CHARS: usize = 50;

/// The bounded state machine that alternates between asking the model
/// and executing the tools it requested, until the model produces a
/// final answer or the turn budget runs out.
///
/// The loop owns no global state: its collaborators are injected once
/// at construction and shared read-only across requests, while every
/// request drives its own fresh [`Conversation`].
pub struct ChatLoop {
    gateway: ModelGateway,
    registry: Registry,
    max_turns: usize,
}

impl ChatLoop {
    /// Creates a loop over the given gateway and tool registry, with
    /// the default turn budget.
    #[inline]
    pub fn new(gateway: ModelGateway, registry: Registry) -> Self {
        Self {
            gateway,
            registry,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    /// Overrides the turn budget.
    #[inline]
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Runs one request to completion and returns the reply text.
    ///
    /// Tool-level problems never fail the request; the only error this
    /// method returns is a model provider fault.
    pub async fn run<S: Into<String>>(
        &self,
        input: S,
    ) -> Result<String, GatewayError> {
        let mut conversation = Conversation::with_user_input(input);
        self.drive(&mut conversation).await
    }

    /// Drives an existing conversation until a final answer or the
    /// turn budget, whichever comes first.
    pub async fn drive(
        &self,
        conversation: &mut Conversation,
    ) -> Result<String, GatewayError> {
        for turn in 0..self.max_turns {
            debug!("turn {}", turn + 1);

            let request =
                conversation.to_request(self.registry.definitions());
            let reply = self.gateway.invoke(request).await?;

            if reply.tool_calls.is_empty() {
                debug!("final answer found");
                return Ok(flatten(&reply.content));
            }

            let calls = reply.tool_calls.clone();
            conversation.push_assistant_turn(reply);
            debug!("model requested {} tool calls", calls.len());

            // Strictly in emitted order, one at a time. Every call gets
            // answered, no matter how it went.
            for call in calls {
                let content = match self.registry.get(&call.name) {
                    Some(tool) => {
                        debug!("invoking tool: {}", call.name);
                        match tool.dispatch(call.arguments).await {
                            Ok(output) => output,
                            Err(err) => {
                                format!(
                                    "{TOOL_ERROR_PREFIX}{}",
                                    err.reason()
                                )
                            }
                        }
                    }
                    None => {
                        warn!("tool not found: {}", call.name);
                        TOOL_NOT_FOUND.to_owned()
                    }
                };
                debug!(
                    "{} -> {}",
                    call.name,
                    truncated(&content, LOGGED_OUTPUT_CHARS)
                );
                conversation.push_tool_result(ToolCallResult {
                    id: call.id,
                    tool_name: call.name,
                    content,
                });
            }
        }

        // The budget bounds worst-case latency when the model never
        // stops requesting tools.
        warn!("turn budget exhausted after {} turns", self.max_turns);
        Ok(TURN_LIMIT_REPLY.to_owned())
    }
}

fn truncated(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}

#[cfg(test)]
mod tests;
