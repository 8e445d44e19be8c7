//! A local fake model for testing purpose.

mod preset;

use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::future::ready;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use nexus_model::{
    AssistantTurn, ErrorKind, ModelProvider, ModelProviderError,
    ModelRequest,
};

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    #[allow(dead_code)]
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Clone)]
enum ConversationStep {
    Input,
    Reply(PresetReply),
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to setup the conversation script,
/// which is how the model should respond to a request. The added steps
/// will be selected according to the history messages in your request.
/// If there are no enough steps in the script, an error will be
/// returned.
///
/// The provider counts its invocations in shared state, so cloned
/// handles (and the provider moved into a gateway) still report the
/// total via [`invocations`](Self::invocations).
#[derive(Clone, Default)]
pub struct TestModelProvider {
    conversation_script: Vec<ConversationStep>,
    invocations: Arc<AtomicUsize>,
}

impl TestModelProvider {
    /// Appends an expected input step: a user message or a tool call
    /// result occupying this position of the history.
    #[inline]
    pub fn add_input_step(&mut self) {
        self.conversation_script.push(ConversationStep::Input);
    }

    /// Appends an assistant reply step.
    ///
    /// The reply also stands for its own position in the history, so a
    /// script reads exactly like the conversation it expects.
    #[inline]
    pub fn add_reply_step(&mut self, preset: PresetReply) {
        self.conversation_script
            .push(ConversationStep::Reply(preset));
    }

    /// Returns how many times the provider has been invoked.
    #[inline]
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::Relaxed)
    }
}

impl ModelProvider for TestModelProvider {
    type Error = Error;

    fn invoke(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<AssistantTurn, Self::Error>> + Send + 'static
    {
        self.invocations.fetch_add(1, Ordering::Relaxed);

        let step_idx = req.messages.len();
        let result = match self.conversation_script.get(step_idx) {
            None => Err(Error {
                message: "no enough steps",
                kind: ErrorKind::RateLimitExceeded,
            }),
            Some(ConversationStep::Input) => Err(Error {
                message: "not an assistant reply step",
                kind: ErrorKind::Moderated,
            }),
            Some(ConversationStep::Reply(preset)) => {
                if preset.failing {
                    Err(Error {
                        message: "scripted failure",
                        kind: ErrorKind::Other,
                    })
                } else {
                    Ok(AssistantTurn {
                        content: preset.content.clone(),
                        tool_calls: preset.tool_calls.clone(),
                    })
                }
            }
        };
        ready(result)
    }
}
