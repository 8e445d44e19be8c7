//! Tool call supports.

mod error;
mod registry;

use std::pin::Pin;

use nexus_model::ArgMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use error::{Error, ErrorKind};
pub use registry::Registry;

/// The result of a tool call.
pub type ToolResult = Result<String, Error>;

/// A capability the model can invoke during a conversation.
///
/// Implementations must be stateless between calls: all in-flight
/// requests share one instance without locking, so a tool may carry
/// immutable context set at construction (an API key, an HTTP client)
/// but must not mutate it. Clone whatever the returned future needs.
pub trait Tool: Send + Sync + 'static {
    /// The type of input that the tool accepts.
    type Input: DeserializeOwned;

    /// Returns the name of the tool.
    fn name(&self) -> &str;

    /// Returns the description of the tool.
    fn description(&self) -> &str;

    /// Returns the parameter schema of the tool.
    fn parameter_schema(&self) -> &Value;

    /// Translates the generic argument mapping of a tool call into this
    /// tool's typed input.
    ///
    /// The default implementation binds arguments by parameter name.
    /// Tools that take a single positional value should override this
    /// with [`sole_argument`].
    fn bind(&self, arguments: ArgMap) -> Result<Self::Input, Error> {
        serde_json::from_value(Value::Object(arguments)).map_err(|err| {
            Error::invalid_input().with_reason(format!("{err}"))
        })
    }

    /// Executes the tool with the given input.
    ///
    /// This method must return a future that is fully independent of
    /// `self`, and the future should be cancellation safe.
    fn execute(
        &self,
        input: Self::Input,
    ) -> impl Future<Output = ToolResult> + Send + 'static;
}

/// Extracts the one argument of a single-value tool call, regardless of
/// the key name the model chose for it.
///
/// An empty mapping leniently yields an empty string instead of a
/// malformed-call error, matching how such calls have always been
/// treated.
pub fn sole_argument(arguments: &ArgMap) -> String {
    match arguments.values().next() {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

pub(crate) trait ToolObject: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn parameter_schema(&self) -> &Value;

    fn dispatch(
        &self,
        arguments: ArgMap,
    ) -> Pin<Box<dyn Future<Output = ToolResult> + Send>>;
}

pub(crate) struct AnyTool<T: Tool>(pub T);

impl<T: Tool> ToolObject for AnyTool<T> {
    #[inline]
    fn name(&self) -> &str {
        self.0.name()
    }

    #[inline]
    fn description(&self) -> &str {
        self.0.description()
    }

    #[inline]
    fn parameter_schema(&self) -> &Value {
        self.0.parameter_schema()
    }

    #[inline]
    fn dispatch(
        &self,
        arguments: ArgMap,
    ) -> Pin<Box<dyn Future<Output = ToolResult> + Send>> {
        let input = match self.0.bind(arguments) {
            Ok(input) => input,
            Err(err) => {
                return Box::pin(std::future::ready(ToolResult::Err(err)));
            }
        };
        Box::pin(self.0.execute(input))
    }
}
