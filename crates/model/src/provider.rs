use std::error::Error;

use crate::error::ErrorKind;
use crate::request::ModelRequest;
use crate::response::AssistantTurn;

/// The error contract for a model provider.
pub trait ModelProviderError: Error + Send + Sync + 'static {
    /// Classifies this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that can turn a message history into the next assistant turn,
/// typically by calling a remote LLM API.
///
/// Providers must behave statelessly across invocations: any internal
/// state (connection pools, caches) is an implementation detail that
/// callers may not observe, and a provider may be dropped between any
/// two invocations.
pub trait ModelProvider: Send + Sync {
    /// The error type returned by this provider.
    type Error: ModelProviderError;

    /// Sends the history to the model and returns its next turn.
    ///
    /// Callers must answer every tool call of the returned turn before
    /// invoking the provider again with the extended history.
    fn invoke(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<AssistantTurn, Self::Error>> + Send + 'static;
}
