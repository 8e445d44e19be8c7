use std::pin::Pin;
use std::sync::Arc;

use nexus_model::{
    AssistantTurn, ModelProvider, ModelProviderError, ModelRequest,
};
use tracing::Instrument;

/// The boxed provider error a gateway invocation may return.
pub type GatewayError = Box<dyn ModelProviderError>;

type InvokeResult = Result<AssistantTurn, GatewayError>;
type BoxedInvokeFuture = Pin<Box<dyn Future<Output = InvokeResult> + Send>>;
type HandlerFn =
    Arc<dyn Fn(ModelRequest) -> BoxedInvokeFuture + Send + Sync>;

/// A wrapper around a model provider that provides a type-erased
/// interface for the other modules.
#[derive(Clone)]
pub struct ModelGateway {
    handler_fn: HandlerFn,
}

impl ModelGateway {
    /// Creates a gateway wrapping the given provider.
    #[inline]
    pub fn new<P: ModelProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since `ModelGateway` doesn't have
        // a generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = provider.invoke(&req);
            Box::pin(
                async move {
                    trace!("got a request: {:?}", req);
                    match fut.await {
                        Ok(turn) => {
                            trace!("got a turn: {turn:?}");
                            Ok(turn)
                        }
                        Err(err) => {
                            error!("got an error: {err:?}");
                            Err(Box::new(err) as GatewayError)
                        }
                    }
                }
                .instrument(trace_span!("model gateway req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends the full message history and returns the model's next turn.
    ///
    /// Each call performs exactly one provider invocation; no retries.
    #[inline]
    pub async fn invoke(&self, req: ModelRequest) -> InvokeResult {
        (self.handler_fn)(req).await
    }
}
