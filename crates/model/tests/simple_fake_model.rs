use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::future::ready;

use nexus_model::{
    AssistantTurn, ErrorKind, ModelMessage, ModelProvider,
    ModelProviderError, ModelRequest,
};

#[derive(Debug)]
struct FakeModelProviderError(ErrorKind);

impl Display for FakeModelProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for FakeModelProviderError {}

impl ModelProviderError for FakeModelProviderError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

struct FakeModelProvider;

impl ModelProvider for FakeModelProvider {
    type Error = FakeModelProviderError;

    fn invoke(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<AssistantTurn, Self::Error>> + Send + 'static
    {
        let result = 'blk: {
            if req.messages.is_empty() {
                break 'blk Err(FakeModelProviderError(ErrorKind::Other));
            }

            let content = req.messages.first().map(|msg| match &msg {
                ModelMessage::User(text) => text.as_str(),
                _ => unreachable!("unexpected message: {msg:?}"),
            });

            Ok(AssistantTurn::text(format!(
                "You said {}",
                content.unwrap_or("")
            )))
        };
        ready(result)
    }
}

mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completion() {
        let provider = FakeModelProvider;
        let req = ModelRequest {
            messages: vec![ModelMessage::User("Good morning".to_string())],
            tools: vec![],
        };
        let turn = provider.invoke(&req).await.unwrap();

        assert_eq!(turn, AssistantTurn::text("You said Good morning"));
        assert!(turn.tool_calls.is_empty());
    }

    #[tokio::test]
    async fn test_error() {
        let provider = FakeModelProvider;
        let req = ModelRequest {
            messages: vec![],
            tools: vec![],
        };
        let result = provider.invoke(&req).await;
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
    }
}
