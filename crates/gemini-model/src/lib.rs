//! A model provider for the Google Gemini `generateContent` API.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use nexus_model::{
    AssistantTurn, ErrorKind, ModelProvider, ModelProviderError,
    ModelRequest,
};
use reqwest::{Client, StatusCode, header};
use uuid::Uuid;

pub use config::{GeminiConfig, GeminiConfigBuilder};

/// Error type for [`GeminiProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Gemini model provider.
#[derive(Clone, Debug)]
pub struct GeminiProvider {
    client: Client,
    config: Arc<GeminiConfig>,
}

impl GeminiProvider {
    /// Creates a new `GeminiProvider` with the given configuration.
    #[inline]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl ModelProvider for GeminiProvider {
    type Error = Error;

    fn invoke(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<AssistantTurn, Self::Error>> + Send + 'static
    {
        let gemini_req = proto::create_request(req, &self.config);
        let resp_fut = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.config.base_url, self.config.model
            ))
            // The key goes into a header so request URLs stay loggable.
            .header("x-goog-api-key", self.config.api_key.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&gemini_req)
            .send();

        async move {
            let resp = match resp_fut.await {
                Ok(resp) => resp,
                Err(err) => {
                    return Err(Error::new(format!("{err}"), ErrorKind::Other));
                }
            };

            let status = resp.status();
            if !status.is_success() {
                let kind = if status == StatusCode::TOO_MANY_REQUESTS {
                    ErrorKind::RateLimitExceeded
                } else {
                    ErrorKind::Other
                };
                let body = resp.text().await.unwrap_or_default();
                return Err(Error::new(
                    format!("HTTP {status}: {body}"),
                    kind,
                ));
            }

            let payload = match resp
                .json::<proto::GenerateContentResponse>()
                .await
            {
                Ok(payload) => payload,
                Err(err) => {
                    return Err(Error::new(format!("{err}"), ErrorKind::Other));
                }
            };
            trace!("got a response: {payload:?}");

            Ok(proto::parse_response(payload, || {
                Uuid::new_v4().to_string()
            }))
        }
    }
}
