//! The HTTP surface of the assistant.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use nexus_core::ChatLoop;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeFile;

/// The body of a `POST /chat` request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,
}

/// The body of a successful `POST /chat` response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The assistant's reply.
    pub reply: String,
}

/// Builds the service router.
///
/// Every request drives its own fresh conversation; the shared loop
/// behind the state is read-only, so in-flight requests never contend.
pub fn router(chat: ChatLoop) -> Router {
    Router::new()
        .route_service("/", ServeFile::new("index.html"))
        .route("/chat", post(chat_endpoint))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(chat))
}

async fn chat_endpoint(
    State(chat): State<Arc<ChatLoop>>,
    Json(request): Json<ChatRequest>,
) -> Response {
    match chat.run(request.message).await {
        Ok(reply) => Json(ChatResponse { reply }).into_response(),
        Err(err) => {
            // Tool-level problems were already downgraded inside the
            // loop; reaching this arm means the model was unreachable.
            error!("model gateway fault: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                .into_response()
        }
    }
}
