//! The HTTP entry point of the assistant service.

#[macro_use]
extern crate tracing;

use std::env;
use std::path::PathBuf;

use nexus_assistant::server;
use nexus_assistant::tools::{GeocodeTool, SearchTool, WeatherTool};
use nexus_core::tool::Registry;
use nexus_core::{ChatLoop, ModelGateway};
use nexus_gemini_model::{GeminiConfigBuilder, GeminiProvider};
use tokio::net::TcpListener;
use tokio::runtime;

fn main() {
    // Must happen before the runtime spawns any worker thread, since
    // mutating the environment is only sound while single-threaded.
    load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Ok(api_key) = env::var("GOOGLE_API_KEY") else {
        eprintln!("GOOGLE_API_KEY environment variable is not set");
        return;
    };

    let rt = match runtime::Builder::new_multi_thread().enable_all().build()
    {
        Ok(rt) => rt,
        Err(err) => {
            error!("failed to start the runtime: {err}");
            return;
        }
    };
    rt.block_on(serve(api_key));
}

async fn serve(api_key: String) {
    let config = GeminiConfigBuilder::with_api_key(api_key).build();
    let model_provider = GeminiProvider::new(config);

    let registry = Registry::new()
        .register(WeatherTool::new(env::var("OPENWEATHER_API_KEY").ok()))
        .register(SearchTool::new())
        .register(GeocodeTool::new());
    let chat = ChatLoop::new(ModelGateway::new(model_provider), registry);

    let port = env::var("PORT")
        .ok()
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(8000);
    let addr = format!("0.0.0.0:{port}");
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            return;
        }
    };

    info!("listening on {addr}");
    if let Err(err) = axum::serve(listener, server::router(chat)).await {
        error!("server error: {err}");
    }
}

/// Loads environment variables from a `.env` file (KEY=VALUE lines).
fn load_dotenv() {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        // Workspace root, two levels up from crates/nexus-assistant/.
        manifest_dir.join("..").join("..").join(".env"),
        // Current directory.
        PathBuf::from(".env"),
    ];

    for path in &candidates {
        let Ok(contents) = std::fs::read_to_string(path) else {
            continue;
        };
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if env::var(key).is_err() {
                // SAFETY: called from `main` before any thread exists.
                unsafe {
                    env::set_var(key, value);
                }
            }
        }
        return;
    }
}
