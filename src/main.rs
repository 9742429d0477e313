use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};

use comfy_gpt::handlers::AppState;
use comfy_gpt::llm::{CompletionClient, LlmConfig};
use comfy_gpt::routes::configure_routes;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = LlmConfig::from_env();
    if config.api_base.is_empty() {
        info!("LLM_API_BASE is unset; completion calls will fail until it is configured");
    }

    let client = match CompletionClient::new(config) {
        Ok(client) => client,
        Err(err) => {
            error!(%err, "failed to build completion client");
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::new(Arc::new(client)));
    let routes = configure_routes(state);

    let addr: SocketAddr = std::env::var("SERVER_ADDR")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or_else(|| ([127, 0, 0, 1], 3030).into());

    info!(%addr, "starting comfy-gpt server");
    warp::serve(routes).run(addr).await;
}
