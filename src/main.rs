//! Lead Concierge server binary.
//!
//! Loads and validates configuration, wires the provider client, poller,
//! orchestrator, and webhook sink together, and serves the chat endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use lead_concierge::adapters::http::chat::{chat_router, ChatAppState};
use lead_concierge::adapters::openai::{OpenAiAssistantClient, OpenAiConfig};
use lead_concierge::adapters::webhook::WebhookLeadSink;
use lead_concierge::application::{ChatOrchestrator, RunPoller};
use lead_concierge::config::{AppConfig, ServerConfig, ValidationError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let assistant = &config.assistant;
    let api_key = assistant
        .api_key()
        .ok_or(ValidationError::MissingRequired("ASSISTANT_API_KEY"))?;
    let assistant_id = assistant
        .assistant_id
        .clone()
        .ok_or(ValidationError::MissingRequired("ASSISTANT_ASSISTANT_ID"))?;

    let client = OpenAiAssistantClient::new(
        OpenAiConfig::new(api_key)
            .with_base_url(assistant.base_url.clone())
            .with_timeout(assistant.request_timeout()),
    );
    let poller = RunPoller::new(assistant.poll_interval(), assistant.poll_budget());

    let mut orchestrator = ChatOrchestrator::new(
        Arc::new(client),
        poller,
        assistant_id,
        config.lead.extraction_source,
    );
    if let Some(webhook_url) = config.lead.webhook_url.clone().filter(|u| !u.is_empty()) {
        tracing::info!(%webhook_url, "lead forwarding enabled");
        orchestrator = orchestrator.with_lead_sink(Arc::new(WebhookLeadSink::new(
            webhook_url,
            config.lead.forward_timeout(),
        )));
    } else {
        tracing::info!("lead forwarding disabled (no webhook configured)");
    }

    let state = ChatAppState::new(Arc::new(orchestrator));

    let app = chat_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config.server));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "lead-concierge listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS from configured origins; permissive when none are configured, since
/// the widget may be embedded on any customer page.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
