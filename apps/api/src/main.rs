mod config;
mod errors;
mod github;
mod interview;
mod llm_client;
mod resume;
mod routes;
mod state;
mod topics;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::github::GithubFetcher;
use crate::interview::engine::InterviewEngine;
use crate::interview::session::InMemorySessionStore;
use crate::llm_client::GroqClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting interviewer API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM gateway
    let llm = Arc::new(GroqClient::new(config.groq_api_key.clone()));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Session records live in process memory; they do not survive restarts
    let sessions = Arc::new(InMemorySessionStore::new());

    // GitHub README fetcher for project-mode interviews
    let fetcher = Arc::new(GithubFetcher::new());

    let engine = InterviewEngine::new(
        llm,
        sessions,
        fetcher,
        config.max_questions,
        config.skip_phrases.clone(),
    );
    info!("Interview engine initialized (rounds: {})", config.max_questions);

    let state = AppState { engine };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
