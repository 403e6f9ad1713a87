// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::analysis_service::AnalysisService;
use crate::application::plant_service::PlantService;
use crate::application::session_store::SessionStore;
use crate::application::streaming_service::StreamingDashboardService;
use crate::domain::chat::ChatBot;
use crate::infrastructure::config::{load_analysis_config, load_influx_config, load_server_config};
use crate::infrastructure::influx_repository::InfluxRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let influx_config = load_influx_config().context("Failed to load config/influx")?;
    let analysis_config = load_analysis_config().context("Failed to load config/analysis")?;
    let server_config = load_server_config().context("Failed to load config/server")?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(InfluxRepository::new(
        influx_config.influx.host,
        influx_config.influx.token,
        influx_config.influx.database,
        influx_config.influx.retention_policy,
        analysis_config.utc_offset_minutes,
    ));

    // Create services (application layer)
    let plant_service = PlantService::new(repository.clone());
    let analysis_service = AnalysisService::new(repository.clone(), analysis_config.clone());
    let streaming_service = StreamingDashboardService::new(repository, analysis_config);

    // Create application state
    let state = Arc::new(AppState {
        plant_service,
        analysis_service,
        streaming_service,
        sessions: SessionStore::new(),
        chat_bot: Arc::new(ChatBot::default()),
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = server_config
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind address {}", server_config.bind_address))?;
    tracing::info!("Starting solar-analysis service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
