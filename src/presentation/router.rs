// Router - maps routes to handlers
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    chat, clear_session_plant, get_chart, get_heat_map, get_session_plant, health_check,
    list_plants, post_chart, post_heat_map, select_session_plant, stream_dashboard,
};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Compression is handled in the response builders, so no CompressionLayer here.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/plants", get(list_plants))
        .route(
            "/session/plant",
            get(get_session_plant)
                .put(select_session_plant)
                .delete(clear_session_plant),
        )
        .route("/analysis/heatmap", get(get_heat_map).post(post_heat_map))
        .route("/analysis/chart", get(get_chart).post(post_chart))
        .route("/dashboards/:id", get(stream_dashboard))
        .route("/chat", post(chat))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
