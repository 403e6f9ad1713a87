// Application state for HTTP handlers
use crate::application::analysis_service::AnalysisService;
use crate::application::plant_service::PlantService;
use crate::application::session_store::SessionStore;
use crate::application::streaming_service::StreamingDashboardService;
use crate::domain::chat::ChatBot;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub plant_service: PlantService,
    pub analysis_service: AnalysisService,
    pub streaming_service: StreamingDashboardService,
    pub sessions: SessionStore,
    pub chat_bot: Arc<ChatBot>,
}
