// HTTP request handlers
use crate::application::analysis_repository::SampleQuery;
use crate::application::analysis_service::AnalysisService;
use crate::domain::chart::RawChartPoint;
use crate::domain::chat::ChatReply;
use crate::domain::color::{ColorMode, ColorStrategy};
use crate::domain::measurement::{EntityKind, Parameter};
use crate::domain::sample::RawSample;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::infrastructure::wire::{WirePlant, WirePoint};
use crate::infrastructure::wire_mapper::{heat_map_to_wire, plant_to_wire, points_to_wire};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct HeatMapQuery {
    pub plant: Option<String>,
    pub parameter: Option<Parameter>,
    pub kind: Option<EntityKind>,
    pub date: Option<String>,
    pub mode: Option<ColorMode>,
}

#[derive(Deserialize)]
pub struct ChartQuery {
    pub plant: Option<String>,
    pub date: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatMapRequest {
    pub samples: Vec<RawSample>,
    pub parameter: Option<Parameter>,
    pub kind: Option<EntityKind>,
    #[serde(default)]
    pub mode: ColorMode,
}

#[derive(Deserialize)]
pub struct ChartRequest {
    pub points: Vec<RawChartPoint>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectPlantRequest {
    pub plant_id: String,
}

#[derive(Serialize)]
pub struct SessionPlantResponse {
    pub plant: Option<WirePlant>,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

fn session_id(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(ApiError::MissingSession)
}

fn parse_date(date: Option<&str>) -> Result<NaiveDate, ApiError> {
    match date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|_| ApiError::InvalidDate(d.to_string())),
        None => Ok(Utc::now().date_naive()),
    }
}

/// An explicit plant wins; otherwise the session's selection is used.
async fn resolve_plant(
    state: &AppState,
    headers: &HeaderMap,
    plant: Option<String>,
) -> Result<String, ApiError> {
    if let Some(plant) = plant {
        return Ok(plant);
    }

    let session = session_id(headers).map_err(|_| ApiError::NoPlantSelected)?;
    state
        .sessions
        .current(&session)
        .await
        .map(|p| p.id)
        .ok_or(ApiError::NoPlantSelected)
}

fn into_response(result: Result<Response, StatusCode>) -> Response {
    match result {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List all plants
pub async fn list_plants(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let compress = accepts_brotli(&headers);

    let plants: Vec<WirePlant> = state
        .plant_service
        .list_plants()
        .await?
        .into_iter()
        .map(plant_to_wire)
        .collect();

    Ok(into_response(json_response(&plants, compress).await))
}

pub async fn get_session_plant(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionPlantResponse>, ApiError> {
    let session = session_id(&headers)?;
    let plant = state.sessions.current(&session).await.map(plant_to_wire);
    Ok(Json(SessionPlantResponse { plant }))
}

pub async fn select_session_plant(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectPlantRequest>,
) -> Result<Json<WirePlant>, ApiError> {
    let session = session_id(&headers)?;
    let plant = state
        .plant_service
        .find_plant(&request.plant_id)
        .await?
        .ok_or_else(|| ApiError::UnknownPlant(request.plant_id.clone()))?;

    state.sessions.select(&session, plant.clone()).await;
    Ok(Json(plant_to_wire(plant)))
}

pub async fn clear_session_plant(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, ApiError> {
    let session = session_id(&headers)?;
    state.sessions.clear(&session).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Heat map for one plant, parameter and day
pub async fn get_heat_map(
    Query(query): Query<HeatMapQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let plant_id = resolve_plant(&state, &headers, query.plant).await?;
    let date = parse_date(query.date.as_deref())?;
    let parameter = query.parameter.unwrap_or(Parameter::Power);
    let kind = query.kind.unwrap_or(EntityKind::Inverter);
    let strategy = query.mode.unwrap_or_default().strategy(parameter, kind);

    let sample_query = SampleQuery {
        plant_id,
        parameter,
        kind,
        date,
    };
    let heat_map = state.analysis_service.heat_map(&sample_query, strategy).await?;

    let compress = accepts_brotli(&headers);
    Ok(into_response(json_response(&heat_map_to_wire(&heat_map), compress).await))
}

/// Heat map for caller-supplied samples
pub async fn post_heat_map(
    headers: HeaderMap,
    Json(request): Json<HeatMapRequest>,
) -> Result<Response, ApiError> {
    let strategy = match (request.mode, request.parameter, request.kind) {
        (ColorMode::DataRange, _, _) => ColorStrategy::DataRange,
        (ColorMode::Threshold, Some(parameter), Some(kind)) => {
            ColorStrategy::Threshold { parameter, kind }
        }
        (ColorMode::Threshold, _, _) => {
            return Err(ApiError::InvalidRequest(
                "threshold mode needs parameter and kind".to_string(),
            ));
        }
    };

    let heat_map = AnalysisService::heat_map_from_raw(&request.samples, strategy);

    let compress = accepts_brotli(&headers);
    Ok(into_response(json_response(&heat_map_to_wire(&heat_map), compress).await))
}

/// Generation chart for one plant and day
pub async fn get_chart(
    Query(query): Query<ChartQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WirePoint>>, ApiError> {
    let plant_id = resolve_plant(&state, &headers, query.plant).await?;
    let date = parse_date(query.date.as_deref())?;

    let points = state.analysis_service.generation_chart(&plant_id, date).await?;
    Ok(Json(points_to_wire(points)))
}

/// Chart points for caller-supplied data
pub async fn post_chart(Json(request): Json<ChartRequest>) -> Json<Vec<WirePoint>> {
    Json(points_to_wire(AnalysisService::chart_from_raw(&request.points)))
}

/// Stream dashboard for a specific plant (progressive loading)
pub async fn stream_dashboard(
    Path(plant_id): Path<String>,
    Query(query): Query<DateQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let date = parse_date(query.date.as_deref())?;
    let compress = accepts_brotli(&headers);

    let rx = state.streaming_service.stream_dashboard(&plant_id, date).await;
    Ok(stream_from_receiver(rx, compress).await.into_response())
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatReply> {
    Json(state.chat_bot.respond(&request.query))
}
