use crate::domain::color::ColorMode;
use crate::domain::measurement::{EntityKind, Parameter};
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Deserialize;
use std::collections::HashMap;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

const DEFAULT_GENERATION_QUERY: &str = "SELECT sum(\"value\") AS \"value\" FROM \"plant_metrics\" \
WHERE \"plant\"='${plant}' AND \"parameter\"='energy' AND time >= '${start}' AND time < '${end}' \
GROUP BY time(15m) fill(none)";

#[derive(Debug, Deserialize, Clone)]
pub struct InfluxConfig {
    pub influx: InfluxSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InfluxSettings {
    pub host: String,
    pub token: String,
    pub database: String,
    pub retention_policy: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// Offset of plant local time from UTC, used for day windows and `HH:MM` labels.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default = "default_generation_query")]
    pub generation_query: String,
    #[serde(default)]
    pub heat_maps: Vec<HeatMapConfig>,
    #[serde(default)]
    pub charts: Vec<ChartConfig>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            generation_query: default_generation_query(),
            heat_maps: Vec::new(),
            charts: Vec::new(),
        }
    }
}

fn default_generation_query() -> String {
    DEFAULT_GENERATION_QUERY.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct HeatMapConfig {
    pub id: String,
    pub title: String,
    pub parameter: Parameter,
    pub kind: EntityKind,
    #[serde(default)]
    pub color_mode: ColorMode,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: String,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub fraction_digits: Option<i32>,
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeriesConfig {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub query: String,
}

fn load<T: serde::de::DeserializeOwned>(name: &str, required: bool) -> anyhow::Result<T> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(name).required(required))
        .add_source(
            config::Environment::with_prefix("SOLAR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_influx_config() -> anyhow::Result<InfluxConfig> {
    load("config/influx", true)
}

pub fn load_analysis_config() -> anyhow::Result<AnalysisConfig> {
    load("config/analysis", true)
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    load("config/server", false)
}

/// Replace template variables in a query string
pub fn prepare_query(query: &str, vars: &HashMap<String, String>) -> String {
    let mut result = query.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

/// UTC bounds `[start, end)` of a plant-local calendar day, RFC 3339 formatted.
pub fn day_window(date: NaiveDate, utc_offset_minutes: i32) -> (String, String) {
    let local_midnight = date.and_time(NaiveTime::default());
    let start = local_midnight - Duration::minutes(i64::from(utc_offset_minutes));
    let end = start + Duration::days(1);

    let format = "%Y-%m-%dT%H:%M:%SZ";
    (
        start.format(format).to_string(),
        end.format(format).to_string(),
    )
}

/// Escape a value for use inside a single-quoted InfluxQL string literal.
pub fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Variables available to query templates: `plant`, `date`, `start` and `end`.
/// `plant` is escaped for a single-quoted literal.
pub fn query_vars(plant_id: &str, date: NaiveDate, utc_offset_minutes: i32) -> HashMap<String, String> {
    let (start, end) = day_window(date, utc_offset_minutes);

    let mut vars = HashMap::new();
    vars.insert("plant".to_string(), escape_literal(plant_id));
    vars.insert("date".to_string(), date.format("%Y-%m-%d").to_string());
    vars.insert("start".to_string(), start);
    vars.insert("end".to_string(), end);
    vars
}
