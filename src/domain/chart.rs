// Chart reshaping - time-series points ordered for a line/area renderer
use super::axis::parse_slot;
use super::sample::numeric_value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChartPoint {
    #[serde(default)]
    pub hour: Option<String>,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

impl RawChartPoint {
    pub fn new(hour: &str, value: f64) -> Self {
        Self {
            hour: Some(hour.to_string()),
            value: Some(serde_json::Value::from(value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub hour: u32,
    pub minute: u32,
    pub value: f64,
}

/// Drop points without an hour label, default non-numeric values to 0 and sort by time of day.
/// Gaps between timestamps are left as they are.
pub fn reshape_chart(raw: &[RawChartPoint]) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = raw
        .iter()
        .filter_map(|p| {
            let label = p.hour.as_deref()?.trim();
            if label.is_empty() {
                return None;
            }
            let (hour, minute) = parse_slot(label);
            Some(ChartPoint {
                label: label.to_string(),
                hour,
                minute,
                value: p.value.as_ref().and_then(numeric_value).unwrap_or(0.0),
            })
        })
        .collect();

    points.sort_by_key(|p| (p.hour, p.minute));
    points
}
