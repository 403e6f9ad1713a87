// Repository trait for analysis data access
use crate::domain::chart::RawChartPoint;
use crate::domain::measurement::{EntityKind, Parameter};
use crate::domain::sample::RawSample;
use async_trait::async_trait;
use chrono::NaiveDate;

/// One day of per-entity readings for a plant.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleQuery {
    pub plant_id: String,
    pub parameter: Parameter,
    pub kind: EntityKind,
    pub date: NaiveDate,
}

#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// List all available plant IDs
    async fn list_plant_ids(&self) -> anyhow::Result<Vec<String>>;

    /// Per-entity samples labelled with the local `HH:MM` of their time bucket
    async fn fetch_entity_samples(&self, query: &SampleQuery) -> anyhow::Result<Vec<RawSample>>;

    /// Time series for a prepared query (for charts)
    async fn fetch_time_series(&self, query: &str) -> anyhow::Result<Vec<RawChartPoint>>;
}
