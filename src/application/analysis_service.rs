// Analysis service - Use cases for heat maps and generation charts
use crate::application::analysis_repository::{AnalysisRepository, SampleQuery};
use crate::domain::chart::{reshape_chart, ChartPoint, RawChartPoint};
use crate::domain::color::ColorStrategy;
use crate::domain::heatmap::HeatMap;
use crate::domain::sample::{normalize_samples, RawSample};
use crate::infrastructure::config::{prepare_query, query_vars, AnalysisConfig};
use anyhow::Context;
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone)]
pub struct AnalysisService {
    repository: Arc<dyn AnalysisRepository>,
    config: AnalysisConfig,
}

impl AnalysisService {
    pub fn new(repository: Arc<dyn AnalysisRepository>, config: AnalysisConfig) -> Self {
        Self { repository, config }
    }

    pub async fn heat_map(
        &self,
        query: &SampleQuery,
        strategy: ColorStrategy,
    ) -> anyhow::Result<HeatMap> {
        let raw = self
            .repository
            .fetch_entity_samples(query)
            .await
            .with_context(|| {
                format!(
                    "Failed to fetch {} samples for {}",
                    query.parameter.as_str(),
                    query.plant_id
                )
            })?;

        tracing::debug!(
            "Fetched {} {} samples for plant {} on {}",
            raw.len(),
            query.parameter.as_str(),
            query.plant_id,
            query.date
        );

        Ok(Self::heat_map_from_raw(&raw, strategy))
    }

    pub async fn generation_chart(
        &self,
        plant_id: &str,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<ChartPoint>> {
        let vars = query_vars(plant_id, date, self.config.utc_offset_minutes);
        let query = prepare_query(&self.config.generation_query, &vars);

        let raw = self
            .repository
            .fetch_time_series(&query)
            .await
            .with_context(|| format!("Failed to fetch generation for {}", plant_id))?;

        Ok(Self::chart_from_raw(&raw))
    }

    pub fn heat_map_from_raw(raw: &[RawSample], strategy: ColorStrategy) -> HeatMap {
        let samples = normalize_samples(raw);
        HeatMap::build(&samples, strategy)
    }

    pub fn chart_from_raw(raw: &[RawChartPoint]) -> Vec<ChartPoint> {
        reshape_chart(raw)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::measurement::{EntityKind, Parameter};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory repository that records the chart queries it receives.
    #[derive(Default)]
    pub(crate) struct FakeRepository {
        pub plant_ids: Vec<String>,
        pub samples: Vec<RawSample>,
        pub series: Vec<RawChartPoint>,
        pub fail: bool,
        pub queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AnalysisRepository for FakeRepository {
        async fn list_plant_ids(&self) -> anyhow::Result<Vec<String>> {
            if self.fail {
                anyhow::bail!("store unavailable");
            }
            Ok(self.plant_ids.clone())
        }

        async fn fetch_entity_samples(&self, _query: &SampleQuery) -> anyhow::Result<Vec<RawSample>> {
            if self.fail {
                anyhow::bail!("store unavailable");
            }
            Ok(self.samples.clone())
        }

        async fn fetch_time_series(&self, query: &str) -> anyhow::Result<Vec<RawChartPoint>> {
            if self.fail {
                anyhow::bail!("store unavailable");
            }
            self.queries.lock().unwrap().push(query.to_string());
            Ok(self.series.clone())
        }
    }

    fn sample_query() -> SampleQuery {
        SampleQuery {
            plant_id: "north".to_string(),
            parameter: Parameter::Power,
            kind: EntityKind::Inverter,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_heat_map_from_repository() {
        let repository = Arc::new(FakeRepository {
            samples: vec![
                RawSample::new("INV-2", "09:00", 50.0),
                RawSample::new("INV-1", "10:00", -3.0),
            ],
            ..Default::default()
        });
        let service = AnalysisService::new(repository, AnalysisConfig::default());

        let heat_map = service
            .heat_map(&sample_query(), ColorStrategy::DataRange)
            .await
            .unwrap();

        assert_eq!(heat_map.grid.len(), 4);
        assert_eq!(heat_map.grid.value("INV-1", "10:00"), 0.0);
    }

    #[tokio::test]
    async fn test_empty_repository_gives_empty_heat_map() {
        let service = AnalysisService::new(Arc::new(FakeRepository::default()), AnalysisConfig::default());

        let heat_map = service
            .heat_map(&sample_query(), ColorStrategy::DataRange)
            .await
            .unwrap();

        assert!(heat_map.is_empty());
    }

    #[tokio::test]
    async fn test_repository_errors_propagate() {
        let repository = Arc::new(FakeRepository {
            fail: true,
            ..Default::default()
        });
        let service = AnalysisService::new(repository, AnalysisConfig::default());

        let err = service
            .heat_map(&sample_query(), ColorStrategy::DataRange)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("north"));
    }

    #[tokio::test]
    async fn test_generation_chart_prepares_query() {
        let repository = Arc::new(FakeRepository {
            series: vec![
                RawChartPoint::new("12:00", 40.0),
                RawChartPoint::new("06:15", 2.5),
            ],
            ..Default::default()
        });
        let service = AnalysisService::new(repository.clone(), AnalysisConfig::default());
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let points = service.generation_chart("north", date).await.unwrap();

        assert_eq!(points[0].label, "06:15");
        let queries = repository.queries.lock().unwrap();
        assert!(queries[0].contains("\"plant\"='north'"));
        assert!(queries[0].contains("2024-06-02T00:00:00Z"));
    }

    #[tokio::test]
    async fn test_generation_chart_keeps_plant_inside_literal() {
        let repository = Arc::new(FakeRepository::default());
        let service = AnalysisService::new(repository.clone(), AnalysisConfig::default());
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        service
            .generation_chart("x' OR \"plant\"=~/.*/ AND 'a'='a", date)
            .await
            .unwrap();

        let queries = repository.queries.lock().unwrap();
        assert!(queries[0].contains("\"plant\"='x\\' OR \"plant\"=~/.*/ AND \\'a\\'=\\'a'"));
        assert!(!queries[0].contains("'x' OR"));
    }
}
