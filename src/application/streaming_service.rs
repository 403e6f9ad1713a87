// Streaming dashboard service - Progressive loading with chunked JSON
use crate::application::analysis_repository::{AnalysisRepository, SampleQuery};
use crate::domain::chart::reshape_chart;
use crate::domain::heatmap::HeatMap;
use crate::domain::sample::normalize_samples;
use crate::infrastructure::config::{prepare_query, query_vars, AnalysisConfig};
use crate::infrastructure::wire::{
    ChartSkeleton, CompletionEvent, DashboardSkeleton, HeatMapSkeleton, HeatMapUpdate,
    SeriesSkeleton, SeriesUpdate, StreamMessage,
};
use crate::infrastructure::wire_mapper::{chart_kind, heat_map_to_wire, points_to_wire};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct StreamingDashboardService {
    repository: Arc<dyn AnalysisRepository>,
    config: AnalysisConfig,
}

impl StreamingDashboardService {
    pub fn new(repository: Arc<dyn AnalysisRepository>, config: AnalysisConfig) -> Self {
        Self { repository, config }
    }

    pub async fn stream_dashboard(
        &self,
        plant_id: &str,
        date: NaiveDate,
    ) -> mpsc::Receiver<StreamMessage> {
        let (tx, rx) = mpsc::channel(100);
        let start_time = Instant::now();

        // 1. Send skeleton immediately
        let skeleton = self.build_skeleton(plant_id, date);
        let total_widgets = skeleton.heat_maps.len() + skeleton.charts.len();
        let _ = tx.send(StreamMessage::Skeleton(skeleton)).await;

        let mut tasks: Vec<JoinHandle<()>> = Vec::new();

        // 2. One task per heat map
        for widget in &self.config.heat_maps {
            let tx = tx.clone();
            let repo = self.repository.clone();
            let heat_map_id = widget.id.clone();
            let strategy = widget.color_mode.strategy(widget.parameter, widget.kind);
            let query = SampleQuery {
                plant_id: plant_id.to_string(),
                parameter: widget.parameter,
                kind: widget.kind,
                date,
            };

            tasks.push(tokio::spawn(async move {
                match repo.fetch_entity_samples(&query).await {
                    Ok(raw) => {
                        let heat_map = HeatMap::build(&normalize_samples(&raw), strategy);
                        let update = HeatMapUpdate {
                            heat_map_id,
                            heat_map: heat_map_to_wire(&heat_map),
                        };
                        let _ = tx.send(StreamMessage::HeatMapUpdate(update)).await;
                    }
                    Err(e) => {
                        tracing::warn!("Error fetching heat map {}: {:#}", heat_map_id, e);
                    }
                }
            }));
        }

        // 3. One task per chart series
        let vars = query_vars(plant_id, date, self.config.utc_offset_minutes);
        for chart_config in &self.config.charts {
            for series_config in &chart_config.series {
                let tx = tx.clone();
                let repo = self.repository.clone();
                let chart_id = chart_config.id.clone();
                let series_id = series_config.id.clone();
                let query = prepare_query(&series_config.query, &vars);

                tasks.push(tokio::spawn(async move {
                    match repo.fetch_time_series(&query).await {
                        // Only send if we have data
                        Ok(raw) if !raw.is_empty() => {
                            let update = SeriesUpdate {
                                chart_id,
                                series_id,
                                points: points_to_wire(reshape_chart(&raw)),
                            };
                            let _ = tx.send(StreamMessage::SeriesUpdate(update)).await;
                        }
                        Ok(_) => {
                            tracing::debug!("No data for series {} of chart {}", series_id, chart_id);
                        }
                        Err(e) => {
                            tracing::warn!("Error fetching series {}: {:#}", series_id, e);
                        }
                    }
                }));
            }
        }

        // 4. Completion once every widget task has finished
        tokio::spawn(async move {
            for task in tasks {
                if let Err(e) = task.await {
                    tracing::error!("Dashboard task failed: {}", e);
                }
            }

            let complete = CompletionEvent {
                total_widgets,
                duration_ms: start_time.elapsed().as_millis() as u64,
            };
            let _ = tx.send(StreamMessage::Complete(complete)).await;
        });

        rx
    }

    fn build_skeleton(&self, plant_id: &str, date: NaiveDate) -> DashboardSkeleton {
        let heat_maps = self
            .config
            .heat_maps
            .iter()
            .map(|h| HeatMapSkeleton {
                id: h.id.clone(),
                title: h.title.clone(),
                unit: h.parameter.unit(),
            })
            .collect();

        // Charts without series are left out
        let charts = self
            .config
            .charts
            .iter()
            .filter(|c| !c.series.is_empty())
            .map(|c| ChartSkeleton {
                id: c.id.clone(),
                title: c.title.clone(),
                unit: c.unit.clone(),
                kind: chart_kind(&c.kind),
                y_min: c.y_min,
                y_max: c.y_max,
                fraction_digits: c.fraction_digits,
                series: c
                    .series
                    .iter()
                    .map(|s| SeriesSkeleton {
                        id: s.id.clone(),
                        name: s.name.clone(),
                        color: s.color.clone(),
                    })
                    .collect(),
            })
            .collect();

        DashboardSkeleton {
            plant_id: plant_id.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
            heat_maps,
            charts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::analysis_service::tests::FakeRepository;
    use crate::domain::chart::RawChartPoint;
    use crate::domain::color::ColorMode;
    use crate::domain::measurement::{EntityKind, Parameter};
    use crate::domain::sample::RawSample;
    use crate::infrastructure::config::{ChartConfig, HeatMapConfig, SeriesConfig};

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            heat_maps: vec![HeatMapConfig {
                id: "inverter-power".to_string(),
                title: "Inverter power".to_string(),
                parameter: Parameter::Power,
                kind: EntityKind::Inverter,
                color_mode: ColorMode::DataRange,
            }],
            charts: vec![
                ChartConfig {
                    id: "generation".to_string(),
                    title: "Generation".to_string(),
                    unit: Some("kWh".to_string()),
                    kind: "area".to_string(),
                    y_min: Some(0.0),
                    y_max: None,
                    fraction_digits: Some(1),
                    series: vec![SeriesConfig {
                        id: "energy".to_string(),
                        name: "Energy".to_string(),
                        color: None,
                        query: "SELECT value FROM plant_metrics WHERE plant='${plant}'".to_string(),
                    }],
                },
                ChartConfig {
                    id: "empty".to_string(),
                    title: "No series".to_string(),
                    unit: None,
                    kind: "line".to_string(),
                    y_min: None,
                    y_max: None,
                    fraction_digits: None,
                    series: Vec::new(),
                },
            ],
            ..Default::default()
        }
    }

    async fn collect(mut rx: mpsc::Receiver<StreamMessage>) -> Vec<StreamMessage> {
        let mut messages = Vec::new();
        while let Some(msg) = rx.recv().await {
            messages.push(msg);
        }
        messages
    }

    #[tokio::test]
    async fn test_stream_sends_skeleton_updates_and_completion() {
        let repository = Arc::new(FakeRepository {
            samples: vec![RawSample::new("INV-1", "09:00", 12.0)],
            series: vec![RawChartPoint::new("10:00", 4.0)],
            ..Default::default()
        });
        let service = StreamingDashboardService::new(repository, config());
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let messages = collect(service.stream_dashboard("north", date).await).await;

        assert_eq!(messages.len(), 4);
        match &messages[0] {
            StreamMessage::Skeleton(skeleton) => {
                assert_eq!(skeleton.heat_maps.len(), 1);
                assert_eq!(skeleton.charts.len(), 1);
            }
            other => panic!("expected skeleton, got {:?}", other),
        }
        assert!(messages
            .iter()
            .any(|m| matches!(m, StreamMessage::HeatMapUpdate(u) if u.heat_map.cells.len() == 1)));
        assert!(messages
            .iter()
            .any(|m| matches!(m, StreamMessage::SeriesUpdate(u) if u.points[0].label == "10:00")));
        match messages.last() {
            Some(StreamMessage::Complete(done)) => assert_eq!(done.total_widgets, 2),
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_queries_are_skipped() {
        let repository = Arc::new(FakeRepository {
            fail: true,
            ..Default::default()
        });
        let service = StreamingDashboardService::new(repository, config());
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let messages = collect(service.stream_dashboard("north", date).await).await;

        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[0], StreamMessage::Skeleton(_)));
        assert!(matches!(messages[1], StreamMessage::Complete(_)));
    }
}
