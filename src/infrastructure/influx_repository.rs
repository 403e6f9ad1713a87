// InfluxDB repository implementation
use crate::application::analysis_repository::{AnalysisRepository, SampleQuery};
use crate::domain::chart::RawChartPoint;
use crate::domain::sample::RawSample;
use crate::infrastructure::config::{day_window, escape_literal};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct InfluxRepository {
    host: String,
    token: String,
    database: String,
    retention_policy: String,
    offset: FixedOffset,
    utc_offset_minutes: i32,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct InfluxQLResponse {
    results: Vec<InfluxQLResult>,
}

#[derive(Debug, Deserialize)]
struct InfluxQLResult {
    #[serde(default)]
    series: Option<Vec<InfluxQLSeries>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InfluxQLSeries {
    #[allow(dead_code)]
    name: String,
    columns: Vec<String>,
    values: Vec<Vec<serde_json::Value>>,
    #[serde(default)]
    tags: Option<std::collections::HashMap<String, String>>,
}

impl InfluxQLSeries {
    fn column(&self, names: &[&str], fallback: usize) -> usize {
        self.columns
            .iter()
            .position(|c| names.contains(&c.as_str()))
            .unwrap_or(fallback)
    }
}

impl InfluxRepository {
    pub fn new(
        host: String,
        token: String,
        database: String,
        retention_policy: String,
        utc_offset_minutes: i32,
    ) -> Self {
        let offset = FixedOffset::east_opt(utc_offset_minutes * 60).unwrap_or_else(|| {
            tracing::warn!("Invalid UTC offset {} minutes, using UTC", utc_offset_minutes);
            Utc.fix()
        });

        Self {
            host: host.trim_end_matches('/').to_string(),
            token,
            database,
            retention_policy,
            offset,
            utc_offset_minutes,
            client: reqwest::Client::new(),
        }
    }

    fn build_query_url(&self, query: &str) -> String {
        let encoded_query = urlencoding::encode(query);
        format!(
            "{}/query?db={}&rp={}&q={}",
            self.host, self.database, self.retention_policy, encoded_query
        )
    }

    async fn execute_query(&self, query: &str) -> Result<InfluxQLResponse> {
        let url = self.build_query_url(query);

        tracing::debug!("Executing InfluxQL query: {}", query);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Token {}", self.token))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to InfluxDB")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("InfluxDB query failed with status {}: {}", status, body);
        }

        let data = response
            .json::<InfluxQLResponse>()
            .await
            .context("Failed to parse InfluxDB response")?;

        // Check for errors in the response
        if let Some(result) = data.results.first() {
            if let Some(error) = &result.error {
                anyhow::bail!("InfluxDB query error: {}", error);
            }
        }

        Ok(data)
    }

    fn sample_query(&self, query: &SampleQuery) -> String {
        let (start, end) = day_window(query.date, self.utc_offset_minutes);
        format!(
            "SELECT mean(\"value\") AS \"value\" FROM \"{}_metrics\" WHERE \"plant\" = '{}' AND \"parameter\" = '{}' AND time >= '{}' AND time < '{}' GROUP BY time(1h), \"{}\" fill(none)",
            query.kind.as_str(),
            escape_literal(&query.plant_id),
            query.parameter.as_str(),
            start,
            end,
            query.kind.id_tag()
        )
    }

    /// Local `HH:MM` of an RFC 3339 timestamp.
    fn hour_label(&self, time: &str) -> Option<String> {
        let time = DateTime::parse_from_rfc3339(time).ok()?;
        Some(time.with_timezone(&self.offset).format("%H:%M").to_string())
    }

    fn samples_from_response(&self, response: InfluxQLResponse, id_tag: &str) -> Vec<RawSample> {
        let mut samples = Vec::new();
        let series_list = response
            .results
            .into_iter()
            .next()
            .and_then(|r| r.series)
            .unwrap_or_default();

        for series in series_list {
            let entity_id = series.tags.as_ref().and_then(|t| t.get(id_tag)).cloned();
            if entity_id.is_none() {
                tracing::warn!("Series without {} tag skipped", id_tag);
                continue;
            }

            let time_idx = series.column(&["time"], 0);
            let value_idx = series.column(&["value", "mean"], 1);

            for row in &series.values {
                let Some(hour) = row.get(time_idx).and_then(|t| t.as_str()).and_then(|t| self.hour_label(t)) else {
                    continue;
                };
                samples.push(RawSample {
                    entity_id: entity_id.clone(),
                    hour: Some(hour),
                    value: row.get(value_idx).cloned(),
                });
            }
        }

        samples
    }

    fn points_from_response(&self, response: InfluxQLResponse) -> Vec<RawChartPoint> {
        let mut points = Vec::new();
        let series_list = response
            .results
            .into_iter()
            .next()
            .and_then(|r| r.series)
            .unwrap_or_default();

        for series in series_list {
            let time_idx = series.column(&["time"], 0);
            let value_idx = series.column(&["value", "mean", "sum", "last"], 1);

            for row in &series.values {
                let hour = row
                    .get(time_idx)
                    .and_then(|t| t.as_str())
                    .and_then(|t| self.hour_label(t));
                if hour.is_some() {
                    points.push(RawChartPoint {
                        hour,
                        value: row.get(value_idx).cloned(),
                    });
                }
            }
        }

        points
    }
}

#[async_trait]
impl AnalysisRepository for InfluxRepository {
    async fn list_plant_ids(&self) -> Result<Vec<String>> {
        let query = "SHOW TAG VALUES FROM plant_metrics WITH KEY = plant";
        let response = self.execute_query(query).await?;

        let mut plants = Vec::new();
        if let Some(result) = response.results.first() {
            if let Some(series) = &result.series {
                for s in series {
                    for value_row in &s.values {
                        if let Some(plant) = value_row.get(1).and_then(|v| v.as_str()) {
                            plants.push(plant.to_string());
                        }
                    }
                }
            }
        }

        Ok(plants)
    }

    async fn fetch_entity_samples(&self, query: &SampleQuery) -> Result<Vec<RawSample>> {
        let influx_query = self.sample_query(query);
        let response = self.execute_query(&influx_query).await?;

        let samples = self.samples_from_response(response, query.kind.id_tag());
        tracing::debug!(
            "Found {} samples for plant {} ({} {})",
            samples.len(),
            query.plant_id,
            query.kind.as_str(),
            query.parameter.as_str()
        );
        Ok(samples)
    }

    async fn fetch_time_series(&self, query: &str) -> Result<Vec<RawChartPoint>> {
        let response = self.execute_query(query).await?;
        Ok(self.points_from_response(response))
    }
}
