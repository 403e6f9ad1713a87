// Sample domain models - raw API points and their canonical form
use serde::Deserialize;

/// A loosely typed point as delivered by the analysis data source.
/// Older payloads name the entity `inverterId`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSample {
    #[serde(default, alias = "inverterId")]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub hour: Option<String>,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

impl RawSample {
    pub fn new(entity_id: &str, hour: &str, value: f64) -> Self {
        Self {
            entity_id: Some(entity_id.to_string()),
            hour: Some(hour.to_string()),
            value: Some(serde_json::Value::from(value)),
        }
    }
}

/// One observation: an entity's value in one time slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub entity_id: String,
    pub hour: String,
    pub value: f64,
}

impl Sample {
    pub fn new(entity_id: impl Into<String>, hour: impl Into<String>, value: f64) -> Self {
        Self {
            entity_id: entity_id.into(),
            hour: hour.into(),
            value,
        }
    }
}

/// Coerce raw points into samples. Missing values become 0 and negatives are clamped to 0.
pub fn normalize_samples(raw: &[RawSample]) -> Vec<Sample> {
    raw.iter().map(normalize_sample).collect()
}

fn normalize_sample(raw: &RawSample) -> Sample {
    let value = raw.value.as_ref().and_then(numeric_value).unwrap_or(0.0);

    Sample {
        entity_id: raw.entity_id.clone().unwrap_or_default(),
        hour: raw.hour.clone().unwrap_or_default(),
        value: value.max(0.0),
    }
}

/// Numeric JSON values only; strings, booleans and non-finite numbers count as missing.
pub(crate) fn numeric_value(value: &serde_json::Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_negative_values_are_clamped() {
        let raw = vec![
            RawSample::new("INV-1", "09:00", -12.5),
            RawSample::new("INV-1", "10:00", 7.0),
        ];

        let samples = normalize_samples(&raw);

        assert_eq!(samples[0].value, 0.0);
        assert_eq!(samples[1].value, 7.0);
    }

    #[test]
    fn test_missing_and_non_numeric_values_default_to_zero() {
        let raw: Vec<RawSample> = serde_json::from_value(json!([
            { "entityId": "STR-1", "hour": "08:00" },
            { "entityId": "STR-2", "hour": "08:00", "value": null },
            { "entityId": "STR-3", "hour": "08:00", "value": "n/a" },
        ]))
        .unwrap();

        let samples = normalize_samples(&raw);

        assert!(samples.iter().all(|s| s.value == 0.0));
    }

    #[test]
    fn test_inverter_id_alias() {
        let raw: RawSample =
            serde_json::from_value(json!({ "inverterId": "INV-7", "hour": "12:00", "value": 3 }))
                .unwrap();

        let sample = normalize_samples(&[raw]).remove(0);

        assert_eq!(sample, Sample::new("INV-7", "12:00", 3.0));
    }
}
