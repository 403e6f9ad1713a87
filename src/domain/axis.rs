// Axis extraction - distinct, ordered entity ids and time slots
use super::sample::Sample;
use std::cmp::Ordering;
use std::collections::HashSet;

/// The two axes of a heat-map grid, derived from one sample set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisSet {
    pub entity_ids: Vec<String>,
    pub time_slots: Vec<String>,
}

impl AxisSet {
    pub fn is_empty(&self) -> bool {
        self.entity_ids.is_empty() || self.time_slots.is_empty()
    }
}

pub fn extract_axes(samples: &[Sample]) -> AxisSet {
    let mut entity_ids = distinct(samples.iter().map(|s| s.entity_id.as_str()));
    entity_ids.sort_by(|a, b| compare_entity_ids(a, b));

    let mut time_slots = distinct(samples.iter().map(|s| s.hour.as_str()));
    time_slots.sort_by(|a, b| compare_time_slots(a, b));

    AxisSet {
        entity_ids,
        time_slots,
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Sort rank of an entity id: the integer formed by its digits, 0 when there are none.
pub fn entity_rank(id: &str) -> u64 {
    let digits: String = id.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

fn compare_entity_ids(a: &str, b: &str) -> Ordering {
    entity_rank(a)
        .cmp(&entity_rank(b))
        .then_with(|| a.cmp(b))
}

/// Parse an `HH:MM` label. Anything malformed or out of range parses to `(0, 0)`.
pub fn parse_slot(label: &str) -> (u32, u32) {
    let mut parts = label.trim().split(':');
    let hour = parts.next().and_then(|h| h.trim().parse::<u32>().ok());
    let minute = parts.next().and_then(|m| m.trim().parse::<u32>().ok());

    match (hour, minute) {
        (Some(h), Some(m)) if h < 24 && m < 60 => (h, m),
        _ => (0, 0),
    }
}

pub fn slot_minutes(label: &str) -> u32 {
    let (hour, minute) = parse_slot(label);
    hour * 60 + minute
}

fn compare_time_slots(a: &str, b: &str) -> Ordering {
    slot_minutes(a)
        .cmp(&slot_minutes(b))
        .then_with(|| a.cmp(b))
}
