// Grid builder - dense entity x time-slot matrix with zero fill
use super::axis::AxisSet;
use super::sample::Sample;
use std::collections::HashMap;

/// Wire key of a grid cell.
pub fn cell_key(entity_id: &str, hour: &str) -> String {
    format!("{}-{}", entity_id, hour)
}

#[derive(Debug, Clone, Default)]
pub struct Grid {
    cells: HashMap<(String, String), f64>,
    pub min_value: f64,
    pub max_value: f64,
}

impl Grid {
    /// Every `(entity, slot)` pair of the axes gets a cell. When two samples share a pair the
    /// later one wins.
    pub fn build(samples: &[Sample], axes: &AxisSet) -> Self {
        let mut observed: HashMap<(&str, &str), f64> = HashMap::with_capacity(samples.len());
        for sample in samples {
            observed.insert((sample.entity_id.as_str(), sample.hour.as_str()), sample.value);
        }

        let mut cells = HashMap::with_capacity(axes.entity_ids.len() * axes.time_slots.len());
        let mut min_value = f64::INFINITY;
        let mut max_value = f64::NEG_INFINITY;

        for entity_id in &axes.entity_ids {
            for hour in &axes.time_slots {
                let value = observed
                    .get(&(entity_id.as_str(), hour.as_str()))
                    .copied()
                    .unwrap_or(0.0);

                // zero fills take part in the range too
                min_value = min_value.min(value);
                max_value = max_value.max(value);

                cells.insert((entity_id.clone(), hour.clone()), value);
            }
        }

        if cells.is_empty() {
            min_value = 0.0;
            max_value = 0.0;
        }

        Self {
            cells,
            min_value,
            max_value,
        }
    }

    pub fn value(&self, entity_id: &str, hour: &str) -> f64 {
        self.cells
            .get(&(entity_id.to_string(), hour.to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn contains(&self, entity_id: &str, hour: &str) -> bool {
        self.cells
            .contains_key(&(entity_id.to_string(), hour.to_string()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::axis::extract_axes;

    fn build(samples: &[Sample]) -> (AxisSet, Grid) {
        let axes = extract_axes(samples);
        let grid = Grid::build(samples, &axes);
        (axes, grid)
    }

    #[test]
    fn test_grid_is_dense_for_sparse_input() {
        let samples = vec![
            Sample::new("INV-1", "08:00", 5.0),
            Sample::new("INV-2", "09:00", 6.0),
            Sample::new("INV-3", "10:00", 7.0),
        ];

        let (axes, grid) = build(&samples);

        assert_eq!(grid.len(), axes.entity_ids.len() * axes.time_slots.len());
        assert_eq!(grid.len(), 9);
        for entity_id in &axes.entity_ids {
            for hour in &axes.time_slots {
                assert!(grid.contains(entity_id, hour));
            }
        }
    }

    #[test]
    fn test_missing_pairs_are_zero_filled() {
        let samples = vec![
            Sample::new("INV-2", "09:00", 50.0),
            Sample::new("INV-1", "10:00", 0.0),
        ];

        let (_, grid) = build(&samples);

        assert_eq!(grid.len(), 4);
        assert_eq!(grid.value("INV-1", "09:00"), 0.0);
        assert_eq!(grid.value("INV-2", "10:00"), 0.0);
        assert_eq!(grid.value("INV-1", "10:00"), 0.0);
        assert_eq!(grid.value("INV-2", "09:00"), 50.0);
    }

    #[test]
    fn test_range_includes_zero_fills() {
        let samples = vec![
            Sample::new("INV-1", "09:00", 40.0),
            Sample::new("INV-2", "10:00", 60.0),
        ];

        let (_, grid) = build(&samples);

        assert_eq!(grid.min_value, 0.0);
        assert_eq!(grid.max_value, 60.0);
    }

    #[test]
    fn test_duplicate_pair_takes_last_sample() {
        let samples = vec![
            Sample::new("INV-1", "09:00", 1.0),
            Sample::new("INV-1", "09:00", 2.0),
        ];

        let (_, grid) = build(&samples);

        assert_eq!(grid.len(), 1);
        assert_eq!(grid.value("INV-1", "09:00"), 2.0);
    }

    #[test]
    fn test_empty_input_yields_empty_grid() {
        let (axes, grid) = build(&[]);

        assert!(axes.is_empty());
        assert!(grid.is_empty());
        assert_eq!((grid.min_value, grid.max_value), (0.0, 0.0));
    }

    #[test]
    fn test_cell_key_format() {
        assert_eq!(cell_key("INV-1", "09:00"), "INV-1-09:00");
    }
}
