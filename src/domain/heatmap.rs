// Heat map - axes, dense grid and per-cell colors for one sample set
use super::axis::{extract_axes, AxisSet};
use super::color::{Color, ColorScale, ColorStrategy};
use super::grid::Grid;
use super::sample::Sample;

#[derive(Debug, Clone)]
pub struct HeatMap {
    pub axes: AxisSet,
    pub grid: Grid,
    pub scale: ColorScale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatMapCell<'a> {
    pub entity_id: &'a str,
    pub hour: &'a str,
    pub value: f64,
    pub color: Color,
}

impl HeatMap {
    pub fn build(samples: &[Sample], strategy: ColorStrategy) -> Self {
        let axes = extract_axes(samples);
        let grid = Grid::build(samples, &axes);
        let scale = ColorScale::for_strategy(strategy, grid.min_value, grid.max_value);

        Self { axes, grid, scale }
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Cells in row-major order: entities as rows, time slots as columns.
    pub fn cells(&self) -> impl Iterator<Item = HeatMapCell<'_>> {
        self.axes.entity_ids.iter().flat_map(move |entity_id| {
            self.axes.time_slots.iter().map(move |hour| {
                let value = self.grid.value(entity_id, hour);
                HeatMapCell {
                    entity_id: entity_id.as_str(),
                    hour: hour.as_str(),
                    value,
                    color: self.scale.color(value),
                }
            })
        })
    }

    pub fn color_at(&self, entity_id: &str, hour: &str) -> Color {
        self.scale.color(self.grid.value(entity_id, hour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::color::{FLAT_COLOR, ZERO_COLOR};
    use crate::domain::measurement::{EntityKind, Parameter};
    use crate::domain::sample::{normalize_samples, RawSample};

    #[test]
    fn test_two_inverter_scenario() {
        let raw = vec![
            RawSample::new("INV-2", "09:00", 50.0),
            RawSample::new("INV-1", "10:00", 0.0),
        ];

        let heat_map = HeatMap::build(&normalize_samples(&raw), ColorStrategy::DataRange);

        assert_eq!(heat_map.axes.entity_ids, vec!["INV-1", "INV-2"]);
        assert_eq!(heat_map.axes.time_slots, vec!["09:00", "10:00"]);
        assert_eq!(heat_map.cells().count(), 4);
        assert_eq!(heat_map.grid.value("INV-1", "09:00"), 0.0);
        assert_eq!(heat_map.grid.value("INV-2", "10:00"), 0.0);
        assert_eq!(heat_map.grid.value("INV-2", "09:00"), 50.0);
        assert_eq!(heat_map.color_at("INV-1", "10:00"), ZERO_COLOR);
        assert_eq!(heat_map.color_at("INV-2", "09:00"), Color("#16a34a"));
    }

    #[test]
    fn test_all_equal_nonzero_scenario() {
        let raw: Vec<RawSample> = ["INV-1", "INV-2"]
            .iter()
            .flat_map(|id| ["09:00", "10:00"].map(|h| RawSample::new(id, h, 10.0)))
            .collect();

        let heat_map = HeatMap::build(&normalize_samples(&raw), ColorStrategy::DataRange);

        assert_eq!(heat_map.grid.min_value, 10.0);
        assert_eq!(heat_map.grid.max_value, 10.0);
        assert!(heat_map.cells().all(|c| c.color == FLAT_COLOR));
    }

    #[test]
    fn test_zero_cells_are_red_in_every_grid() {
        let samples = vec![
            Sample::new("STR-1", "08:00", 0.0),
            Sample::new("STR-1", "09:00", 3.0),
            Sample::new("STR-2", "09:00", 8.0),
        ];

        let heat_map = HeatMap::build(&samples, ColorStrategy::DataRange);

        for cell in heat_map.cells().filter(|c| c.value == 0.0) {
            assert_eq!(cell.color, ZERO_COLOR);
        }
    }

    #[test]
    fn test_cells_are_row_major() {
        let samples = vec![
            Sample::new("INV-2", "10:00", 1.0),
            Sample::new("INV-1", "09:00", 2.0),
        ];

        let heat_map = HeatMap::build(&samples, ColorStrategy::DataRange);
        let order: Vec<(&str, &str)> = heat_map.cells().map(|c| (c.entity_id, c.hour)).collect();

        assert_eq!(
            order,
            vec![
                ("INV-1", "09:00"),
                ("INV-1", "10:00"),
                ("INV-2", "09:00"),
                ("INV-2", "10:00"),
            ]
        );
    }

    #[test]
    fn test_threshold_strategy_ignores_data_range() {
        let samples = vec![Sample::new("INV-1", "12:00", 0.0)];
        let strategy = ColorStrategy::Threshold {
            parameter: Parameter::Power,
            kind: EntityKind::Inverter,
        };

        let heat_map = HeatMap::build(&samples, strategy);

        assert_eq!(heat_map.color_at("INV-1", "12:00"), Color("#1e3a8a"));
    }
}
