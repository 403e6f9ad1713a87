// Color scale for heat-map cells: a palette plus a normalization mode
use super::measurement::{EntityKind, Parameter};
use serde::{Deserialize, Serialize};

/// A display color token (CSS hex).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color(pub &'static str);

impl Color {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Values whose normalized form is below `below` take `color`. The last stop is the catch-all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub below: f64,
    pub color: Color,
}

const fn stop(below: f64, hex: &'static str) -> ColorStop {
    ColorStop {
        below,
        color: Color(hex),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    stops: &'static [ColorStop],
}

/// Dark blue to red.
pub const THERMAL: Palette = Palette {
    stops: &[
        stop(0.1, "#1e3a8a"),
        stop(0.3, "#3b82f6"),
        stop(0.5, "#22d3ee"),
        stop(0.7, "#facc15"),
        stop(0.9, "#f97316"),
        stop(f64::INFINITY, "#dc2626"),
    ],
};

/// Red to green.
pub const HEALTH: Palette = Palette {
    stops: &[
        stop(0.2, "#ef4444"),
        stop(0.4, "#f97316"),
        stop(0.6, "#facc15"),
        stop(0.8, "#a3e635"),
        stop(0.95, "#4ade80"),
        stop(f64::INFINITY, "#16a34a"),
    ],
};

/// Flags a zero reading in the data-range mode.
pub const ZERO_COLOR: Color = Color("#b91c1c");
/// Every non-zero cell when the whole grid holds a single value.
pub const FLAT_COLOR: Color = Color("#22c55e");

impl Palette {
    pub fn pick(&self, normalized: f64) -> Color {
        self.stops
            .iter()
            .find(|s| normalized < s.below)
            .or_else(|| self.stops.last())
            .map(|s| s.color)
            .unwrap_or(FLAT_COLOR)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }
}

/// Fixed full-scale value for a parameter on an entity kind.
pub fn threshold_divisor(parameter: Parameter, kind: EntityKind) -> f64 {
    match (parameter, kind) {
        (Parameter::Power, EntityKind::Inverter) => 20000.0,
        (Parameter::Power, EntityKind::String) => 10000.0,
        (Parameter::Voltage, EntityKind::Inverter) => 1000.0,
        (Parameter::Voltage, EntityKind::String) => 600.0,
        (Parameter::Current, EntityKind::Inverter) => 50.0,
        (Parameter::Current, EntityKind::String) => 15.0,
        (Parameter::Energy, EntityKind::Inverter) => 150.0,
        (Parameter::Energy, EntityKind::String) => 25.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalization {
    Fixed { divisor: f64 },
    DataRange { min: f64, max: f64 },
}

/// How a heat map colors its cells. One view uses exactly one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorStrategy {
    Threshold {
        parameter: Parameter,
        kind: EntityKind,
    },
    #[default]
    DataRange,
}

/// Color mode as named in configuration and query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    Threshold,
    #[default]
    DataRange,
}

impl ColorMode {
    pub fn strategy(self, parameter: Parameter, kind: EntityKind) -> ColorStrategy {
        match self {
            ColorMode::Threshold => ColorStrategy::Threshold { parameter, kind },
            ColorMode::DataRange => ColorStrategy::DataRange,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub palette: Palette,
    pub normalization: Normalization,
    pub zero_color: Option<Color>,
}

impl ColorScale {
    pub fn threshold(parameter: Parameter, kind: EntityKind) -> Self {
        Self {
            palette: THERMAL,
            normalization: Normalization::Fixed {
                divisor: threshold_divisor(parameter, kind),
            },
            zero_color: None,
        }
    }

    pub fn data_range(min: f64, max: f64) -> Self {
        Self {
            palette: HEALTH,
            normalization: Normalization::DataRange { min, max },
            zero_color: Some(ZERO_COLOR),
        }
    }

    pub fn for_strategy(strategy: ColorStrategy, min: f64, max: f64) -> Self {
        match strategy {
            ColorStrategy::Threshold { parameter, kind } => Self::threshold(parameter, kind),
            ColorStrategy::DataRange => Self::data_range(min, max),
        }
    }

    pub fn color(&self, value: f64) -> Color {
        if value == 0.0 {
            if let Some(zero) = self.zero_color {
                return zero;
            }
        }

        match self.normalization {
            Normalization::Fixed { divisor } => self.palette.pick(value / divisor),
            Normalization::DataRange { min, max } => {
                if max == min {
                    return FLAT_COLOR;
                }
                self.palette.pick((value - min) / (max - min))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_buckets() {
        let scale = ColorScale::threshold(Parameter::Power, EntityKind::Inverter);

        assert_eq!(scale.color(0.0), Color("#1e3a8a"));
        assert_eq!(scale.color(1999.0), Color("#1e3a8a"));
        assert_eq!(scale.color(2000.0), Color("#3b82f6"));
        assert_eq!(scale.color(9000.0), Color("#22d3ee"));
        assert_eq!(scale.color(12000.0), Color("#facc15"));
        assert_eq!(scale.color(17000.0), Color("#f97316"));
        assert_eq!(scale.color(18000.0), Color("#dc2626"));
        assert_eq!(scale.color(90000.0), Color("#dc2626"));
    }

    #[test]
    fn test_string_voltage_divisor() {
        let scale = ColorScale::threshold(Parameter::Voltage, EntityKind::String);

        // 550 / 600 is above the 0.9 stop
        assert_eq!(scale.color(550.0), Color("#dc2626"));
        assert_eq!(scale.color(300.0), Color("#facc15"));
    }

    #[test]
    fn test_data_range_buckets() {
        let scale = ColorScale::data_range(0.0, 100.0);

        assert_eq!(scale.color(10.0), Color("#ef4444"));
        assert_eq!(scale.color(30.0), Color("#f97316"));
        assert_eq!(scale.color(50.0), Color("#facc15"));
        assert_eq!(scale.color(70.0), Color("#a3e635"));
        assert_eq!(scale.color(90.0), Color("#4ade80"));
        assert_eq!(scale.color(95.0), Color("#16a34a"));
        assert_eq!(scale.color(100.0), Color("#16a34a"));
    }

    #[test]
    fn test_zero_is_always_flagged() {
        for (min, max) in [(0.0, 10.0), (-5.0, 5.0), (0.0, 0.0), (3.0, 3.0)] {
            let scale = ColorScale::data_range(min, max);
            assert_eq!(scale.color(0.0), ZERO_COLOR);
        }
    }

    #[test]
    fn test_all_equal_grid_is_flat_green() {
        let scale = ColorScale::data_range(10.0, 10.0);

        assert_eq!(scale.color(10.0), FLAT_COLOR);
        assert_eq!(scale.color(0.0), ZERO_COLOR);
    }

    #[test]
    fn test_color_is_total() {
        let scales = [
            ColorScale::data_range(0.0, 1.0),
            ColorScale::data_range(2.0, 2.0),
            ColorScale::threshold(Parameter::Energy, EntityKind::String),
            ColorScale::threshold(Parameter::Current, EntityKind::Inverter),
        ];
        let values = [0.0, 1e-9, 0.5, 1.0, 2.0, 1e6, f64::MAX];

        for scale in &scales {
            for value in values {
                assert!(!scale.color(value).as_str().is_empty());
            }
        }
    }

    #[test]
    fn test_palette_sizes() {
        assert_eq!(THERMAL.len(), 6);
        // six stops plus the zero sentinel
        assert_eq!(HEALTH.len() + 1, 7);
    }
}
