//! Biome definition: color gradient and weighted organism table.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// An 8-bit RGB color. Serialized as a packed `0xRRGGBB` integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Construct from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Packed `0xRRGGBB` value.
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl From<u32> for Rgb {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl From<Rgb> for u32 {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

/// One entry of a stepped color gradient.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Normalized height in `[0, 1]` at which this color starts.
    pub stop: f64,
    /// Color used from `stop` up to the next stop.
    pub color: Rgb,
}

/// Inclusive `[low, high]` bound on a climate value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Lower bound (inclusive).
    pub low: f64,
    /// Upper bound (inclusive).
    pub high: f64,
}

impl ValueRange {
    /// Returns `true` if `value` lies within the bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Uniform scale bounds applied to placed instances.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    /// Smallest scale factor.
    pub min: f64,
    /// Largest scale factor.
    pub max: f64,
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self { min: 1.0, max: 1.0 }
    }
}

/// An organism candidate in a biome's selection table.
#[derive(Debug)]
pub struct WeightedOrganism<T> {
    /// Template name, as registered in the template registry.
    pub name: String,
    /// Contribution to the cumulative selection threshold.
    pub weight: f64,
    /// Shared, never-mutated prototype. Placement clones it.
    pub template: Arc<T>,
    /// Elevation bounds. `None` accepts any elevation.
    pub elevation: Option<ValueRange>,
    /// Moisture bounds. `None` accepts any moisture.
    pub moisture: Option<ValueRange>,
    /// Probability in `[0, 1]` of rejecting an otherwise eligible placement.
    pub scarcity: f64,
    /// Scale factor bounds.
    pub scale: ScaleRange,
}

impl<T> WeightedOrganism<T> {
    /// Returns `true` if the climate at a point satisfies both optional ranges.
    pub fn accepts_climate(&self, elevation: f64, moisture: f64) -> bool {
        self.elevation.is_none_or(|r| r.contains(elevation))
            && self.moisture.is_none_or(|r| r.contains(moisture))
    }
}

impl<T> Clone for WeightedOrganism<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            weight: self.weight,
            template: Arc::clone(&self.template),
            elevation: self.elevation,
            moisture: self.moisture,
            scarcity: self.scarcity,
            scale: self.scale,
        }
    }
}

/// Full descriptor for a biome type.
#[derive(Debug)]
pub struct BiomeDef<T> {
    /// Unique biome name (e.g., "rainforest").
    pub name: String,
    /// Stepped color gradient, ascending by `stop`. Never empty once registered.
    pub color_stops: Vec<ColorStop>,
    /// Organisms in cumulative selection order.
    pub organisms: Vec<WeightedOrganism<T>>,
}

impl<T> BiomeDef<T> {
    /// Color for a normalized height `level`.
    ///
    /// Returns the color of the stop whose bracket contains `level`. Levels
    /// below the first stop use the first color; levels past the last stop use
    /// the last color.
    pub fn color_at(&self, level: f64) -> Rgb {
        for pair in self.color_stops.windows(2) {
            if level < pair[1].stop {
                return pair[0].color;
            }
        }
        self.color_stops
            .last()
            .map(|s| s.color)
            .unwrap_or_default()
    }

    /// Sum of all organism weights.
    pub fn total_weight(&self) -> f64 {
        self.organisms.iter().map(|o| o.weight).sum()
    }
}

impl<T> Clone for BiomeDef<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            color_stops: self.color_stops.clone(),
            organisms: self.organisms.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const GREEN: Rgb = Rgb::new(0, 255, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    fn banded() -> BiomeDef<()> {
        BiomeDef {
            name: "banded".into(),
            color_stops: vec![
                ColorStop {
                    stop: 0.0,
                    color: RED,
                },
                ColorStop {
                    stop: 0.5,
                    color: GREEN,
                },
                ColorStop {
                    stop: 0.8,
                    color: BLUE,
                },
            ],
            organisms: Vec::new(),
        }
    }

    #[test]
    fn test_color_banding() {
        let biome = banded();
        assert_eq!(biome.color_at(0.1), RED);
        assert_eq!(biome.color_at(0.6), GREEN);
        assert_eq!(biome.color_at(0.9), BLUE);
    }

    #[test]
    fn test_color_is_stepped_at_boundaries() {
        let biome = banded();
        assert_eq!(biome.color_at(0.499_999), RED);
        assert_eq!(biome.color_at(0.5), GREEN);
        assert_eq!(biome.color_at(0.8), BLUE);
    }

    #[test]
    fn test_color_out_of_range_clamps() {
        let biome = banded();
        assert_eq!(biome.color_at(-3.0), RED);
        assert_eq!(biome.color_at(1.0), BLUE);
        assert_eq!(biome.color_at(42.0), BLUE);
    }

    #[test]
    fn test_single_stop_gradient() {
        let biome: BiomeDef<()> = BiomeDef {
            name: "flat".into(),
            color_stops: vec![ColorStop {
                stop: 0.3,
                color: GREEN,
            }],
            organisms: Vec::new(),
        };
        assert_eq!(biome.color_at(0.0), GREEN);
        assert_eq!(biome.color_at(0.9), GREEN);
    }

    #[test]
    fn test_rgb_hex_conversion() {
        let c = Rgb::from_hex(0x3EAD52);
        assert_eq!(c, Rgb::new(0x3E, 0xAD, 0x52));
        assert_eq!(c.to_hex(), 0x3EAD52);
        assert_eq!(Rgb::from_hex(0x0FFF_FFFF), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_rgb_ron_is_packed_integer() {
        let stop: ColorStop = ron::from_str("(stop: 0.25, color: 0xF0E68C)").unwrap();
        assert_eq!(stop.color, Rgb::new(0xF0, 0xE6, 0x8C));
        let text = ron::to_string(&stop).unwrap();
        assert!(text.contains(&0xF0E68Cu32.to_string()), "got {text}");
    }

    #[test]
    fn test_value_range_inclusive() {
        let r = ValueRange {
            low: 0.2,
            high: 0.4,
        };
        assert!(r.contains(0.2));
        assert!(r.contains(0.4));
        assert!(!r.contains(0.41));
        assert!(!r.contains(0.19));
    }

    #[test]
    fn test_accepts_climate_optional_ranges() {
        let organism = WeightedOrganism {
            name: "fern".into(),
            weight: 1.0,
            template: Arc::new(()),
            elevation: None,
            moisture: Some(ValueRange {
                low: 0.5,
                high: 1.0,
            }),
            scarcity: 0.0,
            scale: ScaleRange::default(),
        };
        assert!(organism.accepts_climate(0.9, 0.7));
        assert!(!organism.accepts_climate(0.9, 0.2));
    }
}
