//! Mapping between elevation, world height, and gradient levels.

use serde::{Deserialize, Serialize};

use super::{BiomeDef, Rgb};

/// Vertical extent of the world.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightMapping {
    /// World height at elevation 0.
    pub min_height: f64,
    /// World height at elevation 1.
    pub max_height: f64,
    /// Height of the water surface.
    pub water_level: f64,
}

impl Default for HeightMapping {
    fn default() -> Self {
        Self {
            min_height: 0.0,
            max_height: 25_000.0,
            water_level: 60.0,
        }
    }
}

impl HeightMapping {
    /// World height for an elevation value.
    pub fn height_at(&self, elevation: f64) -> f64 {
        elevation * (self.max_height - self.min_height) + self.min_height
    }

    /// World height for an elevation value, never below the water surface.
    pub fn height_with_water(&self, elevation: f64) -> f64 {
        self.height_at(elevation).max(self.water_level)
    }

    /// Normalized level in `[0, 1]` for a world height (inverse of
    /// [`height_at`](Self::height_at)). Heights outside the extent map outside
    /// `[0, 1]`; a zero-size extent maps everything to 0.
    pub fn level_at(&self, y: f64) -> f64 {
        let range = self.max_height - self.min_height;
        if range == 0.0 {
            return 0.0;
        }
        (y - self.min_height) / range
    }

    /// Surface color of `biome` at world height `y`.
    pub fn color_at<T>(&self, biome: &BiomeDef<T>, y: f64) -> Rgb {
        biome.color_at(self.level_at(y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::ColorStop;

    const EPSILON: f64 = 1e-9;

    fn mapping() -> HeightMapping {
        HeightMapping {
            min_height: -100.0,
            max_height: 900.0,
            water_level: 10.0,
        }
    }

    #[test]
    fn test_height_at_extent_endpoints() {
        let m = mapping();
        assert!((m.height_at(0.0) + 100.0).abs() < EPSILON);
        assert!((m.height_at(1.0) - 900.0).abs() < EPSILON);
        assert!((m.height_at(0.5) - 400.0).abs() < EPSILON);
    }

    #[test]
    fn test_level_inverts_height() {
        let m = mapping();
        for e in [0.0, 0.013, 0.25, 0.9, 1.0] {
            assert!((m.level_at(m.height_at(e)) - e).abs() < EPSILON);
        }
    }

    #[test]
    fn test_height_with_water_clamps_to_surface() {
        let m = mapping();
        assert_eq!(m.height_with_water(0.0), 10.0);
        assert!((m.height_with_water(0.5) - 400.0).abs() < EPSILON);
    }

    #[test]
    fn test_degenerate_extent() {
        let m = HeightMapping {
            min_height: 5.0,
            max_height: 5.0,
            water_level: 0.0,
        };
        assert_eq!(m.level_at(100.0), 0.0);
    }

    #[test]
    fn test_color_at_world_height() {
        let biome: BiomeDef<()> = BiomeDef {
            name: "banded".into(),
            color_stops: vec![
                ColorStop {
                    stop: 0.0,
                    color: Rgb::new(255, 0, 0),
                },
                ColorStop {
                    stop: 0.5,
                    color: Rgb::new(0, 255, 0),
                },
                ColorStop {
                    stop: 0.8,
                    color: Rgb::new(0, 0, 255),
                },
            ],
            organisms: Vec::new(),
        };
        let m = mapping();
        assert_eq!(m.color_at(&biome, 0.0), Rgb::new(255, 0, 0));
        assert_eq!(m.color_at(&biome, 500.0), Rgb::new(0, 255, 0));
        assert_eq!(m.color_at(&biome, 850.0), Rgb::new(0, 0, 255));
        assert_eq!(m.color_at(&biome, 5_000.0), Rgb::new(0, 0, 255));
    }
}
