//! Top-down renderers for biome and elevation maps.

use super::image::DebugImage;
use crate::biome::{HeightMapping, Rgb, Template};
use crate::generator::WorldGenerator;

/// Axis-aligned world rectangle on the xz plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    /// Minimum x.
    pub min_x: f64,
    /// Minimum z.
    pub min_z: f64,
    /// Maximum x.
    pub max_x: f64,
    /// Maximum z.
    pub max_z: f64,
}

impl Region {
    /// Square region of side `size` centered on `(x, z)`.
    pub fn centered(x: f64, z: f64, size: f64) -> Self {
        let half = size * 0.5;
        Self {
            min_x: x - half,
            min_z: z - half,
            max_x: x + half,
            max_z: z + half,
        }
    }

    /// World coordinate of pixel `(px, py)` in a `width` x `height` image.
    fn world_at(&self, px: u32, py: u32, width: u32, height: u32) -> (f64, f64) {
        let u = px as f64 / width as f64;
        let v = py as f64 / height as f64;
        (
            self.min_x + u * (self.max_x - self.min_x),
            self.min_z + v * (self.max_z - self.min_z),
        )
    }
}

/// Render the surface color of every column in `region`.
pub fn render_biome_map<T: Template>(
    generator: &WorldGenerator<T>,
    width: u32,
    height: u32,
    region: Region,
) -> DebugImage {
    render(width, height, region, |x, z| generator.surface_color_at(x, z))
}

/// Render elevation as a blue-to-white ramp, with water tinted below the water
/// level.
pub fn render_elevation_map<T: Template>(
    generator: &WorldGenerator<T>,
    width: u32,
    height: u32,
    region: Region,
) -> DebugImage {
    let heights = *generator.heights();
    render(width, height, region, |x, z| {
        elevation_to_color(generator.compute_elevation(x, z), &heights)
    })
}

/// Map an elevation to a debug color.
///
/// Columns under the water level are blue, darker with depth. Land runs from
/// green through brown to white with increasing elevation.
pub fn elevation_to_color(elevation: f64, heights: &HeightMapping) -> Rgb {
    let water = heights.level_at(heights.water_level).clamp(0.0, 1.0);
    if elevation < water {
        let depth = if water > 0.0 { elevation / water } else { 0.0 };
        return Rgb::new(0, (40.0 + depth * 80.0) as u8, (120.0 + depth * 100.0) as u8);
    }
    let t = elevation.clamp(0.0, 1.0).sqrt();
    if t < 0.5 {
        let s = t * 2.0;
        Rgb::new(
            (40.0 + s * 100.0) as u8,
            (150.0 - s * 40.0) as u8,
            (40.0 + s * 20.0) as u8,
        )
    } else {
        let s = (t - 0.5) * 2.0;
        let v = (140.0 + s * 115.0) as u8;
        Rgb::new(v, v.saturating_sub(((1.0 - s) * 30.0) as u8), v)
    }
}

fn render(
    width: u32,
    height: u32,
    region: Region,
    color_at: impl Fn(f64, f64) -> Rgb,
) -> DebugImage {
    let mut image = DebugImage::new(width, height);
    for py in 0..height {
        for px in 0..width {
            let (x, z) = region.world_at(px, py, width, height);
            image.set_pixel(px, py, color_at(x, z));
        }
    }
    image
}
