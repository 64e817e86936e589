//! Debug visualization: top-down 2D renders of generated terrain.
//!
//! Provides [`DebugImage`] and renderers for biome and elevation maps, used to
//! eyeball classification thresholds and noise parameters without a renderer.

mod image;
mod renderers;

pub use self::image::DebugImage;
pub use renderers::{Region, elevation_to_color, render_biome_map, render_elevation_map};
