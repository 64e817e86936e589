//! World generator facade: the queries the world and renderer layers call.
//!
//! Every terrain query is a pure function of the seed and `(x, z)`. The only
//! randomness is the placement stream, which callers pass in explicitly or
//! derive per chunk with [`WorldGenerator::chunk_rng`].

use std::sync::Arc;

use glam::DVec3;

use crate::biome::{
    BiomeCatalog, BiomeClassifier, BiomeDef, BiomeId, BiomeManifest, CatalogError,
    ClassificationTable, HeightMapping, Rgb, Template, TemplateRegistry,
};
use crate::climate::{ClimateParams, ClimateSampler, FieldParamsError};
use crate::placement::{PlacedInstance, PlacementSite, place};
use crate::rng::{RandomSource, WorldRng};
use crate::seed::chunk_rng;

/// Errors raised while constructing a [`WorldGenerator`].
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Invalid noise field parameters.
    #[error(transparent)]
    Field(#[from] FieldParamsError),
    /// Invalid biome catalog or classification table.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Grid used when scattering organisms over a chunk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChunkLayout {
    /// Chunk extent along x, in world units.
    pub width: f64,
    /// Chunk extent along z, in world units.
    pub depth: f64,
    /// Spacing of placement cells inside the chunk.
    pub cell_size: f64,
}

impl ChunkLayout {
    /// Number of placement cells along (x, z). Partial cells are dropped.
    ///
    /// An axis whose count is not finite or does not fit in a `u32` has no
    /// cells.
    pub fn cells(&self) -> (u32, u32) {
        if self.cell_size <= 0.0 {
            return (0, 0);
        }
        (
            cell_count(self.width, self.cell_size),
            cell_count(self.depth, self.cell_size),
        )
    }
}

fn cell_count(extent: f64, cell_size: f64) -> u32 {
    let cells = (extent / cell_size).floor();
    if (0.0..=f64::from(u32::MAX)).contains(&cells) {
        cells as u32
    } else {
        0
    }
}

/// Everything the generator knows about one world column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSample {
    /// Rounded elevation.
    pub elevation: f64,
    /// Rounded moisture.
    pub moisture: f64,
    /// World height of the terrain surface.
    pub height: f64,
    /// Biome resolved from elevation and moisture.
    pub biome: BiomeId,
}

/// Deterministic world content generator.
///
/// Construction seeds the noise fields and must happen before the generator is
/// shared. Afterwards all methods take `&self`, so one instance can serve many
/// worker threads.
pub struct WorldGenerator<T> {
    seed: u64,
    climate: ClimateSampler,
    heights: HeightMapping,
    catalog: Arc<BiomeCatalog<T>>,
    classifier: BiomeClassifier,
}

impl<T: Template> WorldGenerator<T> {
    /// Build a generator over an existing catalog.
    ///
    /// # Errors
    ///
    /// Fails if the noise parameters are invalid or the classification table
    /// does not resolve against `catalog`.
    pub fn new(
        seed: u64,
        climate: ClimateParams,
        heights: HeightMapping,
        catalog: Arc<BiomeCatalog<T>>,
        table: &ClassificationTable,
    ) -> Result<Self, GeneratorError> {
        let climate = ClimateSampler::new(seed, climate)?;
        let classifier = BiomeClassifier::resolve(table, &catalog)?;
        tracing::info!(
            seed,
            biomes = catalog.len(),
            rules = classifier.rules().len(),
            "world generator ready"
        );
        Ok(Self {
            seed,
            climate,
            heights,
            catalog,
            classifier,
        })
    }

    /// Build the catalog from `manifest` and a generator over it.
    pub fn from_manifest(
        seed: u64,
        climate: ClimateParams,
        heights: HeightMapping,
        manifest: &BiomeManifest,
        templates: &TemplateRegistry<T>,
    ) -> Result<Self, GeneratorError> {
        let catalog = Arc::new(BiomeCatalog::from_manifest(manifest, templates)?);
        Self::new(
            seed,
            climate,
            heights,
            catalog,
            &manifest.classification_table(),
        )
    }

    /// World seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The shared biome catalog.
    pub fn catalog(&self) -> &Arc<BiomeCatalog<T>> {
        &self.catalog
    }

    /// The resolved classifier.
    pub fn classifier(&self) -> &BiomeClassifier {
        &self.classifier
    }

    /// Vertical extent used for heights and gradients.
    pub fn heights(&self) -> &HeightMapping {
        &self.heights
    }

    /// Elevation at `(x, z)`.
    pub fn compute_elevation(&self, x: f64, z: f64) -> f64 {
        self.climate.elevation(x, z)
    }

    /// Moisture at `(x, z)`.
    pub fn compute_moisture(&self, x: f64, z: f64) -> f64 {
        self.climate.moisture(x, z)
    }

    /// Terrain surface height at `(x, z)`, in world units.
    pub fn compute_height(&self, x: f64, z: f64) -> f64 {
        self.heights.height_at(self.compute_elevation(x, z))
    }

    /// Terrain or water surface height at `(x, z)`, whichever is higher.
    pub fn compute_height_with_water(&self, x: f64, z: f64) -> f64 {
        self.heights.height_with_water(self.compute_elevation(x, z))
    }

    /// Elevation corresponding to world height `y`.
    pub fn elevation_from_height(&self, y: f64) -> f64 {
        self.heights.level_at(y)
    }

    /// Biome for an already sampled climate.
    pub fn classify(&self, elevation: f64, moisture: f64) -> BiomeId {
        self.classifier.classify(elevation, moisture)
    }

    /// Biome ID at `(x, z)`.
    pub fn biome_id_at(&self, x: f64, z: f64) -> BiomeId {
        self.classify(self.compute_elevation(x, z), self.compute_moisture(x, z))
    }

    /// Biome definition at `(x, z)`.
    pub fn biome_at(&self, x: f64, z: f64) -> &BiomeDef<T> {
        self.catalog.get(self.biome_id_at(x, z))
    }

    /// Color of `biome`'s gradient at world height `y`.
    pub fn color_at(&self, biome: &BiomeDef<T>, y: f64) -> Rgb {
        self.heights.color_at(biome, y)
    }

    /// Terrain surface color at `(x, z)`.
    pub fn surface_color_at(&self, x: f64, z: f64) -> Rgb {
        let column = self.sample_column(x, z);
        self.color_at(self.catalog.get(column.biome), column.height)
    }

    /// Sample elevation, moisture, height, and biome at once.
    pub fn sample_column(&self, x: f64, z: f64) -> ColumnSample {
        let elevation = self.compute_elevation(x, z);
        let moisture = self.compute_moisture(x, z);
        ColumnSample {
            elevation,
            moisture,
            height: self.heights.height_at(elevation),
            biome: self.classify(elevation, moisture),
        }
    }

    /// Try to place an organism at `(x, z)`, drawing from `rng`.
    pub fn pick(&self, x: f64, z: f64, rng: &mut impl RandomSource) -> Option<PlacedInstance<T>> {
        let column = self.sample_column(x, z);
        let site = PlacementSite {
            position: DVec3::new(x, column.height, z),
            elevation: column.elevation,
            moisture: column.moisture,
        };
        place(self.catalog.get(column.biome), &site, rng)
    }

    /// Independent placement stream for chunk `(chunk_x, chunk_z)`.
    pub fn chunk_rng(&self, chunk_x: i64, chunk_z: i64) -> WorldRng {
        chunk_rng(self.seed, chunk_x, chunk_z)
    }

    /// Attempt one placement at the center of every cell in a chunk.
    ///
    /// Cells are visited row by row (z outer, x inner) with the chunk's own
    /// stream, so the result depends only on the seed and chunk coordinate.
    pub fn scatter_chunk(
        &self,
        chunk_x: i64,
        chunk_z: i64,
        layout: &ChunkLayout,
    ) -> Vec<PlacedInstance<T>> {
        let mut rng = self.chunk_rng(chunk_x, chunk_z);
        let (cols, rows) = layout.cells();
        let origin_x = chunk_x as f64 * layout.width;
        let origin_z = chunk_z as f64 * layout.depth;

        let mut placed = Vec::new();
        for row in 0..rows {
            let z = origin_z + (row as f64 + 0.5) * layout.cell_size;
            for col in 0..cols {
                let x = origin_x + (col as f64 + 0.5) * layout.cell_size;
                if let Some(instance) = self.pick(x, z, &mut rng) {
                    placed.push(instance);
                }
            }
        }

        tracing::debug!(
            chunk_x,
            chunk_z,
            cells = cols * rows,
            placed = placed.len(),
            "scattered chunk"
        );
        placed
    }
}
