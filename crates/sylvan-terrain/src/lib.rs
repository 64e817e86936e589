//! Procedural world content: climate noise, biome classification, stepped
//! color gradients, and seeded organism placement.

mod climate;
mod generator;
mod placement;
mod rng;
mod seed;

pub mod biome;
pub mod debug_viz;

pub use biome::{
    BUILTIN_MANIFEST, BiomeCatalog, BiomeCatalogBuilder, BiomeClassifier, BiomeDef, BiomeEntry,
    BiomeId, BiomeManifest, CatalogError, ClassificationRule, ClassificationTable, ColorStop,
    HeightMapping, OrganismEntry, Rgb, RuleSpec, ScaleRange, Template, TemplateRegistry,
    ValueRange, WeightedOrganism,
};
pub use climate::{
    ClimateParams, ClimateSampler, DEFAULT_CHUNK_DEPTH, DEFAULT_CHUNK_WIDTH, FieldKind,
    FieldParams, FieldParamsError, NoiseField, noise_seed,
};
pub use generator::{ChunkLayout, ColumnSample, GeneratorError, WorldGenerator};
pub use placement::{PlacedInstance, PlacementSite, place, select_organism};
pub use rng::{RandomSource, WorldRng};
pub use seed::{chunk_rng, derive_chunk_seed, hash_region};
