//! Biome system: definitions, catalog, classification table, and gradients.
//!
//! Biomes are loaded once into an immutable [`BiomeCatalog`] and looked up from
//! elevation/moisture samples through a [`BiomeClassifier`].

mod catalog;
mod classifier;
mod def;
mod gradient;
mod manifest;
mod template;

pub use catalog::{BiomeCatalog, BiomeCatalogBuilder, BiomeId, CatalogError};
pub use classifier::{BiomeClassifier, ClassificationRule, ClassificationTable, RuleSpec};
pub use def::{BiomeDef, ColorStop, Rgb, ScaleRange, ValueRange, WeightedOrganism};
pub use gradient::HeightMapping;
pub use manifest::{BUILTIN_MANIFEST, BiomeEntry, BiomeManifest, OrganismEntry};
pub use template::{Template, TemplateRegistry};
