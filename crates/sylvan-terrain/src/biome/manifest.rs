//! RON manifest describing biomes, their gradients, and organism tables.
//!
//! Organisms refer to templates by name; the names are resolved against a
//! [`TemplateRegistry`](super::TemplateRegistry) when the catalog is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::catalog::CatalogError;
use super::classifier::ClassificationTable;
use super::{ColorStop, ScaleRange, ValueRange};

/// Bundled default manifest.
pub const BUILTIN_MANIFEST: &str = include_str!("../../assets/biomes.ron");

/// Top-level RON manifest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomeManifest {
    /// Biome entries, registered in order.
    pub biomes: Vec<BiomeEntry>,
    /// Classification cascade. `None` selects [`ClassificationTable::standard`].
    #[serde(default)]
    pub classification: Option<ClassificationTable>,
}

/// A single biome entry in the manifest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomeEntry {
    /// Unique biome name.
    pub name: String,
    /// Stepped gradient, ascending.
    pub color_stops: Vec<ColorStop>,
    /// Organism table in cumulative selection order.
    #[serde(default)]
    pub organisms: Vec<OrganismEntry>,
}

/// A single organism entry in the manifest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrganismEntry {
    /// Template name in the registry.
    pub template: String,
    /// Cumulative selection weight.
    pub weight: f64,
    /// Optional elevation bounds.
    #[serde(default)]
    pub elevation: Option<ValueRange>,
    /// Optional moisture bounds.
    #[serde(default)]
    pub moisture: Option<ValueRange>,
    /// Rejection probability after selection.
    #[serde(default)]
    pub scarcity: f64,
    /// Scale bounds. Defaults to `1.0..=1.0`.
    #[serde(default)]
    pub scale: ScaleRange,
}

impl BiomeManifest {
    /// Parse a manifest from a RON string.
    pub fn from_ron_str(contents: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(contents)
    }

    /// Read and parse a manifest file.
    pub fn from_ron(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_ron_str(&contents)?)
    }

    /// The bundled manifest shipped with the crate.
    pub fn builtin() -> Result<Self, ron::error::SpannedError> {
        Self::from_ron_str(BUILTIN_MANIFEST)
    }

    /// The classification table to use with this manifest.
    pub fn classification_table(&self) -> ClassificationTable {
        self.classification
            .clone()
            .unwrap_or_else(ClassificationTable::standard)
    }

    /// Every template name referenced by any organism, deduplicated and sorted.
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .biomes
            .iter()
            .flat_map(|b| b.organisms.iter().map(|o| o.template.as_str()))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
