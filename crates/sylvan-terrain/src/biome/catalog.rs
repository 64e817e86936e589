//! Biome catalog: immutable mapping from [`BiomeId`] to [`BiomeDef`] with
//! name-based lookup.
//!
//! Catalogs are assembled through [`BiomeCatalogBuilder`], which validates every
//! definition as it is registered, or loaded from a RON [`BiomeManifest`].

use std::path::Path;

use hashbrown::HashMap;

use super::manifest::{BiomeEntry, BiomeManifest};
use super::template::TemplateRegistry;
use super::{BiomeDef, WeightedOrganism};

/// Unique identifier for a biome within one catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BiomeId(pub u16);

/// Errors detected while building a catalog or resolving a classification table.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// I/O error reading the manifest file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// RON deserialization error.
    #[error("ron parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// A biome with this name is already registered.
    #[error("duplicate biome name: {0}")]
    DuplicateName(String),

    /// The biome has no color stops.
    #[error("biome `{0}` has no color stops")]
    EmptyColorStops(String),

    /// Color stops are not in ascending order.
    #[error("biome `{biome}`: color stop {index} ({stop}) is below the previous stop")]
    UnsortedColorStops {
        /// Biome name.
        biome: String,
        /// Index of the first out-of-order stop.
        index: usize,
        /// Its value.
        stop: f64,
    },

    /// A color stop lies outside `[0, 1]`.
    #[error("biome `{biome}`: color stop {stop} is outside [0, 1]")]
    StopOutOfRange {
        /// Biome name.
        biome: String,
        /// Offending value.
        stop: f64,
    },

    /// An organism names a template the registry does not contain.
    #[error("biome `{biome}` references unknown template `{template}`")]
    UnknownTemplate {
        /// Biome name.
        biome: String,
        /// Missing template name.
        template: String,
    },

    /// An organism weight is negative or not finite.
    #[error("biome `{biome}`: organism `{organism}` has invalid weight {weight}")]
    InvalidWeight {
        /// Biome name.
        biome: String,
        /// Organism name.
        organism: String,
        /// Offending weight.
        weight: f64,
    },

    /// An organism scarcity lies outside `[0, 1]`.
    #[error("biome `{biome}`: organism `{organism}` has scarcity {scarcity} outside [0, 1]")]
    InvalidScarcity {
        /// Biome name.
        biome: String,
        /// Organism name.
        organism: String,
        /// Offending scarcity.
        scarcity: f64,
    },

    /// An organism scale range is inverted, negative, or not finite.
    #[error("biome `{biome}`: organism `{organism}` has invalid scale range [{min}, {max}]")]
    InvalidScaleRange {
        /// Biome name.
        biome: String,
        /// Organism name.
        organism: String,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// An organism elevation or moisture range is inverted.
    #[error("biome `{biome}`: organism `{organism}` has inverted range [{low}, {high}]")]
    InvalidRange {
        /// Biome name.
        biome: String,
        /// Organism name.
        organism: String,
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },

    /// A classification rule names a biome missing from the catalog.
    #[error("classification references unknown biome `{0}`")]
    UnknownBiome(String),

    /// Classification rules are not ordered lowest band first, then highest
    /// moisture cutoff first within a band.
    #[error("classification rule {index} is out of order: {reason}")]
    MisorderedRule {
        /// Index of the offending rule.
        index: usize,
        /// Which ordering constraint it breaks.
        reason: &'static str,
    },

    /// The catalog would contain no biomes.
    #[error("catalog contains no biomes")]
    EmptyCatalog,

    /// Registering `name` would exceed the number of representable biome ids.
    #[error("cannot register biome `{name}`: catalog is limited to {limit} biomes")]
    TooManyBiomes {
        /// Rejected biome name.
        name: String,
        /// Maximum catalog size.
        limit: usize,
    },
}

/// Immutable set of biome definitions with O(1) lookup by ID.
///
/// Share it between workers behind an `Arc`; nothing can mutate it once built.
#[derive(Debug)]
pub struct BiomeCatalog<T> {
    biomes: Vec<BiomeDef<T>>,
    name_to_id: HashMap<String, BiomeId>,
}

impl<T> BiomeCatalog<T> {
    /// Returns the definition for the given biome ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this catalog.
    pub fn get(&self, id: BiomeId) -> &BiomeDef<T> {
        &self.biomes[id.0 as usize]
    }

    /// Looks up a biome ID by name.
    pub fn lookup_by_name(&self, name: &str) -> Option<BiomeId> {
        self.name_to_id.get(name).copied()
    }

    /// Looks up a biome definition by name.
    pub fn by_name(&self, name: &str) -> Option<&BiomeDef<T>> {
        self.lookup_by_name(name).map(|id| self.get(id))
    }

    /// Iterates biomes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (BiomeId, &BiomeDef<T>)> {
        self.biomes
            .iter()
            .enumerate()
            .map(|(i, def)| (BiomeId(i as u16), def))
    }

    /// Returns the number of biomes.
    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    /// Returns `true` if the catalog is empty. Built catalogs never are.
    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }
}

impl<T> BiomeCatalog<T> {
    /// Build a catalog from a parsed manifest, resolving organism templates
    /// against `templates`.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] encountered; no partial catalog is produced.
    pub fn from_manifest(
        manifest: &BiomeManifest,
        templates: &TemplateRegistry<T>,
    ) -> Result<Self, CatalogError> {
        let mut builder = BiomeCatalogBuilder::new();
        for entry in &manifest.biomes {
            builder.register(resolve_entry(entry, templates)?)?;
        }
        builder.build()
    }

    /// Parse a RON manifest string and build a catalog from it.
    pub fn from_ron_str(
        contents: &str,
        templates: &TemplateRegistry<T>,
    ) -> Result<Self, CatalogError> {
        let manifest = BiomeManifest::from_ron_str(contents)?;
        Self::from_manifest(&manifest, templates)
    }

    /// Load a RON manifest from disk and build a catalog from it.
    pub fn from_ron(path: &Path, templates: &TemplateRegistry<T>) -> Result<Self, CatalogError> {
        let manifest = BiomeManifest::from_ron(path)?;
        Self::from_manifest(&manifest, templates)
    }
}

fn resolve_entry<T>(
    entry: &BiomeEntry,
    templates: &TemplateRegistry<T>,
) -> Result<BiomeDef<T>, CatalogError> {
    let organisms = entry
        .organisms
        .iter()
        .map(|o| {
            let template =
                templates
                    .get(&o.template)
                    .ok_or_else(|| CatalogError::UnknownTemplate {
                        biome: entry.name.clone(),
                        template: o.template.clone(),
                    })?;
            Ok(WeightedOrganism {
                name: o.template.clone(),
                weight: o.weight,
                template,
                elevation: o.elevation,
                moisture: o.moisture,
                scarcity: o.scarcity,
                scale: o.scale,
            })
        })
        .collect::<Result<Vec<_>, CatalogError>>()?;

    Ok(BiomeDef {
        name: entry.name.clone(),
        color_stops: entry.color_stops.clone(),
        organisms,
    })
}

/// Collects and validates biome definitions before freezing them into a
/// [`BiomeCatalog`].
pub struct BiomeCatalogBuilder<T> {
    biomes: Vec<BiomeDef<T>>,
    name_to_id: HashMap<String, BiomeId>,
}

impl<T> BiomeCatalogBuilder<T> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            biomes: Vec::new(),
            name_to_id: HashMap::new(),
        }
    }

    /// Validates and registers a biome definition, returning its assigned [`BiomeId`].
    ///
    /// # Errors
    ///
    /// Rejects duplicate names, empty or unsorted color stops, and malformed
    /// organism entries.
    pub fn register(&mut self, def: BiomeDef<T>) -> Result<BiomeId, CatalogError> {
        if self.name_to_id.contains_key(&def.name) {
            return Err(CatalogError::DuplicateName(def.name.clone()));
        }
        if let Err(err) = validate(&def) {
            tracing::warn!(biome = %def.name, "rejected biome definition: {err}");
            return Err(err);
        }
        let id = u16::try_from(self.biomes.len())
            .map(BiomeId)
            .map_err(|_| CatalogError::TooManyBiomes {
                name: def.name.clone(),
                limit: usize::from(u16::MAX) + 1,
            })?;
        self.name_to_id.insert(def.name.clone(), id);
        self.biomes.push(def);
        Ok(id)
    }

    /// Freeze the registered biomes into an immutable catalog.
    pub fn build(self) -> Result<BiomeCatalog<T>, CatalogError> {
        if self.biomes.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        let organisms: usize = self.biomes.iter().map(|b| b.organisms.len()).sum();
        tracing::info!(
            biomes = self.biomes.len(),
            organisms,
            "biome catalog loaded"
        );
        Ok(BiomeCatalog {
            biomes: self.biomes,
            name_to_id: self.name_to_id,
        })
    }
}

impl<T> Default for BiomeCatalogBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn validate<T>(def: &BiomeDef<T>) -> Result<(), CatalogError> {
    let biome = || def.name.clone();

    if def.color_stops.is_empty() {
        return Err(CatalogError::EmptyColorStops(biome()));
    }
    for (index, stop) in def.color_stops.iter().enumerate() {
        if !(0.0..=1.0).contains(&stop.stop) {
            return Err(CatalogError::StopOutOfRange {
                biome: biome(),
                stop: stop.stop,
            });
        }
        if index > 0 && stop.stop < def.color_stops[index - 1].stop {
            return Err(CatalogError::UnsortedColorStops {
                biome: biome(),
                index,
                stop: stop.stop,
            });
        }
    }

    for o in &def.organisms {
        let organism = || o.name.clone();
        if !(o.weight.is_finite() && o.weight >= 0.0) {
            return Err(CatalogError::InvalidWeight {
                biome: biome(),
                organism: organism(),
                weight: o.weight,
            });
        }
        if !(0.0..=1.0).contains(&o.scarcity) {
            return Err(CatalogError::InvalidScarcity {
                biome: biome(),
                organism: organism(),
                scarcity: o.scarcity,
            });
        }
        let scale = o.scale;
        if !(scale.min.is_finite() && scale.max.is_finite() && scale.min > 0.0)
            || scale.min > scale.max
        {
            return Err(CatalogError::InvalidScaleRange {
                biome: biome(),
                organism: organism(),
                min: scale.min,
                max: scale.max,
            });
        }
        for range in [o.elevation, o.moisture].into_iter().flatten() {
            if !(range.low <= range.high) {
                return Err(CatalogError::InvalidRange {
                    biome: biome(),
                    organism: organism(),
                    low: range.low,
                    high: range.high,
                });
            }
        }
    }
    Ok(())
}
