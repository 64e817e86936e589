//! Elevation/moisture decision table.
//!
//! Rules are cascading cutoffs, not disjoint regions: they are evaluated top to
//! bottom and the first match wins. Bands must therefore be listed from lowest
//! to highest elevation, and within a band from highest to lowest moisture
//! cutoff.

use serde::{Deserialize, Serialize};

use super::{BiomeCatalog, BiomeId, CatalogError};

/// A rule as written in a manifest, naming its biome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Matches when `elevation < elevation_below`. Identifies the band.
    pub elevation_below: f64,
    /// Additionally requires `elevation > elevation_above`.
    #[serde(default)]
    pub elevation_above: Option<f64>,
    /// Additionally requires `moisture > moisture_above`.
    #[serde(default)]
    pub moisture_above: Option<f64>,
    /// Biome name.
    pub biome: String,
}

/// Ordered rule list plus the biome used when no rule matches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationTable {
    /// Rules in evaluation order.
    pub rules: Vec<RuleSpec>,
    /// Biome for elevations above every band.
    pub terminal: String,
}

fn rule(below: f64, moisture_above: Option<f64>, biome: &str) -> RuleSpec {
    RuleSpec {
        elevation_below: below,
        elevation_above: None,
        moisture_above,
        biome: biome.to_string(),
    }
}

impl ClassificationTable {
    /// The canonical cascade for the bundled biome set.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                rule(0.0024, None, "ocean"),
                RuleSpec {
                    elevation_below: 0.028,
                    elevation_above: Some(0.00575),
                    moisture_above: Some(0.65),
                    biome: "swamp".to_string(),
                },
                rule(0.028, None, "beach"),
                rule(0.05, Some(0.65), "rainforest"),
                rule(0.05, Some(0.28), "grassland"),
                rule(0.05, None, "desert"),
                rule(0.10, Some(0.75), "rainforest"),
                rule(0.10, Some(0.38), "forest"),
                rule(0.10, Some(0.28), "grassland"),
                rule(0.10, None, "desert"),
                rule(0.25, Some(0.5), "mountain"),
                rule(0.25, Some(0.28), "taiga"),
                rule(0.25, None, "desert"),
                rule(0.4, Some(0.65), "snow"),
                rule(0.4, Some(0.35), "tundra"),
                rule(0.4, None, "mountain"),
            ],
            terminal: "snow".to_string(),
        }
    }
}

/// A resolved rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassificationRule {
    /// Exclusive upper elevation bound.
    pub elevation_below: f64,
    /// Optional exclusive lower elevation bound.
    pub elevation_above: Option<f64>,
    /// Optional exclusive lower moisture bound.
    pub moisture_above: Option<f64>,
    /// Result when the rule matches.
    pub biome: BiomeId,
}

impl ClassificationRule {
    /// Returns `true` if `(elevation, moisture)` satisfies every predicate.
    pub fn matches(&self, elevation: f64, moisture: f64) -> bool {
        elevation < self.elevation_below
            && self.elevation_above.is_none_or(|lo| elevation > lo)
            && self.moisture_above.is_none_or(|lo| moisture > lo)
    }
}

/// Total classifier over `(elevation, moisture)`.
#[derive(Clone, Debug)]
pub struct BiomeClassifier {
    rules: Vec<ClassificationRule>,
    terminal: BiomeId,
}

impl BiomeClassifier {
    /// Resolve biome names against `catalog` and check rule ordering.
    ///
    /// # Errors
    ///
    /// [`CatalogError::UnknownBiome`] if a name is missing from the catalog,
    /// [`CatalogError::MisorderedRule`] if bands descend or moisture cutoffs
    /// ascend within a band.
    pub fn resolve<T>(
        table: &ClassificationTable,
        catalog: &BiomeCatalog<T>,
    ) -> Result<Self, CatalogError> {
        let lookup = |name: &str| {
            catalog
                .lookup_by_name(name)
                .ok_or_else(|| CatalogError::UnknownBiome(name.to_string()))
        };

        let mut rules = Vec::with_capacity(table.rules.len());
        for (index, spec) in table.rules.iter().enumerate() {
            if let Some(prev) = table.rules[..index].last() {
                if spec.elevation_below < prev.elevation_below {
                    return Err(CatalogError::MisorderedRule {
                        index,
                        reason: "elevation band below the previous band",
                    });
                }
                let same_band = spec.elevation_below == prev.elevation_below;
                let cutoff = spec.moisture_above.unwrap_or(f64::NEG_INFINITY);
                let prev_cutoff = prev.moisture_above.unwrap_or(f64::NEG_INFINITY);
                if same_band && cutoff > prev_cutoff {
                    return Err(CatalogError::MisorderedRule {
                        index,
                        reason: "moisture cutoff above the previous cutoff in its band",
                    });
                }
            }
            rules.push(ClassificationRule {
                elevation_below: spec.elevation_below,
                elevation_above: spec.elevation_above,
                moisture_above: spec.moisture_above,
                biome: lookup(&spec.biome)?,
            });
        }

        Ok(Self {
            rules,
            terminal: lookup(&table.terminal)?,
        })
    }

    /// Classify a climate sample. Never fails: points above every band get the
    /// terminal biome.
    pub fn classify(&self, elevation: f64, moisture: f64) -> BiomeId {
        self.rules
            .iter()
            .find(|r| r.matches(elevation, moisture))
            .map_or(self.terminal, |r| r.biome)
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// Biome returned when no rule matches.
    pub fn terminal(&self) -> BiomeId {
        self.terminal
    }
}
