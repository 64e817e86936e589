//! Builds a [`WorldGenerator`] from the loaded configuration.

use sylvan_config::{Config, FieldConfig};
use sylvan_terrain::{
    BiomeManifest, ChunkLayout, ClimateParams, FieldParams, HeightMapping, Template,
    TemplateRegistry, WorldGenerator,
};

use crate::error::CliError;

/// Stand-in for a renderable asset: records the transform applied to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Prop {
    /// Template name from the manifest.
    pub name: String,
    /// Accumulated yaw in radians.
    pub yaw: f64,
    /// Accumulated uniform scale.
    pub scale: f64,
}

impl Prop {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            yaw: 0.0,
            scale: 1.0,
        }
    }
}

impl Template for Prop {
    fn rotate_y(&mut self, radians: f64) {
        self.yaw += radians;
    }

    fn scale_uniform(&mut self, factor: f64) {
        self.scale *= factor;
    }
}

fn field_params(field: &FieldConfig, chunk_width: f64, chunk_depth: f64) -> FieldParams {
    FieldParams {
        octaves: field.octaves.clone(),
        scale_x: chunk_width * field.scale_chunks,
        scale_z: chunk_depth * field.scale_chunks,
        exponent: field.exponent,
        rounding: field.rounding,
    }
}

/// Noise parameters for both climate fields.
pub fn climate_params(config: &Config) -> ClimateParams {
    let (width, depth) = (config.world.chunk_width, config.world.chunk_depth);
    ClimateParams {
        elevation: field_params(&config.noise.elevation, width, depth),
        moisture: field_params(&config.noise.moisture, width, depth),
    }
}

/// Vertical extent of the world.
pub fn height_mapping(config: &Config) -> HeightMapping {
    HeightMapping {
        min_height: config.world.min_height,
        max_height: config.world.max_height,
        water_level: config.world.water_level,
    }
}

/// Placement grid for one chunk.
pub fn chunk_layout(config: &Config) -> ChunkLayout {
    ChunkLayout {
        width: config.world.chunk_width,
        depth: config.world.chunk_depth,
        cell_size: config.world.cell_size,
    }
}

/// The configured manifest, or the bundled one.
pub fn load_manifest(config: &Config) -> Result<BiomeManifest, CliError> {
    match &config.catalog.manifest {
        Some(path) => {
            let manifest =
                BiomeManifest::from_ron(path).map_err(|source| CliError::Manifest {
                    path: path.clone(),
                    source,
                })?;
            tracing::info!(
                path = %path.display(),
                biomes = manifest.biomes.len(),
                "loaded manifest"
            );
            Ok(manifest)
        }
        None => BiomeManifest::builtin().map_err(|e| CliError::BuiltinManifest(e.into())),
    }
}

/// One [`Prop`] per template name the manifest references.
pub fn prop_registry(manifest: &BiomeManifest) -> TemplateRegistry<Prop> {
    manifest
        .template_names()
        .into_iter()
        .map(|name| (name.to_string(), Prop::new(name)))
        .collect()
}

/// Build the generator described by `config`.
pub fn build_generator(config: &Config) -> Result<WorldGenerator<Prop>, CliError> {
    let manifest = load_manifest(config)?;
    let templates = prop_registry(&manifest);
    let generator = WorldGenerator::from_manifest(
        config.world.seed,
        climate_params(config),
        height_mapping(config),
        &manifest,
        &templates,
    )?;
    Ok(generator)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_default_config_matches_terrain_defaults() {
        let config = Config::default();
        assert_eq!(climate_params(&config), ClimateParams::default());
        assert_eq!(height_mapping(&config), HeightMapping::default());
    }

    #[test]
    fn test_chunk_footprint_scales_fields() {
        let mut config = Config::default();
        config.world.chunk_width = 16.0;
        config.world.chunk_depth = 32.0;
        let params = climate_params(&config);
        assert_eq!(params.elevation.scale_x, 16.0 * 48.0);
        assert_eq!(params.elevation.scale_z, 32.0 * 48.0);
        assert_eq!(params.moisture.scale_x, 16.0 * 192.0);
        assert_eq!(params.moisture.scale_z, 32.0 * 192.0);
    }

    #[test]
    fn test_chunk_depth_changes_climate() {
        let base = build_generator(&Config::default()).unwrap();
        let mut config = Config::default();
        config.world.chunk_depth = 16.0;
        let deep = build_generator(&config).unwrap();
        let differing = (0..500)
            .filter(|i| {
                let z = *i as f64 * 131.0 + 7.0;
                base.compute_moisture(250.0, z) != deep.compute_moisture(250.0, z)
            })
            .count();
        assert!(differing > 0, "chunk_depth must stretch the fields along z");
    }

    #[test]
    fn test_build_default_generator() {
        let generator = build_generator(&Config::default()).unwrap();
        assert_eq!(generator.catalog().len(), 11);
        assert_eq!(generator.seed(), 0);
    }

    #[test]
    fn test_seed_from_config() {
        let mut config = Config::default();
        config.world.seed = 31337;
        assert_eq!(build_generator(&config).unwrap().seed(), 31337);
    }

    #[test]
    fn test_missing_manifest_reports_path() {
        let mut config = Config::default();
        config.catalog.manifest = Some(PathBuf::from("/nonexistent/biomes.ron"));
        let err = build_generator(&config).err().unwrap();
        assert!(matches!(err, CliError::Manifest { .. }));
        assert!(err.to_string().contains("/nonexistent/biomes.ron"));
    }

    #[test]
    fn test_invalid_noise_rejected() {
        let mut config = Config::default();
        config.noise.moisture.octaves.clear();
        assert!(matches!(
            build_generator(&config),
            Err(CliError::Generator(_))
        ));
    }

    #[test]
    fn test_custom_manifest_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.ron");
        std::fs::write(
            &path,
            r#"(
                biomes: [
                    (name: "plain", color_stops: [(stop: 0.0, color: 0x00FF00)],
                     organisms: [(template: "shrub", weight: 1.0)]),
                ],
                classification: Some((rules: [], terminal: "plain")),
            )"#,
        )
        .unwrap();
        let mut config = Config::default();
        config.catalog.manifest = Some(path);
        let generator = build_generator(&config).unwrap();
        assert_eq!(generator.biome_at(10.0, 10.0).name, "plain");
        let placed = generator.scatter_chunk(0, 0, &chunk_layout(&config));
        assert_eq!(placed.len(), 16 * 16);
        assert!(placed.iter().all(|p| p.instance.name == "shrub"));
    }
}
