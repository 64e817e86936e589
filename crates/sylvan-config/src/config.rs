//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE: &str = "config.ron";

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// World extent and seed.
    pub world: WorldConfig,
    /// Climate noise parameters.
    pub noise: NoiseConfig,
    /// Biome manifest selection.
    pub catalog: CatalogConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// World seed, chunk size, and vertical extent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// World seed shared by every client.
    pub seed: u64,
    /// Chunk width along x, in world units.
    pub chunk_width: f64,
    /// Chunk depth along z, in world units.
    pub chunk_depth: f64,
    /// Height at elevation 0.
    pub min_height: f64,
    /// Height at elevation 1.
    pub max_height: f64,
    /// Water surface height.
    pub water_level: f64,
    /// Cloud layer height.
    pub cloud_level: f64,
    /// Spacing of organism placement cells.
    pub cell_size: f64,
}

/// Parameters for one fractal noise field.
///
/// Fields are all required: elevation and moisture have different defaults, so
/// a field section is either given in full or omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldConfig {
    /// Octave weights, first octave at base frequency.
    pub octaves: Vec<f64>,
    /// Spatial scale in chunks: x is stretched by the chunk width and z by the
    /// chunk depth.
    pub scale_chunks: f64,
    /// Exponent applied after normalization.
    pub exponent: f64,
    /// Outputs are rounded to multiples of `1 / rounding`.
    pub rounding: f64,
}

/// Elevation and moisture noise parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoiseConfig {
    /// Elevation field.
    pub elevation: FieldConfig,
    /// Moisture field.
    pub moisture: FieldConfig,
}

/// Biome manifest selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Manifest to load instead of the bundled biome set.
    pub manifest: Option<PathBuf>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory for JSON log files in debug builds.
    pub log_dir: Option<PathBuf>,
}

// --- Default implementations ---

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            chunk_width: 64.0,
            chunk_depth: 64.0,
            min_height: 0.0,
            max_height: 25_000.0,
            water_level: 60.0,
            cloud_level: 2_000.0,
            cell_size: 4.0,
        }
    }
}

impl FieldConfig {
    /// Default elevation field: six octaves, strongly biased toward lowlands.
    pub fn elevation() -> Self {
        Self {
            octaves: vec![0.95, 0.35, 0.25, 0.125, 0.0625, 0.0005],
            scale_chunks: 48.0,
            exponent: 5.0,
            rounding: 180.0,
        }
    }

    /// Default moisture field: four octaves, broad and linear.
    pub fn moisture() -> Self {
        Self {
            octaves: vec![0.59, 0.21, 0.32, 0.13],
            scale_chunks: 192.0,
            exponent: 1.0,
            rounding: 180.0,
        }
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            elevation: FieldConfig::elevation(),
            moisture: FieldConfig::moisture(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Platform config directory for sylvan, e.g. `~/.config/sylvan`.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|d| d.join("sylvan"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    ///
    /// A changed world seed or noise section means previously generated chunks
    /// no longer match; callers must regenerate.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            if new_config.world.seed != self.world.seed || new_config.noise != self.noise {
                log::warn!("Config reloaded with a new seed or noise parameters");
            } else {
                log::info!("Config reloaded with changes");
            }
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("chunk_width: 64.0"));
        assert!(ron_str.contains("water_level: 60.0"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.catalog.manifest = Some(PathBuf::from("biomes/custom.ron"));
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: Config = ron::from_str("(world: (seed: 99))").unwrap();
        assert_eq!(config.world.seed, 99);
        assert_eq!(config.world.max_height, 25_000.0);
        assert_eq!(config.noise, NoiseConfig::default());
    }

    #[test]
    fn test_field_section_replaced_whole() {
        let ron_str = "(noise: (moisture: \
            (octaves: [1.0], scale_chunks: 10.0, exponent: 2.0, rounding: 90.0)))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.noise.moisture.octaves, vec![1.0]);
        assert_eq!(config.noise.moisture.exponent, 2.0);
        assert_eq!(config.noise.elevation, FieldConfig::elevation());
    }

    #[test]
    fn test_partial_field_section_rejected() {
        let result: Result<Config, _> = ron::from_str("(noise: (moisture: (exponent: 2.0)))");
        assert!(result.is_err());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.world.seed = 12345;
        config.noise.elevation.exponent = 3.0;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("sylvan");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.world.seed = 7;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().world.seed, 7);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// world settings\n(\n  // nothing overridden\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}
