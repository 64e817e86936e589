//! Command-line overrides for configuration values.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// Flags shared by every sylvan command.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    /// World seed.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Chunk width and depth in world units.
    #[arg(long, global = true)]
    pub chunk_size: Option<f64>,

    /// Biome manifest to load instead of the bundled set.
    #[arg(long, global = true)]
    pub manifest: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if let Some(size) = args.chunk_size {
            self.world.chunk_width = size;
            self.world.chunk_depth = size;
        }
        if let Some(ref manifest) = args.manifest {
            self.catalog.manifest = Some(manifest.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
