//! Errors surfaced by the command-line front end.

use std::path::PathBuf;

use sylvan_config::ConfigError;
use sylvan_terrain::{CatalogError, GeneratorError};

/// Anything that can abort a CLI command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Loading or creating `config.ron` failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The configured biome manifest could not be loaded.
    #[error("failed to load manifest {path}: {source}")]
    Manifest {
        /// Manifest path from config or CLI.
        path: PathBuf,
        /// Underlying read or parse error.
        #[source]
        source: CatalogError,
    },

    /// The bundled manifest did not parse.
    #[error("bundled manifest is invalid: {0}")]
    BuiltinManifest(#[source] CatalogError),

    /// The generator rejected the configured parameters or catalog.
    #[error("failed to build world generator: {0}")]
    Generator(#[from] GeneratorError),

    /// Writing a debug image failed.
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}
