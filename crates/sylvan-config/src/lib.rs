//! Configuration for the sylvan world generator.
//!
//! Settings persist to disk as `config.ron`. Missing fields fall back to their
//! defaults, unknown fields are ignored, and CLI flags override loaded values.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE, CatalogConfig, Config, DebugConfig, FieldConfig, NoiseConfig, WorldConfig,
};
pub use error::ConfigError;
