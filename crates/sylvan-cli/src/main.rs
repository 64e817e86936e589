//! `sylvan`: inspect a generated world from the command line.
//!
//! Run with: `cargo run -p sylvan-cli -- sample --x 1200 --z -340`

mod error;
mod world;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use sylvan_config::{CliArgs, Config};
use sylvan_terrain::debug_viz::{Region, render_biome_map, render_elevation_map};
use tracing::info;

use crate::error::CliError;
use crate::world::{Prop, build_generator, chunk_layout};

#[derive(Parser, Debug)]
#[command(name = "sylvan", about = "Procedural world content generator")]
struct Cli {
    #[command(flatten)]
    overrides: CliArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print climate, height, biome, and surface color at one point.
    Sample {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        z: f64,
    },
    /// Scatter organisms over one chunk and list them.
    Scatter {
        #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
        chunk_x: i64,
        #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
        chunk_z: i64,
        /// Print only per-organism counts.
        #[arg(long)]
        summary: bool,
    },
    /// Render a top-down map to a PNG file.
    Render {
        #[arg(long, value_enum, default_value_t = MapKind::Biome)]
        kind: MapKind,
        /// Output file.
        #[arg(long, default_value = "map.png")]
        out: PathBuf,
        /// Image width and height in pixels.
        #[arg(long, default_value_t = 512)]
        size: u32,
        /// World units covered by the image side.
        #[arg(long, default_value_t = 65_536.0)]
        extent: f64,
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        center_x: f64,
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        center_z: f64,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MapKind {
    Biome,
    Elevation,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(overrides: &CliArgs) -> Result<Config, CliError> {
    let config_dir = match &overrides.config {
        Some(dir) => dir.clone(),
        None => Config::default_dir()?,
    };
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(overrides);
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli.overrides)?;
    sylvan_log::init_logging(
        config.debug.log_dir.as_deref(),
        cfg!(debug_assertions),
        Some(&config),
    );
    info!(seed = config.world.seed, "sylvan starting");

    let generator = build_generator(&config)?;

    match cli.command {
        Command::Sample { x, z } => {
            let column = generator.sample_column(x, z);
            let biome = generator.catalog().get(column.biome);
            println!("position    ({x}, {z})");
            println!("elevation   {:.6}", column.elevation);
            println!("moisture    {:.6}", column.moisture);
            println!("height      {:.1}", column.height);
            println!("surface     {:.1}", generator.compute_height_with_water(x, z));
            println!("biome       {}", biome.name);
            println!("color       #{:06X}", generator.surface_color_at(x, z).to_hex());
            if column.height > config.world.cloud_level {
                println!("above the cloud layer");
            }
        }
        Command::Scatter {
            chunk_x,
            chunk_z,
            summary,
        } => {
            let placed = generator.scatter_chunk(chunk_x, chunk_z, &chunk_layout(&config));
            if summary {
                let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
                for p in &placed {
                    *counts.entry(p.organism.as_str()).or_default() += 1;
                }
                for (name, count) in counts {
                    println!("{name:<16} {count}");
                }
            } else {
                for p in &placed {
                    let Prop { name, yaw, scale } = &p.instance;
                    println!(
                        "{name:<16} ({:.1}, {:.1}, {:.1}) yaw {:.1}deg scale {scale:.2}",
                        p.position.x,
                        p.position.y,
                        p.position.z,
                        yaw.to_degrees(),
                    );
                }
            }
            info!(chunk_x, chunk_z, count = placed.len(), "chunk scattered");
        }
        Command::Render {
            kind,
            out,
            size,
            extent,
            center_x,
            center_z,
        } => {
            let region = Region::centered(center_x, center_z, extent);
            let image = match kind {
                MapKind::Biome => render_biome_map(&generator, size, size, region),
                MapKind::Elevation => render_elevation_map(&generator, size, size, region),
            };
            image.save_png(&out)?;
            info!(
                path = %out.display(),
                colors = image.unique_color_count(),
                "map written"
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample_with_negative_coordinates() {
        let cli = Cli::try_parse_from(["sylvan", "sample", "--x", "-12.5", "--z", "40"]).unwrap();
        assert!(matches!(cli.command, Command::Sample { x, z } if x == -12.5 && z == 40.0));
    }

    #[test]
    fn test_global_overrides_after_subcommand() {
        let cli =
            Cli::try_parse_from(["sylvan", "scatter", "--chunk-x", "-3", "--seed", "9"]).unwrap();
        assert_eq!(cli.overrides.seed, Some(9));
        assert!(matches!(
            cli.command,
            Command::Scatter { chunk_x: -3, chunk_z: 0, summary: false }
        ));
    }

    #[test]
    fn test_render_defaults() {
        let cli = Cli::try_parse_from(["sylvan", "render", "--kind", "elevation"]).unwrap();
        match cli.command {
            Command::Render { kind, size, out, .. } => {
                assert!(matches!(kind, MapKind::Elevation));
                assert_eq!(size, 512);
                assert_eq!(out, PathBuf::from("map.png"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_load_config_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = CliArgs {
            seed: Some(5),
            config: Some(dir.path().to_path_buf()),
            ..CliArgs::default()
        };
        let config = load_config(&overrides).unwrap();
        assert_eq!(config.world.seed, 5);
        assert!(dir.path().join(sylvan_config::CONFIG_FILE).exists());
    }
}
