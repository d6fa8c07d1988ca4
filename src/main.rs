//! Geogen command line.
//!
//! ```text
//! geogen wing.json                 # writes grid.geo
//! geogen wing.json -o out/wing.geo
//! ```
//!
//! Airfoil files are looked up in `airfoil_dir`, relative to the config
//! file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use geogen::{io, GeoModel};

/// Parametric half-wing geometry generator for Gmsh
#[derive(Parser)]
#[command(name = "geogen")]
#[command(about = "Write a Gmsh .geo file for a half-wing, its wake and far field", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON parameter file
    config: PathBuf,

    /// Output .geo file
    #[arg(short, long, default_value = "grid.geo")]
    out: PathBuf,
}

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for geogen.
    // Override with RUST_LOG env var (e.g. RUST_LOG=geogen=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("geogen=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let params = io::load_config(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    let config_dir = cli.config.parent().unwrap_or_else(|| std::path::Path::new(""));
    let airfoils = params
        .airfoil_paths(config_dir)
        .iter()
        .map(|path| {
            io::read_airfoil(path).with_context(|| format!("reading airfoil {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let model = GeoModel::build(&params, &airfoils).context("building geometry")?;
    let name = cli
        .config
        .file_stem()
        .map_or_else(|| "wing".to_string(), |s| s.to_string_lossy().into_owned());
    io::write_geo(&cli.out, &model.write_geo(&name))
        .with_context(|| format!("writing {}", cli.out.display()))?;

    info!(out = %cli.out.display(), "geometry written, visual check in gmsh recommended");
    Ok(())
}
