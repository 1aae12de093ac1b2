//! Solidcast command-line tool.
//!
//! Inspect STL surface meshes and voxelize them into point-containment
//! lattices from the terminal.
//!
//! # Commands
//!
//! - `solidcast info <MESH>` - Print mesh statistics
//! - `solidcast voxelize <MESH> --spacing 0.5` - Classify a covering lattice

mod info;
mod voxelize;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Point containment tools for triangulated surfaces.
#[derive(Parser)]
#[command(name = "solidcast")]
#[command(about = "Mesh inspection and voxelization", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print triangle count, bounds, and measures for a mesh
    Info {
        /// Path to the STL file to inspect
        #[arg(name = "MESH")]
        mesh: PathBuf,
    },

    /// Classify a covering point lattice against a mesh
    Voxelize {
        /// Path to the STL file to voxelize
        #[arg(name = "MESH")]
        mesh: PathBuf,

        /// Lattice spacing along each axis
        #[arg(long)]
        spacing: f64,

        /// Extra cells of padding around the mesh bounds
        #[arg(long, default_value_t = 1)]
        padding: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { mesh } => info::run(&mesh),
        Commands::Voxelize {
            mesh,
            spacing,
            padding,
        } => voxelize::run(&mesh, spacing, padding),
    }
}
