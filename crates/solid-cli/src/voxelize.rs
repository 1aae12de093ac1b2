//! Covering-lattice classification.

use anyhow::{Context, Result};
use solid_classify::VolumeClassifier;
use solid_grid::PointGrid;
use solid_io::load_stl;
use std::path::Path;
use std::time::Instant;

/// Classify a covering lattice against a mesh and print the tally.
pub fn run(path: &Path, spacing: f64, padding: usize) -> Result<()> {
    let mesh =
        load_stl(path).with_context(|| format!("failed to load {}", path.display()))?;
    let triangles = mesh.triangle_count();

    let classifier = VolumeClassifier::new(mesh).context("mesh cannot be classified")?;
    let grid = PointGrid::covering(&classifier.bounds(), spacing, padding)
        .context("invalid lattice parameters")?;

    let [nx, ny, nz] = grid.counts();
    println!("{}", path.display());
    println!("  triangles: {triangles}");
    println!("  lattice:   {nx} x {ny} x {nz} at spacing {spacing}");

    let started = Instant::now();
    let occupancy = classifier.classify_grid(&grid)?;
    let elapsed = started.elapsed();

    println!("  classified {} points in {elapsed:.2?}", grid.point_count());
    println!("  inside:    {}", occupancy.inside_count());
    println!("  outside:   {}", occupancy.outside_count());
    println!("  fill:      {:.1}%", occupancy.inside_fraction() * 100.0);

    let indeterminate = occupancy.indeterminate_count();
    if indeterminate > 0 {
        println!("  warning: {indeterminate} points did not resolve");
    }

    let cell_volume = spacing * spacing * spacing;
    println!(
        "  estimated solid volume: {:.4e}",
        occupancy.inside_count() as f64 * cell_volume
    );

    Ok(())
}
