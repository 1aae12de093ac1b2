//! Mesh statistics report.

use anyhow::{Context, Result};
use solid_io::load_stl;
use std::path::Path;

/// Area threshold below which a triangle counts as degenerate.
const DEGENERATE_AREA_EPSILON: f64 = 1e-12;

/// Load a mesh and print its statistics.
pub fn run(path: &Path) -> Result<()> {
    let mesh =
        load_stl(path).with_context(|| format!("failed to load {}", path.display()))?;

    println!("{}", path.display());
    println!("  triangles:    {}", mesh.triangle_count());

    let bounds = mesh.bounds();
    println!("  bounding box:");
    println!("    x: {} - {}", bounds.min.x, bounds.max.x);
    println!("    y: {} - {}", bounds.min.y, bounds.max.y);
    println!("    z: {} - {}", bounds.min.z, bounds.max.z);

    println!("  surface area: {:.2}", mesh.surface_area());
    println!("  volume:       {:.4e}", mesh.signed_volume());

    if mesh.is_inside_out() {
        println!("  warning: negative volume, mesh looks inside-out");
    }

    let degenerate = mesh.degenerate_count(DEGENERATE_AREA_EPSILON);
    if degenerate > 0 {
        println!("  warning: {degenerate} degenerate triangles");
    }

    Ok(())
}
