//! STL (Stereolithography) reading and writing.
//!
//! Supports both ASCII and binary STL.
//!
//! # Format Detection
//!
//! The loader detects the variant automatically:
//! - ASCII files start with "solid" (after optional whitespace)
//! - Binary files have an 80-byte header followed by a triangle count
//!
//! Some binary exporters put "solid" in the 80-byte header, so the prefix
//! alone is not trusted: a header containing NUL bytes is treated as binary.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored)
//! UINT32       – Number of triangles (little-endian)
//! foreach triangle
//!     REAL32[3] – Normal vector (ignored on read, recomputed on write)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (ignored)
//! end
//! ```
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use solid_types::{Point3, TriMesh, Triangle};

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle record in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

/// Cap on capacity reserved up front from a binary header's triangle count.
const PREALLOC_LIMIT: usize = 1 << 16;

/// Load a mesh from an STL file.
///
/// Automatically detects ASCII vs binary format. Stored facet normals are
/// ignored; orientation comes from vertex winding alone.
///
/// # Errors
///
/// Returns an error if the file cannot be read, ends early, or is not
/// structurally valid STL. Malformed input never panics.
///
/// # Example
///
/// ```no_run
/// use solid_io::load_stl;
///
/// let mesh = load_stl("part.stl").unwrap();
/// println!("loaded {} triangles", mesh.triangle_count());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<TriMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;

    let mut reader = BufReader::new(file);

    // Read enough to determine format
    let mut header = [0u8; HEADER_SIZE + 4];
    let bytes_read = read_up_to(&mut reader, &mut header)?;

    if bytes_read < 6 {
        return Err(IoError::invalid_content("file too small to be valid STL"));
    }

    let header_str = String::from_utf8_lossy(&header[..bytes_read.min(HEADER_SIZE)]);
    let trimmed = header_str.trim_start();

    if trimmed.starts_with("solid") && !has_binary_header(&header[..bytes_read]) {
        // ASCII format - re-read from the start
        drop(reader);
        let file = File::open(path)?;
        load_stl_ascii(BufReader::new(file))
    } else {
        load_stl_binary_from_header(&header[..bytes_read], reader)
    }
}

/// Fill `buf` as far as the reader allows, tolerating short files.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> IoResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// Check if a header that starts with "solid" is actually binary.
///
/// Binary headers routinely contain NUL padding; ASCII ones never do.
fn has_binary_header(header: &[u8]) -> bool {
    if header.len() < HEADER_SIZE + 4 {
        return false;
    }
    header[..HEADER_SIZE].contains(&0)
}

/// Load a binary STL given the already-read header bytes.
fn load_stl_binary_from_header<R: Read>(header: &[u8], mut reader: R) -> IoResult<TriMesh> {
    if header.len() < HEADER_SIZE + 4 {
        return Err(IoError::UnexpectedEof {
            position: header.len() as u64,
        });
    }

    // Triangle count sits right after the 80-byte header
    let count = u32::from_le_bytes([
        header[HEADER_SIZE],
        header[HEADER_SIZE + 1],
        header[HEADER_SIZE + 2],
        header[HEADER_SIZE + 3],
    ]);

    // The declared count is untrusted until the records actually arrive,
    // so reserve only up to a fixed cap and let the vector grow past it.
    let mut mesh = TriMesh::with_capacity((count as usize).min(PREALLOC_LIMIT));

    let mut record = [0u8; TRIANGLE_SIZE];
    for i in 0..count {
        let filled = read_up_to(&mut reader, &mut record)?;
        if filled == 0 {
            // Clean end at a record boundary: the count overstates the payload
            return Err(IoError::TriangleCountMismatch {
                expected: count,
                got: i,
            });
        }
        if filled < TRIANGLE_SIZE {
            let record_start = (HEADER_SIZE + 4) as u64 + u64::from(i) * TRIANGLE_SIZE as u64;
            return Err(IoError::UnexpectedEof {
                position: record_start,
            });
        }

        // Skip the stored normal (bytes 0..12); winding defines orientation
        let v0 = read_point(&record[12..24]);
        let v1 = read_point(&record[24..36]);
        let v2 = read_point(&record[36..48]);
        mesh.push(Triangle::new(v0, v1, v2));
    }

    Ok(mesh)
}

/// Read a point from 12 bytes (3 little-endian f32s).
fn read_point(buf: &[u8]) -> Point3<f64> {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Point3::new(f64::from(x), f64::from(y), f64::from(z))
}

/// Load an ASCII STL body.
fn load_stl_ascii<R: BufRead>(reader: R) -> IoResult<TriMesh> {
    let mut mesh = TriMesh::new();
    let mut in_facet = false;
    let mut in_loop = false;
    let mut facet_vertices: Vec<Point3<f64>> = Vec::with_capacity(3);

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();

        match parts[0].to_lowercase().as_str() {
            "facet" => {
                in_facet = true;
                // Normal follows but is ignored; winding defines orientation
            }
            "outer" => {
                if parts.len() >= 2 && parts[1].eq_ignore_ascii_case("loop") {
                    in_loop = true;
                    facet_vertices.clear();
                }
            }
            "vertex" => {
                if !in_loop {
                    return Err(IoError::invalid_content("vertex outside outer loop"));
                }
                if parts.len() < 4 {
                    return Err(IoError::invalid_content(format!(
                        "malformed vertex line: {trimmed:?}"
                    )));
                }
                let x: f64 = parts[1].parse()?;
                let y: f64 = parts[2].parse()?;
                let z: f64 = parts[3].parse()?;
                facet_vertices.push(Point3::new(x, y, z));
            }
            "endloop" => {
                in_loop = false;
            }
            "endfacet" => {
                if !in_facet || facet_vertices.len() != 3 {
                    return Err(IoError::invalid_content(format!(
                        "facet closed with {} vertices",
                        facet_vertices.len()
                    )));
                }
                mesh.push(Triangle::new(
                    facet_vertices[0],
                    facet_vertices[1],
                    facet_vertices[2],
                ));
                facet_vertices.clear();
                in_facet = false;
            }
            "endsolid" => break,
            _ => {
                // Ignore unknown lines (mirrors common exporter quirks)
            }
        }
    }

    if in_facet || in_loop {
        return Err(IoError::invalid_content("unterminated facet"));
    }

    Ok(mesh)
}

/// Save a mesh to an STL file.
///
/// Facet normals are recomputed from winding; degenerate triangles get a
/// zero normal, which readers uniformly tolerate.
///
/// # Arguments
///
/// * `mesh` - The mesh to save
/// * `path` - Output file path
/// * `binary` - If true, save as binary STL; if false, as ASCII
///
/// # Errors
///
/// Returns an error if the file cannot be written.
///
/// # Example
///
/// ```no_run
/// use solid_io::{load_stl, save_stl};
///
/// let mesh = load_stl("input.stl").unwrap();
/// save_stl(&mesh, "output.stl", true).unwrap();
/// ```
pub fn save_stl<P: AsRef<Path>>(mesh: &TriMesh, path: P, binary: bool) -> IoResult<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    if binary {
        save_stl_binary(mesh, writer)
    } else {
        save_stl_ascii(mesh, writer)
    }
}

/// Unit normal components for a triangle, zero for degenerate ones.
fn facet_normal(tri: &Triangle) -> (f64, f64, f64) {
    tri.normal()
        .map_or((0.0, 0.0, 0.0), |n| (n.x, n.y, n.z))
}

/// Save mesh as binary STL.
fn save_stl_binary<W: Write>(mesh: &TriMesh, mut writer: W) -> IoResult<()> {
    // 80-byte header padded with spaces
    let mut header = [b' '; HEADER_SIZE];
    let text = b"Binary STL generated by solidcast";
    header[..text.len()].copy_from_slice(text);
    writer.write_all(&header)?;

    #[allow(clippy::cast_possible_truncation)]
    // Truncation: the STL format caps triangle counts at u32 range
    let count = mesh.triangle_count() as u32;
    writer.write_all(&count.to_le_bytes())?;

    for tri in mesh.iter() {
        let (nx, ny, nz) = facet_normal(tri);
        write_f32_triple(&mut writer, nx, ny, nz)?;
        write_f32_triple(&mut writer, tri.v0.x, tri.v0.y, tri.v0.z)?;
        write_f32_triple(&mut writer, tri.v1.x, tri.v1.y, tri.v1.z)?;
        write_f32_triple(&mut writer, tri.v2.x, tri.v2.y, tri.v2.z)?;
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

/// Write three f64s as little-endian f32s.
fn write_f32_triple<W: Write>(writer: &mut W, x: f64, y: f64, z: f64) -> IoResult<()> {
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: f64 to f32 is intentional, STL stores f32
    {
        writer.write_all(&(x as f32).to_le_bytes())?;
        writer.write_all(&(y as f32).to_le_bytes())?;
        writer.write_all(&(z as f32).to_le_bytes())?;
    }
    Ok(())
}

/// Save mesh as ASCII STL.
fn save_stl_ascii<W: Write>(mesh: &TriMesh, mut writer: W) -> IoResult<()> {
    writeln!(writer, "solid solidcast")?;

    for tri in mesh.iter() {
        let (nx, ny, nz) = facet_normal(tri);
        writeln!(writer, "  facet normal {nx:.6e} {ny:.6e} {nz:.6e}")?;
        writeln!(writer, "    outer loop")?;
        for v in tri.vertices() {
            writeln!(writer, "      vertex {:.6e} {:.6e} {:.6e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid solidcast")?;

    Ok(())
}
