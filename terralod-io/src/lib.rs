//! Geometry ingestion for terralod
//!
//! Reads and writes the minimal OBJ subset the decimation engine consumes:
//! `v` positions, triangular `f` records, and optional `vn` normals. This is
//! deliberately not a general OBJ implementation.

pub mod obj;

pub use obj::{ObjReader, ObjWriter};

use std::path::Path;
use terralod_core::{Error, Result, TriangleMesh};

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh>;
}

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()>;
}

/// Auto-detect format and read mesh
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("obj") => ObjReader::read_mesh(path),
        _ => Err(Error::UnsupportedFormat(format!(
            "unsupported mesh format: {:?}",
            path.extension()
        ))),
    }
}

/// Read a mesh, recovering from load failures with an empty mesh.
///
/// The failure is logged once; the returned empty mesh makes downstream
/// decimation a natural no-op. Callers that need to distinguish failure from
/// an actually empty file should use [`read_mesh`] directly.
pub fn load_mesh_or_empty<P: AsRef<Path>>(path: P) -> TriangleMesh {
    match read_mesh(path.as_ref()) {
        Ok(mesh) => mesh,
        Err(e) => {
            log::warn!(
                "failed to load mesh from {}: {e}",
                path.as_ref().display()
            );
            TriangleMesh::new()
        }
    }
}
