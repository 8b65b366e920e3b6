//! Minimal OBJ subset support
//!
//! Recognizes `v x y z`, `f i j k` (1-indexed triangles), and `vn nx ny nz`.
//! Every other line type is ignored. When a file carries no `vn` records,
//! vertex normals are derived as the area-weighted average of incident face
//! normals, normalized afterwards.

use crate::{MeshReader, MeshWriter};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use terralod_core::{Error, Point3f, Result, TriangleMesh, Vector3f};

pub struct ObjReader;
pub struct ObjWriter;

fn parse_triple_f32(mut fields: std::str::SplitWhitespace<'_>) -> Option<[f32; 3]> {
    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;
    let z = fields.next()?.parse().ok()?;
    Some([x, y, z])
}

fn parse_face(mut fields: std::str::SplitWhitespace<'_>) -> Option<[usize; 3]> {
    let mut face = [0usize; 3];
    for slot in &mut face {
        // 1-indexed in the file; 0 would underflow and is rejected
        let idx: usize = fields.next()?.parse().ok()?;
        *slot = idx.checked_sub(1)?;
    }
    Some(face)
}

/// Area-weighted vertex normals: accumulate the unnormalized cross product
/// of each face, then normalize per vertex.
fn derive_vertex_normals(vertices: &[Point3f], faces: &[[usize; 3]]) -> Vec<Vector3f> {
    let mut normals = vec![Vector3f::zeros(); vertices.len()];
    for &[a, b, c] in faces {
        let n = (vertices[b] - vertices[a]).cross(&(vertices[c] - vertices[a]));
        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }
    for n in &mut normals {
        let len = n.norm();
        if len > 0.0 {
            *n /= len;
        }
    }
    normals
}

impl MeshReader for ObjReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::GeometryLoad(format!("{}: {e}", path.display())))?;

        let mut vertices: Vec<Point3f> = Vec::new();
        let mut faces: Vec<[usize; 3]> = Vec::new();
        let mut normals: Vec<Vector3f> = Vec::new();

        for line in BufReader::new(file).lines() {
            let line = line?;
            let mut fields = line.split_whitespace();
            match fields.next() {
                Some("v") => {
                    if let Some([x, y, z]) = parse_triple_f32(fields) {
                        vertices.push(Point3f::new(x, y, z));
                    }
                }
                Some("f") => {
                    if let Some(face) = parse_face(fields) {
                        faces.push(face);
                    }
                }
                Some("vn") => {
                    if let Some([x, y, z]) = parse_triple_f32(fields) {
                        normals.push(Vector3f::new(x, y, z));
                    }
                }
                _ => {}
            }
        }

        let mut mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
        mesh.validate_indices()?;
        if normals.is_empty() {
            let derived = derive_vertex_normals(&mesh.vertices, &mesh.faces);
            mesh.set_normals(derived);
        } else {
            // Dropped silently if the count disagrees with the vertex array
            mesh.set_normals(normals);
        }
        Ok(mesh)
    }
}

impl MeshWriter for ObjWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        for v in &mesh.vertices {
            writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
        }
        if let Some(normals) = &mesh.normals {
            for n in normals {
                writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
            }
        }
        for &[a, b, c] in &mesh.faces {
            writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1)?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;

    #[test]
    fn test_read_basic_obj() {
        let temp_file = "test_read_basic.obj";
        let content = "\
# a comment line
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
usemtl terrain
vt 0.0 0.0
f 1 2 3
";
        fs::write(temp_file, content).unwrap();

        let mesh = ObjReader::read_mesh(temp_file).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
        assert_eq!(mesh.vertices[1], Point3f::new(1.0, 0.0, 0.0));

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_malformed_lines_ignored() {
        let temp_file = "test_malformed.obj";
        let content = "\
v 0.0 0.0 0.0
v 1.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 three
f 1 2 3
";
        fs::write(temp_file, content).unwrap();

        let mesh = ObjReader::read_mesh(temp_file).unwrap();
        // The short `v` and the non-numeric `f` are dropped by type
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_normals_from_file() {
        let temp_file = "test_vn_passthrough.obj";
        let content = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vn 0.0 0.0 1.0
vn 0.0 0.0 1.0
vn 0.0 0.0 1.0
f 1 2 3
";
        fs::write(temp_file, content).unwrap();

        let mesh = ObjReader::read_mesh(temp_file).unwrap();
        let normals = mesh.normals.as_ref().expect("normals from file");
        assert_eq!(normals.len(), 3);
        assert_eq!(normals[0], Vector3f::new(0.0, 0.0, 1.0));

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_normals_derived_when_absent() {
        let temp_file = "test_vn_derived.obj";
        // Planar quad: every derived normal must be +Z after normalization
        let content = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
f 1 2 3
f 1 3 4
";
        fs::write(temp_file, content).unwrap();

        let mesh = ObjReader::read_mesh(temp_file).unwrap();
        let normals = mesh.normals.as_ref().expect("derived normals");
        assert_eq!(normals.len(), 4);
        for n in normals {
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-6);
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-6);
        }

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let result = ObjReader::read_mesh("does_not_exist.obj");
        assert!(matches!(result, Err(Error::GeometryLoad(_))));
    }

    #[test]
    fn test_face_index_out_of_range_is_fatal() {
        let temp_file = "test_bad_index.obj";
        let content = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
f 1 2 5
";
        fs::write(temp_file, content).unwrap();

        let result = ObjReader::read_mesh(temp_file);
        assert!(matches!(result, Err(Error::IndexOutOfRange { .. })));

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_obj_roundtrip() {
        let temp_file = "test_obj_roundtrip.obj";
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.5, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );

        ObjWriter::write_mesh(&mesh, temp_file).unwrap();
        let loaded = ObjReader::read_mesh(temp_file).unwrap();

        assert_eq!(loaded.vertex_count(), mesh.vertex_count());
        assert_eq!(loaded.faces, mesh.faces);
        for (orig, read) in mesh.vertices.iter().zip(loaded.vertices.iter()) {
            assert_relative_eq!(orig.x, read.x, epsilon = 1e-6);
            assert_relative_eq!(orig.y, read.y, epsilon = 1e-6);
            assert_relative_eq!(orig.z, read.z, epsilon = 1e-6);
        }

        let _ = fs::remove_file(temp_file);
    }
}
