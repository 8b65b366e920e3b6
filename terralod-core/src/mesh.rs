//! Mesh storage and mutation primitives
//!
//! [`TriangleMesh`] is the single owner of vertex and face buffers during
//! decimation. Collapse operations rewrite face indices and drop degenerate
//! faces but never shrink the vertex array; see [`TriangleMesh::compact`]
//! for explicit reclamation.

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh with vertices and faces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub normals: Option<Vec<Vector3f>>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            normals: None,
        }
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            normals: None,
        }
    }

    /// Length of the vertex array.
    ///
    /// After a collapse this is NOT the number of vertices still referenced
    /// by faces: removed vertices keep their slots as orphans. Use
    /// [`TriangleMesh::referenced_vertex_count`] for the live count.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of distinct vertices referenced by at least one face
    pub fn referenced_vertex_count(&self) -> usize {
        let mut referenced = vec![false; self.vertices.len()];
        for face in &self.faces {
            for &v in face {
                if v < referenced.len() {
                    referenced[v] = true;
                }
            }
        }
        referenced.iter().filter(|&&r| r).count()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Overwrite the position of a vertex
    pub fn set_position(&mut self, index: usize, position: Point3f) -> Result<()> {
        let len = self.vertices.len();
        let slot = self
            .vertices
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        *slot = position;
        Ok(())
    }

    /// Rewrite every face occurrence of `old` to `new`.
    ///
    /// The slot of `old` is left in place as an orphan.
    pub fn replace_vertex_index(&mut self, old: usize, new: usize) {
        for face in &mut self.faces {
            for v in face.iter_mut() {
                if *v == old {
                    *v = new;
                }
            }
        }
    }

    /// Remove every face with two or more equal indices, preserving the
    /// relative order of the remaining faces.
    pub fn remove_degenerate_faces(&mut self) {
        self.faces
            .retain(|&[a, b, c]| a != b && b != c && a != c);
    }

    /// Check that every face index is within the vertex array.
    ///
    /// A violation means the mesh is corrupt; callers must treat the error
    /// as fatal rather than proceed with stale positions.
    pub fn validate_indices(&self) -> Result<()> {
        let len = self.vertices.len();
        for face in &self.faces {
            for &v in face {
                if v >= len {
                    return Err(Error::IndexOutOfRange { index: v, len });
                }
            }
        }
        Ok(())
    }

    /// Calculate per-face normals (unit length)
    pub fn calculate_face_normals(&self) -> Vec<Vector3f> {
        self.faces
            .iter()
            .map(|face| {
                let v0 = self.vertices[face[0]];
                let v1 = self.vertices[face[1]];
                let v2 = self.vertices[face[2]];

                let edge1 = v1 - v0;
                let edge2 = v2 - v0;

                edge1.cross(&edge2).normalize()
            })
            .collect()
    }

    /// Set vertex normals
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) {
        if normals.len() == self.vertices.len() {
            self.normals = Some(normals);
        }
    }

    /// Drop orphaned vertex slots and remap face indices to a dense array.
    ///
    /// Surviving vertices keep their relative order. Kept separate from the
    /// collapse loop; run it once after decimation finishes if storage or an
    /// accurate vertex count matters.
    pub fn compact(&mut self) {
        let mut referenced = vec![false; self.vertices.len()];
        for face in &self.faces {
            for &v in face {
                referenced[v] = true;
            }
        }

        let mut old_to_new = vec![usize::MAX; self.vertices.len()];
        let mut new_vertices = Vec::new();
        let mut new_normals = self.normals.as_ref().map(|_| Vec::new());
        for (i, &live) in referenced.iter().enumerate() {
            if live {
                old_to_new[i] = new_vertices.len();
                new_vertices.push(self.vertices[i]);
                if let (Some(out), Some(normals)) = (new_normals.as_mut(), self.normals.as_ref()) {
                    out.push(normals[i]);
                }
            }
        }

        for face in &mut self.faces {
            for v in face.iter_mut() {
                *v = old_to_new[*v];
            }
        }
        self.vertices = new_vertices;
        self.normals = new_normals;
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.normals = None;
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}
