//! Vertex adjacency derived from the face list
//!
//! Rebuilt wholesale from the mesh after every mutation; never mutates the
//! mesh itself.

use terralod_core::TriangleMesh;

/// Incidence maps for the current face list.
///
/// `edges` holds one entry per face-edge occurrence in face order, so an
/// edge shared by two triangles appears twice. Deduplication is left to the
/// pair queue, which canonicalizes unordered pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyIndex {
    vertex_faces: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
}

impl AdjacencyIndex {
    /// Build the incidence maps. Face indices must already be validated
    /// against the vertex array.
    pub fn build(mesh: &TriangleMesh) -> Self {
        let mut vertex_faces = vec![Vec::new(); mesh.vertex_count()];
        let mut edges = Vec::with_capacity(mesh.face_count() * 3);

        for (fi, &[a, b, c]) in mesh.faces.iter().enumerate() {
            vertex_faces[a].push(fi);
            vertex_faces[b].push(fi);
            vertex_faces[c].push(fi);

            edges.push((a, b));
            edges.push((a, c));
            edges.push((b, c));
        }

        Self {
            vertex_faces,
            edges,
        }
    }

    /// Faces incident to a vertex; empty for orphaned slots
    pub fn faces_of(&self, v: usize) -> &[usize] {
        self.vertex_faces
            .get(v)
            .map(|f| f.as_slice())
            .unwrap_or(&[])
    }

    /// Number of faces incident to a vertex
    pub fn incident_face_count(&self, v: usize) -> usize {
        self.faces_of(v).len()
    }

    /// All face-edge occurrences, three per face, in face order
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Number of vertex slots covered by the index
    pub fn vertex_slots(&self) -> usize {
        self.vertex_faces.len()
    }
}
