//! Core traits for terralod

use crate::mesh::TriangleMesh;
use crate::point::*;

/// Receiver of decimated geometry, typically a renderer's buffer uploader.
///
/// The decimation engine calls this after a batch of collapses completes and
/// treats the implementation as opaque. Ownership of the buffers stays with
/// the caller; the sink reads, never mutates.
pub trait MeshSink {
    /// Upload the current vertex and face buffers
    fn upload_mesh(&mut self, vertices: &[Point3f], faces: &[[usize; 3]]);
}

/// Trait for objects with a spatial extent
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);

    /// Get the center point of the object
    fn center(&self) -> Point3f;
}

impl Drawable for TriangleMesh {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        if self.vertices.is_empty() {
            return (Point3f::origin(), Point3f::origin());
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for vertex in &self.vertices {
            min.x = min.x.min(vertex.x);
            min.y = min.y.min(vertex.y);
            min.z = min.z.min(vertex.z);

            max.x = max.x.max(vertex.x);
            max.y = max.y.max(vertex.y);
            max.z = max.z.max(vertex.z);
        }

        (min, max)
    }

    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        Point3f::new(
            (min.x + max.x) / 2.0,
            (min.y + max.y) / 2.0,
            (min.z + max.z) / 2.0,
        )
    }
}
