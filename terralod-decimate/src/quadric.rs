//! Per-vertex error quadrics
//!
//! Each vertex carries the sum of the rank-1 plane quadrics of its incident
//! faces. Plane normals are deliberately NOT normalized before the outer
//! product, so a face contributes error weighted by (2·area)²; larger faces
//! pull harder against collapses that would move them.

use nalgebra::{Matrix4, Vector4};
use terralod_core::{Point3f, TriangleMesh};

/// Unnormalized homogeneous plane coefficients of the triangle (a, b, c):
/// `n = (b-a) × (c-a)`, `d = -n·a`.
pub fn plane_coeffs(a: &Point3f, b: &Point3f, c: &Point3f) -> Vector4<f64> {
    let a = a.cast::<f64>();
    let b = b.cast::<f64>();
    let c = c.cast::<f64>();
    let n = (b - a).cross(&(c - a));
    let d = -n.dot(&a.coords);
    Vector4::new(n.x, n.y, n.z, d)
}

/// Rank-1 symmetric quadric `p pᵀ` for a homogeneous plane `p`
pub fn plane_quadric(p: &Vector4<f64>) -> Matrix4<f64> {
    let (a, b, c, d) = (p[0], p[1], p[2], p[3]);
    Matrix4::new(
        a * a, a * b, a * c, a * d,
        a * b, b * b, b * c, b * d,
        a * c, b * c, c * c, c * d,
        a * d, b * d, c * d, d * d,
    )
}

/// Accumulated quadrics, one per vertex slot
#[derive(Debug, Clone, PartialEq)]
pub struct QuadricTable {
    quadrics: Vec<Matrix4<f64>>,
}

impl QuadricTable {
    /// Accumulate each face's plane quadric into its three corners.
    ///
    /// Matrix addition commutes, so iterating faces directly gives the same
    /// sums as walking a vertex→face multimap in any order.
    pub fn build(mesh: &TriangleMesh) -> Self {
        let mut quadrics = vec![Matrix4::zeros(); mesh.vertex_count()];
        for &[a, b, c] in &mesh.faces {
            let plane = plane_coeffs(&mesh.vertices[a], &mesh.vertices[b], &mesh.vertices[c]);
            let kp = plane_quadric(&plane);
            quadrics[a] += kp;
            quadrics[b] += kp;
            quadrics[c] += kp;
        }
        Self { quadrics }
    }

    /// Quadric of a vertex slot
    pub fn get(&self, v: usize) -> &Matrix4<f64> {
        &self.quadrics[v]
    }

    /// Collapse cost of edge (v1, v2): the summed quadric form evaluated at
    /// the homogeneous midpoint of the two positions.
    ///
    /// Theoretically ≥ 0 (a sum of outer products is positive semi-definite);
    /// floating error may produce values a hair below zero, which are
    /// reported as-is.
    pub fn midpoint_cost(&self, mesh: &TriangleMesh, v1: usize, v2: usize) -> f64 {
        let q = self.quadrics[v1] + self.quadrics[v2];
        let mid = (mesh.vertices[v1].coords + mesh.vertices[v2].coords).cast::<f64>() * 0.5;
        let vh = Vector4::new(mid.x, mid.y, mid.z, 1.0);
        (vh.transpose() * q * vh)[(0, 0)]
    }
}
