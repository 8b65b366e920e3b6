//! Edge-collapse orchestration
//!
//! The [`Decimator`] owns a mesh exclusively for the duration of
//! decimation. Each collapse pops the cheapest candidate pair, merges the
//! edge to its midpoint, drops degenerate faces, and rebuilds the full error
//! state (adjacency → quadrics → pair queue) from the mutated mesh. The
//! pipeline is single-threaded and not reentrant; decimating several meshes
//! concurrently requires one decimator per mesh.

use terralod_core::{MeshSink, Point3f, Result, TriangleMesh};

use crate::adjacency::AdjacencyIndex;
use crate::pair_queue::PairQueue;
use crate::quadric::QuadricTable;

/// How candidate edges are ranked.
///
/// A closed set: the decimator has no need for open-ended strategy
/// extensibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CostStrategy {
    /// Quadric form of the summed endpoint quadrics at the edge midpoint
    #[default]
    QuadricError,
    /// Squared Euclidean edge length; cheaper to compute, visually inferior
    ShortestEdge,
}

impl CostStrategy {
    fn edge_cost(
        &self,
        mesh: &TriangleMesh,
        quadrics: &QuadricTable,
        v1: usize,
        v2: usize,
    ) -> f64 {
        match self {
            CostStrategy::QuadricError => quadrics.midpoint_cost(mesh, v1, v2),
            CostStrategy::ShortestEdge => {
                (mesh.vertices[v2] - mesh.vertices[v1]).cast::<f64>().norm_squared()
            }
        }
    }
}

/// Observable decimator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimatorStatus {
    /// Error state built, at least one collapse available
    Ready,
    /// Nothing left to collapse
    Exhausted,
}

/// Result of a single collapse attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseOutcome {
    Collapsed,
    /// Successful no-op: empty queue or fewer than two faces
    Exhausted,
}

/// Derived error structures, disposable and rebuilt after every collapse
pub struct ErrorState {
    pub adjacency: AdjacencyIndex,
    pub quadrics: QuadricTable,
    pub queue: PairQueue,
}

fn build_error_state(mesh: &TriangleMesh, strategy: CostStrategy) -> Result<ErrorState> {
    mesh.validate_indices()?;
    let adjacency = AdjacencyIndex::build(mesh);
    let quadrics = QuadricTable::build(mesh);
    let queue = PairQueue::build(&adjacency, |v1, v2| {
        strategy.edge_cost(mesh, &quadrics, v1, v2)
    });
    Ok(ErrorState {
        adjacency,
        quadrics,
        queue,
    })
}

/// Iterative edge-collapse mesh decimator
pub struct Decimator {
    mesh: TriangleMesh,
    strategy: CostStrategy,
    state: ErrorState,
}

impl Decimator {
    /// Take ownership of a mesh and build its initial error state
    pub fn new(mesh: TriangleMesh) -> Result<Self> {
        Self::with_strategy(mesh, CostStrategy::default())
    }

    pub fn with_strategy(mesh: TriangleMesh, strategy: CostStrategy) -> Result<Self> {
        let state = build_error_state(&mesh, strategy)?;
        Ok(Self {
            mesh,
            strategy,
            state,
        })
    }

    /// Rebuild adjacency, quadric table, and pair queue from the current
    /// mesh. Idempotent when the mesh has not changed in between.
    pub fn compute_error_state(&mut self) -> Result<()> {
        self.state = build_error_state(&self.mesh, self.strategy)?;
        Ok(())
    }

    pub fn status(&self) -> DecimatorStatus {
        if self.state.queue.is_empty() || self.mesh.face_count() <= 1 {
            DecimatorStatus::Exhausted
        } else {
            DecimatorStatus::Ready
        }
    }

    /// Cheapest candidate pair, if any
    pub fn peek_min(&self) -> Option<(usize, usize, f64)> {
        self.state.queue.peek_min()
    }

    /// Derived error structures for the current mesh
    pub fn error_state(&self) -> &ErrorState {
        &self.state
    }

    /// Execute one edge collapse.
    ///
    /// Picks the minimum-cost pair, removes the endpoint with fewer incident
    /// faces (minimizing face index rewrites; the canonical pair's second
    /// vertex on a tie), moves the retained vertex to the edge midpoint,
    /// rewrites and prunes faces, then rebuilds the error state. A collapse
    /// is final; there is no rollback.
    pub fn collapse_once(&mut self) -> Result<CollapseOutcome> {
        if self.mesh.face_count() <= 1 {
            return Ok(CollapseOutcome::Exhausted);
        }
        let Some((v1, v2, cost)) = self.state.queue.peek_min() else {
            return Ok(CollapseOutcome::Exhausted);
        };

        let n1 = self.state.adjacency.incident_face_count(v1);
        let n2 = self.state.adjacency.incident_face_count(v2);
        // v1 < v2 by canonicalization, so a tie removes the larger index
        let (retained, removed) = if n1 < n2 { (v2, v1) } else { (v1, v2) };

        let midpoint =
            Point3f::from((self.mesh.vertices[v1].coords + self.mesh.vertices[v2].coords) * 0.5);

        if let Some(normals) = &mut self.mesh.normals {
            let avg = (normals[retained] + normals[removed]).normalize();
            if avg.iter().all(|x| x.is_finite()) {
                normals[retained] = avg;
            }
        }

        self.mesh.set_position(retained, midpoint)?;
        self.mesh.replace_vertex_index(removed, retained);
        self.mesh.remove_degenerate_faces();

        log::debug!(
            "collapsed ({v1}, {v2}) cost {cost:.6e}, {} faces remain",
            self.mesh.face_count()
        );

        self.compute_error_state()?;
        Ok(CollapseOutcome::Collapsed)
    }

    /// Execute up to `budget` collapses, stopping early on exhaustion.
    /// Returns the number performed.
    pub fn collapse(&mut self, budget: usize) -> Result<usize> {
        let mut performed = 0;
        while performed < budget {
            match self.collapse_once()? {
                CollapseOutcome::Collapsed => performed += 1,
                CollapseOutcome::Exhausted => break,
            }
        }
        Ok(performed)
    }

    /// Collapse until the face count reaches `target` or nothing more can
    /// be collapsed. Returns the number of collapses performed.
    pub fn decimate_to_face_count(&mut self, target: usize) -> Result<usize> {
        let mut performed = 0;
        while self.mesh.face_count() > target {
            match self.collapse_once()? {
                CollapseOutcome::Collapsed => performed += 1,
                CollapseOutcome::Exhausted => break,
            }
        }
        Ok(performed)
    }

    /// Push the current buffers to a renderer sink
    pub fn upload_to<S: MeshSink + ?Sized>(&self, sink: &mut S) {
        sink.upload_mesh(&self.mesh.vertices, &self.mesh.faces);
    }

    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// Hand the mesh back to the caller, ending decimation
    pub fn into_mesh(self) -> TriangleMesh {
        self.mesh
    }
}
