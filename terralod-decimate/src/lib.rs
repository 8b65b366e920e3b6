//! Mesh decimation via quadric error metric edge collapse
//!
//! Progressively reduces the triangle count of an indexed mesh while
//! minimizing visual distortion. Per-vertex error quadrics rank candidate
//! edge collapses; each collapse merges an edge to its midpoint, drops the
//! faces that become degenerate, and rebuilds the derived error state:
//! - adjacency index (vertex → faces, per-face edge occurrences)
//! - quadric table (per-vertex 4×4 error quadrics)
//! - pair queue (candidate edges ranked ascending by collapse cost)

pub mod adjacency;
pub mod quadric;
pub mod pair_queue;
pub mod decimator;

pub use adjacency::*;
pub use quadric::*;
pub use pair_queue::*;
pub use decimator::*;
