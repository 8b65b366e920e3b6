//! Core data structures and traits for terralod
//!
//! This crate provides the fundamental types shared by the decimation engine
//! and its collaborators: mesh storage, point/vector aliases, the renderer
//! upload boundary, and the common error type.

pub mod point;
pub mod mesh;
pub mod traits;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, Vector3, Vector4};

/// Common result type for terralod operations
pub type Result<T> = std::result::Result<T, Error>;
