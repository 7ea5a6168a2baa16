//! Chladni plate mesh and the generation pipeline.

mod mesh;
mod system;

pub use mesh::{PlateMesh, Vertex};
pub use system::{generate_plate, PlateSystem};
