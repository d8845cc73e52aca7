pub mod topology;
pub mod geometry;
pub mod generator;

pub use topology::{Connectivity, Tet10Element};
pub use geometry::{Geometry, Mesh, MeshId, TaggedFace};
pub use generator::BoxMeshGenerator;
