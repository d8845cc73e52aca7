pub mod basis;
pub mod quadrature;
pub mod boundary;

pub use basis::Tet10Basis;
pub use quadrature::{GaussQuadrature, LineQuadrature, TriangleQuadrature};
pub use boundary::{BoundaryFace, Tet10Face};
