pub mod error;
pub mod linalg;
pub mod motion;
pub mod field;
pub mod mesh;
pub mod fem;
pub mod resistance;
pub mod exact;
pub mod report;
pub mod config;
pub mod io;
pub mod logging;

pub use error::{ResistanceError, Result};
pub use motion::{Motion, MotionBasis, MotionKind};
pub use field::{
    AnalyticField, BoundaryTag, Field, FieldSet, FlowSolution, Interpolation, NodalField, SphereSurface,
    SurfaceMeasure, SurfacePoint,
};
pub use mesh::{BoxMeshGenerator, Mesh, Tet10Element};
pub use fem::{BoundaryFace, GaussQuadrature, Tet10Basis};
pub use resistance::{compute_submatrices, ResistanceMatrix, Submatrices};
pub use report::ResistanceReport;
pub use config::{CaseConfig, RunConfig};
