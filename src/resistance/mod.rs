//! Hydrodynamic resistance submatrices from three simulated flows
//!
//! Pipeline:
//! 1. [`combiner::combine`] turns the responses to three arbitrary motions
//!    into the responses to the three unit motions.
//! 2. [`stress::StressTensor`] evaluates the viscous stress of each.
//! 3. [`integrator`] integrates traction and its moment over the particle
//!    surface.

pub mod combiner;
pub mod integrator;
pub mod matrix;
pub mod stress;

use tracing::{debug, info};

use crate::error::Result;
use crate::field::{BoundaryTag, Field, FieldSet, SurfaceMeasure};
use crate::motion::MotionBasis;

pub use combiner::{combine, DerivedFlow};
pub use integrator::{integrate_submatrices, traction, Submatrices, CROSS_PAIRS};
pub use matrix::ResistanceMatrix;
pub use stress::{stress_tensors, StressComponent, StressTensor};

/// Force-type and torque-type submatrices for the particle surface `tag`
///
/// `fields[k]` must be the solver response to `basis.motion(k)`. Nothing
/// is retained from the fields once this returns.
pub fn compute_submatrices<F, S>(
    basis: &MotionBasis,
    fields: &FieldSet<F>,
    measure: &S,
    tag: BoundaryTag,
) -> Result<Submatrices>
where
    F: Field,
    S: SurfaceMeasure,
{
    info!(tag, "computing resistance submatrices");

    let flows = combine(basis, fields)?;
    debug!("unit-motion flows derived");

    let stresses = stress_tensors(&flows);
    let result = integrate_submatrices(&stresses, measure, tag)?;

    debug!(force = %result.force, torque = %result.torque, "surface integrals done");
    Ok(result)
}
