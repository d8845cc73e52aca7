/// Recombination of three simulated responses into unit-motion responses
///
/// With the motions m_k as rows of M, the response to the unit motion e_d
/// is Σ_k c_k (u_k, p_k) where Mᵗ c = e_d. The coefficients are never
/// formed: Cramer's rule is applied with the fields themselves as the
/// right-hand side, so the numerator is a determinant whose replaced row
/// holds fields.

use tracing::debug;

use crate::error::{ResistanceError, Result};
use crate::field::{Field, FieldSet};
use crate::linalg::{det3_replacing_row, Axis};
use crate::motion::MotionBasis;

/// Flow caused by a unit motion along one canonical direction
///
/// Unlike [`crate::field::FlowSolution`], the pressure carries the
/// physical sign.
#[derive(Debug, Clone)]
pub struct DerivedFlow<F> {
    pub velocity: [F; 3],
    pub pressure: F,
}

/// Responses to the unit motions e_0, e_1, e_2, in that order
///
/// Fails with [`ResistanceError::FieldIncompatibility`] if the fields do
/// not share a discretization and with [`ResistanceError::DegenerateBasis`]
/// if the motions are linearly dependent. Both checks run before any
/// arithmetic.
pub fn combine<F: Field>(basis: &MotionBasis, fields: &FieldSet<F>) -> Result<[DerivedFlow<F>; 3]> {
    check_compatibility(fields)?;

    let denominator = -basis.checked_determinant()?;
    let scale = -1.0 / denominator;
    let mt = basis.transposed();

    // Solver pressure is the negative of the physical pressure
    let pressures = [
        fields[0].pressure.clone() * -1.0,
        fields[1].pressure.clone() * -1.0,
        fields[2].pressure.clone() * -1.0,
    ];

    debug!(denominator, "combining simulated flows");

    Ok(Axis::ALL.map(|d| {
        let velocity = std::array::from_fn(|c| {
            let column = [
                fields[0].velocity[c].clone(),
                fields[1].velocity[c].clone(),
                fields[2].velocity[c].clone(),
            ];
            det3_replacing_row(&mt, d, column) * scale
        });
        let pressure = det3_replacing_row(&mt, d, pressures.clone()) * scale;

        DerivedFlow { velocity, pressure }
    }))
}

fn check_compatibility<F: Field>(fields: &FieldSet<F>) -> Result<()> {
    let reference_velocity = &fields[0].velocity[0];
    let reference_pressure = &fields[0].pressure;

    for (k, solution) in fields.iter().enumerate() {
        for (c, component) in solution.velocity.iter().enumerate() {
            if !component.compatible_with(reference_velocity) {
                return Err(ResistanceError::incompatible(format!(
                    "velocity component {} of simulation {} does not match simulation 1",
                    c + 1,
                    k + 1
                )));
            }
        }
        if !solution.pressure.compatible_with(reference_pressure) {
            return Err(ResistanceError::incompatible(format!(
                "pressure of simulation {} does not match simulation 1",
                k + 1
            )));
        }
    }
    Ok(())
}
