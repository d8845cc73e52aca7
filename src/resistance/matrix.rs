/// Grand resistance matrix of a particle
///
/// ```text
/// | F |   | K  D     | | U |
/// | T | = | C  Omega | | ω |
/// ```
///
/// K and C come from the translational run, D and Omega from the
/// rotational run. For a Stokes flow the matrix is symmetric, so D = Cᵀ.

use nalgebra::{Matrix3, Matrix6};
use serde::{Deserialize, Serialize};

use super::integrator::Submatrices;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResistanceMatrix {
    values: Matrix6<f64>,
}

impl ResistanceMatrix {
    /// Combine the submatrices of a rotational and a translational run
    pub fn assemble(rotational: &Submatrices, translational: &Submatrices) -> Self {
        let mut values = Matrix6::zeros();
        values.fixed_view_mut::<3, 3>(0, 0).copy_from(&translational.force);
        values.fixed_view_mut::<3, 3>(3, 0).copy_from(&translational.torque);
        values.fixed_view_mut::<3, 3>(0, 3).copy_from(&rotational.force);
        values.fixed_view_mut::<3, 3>(3, 3).copy_from(&rotational.torque);
        Self { values }
    }

    pub fn matrix(&self) -> &Matrix6<f64> {
        &self.values
    }

    pub fn k(&self) -> Matrix3<f64> {
        self.values.fixed_view::<3, 3>(0, 0).into_owned()
    }

    pub fn c(&self) -> Matrix3<f64> {
        self.values.fixed_view::<3, 3>(3, 0).into_owned()
    }

    pub fn d(&self) -> Matrix3<f64> {
        self.values.fixed_view::<3, 3>(0, 3).into_owned()
    }

    pub fn omega(&self) -> Matrix3<f64> {
        self.values.fixed_view::<3, 3>(3, 3).into_owned()
    }

    /// max |D - Cᵀ|, zero up to discretization error
    pub fn coupling_asymmetry(&self) -> f64 {
        (self.d() - self.c().transpose()).amax()
    }
}
