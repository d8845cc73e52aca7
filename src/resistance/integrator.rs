/// Traction and moment-of-traction integrals over the particle surface

use nalgebra::{Matrix3, Point3, SMatrix, Vector3};
use serde::{Deserialize, Serialize};

use super::stress::StressTensor;
use crate::error::Result;
use crate::field::{BoundaryTag, Field, SurfaceMeasure, SurfacePoint};

/// Index pairs (p, q) of the cross product: (r × t)_m = r_p t_q - r_q t_p
pub const CROSS_PAIRS: [(usize, usize); 3] = [(1, 2), (2, 0), (0, 1)];

/// Force-type and torque-type resistance submatrices of one run
///
/// Column d is the response to the unit motion along axis d, row i the
/// Cartesian component of force (or torque) exerted on the fluid by the
/// particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Submatrices {
    pub force: Matrix3<f64>,
    pub torque: Matrix3<f64>,
}

/// Traction σ n' with n' the normal pointing into the fluid
pub fn traction(sigma: &Matrix3<f64>, normal: &Vector3<f64>) -> Vector3<f64> {
    sigma * (-normal)
}

/// Tractions of the three unit-motion flows at a point, as columns
fn tractions<F: Field>(stresses: &[StressTensor<'_, F>; 3], point: &SurfacePoint) -> Result<Matrix3<f64>> {
    let mut t = Matrix3::zeros();
    for (d, stress) in stresses.iter().enumerate() {
        t.set_column(d, &traction(&stress.at(point)?, &point.normal));
    }
    Ok(t)
}

/// Integrand columns 0..3 hold -t_d, columns 3..6 the moment -(r × t_d)
fn integrand(t: &Matrix3<f64>, r: &Point3<f64>) -> SMatrix<f64, 3, 6> {
    let mut value = SMatrix::<f64, 3, 6>::zeros();
    value.fixed_view_mut::<3, 3>(0, 0).copy_from(&(-t));

    for (m, &(p, q)) in CROSS_PAIRS.iter().enumerate() {
        for d in 0..3 {
            value[(m, 3 + d)] = -(r[p] * t[(q, d)] - r[q] * t[(p, d)]);
        }
    }
    value
}

/// Both submatrices from a single pass over the surface
///
/// ```text
/// force[i][d]  = -∫ t_d[i] dS
/// torque[m][d] = -∫ (r_p t_d[q] - r_q t_d[p]) dS   (p, q) = CROSS_PAIRS[m]
/// ```
pub fn integrate_submatrices<F, S>(
    stresses: &[StressTensor<'_, F>; 3],
    measure: &S,
    tag: BoundaryTag,
) -> Result<Submatrices>
where
    F: Field,
    S: SurfaceMeasure,
{
    let both: SMatrix<f64, 3, 6> =
        measure.integrate(tag, |point| Ok(integrand(&tractions(stresses, point)?, &point.position)))?;

    Ok(Submatrices {
        force: both.fixed_view::<3, 3>(0, 0).into_owned(),
        torque: both.fixed_view::<3, 3>(0, 3).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{AnalyticField, SphereSurface};
    use crate::resistance::combiner::DerivedFlow;
    use crate::resistance::stress::stress_tensors;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Flow with uniform pressure `p` and no velocity
    fn hydrostatic(p: f64) -> DerivedFlow<AnalyticField> {
        DerivedFlow {
            velocity: [AnalyticField::zero(), AnalyticField::zero(), AnalyticField::zero()],
            pressure: AnalyticField::constant(p),
        }
    }

    #[test]
    fn test_traction_uses_fluid_side_normal() {
        let sigma = Matrix3::new(1.0, 2.0, 0.0, 2.0, -1.0, 0.5, 0.0, 0.5, 3.0);
        let n = Vector3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(traction(&sigma, &n), Vector3::new(0.0, -0.5, -3.0), epsilon = 1e-15);
    }

    #[test]
    fn test_uniform_pressure_exerts_no_net_force() {
        let flows = [hydrostatic(1.0), hydrostatic(-2.0), hydrostatic(5.0)];
        let stresses = stress_tensors(&flows);
        let sphere = SphereSurface::new(Point3::new(0.3, 0.0, -1.0), 1.5, 9);

        let result = integrate_submatrices(&stresses, &sphere, 9).unwrap();
        assert_relative_eq!(result.force, Matrix3::zeros(), epsilon = 1e-12);
        assert_relative_eq!(result.torque, Matrix3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn test_linear_pressure_gives_buoyancy() {
        // P_d = x_d: -∫ t dS with t = P n = x_d n integrates to V e_d
        let flows: [DerivedFlow<AnalyticField>; 3] = std::array::from_fn(|d| DerivedFlow {
            velocity: [AnalyticField::zero(), AnalyticField::zero(), AnalyticField::zero()],
            pressure: AnalyticField::affine(0.0, Vector3::ith(d, 1.0)),
        });
        let stresses = stress_tensors(&flows);
        let sphere = SphereSurface::unit(1);

        let result = integrate_submatrices(&stresses, &sphere, 1).unwrap();
        assert_relative_eq!(result.force, Matrix3::identity() * (4.0 * PI / 3.0), epsilon = 1e-11);
        assert_relative_eq!(result.torque, Matrix3::zeros(), epsilon = 1e-11);
    }

    /// Sphere that counts how often its points are generated
    struct CountingSphere {
        sphere: SphereSurface,
        calls: AtomicUsize,
    }

    impl SurfaceMeasure for CountingSphere {
        fn surface_points(&self, tag: BoundaryTag) -> Result<Vec<SurfacePoint>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sphere.surface_points(tag)
        }
    }

    #[test]
    fn test_single_pass_over_surface() {
        let flows = [hydrostatic(1.0), hydrostatic(0.0), hydrostatic(2.0)];
        let stresses = stress_tensors(&flows);
        let measure = CountingSphere {
            sphere: SphereSurface::unit(4),
            calls: AtomicUsize::new(0),
        };

        integrate_submatrices(&stresses, &measure, 4).unwrap();
        assert_eq!(measure.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_pressure_moment_about_offset_centre() {
        // P_d = x_d on a sphere centred at c: force V e_d, torque c × V e_d
        let flows: [DerivedFlow<AnalyticField>; 3] = std::array::from_fn(|d| DerivedFlow {
            velocity: [AnalyticField::zero(), AnalyticField::zero(), AnalyticField::zero()],
            pressure: AnalyticField::affine(0.0, Vector3::ith(d, 1.0)),
        });
        let stresses = stress_tensors(&flows);
        let c = Vector3::new(0.5, -1.0, 2.0);
        let sphere = SphereSurface::new(Point3::from(c), 1.0, 2);
        let volume = 4.0 * PI / 3.0;

        let result = integrate_submatrices(&stresses, &sphere, 2).unwrap();
        assert_relative_eq!(result.force, Matrix3::identity() * volume, epsilon = 1e-11);
        for d in 0..3 {
            let expected = c.cross(&Vector3::ith(d, volume));
            assert_relative_eq!(result.torque.column(d).into_owned(), expected, epsilon = 1e-11);
        }
    }
}
