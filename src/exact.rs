//! Exact Stokes flows around a unit sphere
//!
//! Unit sphere at the origin in unbounded fluid of unit viscosity, velocity
//! vanishing at infinity. Pressures follow the solver convention (negated
//! physical pressure) so these solutions can stand in for solver output.
//! Inside the sphere the fields continue as the rigid motion with zero
//! pressure.
//!
//! Known resistance: force 6π U and torque 8π Ω, as exerted on the fluid.

use nalgebra::{Matrix3, Point3, Vector3};

use crate::field::{AnalyticField, FlowSolution};

/// Points closer to the centre than this are inside the particle
const INTERIOR_RADIUS: f64 = 1.0 - 1e-9;

/// Sphere translating with velocity `u`
///
/// ```text
/// v = A(r) U + B(r) x (U·x),  A = 3/(4r) + 1/(4r³),  B = 3/(4r³) - 3/(4r⁵)
/// p = 3/2 (U·x) / r³
/// ```
pub fn translating_sphere(u: Vector3<f64>) -> FlowSolution<AnalyticField> {
    let velocity = std::array::from_fn(|i| {
        AnalyticField::new(move |x| {
            let (v, grad) = translating_velocity(&u, x);
            (v[i], grad.row(i).transpose())
        })
    });
    let pressure = AnalyticField::new(move |x| {
        let r = x.coords.norm();
        if r < INTERIOR_RADIUS {
            return (0.0, Vector3::zeros());
        }
        let s = u.dot(&x.coords);
        let r3 = r * r * r;
        let p = 1.5 * s / r3;
        let grad_p = (u / r3 - x.coords * (3.0 * s / (r3 * r * r))) * 1.5;
        (-p, -grad_p)
    });
    FlowSolution::new(velocity, pressure)
}

/// Velocity and its gradient G[i][j] = ∂v_i/∂x_j for a translating sphere
fn translating_velocity(u: &Vector3<f64>, x: &Point3<f64>) -> (Vector3<f64>, Matrix3<f64>) {
    let r = x.coords.norm();
    if r < INTERIOR_RADIUS {
        return (*u, Matrix3::zeros());
    }

    let x = &x.coords;
    let s = u.dot(x);
    let (r2, r3) = (r * r, r * r * r);
    let (r4, r5, r6) = (r2 * r2, r2 * r3, r3 * r3);

    let a = 0.75 / r + 0.25 / r3;
    let b = 0.75 / r3 - 0.75 / r5;
    let da = -0.75 / r2 - 0.75 / r4;
    let db = -2.25 / r4 + 3.75 / r6;

    let v = u * a + x * (b * s);
    let x_hat = x / r;
    // ∂v_i/∂x_j = A' x̂_j U_i + B' x̂_j x_i s + B (δ_ij s + x_i U_j)
    let grad = u * x_hat.transpose() * da
        + x * x_hat.transpose() * (db * s)
        + (Matrix3::identity() * s + x * u.transpose()) * b;
    (v, grad)
}

/// Sphere rotating with angular velocity `omega`
///
/// ```text
/// v = Ω × x / r³,  p = 0
/// ```
pub fn rotating_sphere(omega: Vector3<f64>) -> FlowSolution<AnalyticField> {
    let velocity = std::array::from_fn(|i| {
        AnalyticField::new(move |x| {
            let (v, grad) = rotating_velocity(&omega, x);
            (v[i], grad.row(i).transpose())
        })
    });
    FlowSolution::new(velocity, AnalyticField::zero())
}

fn rotating_velocity(omega: &Vector3<f64>, x: &Point3<f64>) -> (Vector3<f64>, Matrix3<f64>) {
    let r = x.coords.norm();
    let spin = omega.cross_matrix();
    if r < INTERIOR_RADIUS {
        return (spin * x.coords, spin);
    }

    let r3 = r * r * r;
    let v = spin * x.coords / r3;
    // ∂v_i/∂x_j = [Ω]×_ij / r³ - 3 v_i x_j / r²
    let grad = spin / r3 - v * x.coords.transpose() * (3.0 / (r * r));
    (v, grad)
}
