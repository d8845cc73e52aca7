/// Newtonian viscous stress of a derived flow
///
/// For unit viscosity:
///
/// ```text
/// σ_ab = -P δ_ab + ∂V_a/∂x_b + ∂V_b/∂x_a
/// ```

use nalgebra::{Matrix3, Vector3};

use super::combiner::DerivedFlow;
use crate::error::Result;
use crate::field::{Field, SurfacePoint};
use crate::linalg::Axis;

/// Stress tensor of the flow caused by one unit motion
#[derive(Debug)]
pub struct StressTensor<'a, F> {
    flow: &'a DerivedFlow<F>,
}

impl<'a, F: Field> StressTensor<'a, F> {
    pub fn new(flow: &'a DerivedFlow<F>) -> Self {
        Self { flow }
    }

    /// Full symmetric tensor at a point
    ///
    /// The upper triangle is computed and mirrored into the lower one.
    pub fn at(&self, point: &SurfacePoint) -> Result<Matrix3<f64>> {
        let grad: [Vector3<f64>; 3] = [
            self.flow.velocity[0].gradient(point)?,
            self.flow.velocity[1].gradient(point)?,
            self.flow.velocity[2].gradient(point)?,
        ];
        let pressure = self.flow.pressure.value(point)?;

        let mut sigma = Matrix3::zeros();
        for a in 0..3 {
            for b in a..3 {
                let mut s = grad[a][b] + grad[b][a];
                if a == b {
                    s -= pressure;
                }
                sigma[(a, b)] = s;
                sigma[(b, a)] = s;
            }
        }
        Ok(sigma)
    }

    /// Scalar component σ_ab as a function of position
    pub fn component(&self, a: Axis, b: Axis) -> StressComponent<'a, F> {
        let (a, b) = (a.index(), b.index());
        // σ is symmetric, evaluate through the upper triangle
        let (row, col) = if a <= b { (a, b) } else { (b, a) };
        StressComponent {
            flow: self.flow,
            row,
            col,
        }
    }
}

/// One component σ_ab of a [`StressTensor`]
#[derive(Debug)]
pub struct StressComponent<'a, F> {
    flow: &'a DerivedFlow<F>,
    row: usize,
    col: usize,
}

impl<'a, F: Field> StressComponent<'a, F> {
    pub fn value(&self, point: &SurfacePoint) -> Result<f64> {
        let (a, b) = (self.row, self.col);
        let mut s = self.flow.velocity[a].gradient(point)?[b] + self.flow.velocity[b].gradient(point)?[a];
        if a == b {
            s -= self.flow.pressure.value(point)?;
        }
        Ok(s)
    }
}

/// Stress tensors of the three unit-motion flows
pub fn stress_tensors<F: Field>(flows: &[DerivedFlow<F>; 3]) -> [StressTensor<'_, F>; 3] {
    [
        StressTensor::new(&flows[0]),
        StressTensor::new(&flows[1]),
        StressTensor::new(&flows[2]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::AnalyticField;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn at(x: f64, y: f64, z: f64) -> SurfacePoint {
        SurfacePoint {
            position: Point3::new(x, y, z),
            normal: Vector3::x(),
            weight: 1.0,
            cell: None,
        }
    }

    /// V = (x y, -y z, x² + z), P = 2 + x
    fn sheared_flow() -> DerivedFlow<AnalyticField> {
        DerivedFlow {
            velocity: [
                AnalyticField::new(|p| (p.x * p.y, Vector3::new(p.y, p.x, 0.0))),
                AnalyticField::new(|p| (-p.y * p.z, Vector3::new(0.0, -p.z, -p.y))),
                AnalyticField::new(|p| (p.x * p.x + p.z, Vector3::new(2.0 * p.x, 0.0, 1.0))),
            ],
            pressure: AnalyticField::affine(2.0, Vector3::x()),
        }
    }

    #[test]
    fn test_stress_values() {
        let flow = sheared_flow();
        let sigma = StressTensor::new(&flow).at(&at(1.0, 2.0, 3.0)).unwrap();

        // ∇V rows: (2, 1, 0), (0, -3, -2), (2, 0, 1); P = 3
        let expected = Matrix3::new(
            2.0 * 2.0 - 3.0, 1.0, 2.0,
            1.0, 2.0 * -3.0 - 3.0, -2.0,
            2.0, -2.0, 2.0 * 1.0 - 3.0,
        );
        assert_relative_eq!(sigma, expected, epsilon = 1e-14);
    }

    #[test]
    fn test_stress_is_symmetric() {
        let flow = sheared_flow();
        let stress = StressTensor::new(&flow);

        for p in [at(0.1, -0.4, 2.0), at(-3.0, 1.5, 0.25)] {
            let sigma = stress.at(&p).unwrap();
            assert_relative_eq!(sigma, sigma.transpose(), epsilon = 1e-15);

            for a in Axis::ALL {
                for b in Axis::ALL {
                    let component = stress.component(a, b).value(&p).unwrap();
                    assert_relative_eq!(component, sigma[(a.index(), b.index())], epsilon = 1e-14);
                    assert_relative_eq!(component, stress.component(b, a).value(&p).unwrap(), epsilon = 1e-15);
                }
            }
        }
    }

    #[test]
    fn test_rigid_rotation_is_stress_free() {
        // V = ω × x has an antisymmetric gradient
        let omega = Vector3::new(0.3, -1.0, 2.0);
        let flow = DerivedFlow {
            velocity: [
                AnalyticField::new(move |p| (omega.cross(&p.coords).x, Vector3::new(0.0, -omega.z, omega.y))),
                AnalyticField::new(move |p| (omega.cross(&p.coords).y, Vector3::new(omega.z, 0.0, -omega.x))),
                AnalyticField::new(move |p| (omega.cross(&p.coords).z, Vector3::new(-omega.y, omega.x, 0.0))),
            ],
            pressure: AnalyticField::zero(),
        };
        let sigma = StressTensor::new(&flow).at(&at(1.0, -2.0, 0.5)).unwrap();
        assert_relative_eq!(sigma, Matrix3::zeros(), epsilon = 1e-15);
    }
}
