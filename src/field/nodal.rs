/// Lagrange fields stored at the nodes of a Tet10 mesh
///
/// Flow solutions use the Taylor-Hood pair: quadratic velocity components
/// on all ten element nodes and linear pressure on the four vertices.

use std::ops::{Add, Mul, Sub};
use std::sync::Arc;

use nalgebra::{DVector, Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::analytic::AnalyticField;
use super::surface::{CellLocation, SurfacePoint};
use super::{Field, FlowSolution};
use crate::error::{ResistanceError, Result};
use crate::fem::Tet10Basis;
use crate::mesh::{Mesh, Tet10Element};

/// Polynomial order used inside each element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// P2, all ten nodes
    Quadratic,
    /// P1, vertex nodes only; values stored at edge midpoints are ignored
    Linear,
}

/// Scalar field with one value per mesh node
#[derive(Debug, Clone)]
pub struct NodalField {
    mesh: Arc<Mesh>,
    interpolation: Interpolation,
    values: DVector<f64>,
}

impl NodalField {
    /// Field from nodal values; the length must equal the mesh node count
    pub fn from_values(mesh: Arc<Mesh>, interpolation: Interpolation, values: DVector<f64>) -> Result<Self> {
        if values.len() != mesh.num_nodes() {
            return Err(ResistanceError::incompatible(format!(
                "{} nodal values for a mesh with {} nodes",
                values.len(),
                mesh.num_nodes()
            )));
        }
        Ok(Self {
            mesh,
            interpolation,
            values,
        })
    }

    /// Sample `f` at every mesh node
    pub fn interpolate<F>(mesh: Arc<Mesh>, interpolation: Interpolation, f: F) -> Self
    where
        F: Fn(&Point3<f64>) -> f64,
    {
        let values = DVector::from_iterator(mesh.num_nodes(), mesh.geometry.nodes.iter().map(f));
        Self {
            mesh,
            interpolation,
            values,
        }
    }

    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn values(&self) -> &DVector<f64> {
        &self.values
    }

    /// Element, element node coordinates and nodal values for a point
    fn locate(&self, at: &SurfacePoint) -> Result<(CellLocation, [Point3<f64>; 10], [f64; 10])> {
        let cell = at.cell.ok_or_else(|| {
            ResistanceError::incompatible(format!(
                "point {} carries no element, nodal fields need mesh quadrature",
                at.position
            ))
        })?;
        if cell.mesh != self.mesh.id() {
            return Err(ResistanceError::incompatible(format!(
                "point {} belongs to a different mesh than the field",
                at.position
            )));
        }
        let elem: &Tet10Element = self.mesh.element(cell.element).ok_or_else(|| {
            ResistanceError::incompatible(format!(
                "element {} is not part of the field's mesh",
                cell.element
            ))
        })?;

        let nodal = elem.nodes.map(|n| self.values[n]);
        Ok((cell, self.mesh.element_nodes(elem), nodal))
    }
}

impl Add for NodalField {
    type Output = Self;

    /// # Panics
    /// Panics if the fields have different lengths; check
    /// [`Field::compatible_with`] first
    fn add(mut self, rhs: Self) -> Self {
        self.values += rhs.values;
        self
    }
}

impl Sub for NodalField {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self.values -= rhs.values;
        self
    }
}

impl Mul<f64> for NodalField {
    type Output = Self;

    fn mul(mut self, factor: f64) -> Self {
        self.values *= factor;
        self
    }
}

impl Field for NodalField {
    fn compatible_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.mesh, &other.mesh)
            && self.interpolation == other.interpolation
            && self.values.len() == other.values.len()
    }

    fn value(&self, at: &SurfacePoint) -> Result<f64> {
        let (cell, _, nodal) = self.locate(at)?;
        let l = cell.barycentric;

        Ok(match self.interpolation {
            Interpolation::Quadratic => Tet10Basis::evaluate_at_point(&l, &nodal),
            Interpolation::Linear => (0..4).map(|i| l[i] * nodal[i]).sum(),
        })
    }

    fn gradient(&self, at: &SurfacePoint) -> Result<Vector3<f64>> {
        let (cell, coords, nodal) = self.locate(at)?;
        let l = cell.barycentric;
        let degenerate = || ResistanceError::incompatible(format!("element {} is degenerate", cell.element));

        Ok(match self.interpolation {
            Interpolation::Quadratic => {
                let dn = Tet10Basis::shape_derivatives_cartesian(&l, &coords).ok_or_else(degenerate)?;
                (0..10).fold(Vector3::zeros(), |acc, i| acc + dn[i] * nodal[i])
            }
            Interpolation::Linear => {
                let dl = Tet10Basis::linear_derivatives_cartesian(&l, &coords).ok_or_else(degenerate)?;
                (0..4).fold(Vector3::zeros(), |acc, i| acc + dl[i] * nodal[i])
            }
        })
    }
}

/// Taylor-Hood copy of a closed-form solution: quadratic velocity,
/// linear pressure
pub fn sample_solution(mesh: &Arc<Mesh>, solution: &FlowSolution<AnalyticField>) -> FlowSolution<NodalField> {
    let sample = |field: &AnalyticField, interpolation| {
        NodalField::interpolate(mesh.clone(), interpolation, |x| field.evaluate(x))
    };
    FlowSolution::new(
        [
            sample(&solution.velocity[0], Interpolation::Quadratic),
            sample(&solution.velocity[1], Interpolation::Quadratic),
            sample(&solution.velocity[2], Interpolation::Quadratic),
        ],
        sample(&solution.pressure, Interpolation::Linear),
    )
}
