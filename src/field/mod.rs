//! Field capability required by the resistance pipeline
//!
//! The pipeline never looks inside a field. It only needs to combine fields
//! linearly, evaluate them and their gradients at surface quadrature points,
//! and check that two fields live on the same discretization.

pub mod analytic;
pub mod nodal;
pub mod surface;

use std::ops::{Add, Mul, Sub};

use nalgebra::Vector3;

use crate::error::Result;

pub use analytic::AnalyticField;
pub use nodal::{sample_solution, Interpolation, NodalField};
pub use surface::{BoundaryTag, CellLocation, SphereSurface, SurfaceMeasure, SurfacePoint};

/// Immutable scalar field over the fluid domain
///
/// Arithmetic consumes its operands and yields a new field; callers are
/// expected to check [`Field::compatible_with`] before combining fields
/// from different sources.
pub trait Field:
    Clone + Send + Sync + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self>
{
    /// Whether `self` and `other` can be combined arithmetically
    fn compatible_with(&self, other: &Self) -> bool;

    /// Field value at a surface point
    fn value(&self, at: &SurfacePoint) -> Result<f64>;

    /// Spatial gradient [∂f/∂x, ∂f/∂y, ∂f/∂z] at a surface point
    fn gradient(&self, at: &SurfacePoint) -> Result<Vector3<f64>>;
}

/// Velocity and pressure computed by the flow solver for one motion
///
/// The pressure follows the solver's convention, which is the negative of
/// the physical pressure.
#[derive(Debug, Clone)]
pub struct FlowSolution<F> {
    /// Cartesian velocity components
    pub velocity: [F; 3],
    pub pressure: F,
}

impl<F> FlowSolution<F> {
    pub fn new(velocity: [F; 3], pressure: F) -> Self {
        Self { velocity, pressure }
    }
}

/// Solver responses to the three motions of a basis, in basis order
pub type FieldSet<F> = [FlowSolution<F>; 3];
