/// Boundary-surface quadrature
///
/// A surface measure turns a boundary tag into quadrature points carrying
/// position, normal, weight and (for mesh surfaces) the element the point
/// belongs to. Integration is a weighted parallel sum over those points.

use std::f64::consts::PI;

use nalgebra::{Point3, SMatrix, Vector3};
use rayon::prelude::*;

use crate::error::{ResistanceError, Result};
use crate::fem::quadrature::LineQuadrature;
use crate::mesh::MeshId;

/// Identifier of a tagged boundary surface (physical group id of the mesh)
pub type BoundaryTag = u32;

/// Element containing a surface point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLocation {
    /// Mesh the element index refers to
    pub mesh: MeshId,
    /// Element index in the mesh connectivity
    pub element: usize,
    /// Barycentric coordinates [L0, L1, L2, L3] inside that element
    pub barycentric: [f64; 4],
}

/// Quadrature point on a boundary surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    /// Spatial position r
    pub position: Point3<f64>,
    /// Unit normal pointing out of the fluid domain
    pub normal: Vector3<f64>,
    /// Quadrature weight times the surface Jacobian
    pub weight: f64,
    /// Owning element, for fields stored on a mesh
    pub cell: Option<CellLocation>,
}

/// Surface-integration capability of a mesh or analytic geometry
pub trait SurfaceMeasure {
    /// Quadrature points covering the surface tagged `tag`
    fn surface_points(&self, tag: BoundaryTag) -> Result<Vec<SurfacePoint>>;

    /// ∫ integrand dS over the surface tagged `tag`
    ///
    /// Points are evaluated in parallel; the summation order is unspecified.
    fn integrate<const R: usize, const C: usize, G>(
        &self,
        tag: BoundaryTag,
        integrand: G,
    ) -> Result<SMatrix<f64, R, C>>
    where
        G: Fn(&SurfacePoint) -> Result<SMatrix<f64, R, C>> + Sync + Send,
    {
        let points = self.surface_points(tag)?;

        points
            .par_iter()
            .map(|point| integrand(point).map(|value| value * point.weight))
            .try_reduce(SMatrix::zeros, |a, b| Ok(a + b))
    }

    /// Area of the surface tagged `tag`
    fn area(&self, tag: BoundaryTag) -> Result<f64> {
        Ok(self.surface_points(tag)?.iter().map(|p| p.weight).sum())
    }
}

/// Sphere immersed in fluid, integrated with Gauss-Legendre in cos θ and
/// the trapezoidal rule in φ
///
/// The fluid lies outside the sphere, so normals point towards the centre.
/// Polynomial integrands of degree below `2 * n_polar` in cos θ and below
/// `n_azimuth` in φ are integrated to round-off.
#[derive(Debug, Clone)]
pub struct SphereSurface {
    pub center: Point3<f64>,
    pub radius: f64,
    pub tag: BoundaryTag,
    n_polar: usize,
    n_azimuth: usize,
}

impl SphereSurface {
    pub fn new(center: Point3<f64>, radius: f64, tag: BoundaryTag) -> Self {
        Self {
            center,
            radius,
            tag,
            n_polar: 16,
            n_azimuth: 32,
        }
    }

    /// Unit sphere at the origin
    pub fn unit(tag: BoundaryTag) -> Self {
        Self::new(Point3::origin(), 1.0, tag)
    }

    pub fn with_resolution(mut self, n_polar: usize, n_azimuth: usize) -> Self {
        self.n_polar = n_polar.max(1);
        self.n_azimuth = n_azimuth.max(1);
        self
    }
}

impl SurfaceMeasure for SphereSurface {
    fn surface_points(&self, tag: BoundaryTag) -> Result<Vec<SurfacePoint>> {
        if tag != self.tag {
            return Err(ResistanceError::UnknownSurfaceTag(tag));
        }

        let polar = LineQuadrature::gauss_legendre(self.n_polar);
        let d_phi = 2.0 * PI / self.n_azimuth as f64;
        let r2 = self.radius * self.radius;

        let mut points = Vec::with_capacity(self.n_polar * self.n_azimuth);
        for (&cos_theta, &w) in polar.points.iter().zip(polar.weights.iter()) {
            let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
            for k in 0..self.n_azimuth {
                let phi = k as f64 * d_phi;
                let radial = Vector3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta);
                points.push(SurfacePoint {
                    position: self.center + radial * self.radius,
                    normal: -radial,
                    weight: w * d_phi * r2,
                    cell: None,
                });
            }
        }
        Ok(points)
    }
}
