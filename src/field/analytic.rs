/// Closed-form fields
///
/// An [`AnalyticField`] is a linear combination of profiles, each profile
/// returning the value and gradient at a point. Combining two analytic
/// fields concatenates their terms, so arithmetic never loses exactness.

use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::sync::Arc;

use nalgebra::{Point3, Vector3};

use super::surface::SurfacePoint;
use super::Field;
use crate::error::Result;

type Profile = dyn Fn(&Point3<f64>) -> (f64, Vector3<f64>) + Send + Sync;

#[derive(Clone)]
pub struct AnalyticField {
    terms: Vec<(f64, Arc<Profile>)>,
}

impl AnalyticField {
    /// Field from a profile returning `(value, gradient)` at a point
    pub fn new<P>(profile: P) -> Self
    where
        P: Fn(&Point3<f64>) -> (f64, Vector3<f64>) + Send + Sync + 'static,
    {
        Self {
            terms: vec![(1.0, Arc::new(profile))],
        }
    }

    pub fn zero() -> Self {
        Self { terms: Vec::new() }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(move |_| (value, Vector3::zeros()))
    }

    /// f(x) = offset + slope · x
    pub fn affine(offset: f64, slope: Vector3<f64>) -> Self {
        Self::new(move |x| (offset + slope.dot(&x.coords), slope))
    }

    pub fn evaluate(&self, x: &Point3<f64>) -> f64 {
        self.terms.iter().map(|(c, profile)| c * profile(x).0).sum()
    }

    pub fn evaluate_gradient(&self, x: &Point3<f64>) -> Vector3<f64> {
        self.terms
            .iter()
            .fold(Vector3::zeros(), |acc, (c, profile)| acc + profile(x).1 * *c)
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }
}

impl fmt::Debug for AnalyticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coefficients: Vec<f64> = self.terms.iter().map(|(c, _)| *c).collect();
        f.debug_struct("AnalyticField")
            .field("coefficients", &coefficients)
            .finish()
    }
}

impl Add for AnalyticField {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self.terms.extend(rhs.terms);
        self
    }
}

impl Sub for AnalyticField {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + rhs * -1.0
    }
}

impl Mul<f64> for AnalyticField {
    type Output = Self;

    fn mul(mut self, factor: f64) -> Self {
        for (c, _) in self.terms.iter_mut() {
            *c *= factor;
        }
        self
    }
}

impl Field for AnalyticField {
    fn compatible_with(&self, _other: &Self) -> bool {
        true
    }

    fn value(&self, at: &SurfacePoint) -> Result<f64> {
        Ok(self.evaluate(&at.position))
    }

    fn gradient(&self, at: &SurfacePoint) -> Result<Vector3<f64>> {
        Ok(self.evaluate_gradient(&at.position))
    }
}
