//! Rigid-body motions used as particle boundary conditions
//!
//! A run simulates three motions of one kind (all rotational or all
//! translational). The three motions form a [`MotionBasis`] that the
//! linear combiner inverts to recover the responses to unit motions.

use std::fmt;
use std::str::FromStr;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{ResistanceError, Result};
use crate::linalg::det3;

/// Angular or linear velocity of the particle
pub type Motion = Vector3<f64>;

/// Kind of rigid motion simulated in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionKind {
    /// Particle rotates with angular velocity ω; boundary velocity ω × x
    Rotational,
    /// Particle translates with velocity U; boundary velocity U
    Translational,
}

impl MotionKind {
    /// Report labels for the (force-type, torque-type) submatrices
    ///
    /// Rotational runs yield D (the transpose of C) and Omega,
    /// translational runs yield K and C.
    pub fn labels(self) -> (&'static str, &'static str) {
        match self {
            MotionKind::Rotational => ("D", "Omega"),
            MotionKind::Translational => ("K", "C"),
        }
    }

    /// Short command-line name
    pub fn as_str(self) -> &'static str {
        match self {
            MotionKind::Rotational => "rot",
            MotionKind::Translational => "trans",
        }
    }

    /// Velocity prescribed at a particle-surface point `x` for `motion`
    ///
    /// This is the Dirichlet data the external flow solver imposes on the
    /// particle surface.
    pub fn boundary_velocity(self, motion: &Motion, x: &Point3<f64>) -> Vector3<f64> {
        match self {
            MotionKind::Rotational => motion.cross(&x.coords),
            MotionKind::Translational => *motion,
        }
    }
}

impl FromStr for MotionKind {
    type Err = ResistanceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rot" => Ok(MotionKind::Rotational),
            "trans" => Ok(MotionKind::Translational),
            _ => Err(ResistanceError::InvalidMotionKind(s.to_string())),
        }
    }
}

impl fmt::Display for MotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three simulated motions, stored as the rows of a 3×3 matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionBasis {
    rows: [[f64; 3]; 3],
}

impl MotionBasis {
    /// Relative threshold below which the determinant counts as zero
    ///
    /// Scaled by the Hadamard bound ‖m0‖‖m1‖‖m2‖ so the check does not
    /// depend on the magnitude of the motions.
    pub const DEGENERACY_TOLERANCE: f64 = 1e-12;

    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }

    pub fn from_motions(motions: [Motion; 3]) -> Self {
        let row = |m: &Motion| [m.x, m.y, m.z];
        Self {
            rows: [row(&motions[0]), row(&motions[1]), row(&motions[2])],
        }
    }

    pub fn identity() -> Self {
        Self::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Scale every motion to unit length
    ///
    /// Zero motions are left untouched; they make the basis degenerate
    /// anyway.
    pub fn normalized(&self) -> Self {
        let mut rows = self.rows;
        for row in rows.iter_mut() {
            let norm = Vector3::from(*row).norm();
            if norm > 0.0 {
                for entry in row.iter_mut() {
                    *entry /= norm;
                }
            }
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[[f64; 3]; 3] {
        &self.rows
    }

    pub fn motion(&self, k: usize) -> Motion {
        Vector3::from(self.rows[k])
    }

    /// Transposed basis (columns are the motions)
    pub fn transposed(&self) -> [[f64; 3]; 3] {
        let r = &self.rows;
        [
            [r[0][0], r[1][0], r[2][0]],
            [r[0][1], r[1][1], r[2][1]],
            [r[0][2], r[1][2], r[2][2]],
        ]
    }

    pub fn determinant(&self) -> f64 {
        det3(&self.rows)
    }

    /// Determinant, or [`ResistanceError::DegenerateBasis`] when the motions
    /// are linearly dependent
    pub fn checked_determinant(&self) -> Result<f64> {
        let det = self.determinant();
        let scale: f64 = (0..3).map(|k| self.motion(k).norm()).product();

        if !det.is_finite() || det.abs() <= Self::DEGENERACY_TOLERANCE * scale {
            return Err(ResistanceError::DegenerateBasis { determinant: det });
        }
        Ok(det)
    }
}

impl From<[[f64; 3]; 3]> for MotionBasis {
    fn from(rows: [[f64; 3]; 3]) -> Self {
        Self::from_rows(rows)
    }
}
