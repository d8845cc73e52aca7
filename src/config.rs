//! Run configuration
//!
//! Reads TOML files describing where the mesh and the simulation records
//! live, which surface is the particle, and which three motions were
//! simulated for each kind of run. Missing sections fall back to the demo
//! setup (see [`RunConfig::default`]).

use std::f64::consts::{E, LN_2, PI, SQRT_2};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ResistanceError, Result};
use crate::field::BoundaryTag;
use crate::motion::{MotionBasis, MotionKind};

/// Main run configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    /// Mesh record (JSON)
    pub mesh: PathBuf,
    /// Tag of the particle surface
    pub particle_surface_tag: BoundaryTag,
    /// Tags of the enclosing box surfaces (no-slip in the simulations)
    pub outer_surface_tags: Vec<BoundaryTag>,
    pub rotational: CaseConfig,
    pub translational: CaseConfig,
}

/// Inputs and output of one kind of run
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CaseConfig {
    /// Simulated motions, one per row (angular or linear velocities)
    pub motions: [[f64; 3]; 3],
    /// Scale each motion to unit length before use
    #[serde(default = "default_normalize")]
    pub normalize: bool,
    /// Simulation records, in the order of `motions`
    pub simulations: [PathBuf; 3],
    /// Report written by the calculation
    pub solution: PathBuf,
}

fn default_normalize() -> bool {
    true
}

impl CaseConfig {
    pub fn basis(&self) -> MotionBasis {
        let basis = MotionBasis::from_rows(self.motions);
        if self.normalize {
            basis.normalized()
        } else {
            basis
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        // Shared by both runs
        let second = [SQRT_2, E * PI, LN_2 * 0.2f64.sqrt()];
        let third = [5f64.ln() * 0.154, PI * 0.1f64.sqrt(), E * 0.142f64.ln()];

        let records = |stem: &str| -> [PathBuf; 3] {
            std::array::from_fn(|k| PathBuf::from(format!("simulation/{}{}.json", stem, k + 1)))
        };

        Self {
            mesh: PathBuf::from("mesh/demo.json"),
            particle_surface_tag: 32,
            outer_surface_tags: vec![21, 23, 25, 27, 29, 31],
            rotational: CaseConfig {
                motions: [[SQRT_2, E, 3.0], second, third],
                normalize: true,
                simulations: records("particleSimRot"),
                solution: PathBuf::from("solution/rot.txt"),
            },
            translational: CaseConfig {
                motions: [[E, PI, 3f64.ln()], second, third],
                normalize: true,
                simulations: records("particleSimTrans"),
                solution: PathBuf::from("solution/trans.txt"),
            },
        }
    }
}

impl RunConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: RunConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn case(&self, kind: MotionKind) -> &CaseConfig {
        match kind {
            MotionKind::Rotational => &self.rotational,
            MotionKind::Translational => &self.translational,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.outer_surface_tags.contains(&self.particle_surface_tag) {
            return Err(ResistanceError::Config(format!(
                "particle surface tag {} is also listed as an outer surface",
                self.particle_surface_tag
            )));
        }
        for kind in [MotionKind::Rotational, MotionKind::Translational] {
            let case = self.case(kind);
            if case.motions.iter().flatten().any(|m| !m.is_finite()) {
                return Err(ResistanceError::Config(format!("non-finite motion in the {} case", kind)));
            }
        }
        Ok(())
    }
}
