//! JSON persistence of meshes and simulation records
//!
//! A simulation record stores one velocity triple and one pressure value
//! per mesh node. Velocity is read back as a quadratic field and pressure
//! as a linear field on the mesh it was written for.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ResistanceError, Result};
use crate::field::{Field, FieldSet, FlowSolution, Interpolation, NodalField};
use crate::mesh::Mesh;

/// On-disk form of one flow solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub velocity: Vec<[f64; 3]>,
    /// Solver-convention pressure
    pub pressure: Vec<f64>,
}

pub fn load_mesh<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mesh: Mesh = serde_json::from_reader(reader)?;
    debug!(
        path = %path.as_ref().display(),
        nodes = mesh.num_nodes(),
        elements = mesh.num_elements(),
        "mesh loaded"
    );
    Ok(mesh)
}

pub fn save_mesh<P: AsRef<Path>>(path: P, mesh: &Mesh) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, mesh)?;
    Ok(())
}

/// Write a solution whose fields all live on the same mesh
pub fn save_solution<P: AsRef<Path>>(path: P, solution: &FlowSolution<NodalField>) -> Result<()> {
    let [u, v, w] = &solution.velocity;
    if !(u.compatible_with(v) && u.compatible_with(w)) {
        return Err(ResistanceError::incompatible("velocity components live on different meshes"));
    }
    if !Arc::ptr_eq(u.mesh(), solution.pressure.mesh()) {
        return Err(ResistanceError::incompatible("pressure and velocity live on different meshes"));
    }

    let record = SimulationRecord {
        velocity: (0..u.values().len())
            .map(|n| [u.values()[n], v.values()[n], w.values()[n]])
            .collect(),
        pressure: solution.pressure.values().iter().copied().collect(),
    };

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, &record)?;
    Ok(())
}

/// Read a solution written for `mesh`
pub fn load_solution<P: AsRef<Path>>(path: P, mesh: &Arc<Mesh>) -> Result<FlowSolution<NodalField>> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let record: SimulationRecord = serde_json::from_reader(reader)?;

    if record.velocity.len() != record.pressure.len() {
        return Err(ResistanceError::incompatible(format!(
            "{}: {} velocity values but {} pressure values",
            path.as_ref().display(),
            record.velocity.len(),
            record.pressure.len()
        )));
    }

    let component = |c: usize| {
        let values = DVector::from_iterator(record.velocity.len(), record.velocity.iter().map(|v| v[c]));
        NodalField::from_values(mesh.clone(), Interpolation::Quadratic, values)
    };
    let velocity = [component(0)?, component(1)?, component(2)?];
    let pressure = NodalField::from_values(mesh.clone(), Interpolation::Linear, DVector::from_vec(record.pressure))?;

    Ok(FlowSolution::new(velocity, pressure))
}

/// Read the three records of a run, in basis order
pub fn load_solutions<P: AsRef<Path>>(paths: &[P; 3], mesh: &Arc<Mesh>) -> Result<FieldSet<NodalField>> {
    Ok([
        load_solution(&paths[0], mesh)?,
        load_solution(&paths[1], mesh)?,
        load_solution(&paths[2], mesh)?,
    ])
}
