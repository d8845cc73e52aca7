//! Momentum balance on a box enclosing the particle
//!
//! The Stokes stress is divergence free, so integrating the traction of
//! the exact sphere flows over a box around the sphere gives the particle's
//! force and torque with opposite sign (the box normal points away from
//! the particle). The flows are sampled onto a P2/P1 box mesh first, which
//! exercises the whole mesh-based path.

use std::f64::consts::PI;
use std::sync::Arc;

use hydresmat::field::sample_solution;
use hydresmat::{compute_submatrices, exact, BoxMeshGenerator, FieldSet, Mesh, MotionBasis, NodalField};
use nalgebra::{Matrix3, Point3};

const ENCLOSURE: u32 = 40;

fn enclosure_mesh() -> Arc<Mesh> {
    let mut mesh = BoxMeshGenerator::generate([12, 12, 12], Point3::new(-3.0, -3.0, -3.0), Point3::new(3.0, 3.0, 3.0));
    let retagged = mesh.tag_boundary(|_| Some(ENCLOSURE));
    assert_eq!(retagged, 6 * 12 * 12 * 2);
    assert_eq!(mesh.boundary_tags(), vec![ENCLOSURE]);
    Arc::new(mesh)
}

fn assert_close(actual: &Matrix3<f64>, expected: &Matrix3<f64>, relative: f64) {
    let error = (actual - expected).amax();
    assert!(
        error <= relative * expected.amax(),
        "error {} too large:\nactual {}\nexpected {}",
        error,
        actual,
        expected
    );
}

#[test]
fn test_translating_sphere_momentum_balance() {
    let mesh = enclosure_mesh();
    let basis = MotionBasis::identity();
    let fields: FieldSet<NodalField> =
        std::array::from_fn(|k| sample_solution(&mesh, &exact::translating_sphere(basis.motion(k))));

    let result = compute_submatrices(&basis, &fields, mesh.as_ref(), ENCLOSURE).unwrap();

    assert_close(&result.force, &(Matrix3::identity() * (-6.0 * PI)), 0.02);
    assert!(result.torque.amax() < 0.02 * 6.0 * PI);
}

#[test]
fn test_rotating_sphere_momentum_balance() {
    let mesh = enclosure_mesh();
    let basis = MotionBasis::from_rows([[1.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 0.0, 1.0]]);
    let fields: FieldSet<NodalField> =
        std::array::from_fn(|k| sample_solution(&mesh, &exact::rotating_sphere(basis.motion(k))));

    let result = compute_submatrices(&basis, &fields, mesh.as_ref(), ENCLOSURE).unwrap();

    assert_close(&result.torque, &(Matrix3::identity() * (-8.0 * PI)), 0.02);
    assert!(result.force.amax() < 0.02 * 8.0 * PI);
}

#[test]
fn test_measure_on_another_mesh_is_rejected() {
    let basis = MotionBasis::identity();
    let field_mesh =
        Arc::new(BoxMeshGenerator::generate([6, 6, 6], Point3::new(-3.0, -3.0, -3.0), Point3::new(3.0, 3.0, 3.0)));
    let measure_mesh = BoxMeshGenerator::generate([6, 6, 6], Point3::new(-5.0, -2.0, -4.0), Point3::new(5.0, 2.0, 4.0));

    let fields: FieldSet<NodalField> =
        std::array::from_fn(|k| sample_solution(&field_mesh, &exact::translating_sphere(basis.motion(k))));

    let result = compute_submatrices(&basis, &fields, &measure_mesh, 21);
    assert!(matches!(result, Err(hydresmat::ResistanceError::FieldIncompatibility(_))));

    // The mesh the fields were sampled on is accepted
    assert!(compute_submatrices(&basis, &fields, field_mesh.as_ref(), 21).is_ok());
}

#[test]
fn test_fields_from_another_mesh_are_rejected() {
    let mesh = enclosure_mesh();
    let other = Arc::new(BoxMeshGenerator::generate([1, 1, 1], Point3::origin(), Point3::new(1.0, 1.0, 1.0)));
    let basis = MotionBasis::identity();

    let mut fields: FieldSet<NodalField> =
        std::array::from_fn(|k| sample_solution(&mesh, &exact::translating_sphere(basis.motion(k))));
    fields[2] = sample_solution(&other, &exact::translating_sphere(basis.motion(2)));

    let result = compute_submatrices(&basis, &fields, mesh.as_ref(), ENCLOSURE);
    assert!(matches!(result, Err(hydresmat::ResistanceError::FieldIncompatibility(_))));
}
