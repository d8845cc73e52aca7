use std::f64::consts::PI;

use approx::assert_relative_eq;
use hydresmat::{
    compute_submatrices, exact, AnalyticField, FieldSet, MotionBasis, MotionKind, ResistanceError,
    ResistanceMatrix, RunConfig, SphereSurface,
};
use nalgebra::{Matrix3, Vector3};

const PARTICLE: u32 = 32;

fn translational_fields(basis: &MotionBasis) -> FieldSet<AnalyticField> {
    std::array::from_fn(|k| exact::translating_sphere(basis.motion(k)))
}

fn rotational_fields(basis: &MotionBasis) -> FieldSet<AnalyticField> {
    std::array::from_fn(|k| exact::rotating_sphere(basis.motion(k)))
}

#[test]
fn test_translating_sphere_stokes_drag() {
    let basis = MotionBasis::identity();
    let sphere = SphereSurface::unit(PARTICLE);

    let result = compute_submatrices(&basis, &translational_fields(&basis), &sphere, PARTICLE).unwrap();

    assert_relative_eq!(result.force, Matrix3::identity() * (6.0 * PI), epsilon = 1e-9);
    assert_relative_eq!(result.torque, Matrix3::zeros(), epsilon = 1e-9);
}

#[test]
fn test_rotating_sphere_torque() {
    let basis = MotionBasis::identity();
    let sphere = SphereSurface::unit(PARTICLE);

    let result = compute_submatrices(&basis, &rotational_fields(&basis), &sphere, PARTICLE).unwrap();

    assert_relative_eq!(result.torque, Matrix3::identity() * (8.0 * PI), epsilon = 1e-9);
    assert_relative_eq!(result.force, Matrix3::zeros(), epsilon = 1e-9);
}

#[test]
fn test_demo_bases_give_the_same_matrices() {
    let config = RunConfig::default();
    let sphere = SphereSurface::unit(PARTICLE);

    let rot_basis = config.case(MotionKind::Rotational).basis();
    let rot = compute_submatrices(&rot_basis, &rotational_fields(&rot_basis), &sphere, PARTICLE).unwrap();
    assert_relative_eq!(rot.torque, Matrix3::identity() * (8.0 * PI), epsilon = 1e-8);
    assert_relative_eq!(rot.force, Matrix3::zeros(), epsilon = 1e-8);

    let trans_basis = config.case(MotionKind::Translational).basis();
    let trans = compute_submatrices(&trans_basis, &translational_fields(&trans_basis), &sphere, PARTICLE).unwrap();
    assert_relative_eq!(trans.force, Matrix3::identity() * (6.0 * PI), epsilon = 1e-8);
    assert_relative_eq!(trans.torque, Matrix3::zeros(), epsilon = 1e-8);
}

#[test]
fn test_unnormalized_basis() {
    let basis = MotionBasis::from_motions([
        Vector3::new(2.0, 0.5, 0.0),
        Vector3::new(-1.0, 3.0, 0.25),
        Vector3::new(0.0, 0.1, -0.7),
    ]);
    let sphere = SphereSurface::unit(PARTICLE);

    let result = compute_submatrices(&basis, &translational_fields(&basis), &sphere, PARTICLE).unwrap();
    assert_relative_eq!(result.force, Matrix3::identity() * (6.0 * PI), epsilon = 1e-8);
}

#[test]
fn test_grand_resistance_matrix() {
    let basis = MotionBasis::identity();
    let sphere = SphereSurface::unit(PARTICLE);

    let rot = compute_submatrices(&basis, &rotational_fields(&basis), &sphere, PARTICLE).unwrap();
    let trans = compute_submatrices(&basis, &translational_fields(&basis), &sphere, PARTICLE).unwrap();
    let grand = ResistanceMatrix::assemble(&rot, &trans);

    assert_relative_eq!(grand.k(), Matrix3::identity() * (6.0 * PI), epsilon = 1e-9);
    assert_relative_eq!(grand.omega(), Matrix3::identity() * (8.0 * PI), epsilon = 1e-9);
    assert!(grand.coupling_asymmetry() < 1e-9);

    let m = grand.matrix();
    assert_relative_eq!(*m, m.transpose(), epsilon = 1e-9);
}

#[test]
fn test_degenerate_basis_is_rejected() {
    let basis = MotionBasis::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [2.0, -3.0, 0.0]]);
    let sphere = SphereSurface::unit(PARTICLE);

    let result = compute_submatrices(&basis, &translational_fields(&basis), &sphere, PARTICLE);
    assert!(matches!(result, Err(ResistanceError::DegenerateBasis { .. })));
}

#[test]
fn test_unknown_particle_tag() {
    let basis = MotionBasis::identity();
    let sphere = SphereSurface::unit(PARTICLE);

    let result = compute_submatrices(&basis, &translational_fields(&basis), &sphere, 33);
    assert!(matches!(result, Err(ResistanceError::UnknownSurfaceTag(33))));
}
