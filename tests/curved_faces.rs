//! Surface quadrature on Tet10 elements with bowed edges

use approx::assert_relative_eq;
use hydresmat::mesh::{Mesh, Tet10Element};
use hydresmat::{GaussQuadrature, SurfaceMeasure, Tet10Basis};
use nalgebra::{Point3, Vector3};

const BOTTOM: u32 = 1;
const FRONT: u32 = 2;

/// Reference tetrahedron with its z = 0 face tagged BOTTOM and y = 0 face
/// tagged FRONT
fn reference_tet() -> Mesh {
    let mut mesh = Mesh::new();
    let coords = [
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, 0.0, 1.0),
        (0.5, 0.0, 0.0),
        (0.5, 0.5, 0.0),
        (0.0, 0.5, 0.0),
        (0.0, 0.0, 0.5),
        (0.5, 0.0, 0.5),
        (0.0, 0.5, 0.5),
    ];
    let mut nodes = [0; 10];
    for (i, &(x, y, z)) in coords.iter().enumerate() {
        nodes[i] = mesh.geometry.add_node(x, y, z);
    }
    mesh.connectivity.add_element(Tet10Element::new(nodes));

    let tagged = mesh.tag_boundary(|c| {
        if c.z.abs() < 1e-12 {
            Some(BOTTOM)
        } else if c.y.abs() < 1e-12 {
            Some(FRONT)
        } else {
            None
        }
    });
    assert_eq!(tagged, 2);
    mesh
}

fn element_volume(mesh: &Mesh) -> f64 {
    let elem = mesh.element(0).unwrap();
    let nodes = mesh.element_nodes(elem);
    let quad = GaussQuadrature::tet_4point();
    quad.points
        .iter()
        .zip(quad.weights.iter())
        .map(|(qp, w)| w * Tet10Basis::jacobian(qp, &nodes).determinant().abs())
        .sum()
}

#[test]
fn test_straight_element() {
    let mesh = reference_tet();

    assert_relative_eq!(element_volume(&mesh), 1.0 / 6.0, epsilon = 1e-12);
    assert_relative_eq!(mesh.area(BOTTOM).unwrap(), 0.5, epsilon = 1e-12);
    for p in mesh.surface_points(BOTTOM).unwrap() {
        assert_relative_eq!(p.normal, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-12);
    }
}

#[test]
fn test_edge_bowed_within_face_plane() {
    let mut mesh = reference_tet();
    // Midside node of the (0, 1) edge, pushed out of the element in -y
    mesh.geometry.nodes[4] = Point3::new(0.5, -0.1, 0.0);

    // The bottom face stays planar and gains a parabolic segment of area
    // 2/3 * edge length * offset
    assert_relative_eq!(mesh.area(BOTTOM).unwrap(), 0.5 + 2.0 / 3.0 * 0.1, epsilon = 1e-12);
    for p in mesh.surface_points(BOTTOM).unwrap() {
        assert_relative_eq!(p.normal, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-12);
    }

    assert!(element_volume(&mesh) > 1.0 / 6.0, "bowing outward should increase volume");
}

#[test]
fn test_curved_face_normals() {
    let mut mesh = reference_tet();
    mesh.geometry.nodes[4] = Point3::new(0.5, -0.1, 0.0);

    // The front face is no longer planar: normals tilt but stay unit and
    // keep pointing out of the element
    let points = mesh.surface_points(FRONT).unwrap();
    assert!(mesh.area(FRONT).unwrap() > 0.5);
    let mut tilted = false;
    for p in &points {
        assert_relative_eq!(p.normal.norm(), 1.0, epsilon = 1e-12);
        assert!(p.normal.y < 0.0);
        tilted |= p.normal.x.abs() > 1e-6;
    }
    assert!(tilted);
}
