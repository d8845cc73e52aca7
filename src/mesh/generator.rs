/// Structured Tet10 box meshes
///
/// Each hexahedral cell is split into 6 tetrahedra around its v000 → v111
/// diagonal, which keeps neighbouring cells conforming. Edge midpoints are
/// shared between elements.

use std::collections::HashMap;

use nalgebra::{Point3, Vector3};

use super::{Mesh, Tet10Element};
use crate::field::BoundaryTag;

pub struct BoxMeshGenerator;

impl BoxMeshGenerator {
    /// Surface tags of the six box sides, ordered x-, x+, y-, y+, z-, z+
    pub const DEFAULT_SIDE_TAGS: [BoundaryTag; 6] = [21, 23, 25, 27, 29, 31];

    /// Generate the box [lower, upper] with `n` cells per direction and
    /// tag its sides with [`Self::DEFAULT_SIDE_TAGS`]
    pub fn generate(n: [usize; 3], lower: Point3<f64>, upper: Point3<f64>) -> Mesh {
        Self::generate_tagged(n, lower, upper, Self::DEFAULT_SIDE_TAGS)
    }

    /// Generate the box [lower, upper] and tag its sides with `side_tags`
    /// (x-, x+, y-, y+, z-, z+)
    pub fn generate_tagged(
        n: [usize; 3],
        lower: Point3<f64>,
        upper: Point3<f64>,
        side_tags: [BoundaryTag; 6],
    ) -> Mesh {
        let [nx, ny, nz] = n;
        let mut mesh = Mesh::new();

        let extent = upper - lower;
        let dx = extent.x / nx as f64;
        let dy = extent.y / ny as f64;
        let dz = extent.z / nz as f64;

        // Create structured vertex grid
        let mut vertex_map = HashMap::new();
        for iz in 0..=nz {
            for iy in 0..=ny {
                for ix in 0..=nx {
                    let node_id = mesh.geometry.add_node(
                        lower.x + ix as f64 * dx,
                        lower.y + iy as f64 * dy,
                        lower.z + iz as f64 * dz,
                    );
                    vertex_map.insert((ix, iy, iz), node_id);
                }
            }
        }

        let mut edge_cache: HashMap<(usize, usize), usize> = HashMap::new();

        for iz in 0..nz {
            for iy in 0..ny {
                for ix in 0..nx {
                    Self::subdivide_hex_6tet(&mut mesh, &vertex_map, &mut edge_cache, ix, iy, iz);
                }
            }
        }

        let tol = 1e-9 * extent.norm();
        mesh.tag_boundary(|c| {
            let sides = [
                (c.x - lower.x).abs(),
                (c.x - upper.x).abs(),
                (c.y - lower.y).abs(),
                (c.y - upper.y).abs(),
                (c.z - lower.z).abs(),
                (c.z - upper.z).abs(),
            ];
            sides.iter().position(|&d| d < tol).map(|side| side_tags[side])
        });

        mesh
    }

    fn subdivide_hex_6tet(
        mesh: &mut Mesh,
        vertex_map: &HashMap<(usize, usize, usize), usize>,
        edge_cache: &mut HashMap<(usize, usize), usize>,
        ix: usize,
        iy: usize,
        iz: usize,
    ) {
        let v000 = vertex_map[&(ix, iy, iz)];
        let v100 = vertex_map[&(ix + 1, iy, iz)];
        let v010 = vertex_map[&(ix, iy + 1, iz)];
        let v110 = vertex_map[&(ix + 1, iy + 1, iz)];
        let v001 = vertex_map[&(ix, iy, iz + 1)];
        let v101 = vertex_map[&(ix + 1, iy, iz + 1)];
        let v011 = vertex_map[&(ix, iy + 1, iz + 1)];
        let v111 = vertex_map[&(ix + 1, iy + 1, iz + 1)];

        let tets = [
            (v000, v100, v110, v111),
            (v000, v100, v111, v101),
            (v000, v010, v110, v111),
            (v000, v010, v111, v011),
            (v000, v001, v111, v101),
            (v000, v001, v111, v011),
        ];

        for &(v0, v1, v2, v3) in &tets {
            Self::create_tet10(mesh, edge_cache, v0, v1, v2, v3);
        }
    }

    fn create_tet10(
        mesh: &mut Mesh,
        edge_cache: &mut HashMap<(usize, usize), usize>,
        v0: usize,
        v1: usize,
        v2: usize,
        v3: usize,
    ) {
        // Swap v2 and v3 if inverted: det(J) = (v1-v0) · ((v2-v0) × (v3-v0))
        let p0 = mesh.geometry.nodes[v0];
        let e1: Vector3<f64> = mesh.geometry.nodes[v1] - p0;
        let e2: Vector3<f64> = mesh.geometry.nodes[v2] - p0;
        let e3: Vector3<f64> = mesh.geometry.nodes[v3] - p0;
        let (v2, v3) = if e1.dot(&e2.cross(&e3)) < 0.0 {
            (v3, v2)
        } else {
            (v2, v3)
        };

        let mut midpoint = |a: usize, b: usize| -> usize {
            let key = if a < b { (a, b) } else { (b, a) };
            *edge_cache.entry(key).or_insert_with(|| {
                let m = nalgebra::center(&mesh.geometry.nodes[a], &mesh.geometry.nodes[b]);
                mesh.geometry.add_node(m.x, m.y, m.z)
            })
        };

        let e01 = midpoint(v0, v1);
        let e12 = midpoint(v1, v2);
        let e20 = midpoint(v2, v0);
        let e03 = midpoint(v0, v3);
        let e13 = midpoint(v1, v3);
        let e23 = midpoint(v2, v3);

        // Node ordering: [v0, v1, v2, v3, e01, e12, e20, e03, e13, e23]
        mesh.connectivity
            .add_element(Tet10Element::new([v0, v1, v2, v3, e01, e12, e20, e03, e13, e23]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fem::Tet10Basis;
    use approx::assert_relative_eq;

    fn unit_box(n: usize) -> Mesh {
        BoxMeshGenerator::generate([n, n, n], Point3::origin(), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_6tet_subdivision_count() {
        assert_eq!(unit_box(1).num_elements(), 6);
        assert_eq!(unit_box(2).num_elements(), 48);
    }

    #[test]
    fn test_no_duplicate_nodes() {
        let mesh = unit_box(2);

        let mut positions = std::collections::HashSet::new();
        for node in &mesh.geometry.nodes {
            let key = (
                (node.x * 1000.0).round() as i64,
                (node.y * 1000.0).round() as i64,
                (node.z * 1000.0).round() as i64,
            );
            assert!(positions.insert(key), "Duplicate node at {:?}", node);
        }
        // (2·2 + 1)³ vertices and midpoints of a conforming P2 mesh
        assert_eq!(mesh.num_nodes(), 125);
    }

    #[test]
    fn test_positive_orientation_and_volume() {
        let mesh = BoxMeshGenerator::generate([2, 3, 1], Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 1.5, 0.5));

        let mut volume = 0.0;
        for elem in &mesh.connectivity.tet10_elements {
            let nodes = mesh.element_nodes(elem);
            let j = Tet10Basis::jacobian(&[0.25; 4], &nodes);
            assert!(j.determinant() > 0.0);
            volume += Tet10Basis::element_volume(&nodes);
        }
        assert_relative_eq!(volume, 2.0 * 1.5 * 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_sides_are_tagged() {
        let mesh = unit_box(2);

        // Each side: 2×2 cells, 2 triangles per cell face
        for tag in BoxMeshGenerator::DEFAULT_SIDE_TAGS {
            assert_eq!(mesh.faces_with_tag(tag).count(), 8, "tag {}", tag);
        }
        assert_eq!(mesh.boundary.len(), 48);
        assert_eq!(mesh.exterior_faces().len(), 48);
        assert_eq!(mesh.boundary_tags(), BoxMeshGenerator::DEFAULT_SIDE_TAGS.to_vec());
    }
}
