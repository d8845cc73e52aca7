/// Boundary faces of Tet10 meshes and their surface quadrature
///
/// Each boundary face is a 6-node quadratic triangle. Quadrature points
/// carry the outward normal of the owning element, which for a fluid mesh
/// points out of the fluid domain.

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::basis::Tet10Basis;
use super::quadrature::TriangleQuadrature;
use crate::error::{ResistanceError, Result};
use crate::field::{BoundaryTag, CellLocation, SurfaceMeasure, SurfacePoint};
use crate::mesh::{Mesh, Tet10Element};

/// Boundary face identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundaryFace {
    /// Element index
    pub element_id: usize,
    /// Local face index (0-3 for tetrahedra), face `f` is opposite vertex `f`
    pub local_face_id: usize,
}

/// Face of a tet10 element
///
/// Tet10 has 4 faces, each is a 6-node quadratic triangle
#[derive(Debug, Clone)]
pub struct Tet10Face {
    /// Node indices (6 nodes for quadratic triangle)
    /// Ordering: 3 vertices + 3 midside nodes
    pub nodes: [usize; 6],
}

impl Tet10Face {
    /// Get the face nodes for a local face of a tet10 element
    ///
    /// Face numbering for tetrahedron (vertices 0,1,2,3):
    /// - Face 0: vertices (1,2,3), opposite vertex 0
    /// - Face 1: vertices (0,2,3), opposite vertex 1
    /// - Face 2: vertices (0,1,3), opposite vertex 2
    /// - Face 3: vertices (0,1,2), opposite vertex 3 (bottom)
    ///
    /// Returns `None` for a local face index outside 0..4.
    pub fn from_element_face(element_nodes: &[usize; 10], local_face: usize) -> Option<Self> {
        let nodes = match local_face {
            // Face 0: vertices (1,2,3), edges (12,23,31)
            0 => [
                element_nodes[1],
                element_nodes[2],
                element_nodes[3],
                element_nodes[5],
                element_nodes[9],
                element_nodes[8],
            ],
            // Face 1: vertices (0,2,3), edges (02,23,30)
            1 => [
                element_nodes[0],
                element_nodes[2],
                element_nodes[3],
                element_nodes[6],
                element_nodes[9],
                element_nodes[7],
            ],
            // Face 2: vertices (0,1,3), edges (01,13,30)
            2 => [
                element_nodes[0],
                element_nodes[1],
                element_nodes[3],
                element_nodes[4],
                element_nodes[8],
                element_nodes[7],
            ],
            // Face 3: vertices (0,1,2), edges (01,12,20)
            3 => [
                element_nodes[0],
                element_nodes[1],
                element_nodes[2],
                element_nodes[4],
                element_nodes[5],
                element_nodes[6],
            ],
            _ => return None,
        };

        Some(Self { nodes })
    }

    /// Quadratic triangle shape functions in area coordinates (L1, L2, L3)
    /// where L3 = 1 - L1 - L2
    pub fn shape_functions(l1: f64, l2: f64) -> [f64; 6] {
        let l3 = 1.0 - l1 - l2;
        [
            l1 * (2.0 * l1 - 1.0), // vertex 0
            l2 * (2.0 * l2 - 1.0), // vertex 1
            l3 * (2.0 * l3 - 1.0), // vertex 2
            4.0 * l1 * l2,         // edge 01
            4.0 * l2 * l3,         // edge 12
            4.0 * l3 * l1,         // edge 20
        ]
    }

    /// Derivatives of shape functions w.r.t. (L1, L2)
    pub fn shape_derivatives(l1: f64, l2: f64) -> [[f64; 2]; 6] {
        let l3 = 1.0 - l1 - l2;
        [
            [4.0 * l1 - 1.0, 0.0],
            [0.0, 4.0 * l2 - 1.0],
            [-4.0 * l3 + 1.0, -4.0 * l3 + 1.0],
            [4.0 * l2, 4.0 * l1],
            [-4.0 * l2, 4.0 * (l3 - l2)],
            [4.0 * (l3 - l1), -4.0 * l1],
        ]
    }

    /// Element barycentric coordinates of the face point (L1, L2)
    ///
    /// The face vertices take L1, L2, L3 in order and the opposite vertex
    /// gets zero, so the face map agrees with the element map.
    pub fn element_barycentric(local_face: usize, l1: f64, l2: f64) -> [f64; 4] {
        let [a, b, c] = Tet10Element::face_vertices()[local_face];
        let mut bary = [0.0; 4];
        bary[a] = l1;
        bary[b] = l2;
        bary[c] = 1.0 - l1 - l2;
        bary
    }
}

impl Mesh {
    /// Quadrature points of one boundary face
    fn face_points(&self, face: &BoundaryFace, rule: &TriangleQuadrature) -> Result<Vec<SurfacePoint>> {
        let elem = self.element(face.element_id).ok_or_else(|| {
            ResistanceError::incompatible(format!(
                "boundary face references element {} of a mesh with {} elements",
                face.element_id,
                self.num_elements()
            ))
        })?;
        let tri = Tet10Face::from_element_face(&elem.nodes, face.local_face_id).ok_or_else(|| {
            ResistanceError::incompatible(format!("invalid local face index {}", face.local_face_id))
        })?;

        let element_nodes = self.element_nodes(elem);
        let coords: Vec<Point3<f64>> = tri.nodes.iter().map(|&i| self.geometry.nodes[i]).collect();

        let mut points = Vec::with_capacity(rule.num_points());
        for (&[l1, l2], &w) in rule.points.iter().zip(rule.weights.iter()) {
            let n = Tet10Face::shape_functions(l1, l2);
            let derivs = Tet10Face::shape_derivatives(l1, l2);

            let mut position = Vector3::zeros();
            let mut dx_dl1 = Vector3::zeros();
            let mut dx_dl2 = Vector3::zeros();
            for i in 0..6 {
                position += coords[i].coords * n[i];
                dx_dl1 += coords[i].coords * derivs[i][0];
                dx_dl2 += coords[i].coords * derivs[i][1];
            }

            // Surface element: |dx/dL1 × dx/dL2|
            let cross = dx_dl1.cross(&dx_dl2);
            let det_j = cross.norm();

            let barycentric = Tet10Face::element_barycentric(face.local_face_id, l1, l2);
            // ∇L_f points from face f into the element
            let inward = Tet10Basis::linear_derivatives_cartesian(&barycentric, &element_nodes)
                .map(|grad| grad[face.local_face_id])
                .ok_or_else(|| {
                    ResistanceError::incompatible(format!("element {} is degenerate", face.element_id))
                })?;

            let mut normal = cross / det_j;
            if normal.dot(&inward) > 0.0 {
                normal = -normal;
            }

            points.push(SurfacePoint {
                position: Point3::from(position),
                normal,
                weight: w * det_j,
                cell: Some(CellLocation {
                    mesh: self.id(),
                    element: face.element_id,
                    barycentric,
                }),
            });
        }
        Ok(points)
    }
}

impl SurfaceMeasure for Mesh {
    fn surface_points(&self, tag: BoundaryTag) -> Result<Vec<SurfacePoint>> {
        let faces: Vec<&BoundaryFace> = self.faces_with_tag(tag).collect();
        if faces.is_empty() {
            return Err(ResistanceError::UnknownSurfaceTag(tag));
        }

        let rule = TriangleQuadrature::tri_6point();
        let per_face: Vec<Vec<SurfacePoint>> = faces
            .par_iter()
            .map(|face| self.face_points(face, &rule))
            .collect::<Result<_>>()?;

        Ok(per_face.into_iter().flatten().collect())
    }
}
