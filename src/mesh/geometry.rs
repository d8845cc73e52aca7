use std::collections::HashMap;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use super::topology::{Connectivity, Tet10Element};
use crate::fem::boundary::BoundaryFace;
use crate::field::BoundaryTag;

/// Geometric information for the mesh
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Geometry {
    /// Node coordinates
    pub nodes: Vec<Point3<f64>>,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, x: f64, y: f64, z: f64) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(Point3::new(x, y, z));
        idx
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
}

/// Boundary face carrying a surface tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedFace {
    pub face: BoundaryFace,
    pub tag: BoundaryTag,
}

/// Identity of a mesh instance
///
/// Two ids compare equal only for the same mesh in memory. The id is
/// meaningful while the mesh is borrowed, which covers the lifetime of the
/// surface points a mesh hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(usize);

/// Tet10 mesh with tagged boundary faces
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub geometry: Geometry,
    pub connectivity: Connectivity,
    /// Boundary faces and the surface each belongs to
    #[serde(default)]
    pub boundary: Vec<TaggedFace>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> MeshId {
        MeshId(self as *const Mesh as usize)
    }

    pub fn num_nodes(&self) -> usize {
        self.geometry.num_nodes()
    }

    pub fn num_elements(&self) -> usize {
        self.connectivity.num_elements()
    }

    pub fn element(&self, elem_id: usize) -> Option<&Tet10Element> {
        self.connectivity.tet10_elements.get(elem_id)
    }

    /// Coordinates of the 10 nodes of an element
    pub fn element_nodes(&self, elem: &Tet10Element) -> [Point3<f64>; 10] {
        let mut nodes = [Point3::origin(); 10];
        for (i, &n) in elem.nodes.iter().enumerate() {
            nodes[i] = self.geometry.nodes[n];
        }
        nodes
    }

    /// Faces that belong to exactly one element
    pub fn exterior_faces(&self) -> Vec<BoundaryFace> {
        let mut owners: HashMap<[usize; 3], Vec<BoundaryFace>> = HashMap::new();
        for (element_id, elem) in self.connectivity.tet10_elements.iter().enumerate() {
            for local_face_id in 0..4 {
                owners
                    .entry(elem.face_key(local_face_id))
                    .or_default()
                    .push(BoundaryFace {
                        element_id,
                        local_face_id,
                    });
            }
        }

        let mut faces: Vec<BoundaryFace> = owners
            .into_values()
            .filter(|owners| owners.len() == 1)
            .map(|owners| owners[0])
            .collect();
        faces.sort_unstable_by_key(|f| (f.element_id, f.local_face_id));
        faces
    }

    /// Tag exterior faces by the centroid of their vertices
    ///
    /// Faces for which `classify` returns `None` keep their current tag (or
    /// stay untagged). Returns the number of faces tagged by this call.
    pub fn tag_boundary<F>(&mut self, classify: F) -> usize
    where
        F: Fn(&Point3<f64>) -> Option<BoundaryTag>,
    {
        let mut tagged = 0;
        for face in self.exterior_faces() {
            let elem = &self.connectivity.tet10_elements[face.element_id];
            let local = Tet10Element::face_vertices()[face.local_face_id];
            let centroid = Point3::from(
                (self.geometry.nodes[elem.nodes[local[0]]].coords
                    + self.geometry.nodes[elem.nodes[local[1]]].coords
                    + self.geometry.nodes[elem.nodes[local[2]]].coords)
                    / 3.0,
            );

            if let Some(tag) = classify(&centroid) {
                self.boundary.retain(|t| t.face != face);
                self.boundary.push(TaggedFace { face, tag });
                tagged += 1;
            }
        }
        tagged
    }

    /// Boundary faces carrying `tag`
    pub fn faces_with_tag(&self, tag: BoundaryTag) -> impl Iterator<Item = &BoundaryFace> + '_ {
        self.boundary
            .iter()
            .filter(move |t| t.tag == tag)
            .map(|t| &t.face)
    }

    /// Distinct boundary tags, sorted
    pub fn boundary_tags(&self) -> Vec<BoundaryTag> {
        let mut tags: Vec<BoundaryTag> = self.boundary.iter().map(|t| t.tag).collect();
        tags.sort_unstable();
        tags.dedup();
        tags
    }
}
