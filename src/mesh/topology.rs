use serde::{Deserialize, Serialize};

/// A 10-node quadratic tetrahedral element (Tet10)
///
/// Node numbering:
/// Vertices: 0, 1, 2, 3
/// Edge midpoints:
///   4: midpoint of edge 0-1
///   5: midpoint of edge 1-2
///   6: midpoint of edge 2-0
///   7: midpoint of edge 0-3
///   8: midpoint of edge 1-3
///   9: midpoint of edge 2-3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tet10Element {
    /// Global node indices for this element (10 nodes)
    pub nodes: [usize; 10],
}

impl Tet10Element {
    pub fn new(nodes: [usize; 10]) -> Self {
        Self { nodes }
    }

    /// Get the vertex node indices (first 4 nodes)
    pub fn vertices(&self) -> [usize; 4] {
        [self.nodes[0], self.nodes[1], self.nodes[2], self.nodes[3]]
    }

    /// Local vertex indices of each face; face `f` is opposite vertex `f`
    pub fn face_vertices() -> [[usize; 3]; 4] {
        [[1, 2, 3], [0, 2, 3], [0, 1, 3], [0, 1, 2]]
    }

    /// Sorted global vertex ids of a local face, usable as a face key
    pub fn face_key(&self, local_face: usize) -> [usize; 3] {
        let local = Self::face_vertices()[local_face];
        let mut key = [
            self.nodes[local[0]],
            self.nodes[local[1]],
            self.nodes[local[2]],
        ];
        key.sort_unstable();
        key
    }
}

/// Connectivity information for the mesh
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Connectivity {
    pub tet10_elements: Vec<Tet10Element>,
}

impl Connectivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(&mut self, element: Tet10Element) {
        self.tet10_elements.push(element);
    }

    pub fn num_elements(&self) -> usize {
        self.tet10_elements.len()
    }

    /// Get all unique vertex (corner) nodes from all elements
    pub fn corner_nodes(&self) -> Vec<usize> {
        let mut corners: Vec<usize> = self
            .tet10_elements
            .iter()
            .flat_map(|elem| elem.vertices())
            .collect();
        corners.sort_unstable();
        corners.dedup();
        corners
    }
}
