use nalgebra::{Matrix3, Point3, Vector3};

/// Tet10 (10-node quadratic tetrahedral) element basis functions
///
/// Node numbering:
///   Vertices: 0, 1, 2, 3
///   Edge midpoints:
///     4: edge 0-1
///     5: edge 1-2
///     6: edge 2-0
///     7: edge 0-3
///     8: edge 1-3
///     9: edge 2-3
///
/// Reference element (in barycentric coordinates):
///   Node 0: (1, 0, 0, 0) at origin
///   Node 1: (0, 1, 0, 0) at (1, 0, 0)
///   Node 2: (0, 0, 1, 0) at (0, 1, 0)
///   Node 3: (0, 0, 0, 1) at (0, 0, 1)
///
/// Shape functions use barycentric (volume) coordinates L0, L1, L2, L3
/// where L0 + L1 + L2 + L3 = 1. The same element geometry also carries the
/// linear (P1) pressure basis N_i = L_i on its vertices.
pub struct Tet10Basis;

impl Tet10Basis {
    /// Evaluate all 10 shape functions at barycentric coordinates (L0, L1, L2, L3)
    ///
    /// # Shape Functions
    /// Vertices:
    ///   N_i = L_i (2 L_i - 1)  for i = 0,1,2,3
    ///
    /// Edge midpoints:
    ///   N_4 = 4 L_0 L_1
    ///   N_5 = 4 L_1 L_2
    ///   N_6 = 4 L_2 L_0
    ///   N_7 = 4 L_0 L_3
    ///   N_8 = 4 L_1 L_3
    ///   N_9 = 4 L_2 L_3
    #[allow(non_snake_case)]
    pub fn shape_functions(L: &[f64; 4]) -> [f64; 10] {
        let [L0, L1, L2, L3] = *L;

        [
            // Vertex nodes
            L0 * (2.0 * L0 - 1.0),
            L1 * (2.0 * L1 - 1.0),
            L2 * (2.0 * L2 - 1.0),
            L3 * (2.0 * L3 - 1.0),
            // Edge midpoint nodes
            4.0 * L0 * L1,
            4.0 * L1 * L2,
            4.0 * L2 * L0,
            4.0 * L0 * L3,
            4.0 * L1 * L3,
            4.0 * L2 * L3,
        ]
    }

    /// Shape function derivatives with respect to barycentric coordinates
    ///
    /// Returns 10 vectors [∂N/∂L0, ∂N/∂L1, ∂N/∂L2, ∂N/∂L3]; only 3 are
    /// independent since L0 + L1 + L2 + L3 = 1.
    #[allow(non_snake_case)]
    pub fn shape_derivatives_barycentric(L: &[f64; 4]) -> [[f64; 4]; 10] {
        let [L0, L1, L2, L3] = *L;

        [
            [4.0 * L0 - 1.0, 0.0, 0.0, 0.0],
            [0.0, 4.0 * L1 - 1.0, 0.0, 0.0],
            [0.0, 0.0, 4.0 * L2 - 1.0, 0.0],
            [0.0, 0.0, 0.0, 4.0 * L3 - 1.0],
            [4.0 * L1, 4.0 * L0, 0.0, 0.0],
            [0.0, 4.0 * L2, 4.0 * L1, 0.0],
            [4.0 * L2, 0.0, 4.0 * L0, 0.0],
            [4.0 * L3, 0.0, 0.0, 4.0 * L0],
            [0.0, 4.0 * L3, 0.0, 4.0 * L1],
            [0.0, 0.0, 4.0 * L3, 4.0 * L2],
        ]
    }

    /// Jacobian J_ij = ∂x_i / ∂L_j using L1, L2, L3 as independent variables
    #[allow(non_snake_case)]
    pub fn jacobian(L: &[f64; 4], nodes: &[Point3<f64>; 10]) -> Matrix3<f64> {
        let dN_dL = Self::shape_derivatives_barycentric(L);
        let mut J = Matrix3::zeros();

        for i in 0..10 {
            // L0 = 1 - L1 - L2 - L3
            let d = Vector3::new(
                dN_dL[i][1] - dN_dL[i][0],
                dN_dL[i][2] - dN_dL[i][0],
                dN_dL[i][3] - dN_dL[i][0],
            );
            J += nodes[i].coords * d.transpose();
        }
        J
    }

    /// Shape function derivatives with respect to Cartesian coordinates
    ///
    /// Chain rule: ∂N/∂x = J^{-T} ∂N/∂L. Returns `None` for a singular
    /// (collapsed) element.
    #[allow(non_snake_case)]
    pub fn shape_derivatives_cartesian(
        L: &[f64; 4],
        nodes: &[Point3<f64>; 10],
    ) -> Option<[Vector3<f64>; 10]> {
        let dN_dL = Self::shape_derivatives_barycentric(L);
        let J_inv_T = Self::jacobian(L, nodes).try_inverse()?.transpose();

        let mut dN_dx = [Vector3::zeros(); 10];
        for i in 0..10 {
            dN_dx[i] = J_inv_T
                * Vector3::new(
                    dN_dL[i][1] - dN_dL[i][0],
                    dN_dL[i][2] - dN_dL[i][0],
                    dN_dL[i][3] - dN_dL[i][0],
                );
        }
        Some(dN_dx)
    }

    /// Gradients of the linear vertex functions L0..L3 at a point
    ///
    /// For straight-sided elements these are constant. For curved elements
    /// they are taken through the quadratic geometry map at `L`, consistent
    /// with the quadratic velocity gradients.
    #[allow(non_snake_case)]
    pub fn linear_derivatives_cartesian(
        L: &[f64; 4],
        nodes: &[Point3<f64>; 10],
    ) -> Option<[Vector3<f64>; 4]> {
        let J_inv_T = Self::jacobian(L, nodes).try_inverse()?.transpose();

        let dL1 = J_inv_T * Vector3::x();
        let dL2 = J_inv_T * Vector3::y();
        let dL3 = J_inv_T * Vector3::z();
        Some([-(dL1 + dL2 + dL3), dL1, dL2, dL3])
    }

    /// Evaluate an arbitrary field value at a point within the element
    ///
    /// # Arguments
    /// * `l` - Barycentric coordinates
    /// * `nodal_values` - Values at each of the 10 nodes (can be scalar or vector)
    pub fn evaluate_at_point<T>(l: &[f64; 4], nodal_values: &[T; 10]) -> T
    where
        T: std::ops::Mul<f64, Output = T> + std::ops::Add<T, Output = T> + Copy,
    {
        let n = Self::shape_functions(l);
        let mut result = nodal_values[0] * n[0];
        for i in 1..10 {
            result = result + nodal_values[i] * n[i];
        }
        result
    }

    /// Element volume by 4-point quadrature of |det J|
    #[allow(non_snake_case)]
    pub fn element_volume(nodes: &[Point3<f64>; 10]) -> f64 {
        let quad = crate::fem::GaussQuadrature::tet_4point();
        quad.points
            .iter()
            .zip(quad.weights.iter())
            .map(|(L, weight)| Self::jacobian(L, nodes).determinant().abs() * weight)
            .sum()
    }
}
