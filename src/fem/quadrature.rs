use std::f64::consts::PI;

/// Gaussian quadrature rules for tetrahedral elements
pub struct GaussQuadrature {
    /// Integration point coordinates in barycentric form [L0, L1, L2, L3]
    pub points: Vec<[f64; 4]>,
    /// Integration weights
    pub weights: Vec<f64>,
}

impl GaussQuadrature {
    /// 4-point quadrature (degree 2 exactness)
    ///
    /// Exact for quadratic polynomials
    pub fn tet_4point() -> Self {
        let a = 0.5854101966249685; // (5 + √5) / 20
        let b = 0.1381966011250105; // (5 - √5) / 20
        let w = 1.0 / 24.0; // 1/6 (tet volume) * 1/4 (symmetry)

        Self {
            points: vec![
                [a, b, b, b],
                [b, a, b, b],
                [b, b, a, b],
                [b, b, b, a],
            ],
            weights: vec![w, w, w, w],
        }
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }
}

/// Quadrature rules on the reference triangle
///
/// Points are area coordinates (L1, L2) with L3 = 1 - L1 - L2; weights sum
/// to 1/2, the area of the reference triangle.
pub struct TriangleQuadrature {
    pub points: Vec<[f64; 2]>,
    pub weights: Vec<f64>,
}

impl TriangleQuadrature {
    /// 3-point rule (degree 2 exactness)
    pub fn tri_3point() -> Self {
        Self {
            points: vec![
                [1.0 / 6.0, 1.0 / 6.0],
                [2.0 / 3.0, 1.0 / 6.0],
                [1.0 / 6.0, 2.0 / 3.0],
            ],
            weights: vec![1.0 / 6.0; 3],
        }
    }

    /// 6-point Dunavant rule (degree 4 exactness)
    ///
    /// Integrates products of a quadratic field gradient with a curved
    /// quadratic face Jacobian accurately enough for traction integrals.
    pub fn tri_6point() -> Self {
        let a = 0.445948490915965;
        let b = 0.091576213509771;
        let wa = 0.223381589678011 / 2.0;
        let wb = 0.109951743655322 / 2.0;

        Self {
            points: vec![
                [a, a],
                [1.0 - 2.0 * a, a],
                [a, 1.0 - 2.0 * a],
                [b, b],
                [1.0 - 2.0 * b, b],
                [b, 1.0 - 2.0 * b],
            ],
            weights: vec![wa, wa, wa, wb, wb, wb],
        }
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }
}

/// One-dimensional quadrature on [-1, 1]
pub struct LineQuadrature {
    /// Abscissae in ascending order
    pub points: Vec<f64>,
    pub weights: Vec<f64>,
}

impl LineQuadrature {
    /// n-point Gauss-Legendre rule (degree 2n - 1 exactness)
    ///
    /// Roots of P_n are found by Newton iteration from the Chebyshev-like
    /// initial guess cos(π (i + 3/4) / (n + 1/2)).
    pub fn gauss_legendre(n: usize) -> Self {
        let mut points = vec![0.0; n];
        let mut weights = vec![0.0; n];

        for i in 0..(n + 1) / 2 {
            let mut x = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
            for _ in 0..100 {
                let (p, dp) = legendre(n, x);
                let dx = p / dp;
                x -= dx;
                if dx.abs() < 1e-15 {
                    break;
                }
            }

            let (_, dp) = legendre(n, x);
            let w = 2.0 / ((1.0 - x * x) * dp * dp);
            points[i] = -x;
            points[n - 1 - i] = x;
            weights[i] = w;
            weights[n - 1 - i] = w;
        }

        Self { points, weights }
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }
}

/// Legendre polynomial P_n and its derivative at x, by the three-term
/// recurrence
fn legendre(n: usize, x: f64) -> (f64, f64) {
    let mut p_prev = 1.0;
    let mut p = x;
    for k in 2..=n {
        let k = k as f64;
        let next = ((2.0 * k - 1.0) * x * p - (k - 1.0) * p_prev) / k;
        p_prev = p;
        p = next;
    }
    let dp = n as f64 * (x * p - p_prev) / (x * x - 1.0);
    (p, dp)
}
