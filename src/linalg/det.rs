/// Closed-form 3×3 determinants
///
/// Both routines use explicit cofactor expansion (no pivoting), so they
/// work for any entry type with the required arithmetic, including field
/// objects that only support linear combination.

use std::ops::{Add, Mul, Sub};

use super::Axis;

/// Determinant of a row-major 3×3 matrix
///
/// Expansion order:
/// ```text
/// a00 a11 a22 + a02 a10 a21 + a20 a01 a12
///   - a02 a11 a20 - a00 a12 a21 - a22 a01 a10
/// ```
pub fn det3<T>(a: &[[T; 3]; 3]) -> T
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<Output = T>,
{
    a[0][0] * a[1][1] * a[2][2] + a[0][2] * a[1][0] * a[2][1] + a[2][0] * a[0][1] * a[1][2]
        - a[0][2] * a[1][1] * a[2][0]
        - a[0][0] * a[1][2] * a[2][1]
        - a[2][2] * a[0][1] * a[1][0]
}

/// Cofactor C_rk of a numeric 3×3 matrix
///
/// Uses cyclic row/column indices so the checkerboard sign is built in.
pub fn cofactor(a: &[[f64; 3]; 3], row: usize, col: usize) -> f64 {
    let (r1, r2) = ((row + 1) % 3, (row + 2) % 3);
    let (c1, c2) = ((col + 1) % 3, (col + 2) % 3);
    a[r1][c1] * a[r2][c2] - a[r1][c2] * a[r2][c1]
}

/// Determinant of `a` with row `row` replaced by `entries`
///
/// Expands along the replaced row, so the entries only need addition and
/// scaling by a number:
/// ```text
/// det = Σ_k entries[k] · C_{row,k}(a)
/// ```
/// This is the numerator of Cramer's rule when the right-hand side is a
/// vector of fields.
pub fn det3_replacing_row<T>(a: &[[f64; 3]; 3], row: Axis, entries: [T; 3]) -> T
where
    T: Add<Output = T> + Mul<f64, Output = T>,
{
    let row = row.index();
    let [e0, e1, e2] = entries;
    e0 * cofactor(a, row, 0) + e1 * cofactor(a, row, 1) + e2 * cofactor(a, row, 2)
}
