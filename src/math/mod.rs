//! Mathematical utilities for FEA calculations
//!
//! Element stiffness formulations are pure functions of element parameters
//! (and node geometry for trusses and triangles). They return fixed-size
//! nalgebra matrices; assembly works on the dynamic [`Mat`] type.

use nalgebra::storage::RawStorage;
use nalgebra::{DMatrix, DVector, Dim, Matrix, Matrix2, Matrix3, Matrix4, Matrix6, SMatrix, SVector};

use crate::error::{FEAError, FEAResult};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
pub type Mat2 = Matrix2<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Mat4 = Matrix4<f64>;
pub type Mat6 = Matrix6<f64>;

/// Strain-displacement matrix of a linear triangle
pub type Mat3x6 = SMatrix<f64, 3, 6>;
/// Nodal (ux, uy) vector of a linear triangle
pub type Vec6 = SVector<f64, 6>;

/// Lengths and areas at or below this magnitude are treated as degenerate
pub const GEOMETRY_TOLERANCE: f64 = 1e-10;

fn check_length(length: f64, what: &str) -> FEAResult<()> {
    if !length.is_finite() || length.abs() < GEOMETRY_TOLERANCE {
        return Err(FEAError::InvalidGeometry(format!(
            "{what} has zero length (L = {length})"
        )));
    }
    Ok(())
}

/// Stiffness matrix of a linear spring: `k·[[1,-1],[-1,1]]`
pub fn spring_stiffness(k: f64) -> Mat2 {
    Mat2::new(k, -k, -k, k)
}

/// Stiffness matrix of an axial bar: `(A·E/L)·[[1,-1],[-1,1]]`
pub fn bar_stiffness(e: f64, a: f64, length: f64) -> FEAResult<Mat2> {
    check_length(length, "Bar")?;
    Ok(spring_stiffness(a * e / length))
}

/// Euler-Bernoulli beam stiffness for DOFs `[v1, θ1, v2, θ2]`
pub fn beam_stiffness(e: f64, i: f64, length: f64) -> FEAResult<Mat4> {
    check_length(length, "Beam")?;

    let l = length;
    let a = 6.0 * l;
    let b = 4.0 * l * l;
    let c = 2.0 * l * l;

    #[rustfmt::skip]
    let k = Mat4::new(
         12.0,  a, -12.0,  a,
            a,  b,    -a,  c,
        -12.0, -a,  12.0, -a,
            a,  c,    -a,  b,
    );

    Ok(k * (e * i / l.powi(3)))
}

/// Plane truss member stiffness for DOFs `[u1, v1, u2, v2]`
///
/// # Arguments
/// * `e` - Modulus of elasticity
/// * `a` - Cross-sectional area
/// * `length` - Member length
/// * `theta` - Member angle measured from global X (radians)
pub fn truss_stiffness(e: f64, a: f64, length: f64, theta: f64) -> FEAResult<Mat4> {
    check_length(length, "Truss member")?;

    let c = theta.cos();
    let s = theta.sin();
    let cc = c * c;
    let ss = s * s;
    let cs = c * s;

    #[rustfmt::skip]
    let k = Mat4::new(
         cc,  cs, -cc, -cs,
         cs,  ss, -cs, -ss,
        -cc, -cs,  cc,  cs,
        -cs, -ss,  cs,  ss,
    );

    Ok(k * (a * e / length))
}

/// Length and orientation of the segment from `p1` to `p2`
///
/// # Returns
/// `(length, theta)` with theta in radians measured from global X
pub fn member_geometry(p1: [f64; 2], p2: [f64; 2]) -> FEAResult<(f64, f64)> {
    let dx = p2[0] - p1[0];
    let dy = p2[1] - p1[1];
    let length = (dx * dx + dy * dy).sqrt();

    if length < GEOMETRY_TOLERANCE {
        return Err(FEAError::InvalidGeometry(format!(
            "Truss member has coincident nodes at ({}, {})",
            p1[0], p1[1]
        )));
    }

    let theta = if dx.abs() < GEOMETRY_TOLERANCE {
        // Vertical member
        if dy > 0.0 {
            std::f64::consts::FRAC_PI_2
        } else {
            -std::f64::consts::FRAC_PI_2
        }
    } else {
        dy.atan2(dx)
    };

    Ok((length, theta))
}

/// Signed area of a triangle (positive for counter-clockwise node order)
pub fn triangle_signed_area(coords: &[[f64; 2]; 3]) -> f64 {
    let [v0, v1, v2] = coords;
    0.5 * (v0[0] * (v1[1] - v2[1]) + v1[0] * (v2[1] - v0[1]) + v2[0] * (v0[1] - v1[1]))
}

/// Strain-displacement matrix `B` of a linear triangle
///
/// # Returns
/// `B` (3x6, already scaled by `1/(2A)`) and the signed area `A`
pub fn triangle_strain_displacement(coords: &[[f64; 2]; 3]) -> FEAResult<(Mat3x6, f64)> {
    let area = triangle_signed_area(coords);

    // Relative to the element size so tiny but well-shaped meshes still pass
    let scale = (0..3)
        .map(|i| {
            let j = (i + 1) % 3;
            (coords[j][0] - coords[i][0]).powi(2) + (coords[j][1] - coords[i][1]).powi(2)
        })
        .fold(0.0_f64, f64::max);

    if !area.is_finite() || area.abs() <= GEOMETRY_TOLERANCE * scale.max(GEOMETRY_TOLERANCE) {
        return Err(FEAError::InvalidGeometry(format!(
            "Triangle has zero area (A = {area})"
        )));
    }

    let [v0, v1, v2] = coords;

    let beta_1 = v1[1] - v2[1];
    let beta_2 = v2[1] - v0[1];
    let beta_3 = v0[1] - v1[1];

    let gamma_1 = v2[0] - v1[0];
    let gamma_2 = v0[0] - v2[0];
    let gamma_3 = v1[0] - v0[0];

    #[rustfmt::skip]
    let b = Mat3x6::new(
        beta_1,  0.0,     beta_2,  0.0,     beta_3,  0.0,
        0.0,     gamma_1, 0.0,     gamma_2, 0.0,     gamma_3,
        gamma_1, beta_1,  gamma_2, beta_2,  gamma_3, beta_3,
    );

    Ok((b / (2.0 * area), area))
}

/// Plane-stress constitutive matrix `D`
pub fn plane_stress_matrix(e: f64, nu: f64) -> Mat3 {
    #[rustfmt::skip]
    let d = Mat3::new(
        1.0, nu,  0.0,
        nu,  1.0, 0.0,
        0.0, 0.0, (1.0 - nu) / 2.0,
    );

    d * (e / (1.0 - nu * nu))
}

/// Linear triangle stiffness `t·A·Bᵀ·D·B` for DOFs `[u1, v1, u2, v2, u3, v3]`
pub fn triangle_stiffness(e: f64, nu: f64, thickness: f64, coords: &[[f64; 2]; 3]) -> FEAResult<Mat6> {
    let (b, area) = triangle_strain_displacement(coords)?;
    let d = plane_stress_matrix(e, nu);

    Ok(b.transpose() * d * b * (thickness * area.abs()))
}

/// Copy a fixed-size matrix into a dynamic one
pub fn to_dynamic<R, C, S>(m: &Matrix<f64, R, C, S>) -> Mat
where
    R: Dim,
    C: Dim,
    S: RawStorage<f64, R, C>,
{
    Mat::from_fn(m.nrows(), m.ncols(), |i, j| m[(i, j)])
}

/// Check whether a square matrix is symmetric within a relative tolerance
pub fn is_symmetric(m: &Mat, rel_tol: f64) -> bool {
    if m.nrows() != m.ncols() {
        return false;
    }
    let scale = m.amax().max(f64::MIN_POSITIVE);
    for i in 0..m.nrows() {
        for j in (i + 1)..m.ncols() {
            if (m[(i, j)] - m[(j, i)]).abs() > rel_tol * scale {
                return false;
            }
        }
    }
    true
}

/// Solve a dense linear system with LU decomposition
///
/// A pivot whose magnitude falls below `pivot_tolerance` times the largest
/// entry of its column in `a` marks the matrix as singular. The scale is
/// per column so well-posed systems with a large stiffness contrast pass.
///
/// # Returns
/// The solution vector, [`FEAError::SingularMatrix`] for a singular `a`, or
/// [`FEAError::InvalidInput`] for non-finite entries
pub fn solve_linear_system(a: &Mat, b: &Vec, pivot_tolerance: f64) -> FEAResult<Vec> {
    if a.nrows() != a.ncols() || a.nrows() != b.len() {
        return Err(FEAError::InvalidInput(format!(
            "Cannot solve {}x{} system with right-hand side of length {}",
            a.nrows(),
            a.ncols(),
            b.len()
        )));
    }
    if a.iter().any(|v| !v.is_finite()) {
        return Err(FEAError::InvalidInput(
            "Stiffness matrix has non-finite entries".to_string(),
        ));
    }
    if b.iter().any(|v| !v.is_finite()) {
        return Err(FEAError::InvalidInput(
            "Right-hand side has non-finite entries".to_string(),
        ));
    }
    if a.nrows() == 0 {
        return Ok(Vec::zeros(0));
    }

    let lu = a.clone().lu();
    let u = lu.u();
    for (i, pivot) in u.diagonal().iter().enumerate() {
        let scale = a.column(i).amax();
        if scale == 0.0 || pivot.abs() <= pivot_tolerance * scale {
            return Err(FEAError::SingularMatrix);
        }
    }

    let x = lu.solve(b).ok_or(FEAError::SingularMatrix)?;
    if x.iter().any(|v| !v.is_finite()) {
        return Err(FEAError::SingularMatrix);
    }

    Ok(x)
}
