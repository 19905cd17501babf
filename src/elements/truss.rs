//! Truss element - pin-jointed plane member

use serde::{Deserialize, Serialize};

use crate::error::FEAResult;
use crate::math::{self, Mat4};

/// A plane truss member (2 DOF per node: `ux`, `uy`)
///
/// Length and angle are taken from the end node coordinates unless set
/// explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Truss {
    /// Labels of the end nodes
    pub nodes: [usize; 2],
    /// Modulus of elasticity
    pub e: f64,
    /// Cross-sectional area
    pub a: f64,
    /// Explicit length
    pub length: Option<f64>,
    /// Explicit angle from global X (radians)
    pub theta: Option<f64>,
}

impl Truss {
    /// Create a new truss member
    pub fn new(nodes: [usize; 2], e: f64, a: f64) -> Self {
        Self {
            nodes,
            e,
            a,
            length: None,
            theta: None,
        }
    }

    /// Override the member length
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    /// Override the member angle (radians)
    pub fn with_angle(mut self, theta: f64) -> Self {
        self.theta = Some(theta);
        self
    }

    /// Resolve `(length, theta)` from explicit values or end coordinates
    pub fn geometry(&self, p1: [f64; 2], p2: [f64; 2]) -> FEAResult<(f64, f64)> {
        match (self.length, self.theta) {
            (Some(length), Some(theta)) => Ok((length, theta)),
            (length, theta) => {
                let (l, t) = math::member_geometry(p1, p2)?;
                Ok((length.unwrap_or(l), theta.unwrap_or(t)))
            }
        }
    }

    /// Local stiffness matrix for `[u1, v1, u2, v2]` in global axes
    pub fn local_stiffness(&self, p1: [f64; 2], p2: [f64; 2]) -> FEAResult<Mat4> {
        let (length, theta) = self.geometry(p1, p2)?;
        math::truss_stiffness(self.e, self.a, length, theta)
    }

    /// Axial force from global end displacements `[u1, v1, u2, v2]` (tension positive)
    pub fn axial_force(&self, p1: [f64; 2], p2: [f64; 2], u: [f64; 4]) -> FEAResult<f64> {
        let (length, theta) = self.geometry(p1, p2)?;
        let (s, c) = theta.sin_cos();
        let elongation = c * (u[2] - u[0]) + s * (u[3] - u[1]);
        Ok(self.a * self.e / length * elongation)
    }
}
