//! Bar element - two-node axial member

use serde::{Deserialize, Serialize};

use crate::error::FEAResult;
use crate::math::{self, Mat2};

/// An axial bar (1 DOF per node, `ux`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    /// Labels of the end nodes
    pub nodes: [usize; 2],
    /// Modulus of elasticity
    pub e: f64,
    /// Cross-sectional area
    pub a: f64,
    /// Length
    pub length: f64,
}

impl Bar {
    /// Create a new bar
    pub fn new(nodes: [usize; 2], e: f64, a: f64, length: f64) -> Self {
        Self { nodes, e, a, length }
    }

    /// Axial stiffness `A·E/L`
    pub fn axial_stiffness(&self) -> f64 {
        self.a * self.e / self.length
    }

    /// Local stiffness matrix
    pub fn local_stiffness(&self) -> FEAResult<Mat2> {
        math::bar_stiffness(self.e, self.a, self.length)
    }

    /// Axial force from end displacements (tension positive)
    pub fn axial_force(&self, u: [f64; 2]) -> FEAResult<f64> {
        let k = self.local_stiffness()?;
        Ok(k[(1, 1)] * (u[1] - u[0]))
    }
}
