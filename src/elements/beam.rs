//! Beam element - Euler-Bernoulli bending element

use serde::{Deserialize, Serialize};

use crate::error::FEAResult;
use crate::math::{self, Mat4};

/// A two-node beam (2 DOF per node: `uy`, `ur`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    /// Labels of the end nodes
    pub nodes: [usize; 2],
    /// Modulus of elasticity
    pub e: f64,
    /// Second moment of area
    pub i: f64,
    /// Length
    pub length: f64,
}

impl Beam {
    /// Create a new beam
    pub fn new(nodes: [usize; 2], e: f64, i: f64, length: f64) -> Self {
        Self { nodes, e, i, length }
    }

    /// Local stiffness matrix for `[v1, θ1, v2, θ2]`
    pub fn local_stiffness(&self) -> FEAResult<Mat4> {
        math::beam_stiffness(self.e, self.i, self.length)
    }
}
