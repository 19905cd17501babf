//! Spring element - two-node axial spring

use serde::{Deserialize, Serialize};

use crate::math::{self, Mat2};

/// A linear spring between two nodes (1 DOF per node, `ux`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spring {
    /// Labels of the end nodes
    pub nodes: [usize; 2],
    /// Spring stiffness
    pub k: f64,
}

impl Spring {
    /// Create a new spring
    pub fn new(nodes: [usize; 2], k: f64) -> Self {
        Self { nodes, k }
    }

    /// Local stiffness matrix
    pub fn local_stiffness(&self) -> Mat2 {
        math::spring_stiffness(self.k)
    }

    /// Spring force from end displacements (tension positive)
    pub fn axial_force(&self, u: [f64; 2]) -> f64 {
        self.k * (u[1] - u[0])
    }
}
