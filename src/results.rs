//! Result types for FEA analysis

use serde::{Deserialize, Serialize};

/// Solved displacement components at a node
///
/// Components the model type does not carry stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub ux: Option<f64>,
    /// Displacement in Y direction
    pub uy: Option<f64>,
    /// Rotation
    pub ur: Option<f64>,
}

impl NodeDisplacement {
    /// Get translation magnitude, treating absent components as zero
    pub fn translation_magnitude(&self) -> f64 {
        (self.ux.unwrap_or(0.0).powi(2) + self.uy.unwrap_or(0.0).powi(2)).sqrt()
    }
}

/// Recovered nodal forces (applied loads at free DOFs, reactions at constrained ones)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeForces {
    /// Force in X direction
    pub fx: f64,
    /// Force in Y direction
    pub fy: f64,
    /// Moment
    pub m: f64,
}

impl NodeForces {
    /// Get total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        (self.fx.powi(2) + self.fy.powi(2)).sqrt()
    }
}

/// Plane stress state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stress {
    pub sx: f64,
    pub sy: f64,
    pub sxy: f64,
}

impl Stress {
    pub fn from_components(sx: f64, sy: f64, sxy: f64) -> Self {
        Self { sx, sy, sxy }
    }

    /// Von Mises equivalent stress
    pub fn von_mises(&self) -> f64 {
        (self.sx.powi(2) - self.sx * self.sy + self.sy.powi(2) + 3.0 * self.sxy.powi(2)).sqrt()
    }

    /// Arithmetic mean of several stress states (zero when empty)
    pub fn mean<I: IntoIterator<Item = Stress>>(items: I) -> Self {
        let (sum, n) = items.into_iter().fold((Self::default(), 0usize), |(acc, n), s| {
            (
                Self::from_components(acc.sx + s.sx, acc.sy + s.sy, acc.sxy + s.sxy),
                n + 1,
            )
        });
        if n == 0 {
            return sum;
        }
        let n = n as f64;
        Self::from_components(sum.sx / n, sum.sy / n, sum.sxy / n)
    }
}

/// Plane strain components (engineering shear strain)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Strain {
    pub ex: f64,
    pub ey: f64,
    pub exy: f64,
}

impl Strain {
    pub fn from_components(ex: f64, ey: f64, exy: f64) -> Self {
        Self { ex, ey, exy }
    }

    /// Arithmetic mean of several strain states (zero when empty)
    pub fn mean<I: IntoIterator<Item = Strain>>(items: I) -> Self {
        let (sum, n) = items.into_iter().fold((Self::default(), 0usize), |(acc, n), e| {
            (
                Self::from_components(acc.ex + e.ex, acc.ey + e.ey, acc.exy + e.exy),
                n + 1,
            )
        });
        if n == 0 {
            return sum;
        }
        let n = n as f64;
        Self::from_components(sum.ex / n, sum.ey / n, sum.exy / n)
    }
}

/// Summary of a solved model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub num_nodes: usize,
    pub num_elements: usize,
    pub total_dofs: usize,
    pub free_dofs: usize,
    pub max_displacement: f64,
    pub max_disp_node: usize,
    pub max_reaction: f64,
    pub max_reaction_node: usize,
}
