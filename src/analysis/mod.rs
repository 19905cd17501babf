//! Analysis options and the direct-stiffness solver core
//!
//! The solver core is one algorithm for every model type, parameterized only
//! by the number of DOFs per node:
//! 1. [`assembly`] scatters element stiffness matrices into the global matrix.
//! 2. [`partition`] splits DOFs into known/unknown, solves the reduced system
//!    and recovers the complete force vector.

pub mod assembly;
pub mod partition;

pub use assembly::{assemble_global_stiffness, scatter_element};
pub use partition::{solve_partitioned, Partition, Solution};

use serde::{Deserialize, Serialize};

/// Options for a linear static solve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Pivot magnitude, relative to the largest entry of its column, below which
    /// the reduced matrix is singular
    pub pivot_tolerance: f64,
    /// Check static equilibrium after analysis
    pub check_statics: bool,
    /// Allowed equilibrium residual, relative to the largest applied load
    pub statics_tolerance: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            pivot_tolerance: 1e-12,
            check_statics: true,
            statics_tolerance: 1e-6,
        }
    }
}

impl AnalysisOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set pivot tolerance for singularity detection
    pub fn with_pivot_tolerance(mut self, tol: f64) -> Self {
        self.pivot_tolerance = tol;
        self
    }

    /// Enable or disable the equilibrium check
    pub fn with_statics_check(mut self, check: bool) -> Self {
        self.check_statics = check;
        self
    }

    /// Set equilibrium tolerance
    pub fn with_statics_tolerance(mut self, tol: f64) -> Self {
        self.statics_tolerance = tol;
        self
    }
}
