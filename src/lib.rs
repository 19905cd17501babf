//! FEA Linear - linear static finite element analysis in Rust
//!
//! Direct-stiffness solver for small 1D/2D models:
//! - Springs and bars (axial, 1 DOF per node)
//! - Euler-Bernoulli beams (deflection + rotation)
//! - Plane trusses
//! - Constant-strain (linear) triangles in plane stress
//!
//! Every model type runs the same pipeline: assemble the global stiffness
//! matrix, register loads and prescribed displacements, partition into known
//! and unknown DOFs, solve, and recover reactions as `KG · U`.
//!
//! ## Example
//! ```rust
//! use fea_linear::prelude::*;
//!
//! let mut model = Model::bar();
//!
//! // Add nodes
//! let n1 = model.add_node(Node::new(0.0, 0.0));
//! let n2 = model.add_node(Node::new(30.0, 0.0));
//!
//! // Add element (E, A, L)
//! model.add_element(Bar::new([n1, n2], 30e6, 1.0, 30.0)).unwrap();
//!
//! // Supports and loads
//! model.add_constraint(n1, Constraint::roller_x()).unwrap();
//! model.add_force(n2, &[1000.0]).unwrap();
//!
//! // Analyze
//! model.solve().unwrap();
//!
//! // Get results
//! let tip = model.node_displacement(n2).unwrap();
//! assert!((tip.ux.unwrap() - 1e-3).abs() < 1e-12);
//! ```

pub mod analysis;
pub mod dof;
pub mod elements;
pub mod error;
pub mod io;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::AnalysisOptions;
    pub use crate::dof::{Dof, ModelType};
    pub use crate::elements::{
        Bar, Beam, Constraint, Element, ElementKind, LinearTriangle, Node, Spring, Truss,
    };
    pub use crate::error::{FEAError, FEAResult};
    pub use crate::model::{Model, ModelState};
    pub use crate::results::{AnalysisSummary, NodeDisplacement, NodeForces, Strain, Stress};
}
