//! Node - a point in the plane carrying nodal DOFs

use serde::{Deserialize, Serialize};

use crate::dof::Dof;

/// A 2D node in the finite element model
///
/// Displacements are `None` until they are either prescribed by a constraint
/// or resolved by the solve step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,

    /// Label assigned by the owning model (insertion order, 0-based)
    #[serde(skip)]
    pub(crate) label: Option<usize>,

    #[serde(skip)]
    pub(crate) ux: Option<f64>,
    #[serde(skip)]
    pub(crate) uy: Option<f64>,
    #[serde(skip)]
    pub(crate) ur: Option<f64>,

    #[serde(skip)]
    pub(crate) fx: f64,
    #[serde(skip)]
    pub(crate) fy: f64,
    #[serde(skip)]
    pub(crate) m: f64,

    /// Labels of incident elements
    #[serde(skip)]
    pub(crate) elements: Vec<usize>,
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            label: None,
            ux: None,
            uy: None,
            ur: None,
            fx: 0.0,
            fy: 0.0,
            m: 0.0,
            elements: Vec::new(),
        }
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Label assigned by the owning model, `None` while detached
    pub fn label(&self) -> Option<usize> {
        self.label
    }

    pub fn ux(&self) -> Option<f64> {
        self.ux
    }

    pub fn uy(&self) -> Option<f64> {
        self.uy
    }

    pub fn ur(&self) -> Option<f64> {
        self.ur
    }

    pub fn fx(&self) -> f64 {
        self.fx
    }

    pub fn fy(&self) -> f64 {
        self.fy
    }

    pub fn m(&self) -> f64 {
        self.m
    }

    /// Displacement component for a DOF
    pub fn displacement(&self, dof: Dof) -> Option<f64> {
        match dof {
            Dof::Ux => self.ux,
            Dof::Uy => self.uy,
            Dof::Ur => self.ur,
        }
    }

    /// Force (or moment) component conjugate to a DOF
    pub fn force(&self, dof: Dof) -> f64 {
        match dof {
            Dof::Ux => self.fx,
            Dof::Uy => self.fy,
            Dof::Ur => self.m,
        }
    }

    /// Labels of the elements attached to this node
    pub fn elements(&self) -> &[usize] {
        &self.elements
    }

    pub(crate) fn set_displacement(&mut self, dof: Dof, value: Option<f64>) {
        match dof {
            Dof::Ux => self.ux = value,
            Dof::Uy => self.uy = value,
            Dof::Ur => self.ur = value,
        }
    }

    pub(crate) fn set_force(&mut self, dof: Dof, value: f64) {
        match dof {
            Dof::Ux => self.fx = value,
            Dof::Uy => self.fy = value,
            Dof::Ur => self.m = value,
        }
    }

    /// Mark every DOF unknown and clear loads
    pub(crate) fn reset_state(&mut self) {
        self.ux = None;
        self.uy = None;
        self.ur = None;
        self.fx = 0.0;
        self.fy = 0.0;
        self.m = 0.0;
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
