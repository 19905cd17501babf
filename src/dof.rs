//! Degrees of freedom and per-model-type descriptors

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::elements::ElementKind;

/// A single nodal degree of freedom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dof {
    /// Translation along X
    Ux,
    /// Translation along Y
    Uy,
    /// Rotation about the out-of-plane axis
    Ur,
}

impl Dof {
    /// Name of the displacement component
    pub fn name(&self) -> &'static str {
        match self {
            Dof::Ux => "ux",
            Dof::Uy => "uy",
            Dof::Ur => "ur",
        }
    }

    /// Name of the work-conjugate force component
    pub fn force_name(&self) -> &'static str {
        match self {
            Dof::Ux => "fx",
            Dof::Uy => "fy",
            Dof::Ur => "m",
        }
    }
}

impl fmt::Display for Dof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Analysis type of a model. Fixes the element kind it accepts and the
/// ordered DOF set every node contributes to the global system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelType {
    Spring,
    Bar,
    Beam,
    Truss,
    LinearTriangle,
}

impl ModelType {
    /// Ordered DOFs per node; position in this slice is the local DOF index
    pub fn dofs(&self) -> &'static [Dof] {
        match self {
            ModelType::Spring | ModelType::Bar => &[Dof::Ux],
            ModelType::Beam => &[Dof::Uy, Dof::Ur],
            ModelType::Truss | ModelType::LinearTriangle => &[Dof::Ux, Dof::Uy],
        }
    }

    /// Number of DOFs contributed by each node
    pub fn dof_per_node(&self) -> usize {
        self.dofs().len()
    }

    /// Local index of `dof` inside a node block, if the model carries it
    pub fn dof_index(&self, dof: Dof) -> Option<usize> {
        self.dofs().iter().position(|&d| d == dof)
    }

    /// DOFs that `add_force` components map onto, in order
    pub fn force_dofs(&self) -> &'static [Dof] {
        match self {
            ModelType::Spring | ModelType::Bar => &[Dof::Ux],
            ModelType::Beam => &[Dof::Uy],
            ModelType::Truss | ModelType::LinearTriangle => &[Dof::Ux, Dof::Uy],
        }
    }

    /// The only element kind this model accepts
    pub fn element_kind(&self) -> ElementKind {
        match self {
            ModelType::Spring => ElementKind::Spring,
            ModelType::Bar => ElementKind::Bar,
            ModelType::Beam => ElementKind::Beam,
            ModelType::Truss => ElementKind::Truss,
            ModelType::LinearTriangle => ElementKind::LinearTriangle,
        }
    }

    /// Name used when a model is created without one
    pub fn default_name(&self) -> &'static str {
        match self {
            ModelType::Spring => "Spring Model 01",
            ModelType::Bar => "Bar Model 01",
            ModelType::Beam => "Beam Model 01",
            ModelType::Truss => "Truss Model 01",
            ModelType::LinearTriangle => "Linear Triangle Model 01",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Spring => "spring",
            ModelType::Bar => "bar",
            ModelType::Beam => "beam",
            ModelType::Truss => "truss",
            ModelType::LinearTriangle => "linear triangle",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Global equation number of local DOF `local` at node `label`
#[inline]
pub fn global_dof(label: usize, local: usize, dof_per_node: usize) -> usize {
    dof_per_node * label + local
}
