//! Structural elements module

mod bar;
mod beam;
mod constraint;
mod node;
mod spring;
mod triangle;
mod truss;

pub use bar::Bar;
pub use beam::Beam;
pub use constraint::Constraint;
pub use node::Node;
pub use spring::Spring;
pub use triangle::LinearTriangle;
pub use truss::Truss;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FEAError, FEAResult};
use crate::math::{self, Mat, Vec6};
use crate::results::{Strain, Stress};

/// Element type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Spring,
    Bar,
    Beam,
    Truss,
    LinearTriangle,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Spring => "spring",
            ElementKind::Bar => "bar",
            ElementKind::Beam => "beam",
            ElementKind::Truss => "truss",
            ElementKind::LinearTriangle => "linear triangle",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any element a model can hold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Element {
    Spring(Spring),
    Bar(Bar),
    Beam(Beam),
    Truss(Truss),
    LinearTriangle(LinearTriangle),
}

impl Element {
    /// Element type tag
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Spring(_) => ElementKind::Spring,
            Element::Bar(_) => ElementKind::Bar,
            Element::Beam(_) => ElementKind::Beam,
            Element::Truss(_) => ElementKind::Truss,
            Element::LinearTriangle(_) => ElementKind::LinearTriangle,
        }
    }

    /// Labels of the incident nodes, in element DOF order
    pub fn nodes(&self) -> &[usize] {
        match self {
            Element::Spring(e) => &e.nodes,
            Element::Bar(e) => &e.nodes,
            Element::Beam(e) => &e.nodes,
            Element::Truss(e) => &e.nodes,
            Element::LinearTriangle(e) => &e.nodes,
        }
    }

    /// Local stiffness matrix, looking up node geometry in `nodes`
    pub fn local_stiffness(&self, nodes: &[Node]) -> FEAResult<Mat> {
        let k = match self {
            Element::Spring(e) => math::to_dynamic(&e.local_stiffness()),
            Element::Bar(e) => math::to_dynamic(&e.local_stiffness()?),
            Element::Beam(e) => math::to_dynamic(&e.local_stiffness()?),
            Element::Truss(e) => {
                let [p1, p2] = node_coords(nodes, &e.nodes)?;
                math::to_dynamic(&e.local_stiffness(p1, p2)?)
            }
            Element::LinearTriangle(e) => {
                let coords = node_coords(nodes, &e.nodes)?;
                math::to_dynamic(&e.local_stiffness(&coords)?)
            }
        };
        Ok(k)
    }

    /// Axial force (tension positive) from local displacements
    pub fn axial_force(&self, nodes: &[Node], u: &[f64]) -> FEAResult<f64> {
        self.check_local_displacements(u)?;
        match self {
            Element::Spring(e) => Ok(e.axial_force([u[0], u[1]])),
            Element::Bar(e) => e.axial_force([u[0], u[1]]),
            Element::Truss(e) => {
                let [p1, p2] = node_coords(nodes, &e.nodes)?;
                e.axial_force(p1, p2, [u[0], u[1], u[2], u[3]])
            }
            _ => Err(FEAError::UnsupportedOperation(format!(
                "{} elements carry no axial force",
                self.kind()
            ))),
        }
    }

    /// Number of element DOFs (`u` length for the recovery methods)
    pub fn num_dofs(&self) -> usize {
        let per_node = match self {
            Element::Spring(_) | Element::Bar(_) => 1,
            Element::Beam(_) | Element::Truss(_) | Element::LinearTriangle(_) => 2,
        };
        per_node * self.nodes().len()
    }

    fn check_local_displacements(&self, u: &[f64]) -> FEAResult<()> {
        if u.len() != self.num_dofs() {
            return Err(FEAError::InvalidInput(format!(
                "{} element expects {} local displacements, got {}",
                self.kind(),
                self.num_dofs(),
                u.len()
            )));
        }
        Ok(())
    }

    /// Cross-sectional area of axial members
    pub fn area(&self) -> Option<f64> {
        match self {
            Element::Bar(e) => Some(e.a),
            Element::Truss(e) => Some(e.a),
            _ => None,
        }
    }

    /// Strain of a linear triangle from local displacements
    pub fn strain(&self, nodes: &[Node], u: &[f64]) -> FEAResult<Strain> {
        self.check_local_displacements(u)?;
        match self {
            Element::LinearTriangle(e) => {
                let coords = node_coords(nodes, &e.nodes)?;
                e.strain(&coords, &Vec6::from_column_slice(u))
            }
            _ => Err(FEAError::UnsupportedOperation(format!(
                "strain is not defined for {} elements",
                self.kind()
            ))),
        }
    }

    /// Stress of a linear triangle from local displacements
    pub fn stress(&self, nodes: &[Node], u: &[f64]) -> FEAResult<Stress> {
        self.check_local_displacements(u)?;
        match self {
            Element::LinearTriangle(e) => {
                let coords = node_coords(nodes, &e.nodes)?;
                e.stress(&coords, &Vec6::from_column_slice(u))
            }
            _ => Err(FEAError::UnsupportedOperation(format!(
                "stress is not defined for {} elements",
                self.kind()
            ))),
        }
    }
}

/// Coordinates of the nodes with the given labels
fn node_coords<const N: usize>(nodes: &[Node], labels: &[usize; N]) -> FEAResult<[[f64; 2]; N]> {
    let mut coords = [[0.0; 2]; N];
    for (c, &label) in coords.iter_mut().zip(labels) {
        *c = nodes
            .get(label)
            .ok_or(FEAError::NodeNotFound(label))?
            .coords();
    }
    Ok(coords)
}

impl From<Spring> for Element {
    fn from(e: Spring) -> Self {
        Element::Spring(e)
    }
}

impl From<Bar> for Element {
    fn from(e: Bar) -> Self {
        Element::Bar(e)
    }
}

impl From<Beam> for Element {
    fn from(e: Beam) -> Self {
        Element::Beam(e)
    }
}

impl From<Truss> for Element {
    fn from(e: Truss) -> Self {
        Element::Truss(e)
    }
}

impl From<LinearTriangle> for Element {
    fn from(e: LinearTriangle) -> Self {
        Element::LinearTriangle(e)
    }
}
