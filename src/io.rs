//! JSON model descriptions
//!
//! ```json
//! {
//!   "nodes":       [{"x": 0.0, "y": 0.0}, ...],
//!   "elements":    [{"ni": 1, "nj": 2, "E": 30e6, "A": 2.0}, ...],
//!   "constraints": [{"node": 1, "ux": 0.0, "uy": "free"}, ...],
//!   "forces":      [{"node": 2, "fx": 0.0, "fy": -1000.0}, ...]
//! }
//! ```
//!
//! Node numbers are 1-based. Spring models use `{"ni", "nj", "ke"}` elements.

use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::dof::ModelType;
use crate::elements::{Constraint, Node, Spring, Truss};
use crate::error::{FEAError, FEAResult};
use crate::model::Model;

#[derive(Debug, Deserialize)]
struct ModelFile<E> {
    nodes: Vec<NodeEntry>,
    elements: Vec<E>,
    #[serde(default)]
    constraints: Vec<ConstraintEntry>,
    #[serde(default)]
    forces: Vec<ForceEntry>,
}

#[derive(Debug, Deserialize)]
struct NodeEntry {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct TrussEntry {
    ni: usize,
    nj: usize,
    #[serde(rename = "E")]
    e: f64,
    #[serde(rename = "A")]
    a: f64,
}

#[derive(Debug, Deserialize)]
struct SpringEntry {
    ni: usize,
    nj: usize,
    ke: f64,
}

/// A constraint component: a prescribed value or the string `"free"`
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum Component {
    Value(f64),
    Free(FreeTag),
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum FreeTag {
    Free,
}

impl Component {
    fn value(self) -> Option<f64> {
        match self {
            Component::Value(v) => Some(v),
            Component::Free(_) => None,
        }
    }
}

impl Default for Component {
    fn default() -> Self {
        Component::Free(FreeTag::Free)
    }
}

#[derive(Debug, Deserialize)]
struct ConstraintEntry {
    node: usize,
    #[serde(default)]
    ux: Component,
    #[serde(default)]
    uy: Component,
}

#[derive(Debug, Deserialize)]
struct ForceEntry {
    node: usize,
    #[serde(default)]
    fx: f64,
    #[serde(default)]
    fy: f64,
}

/// Convert a 1-based node number to a label
fn label(number: usize, num_nodes: usize) -> FEAResult<usize> {
    if number == 0 || number > num_nodes {
        return Err(FEAError::InvalidInput(format!(
            "node number {number} out of range 1..={num_nodes}"
        )));
    }
    Ok(number - 1)
}

fn add_nodes(model: &mut Model, nodes: &[NodeEntry]) {
    for n in nodes {
        model.add_node(Node::new(n.x, n.y));
    }
}

/// Read a truss model from a JSON description
pub fn read_truss_model<R: Read>(reader: R) -> FEAResult<Model> {
    let file: ModelFile<TrussEntry> = serde_json::from_reader(reader)?;
    let n = file.nodes.len();

    let mut model = Model::new("Truss Model", ModelType::Truss);
    add_nodes(&mut model, &file.nodes);

    for e in &file.elements {
        model.add_element(Truss::new([label(e.ni, n)?, label(e.nj, n)?], e.e, e.a))?;
    }

    for c in &file.constraints {
        let constraint = Constraint {
            ux: c.ux.value(),
            uy: c.uy.value(),
            ur: None,
        };
        model.add_constraint(label(c.node, n)?, constraint)?;
    }

    for f in &file.forces {
        model.add_force(label(f.node, n)?, &[f.fx, f.fy])?;
    }

    Ok(model)
}

/// Read a spring model from a JSON description
///
/// Only the `ux` constraint component and `fx` force component apply.
pub fn read_spring_model<R: Read>(reader: R) -> FEAResult<Model> {
    let file: ModelFile<SpringEntry> = serde_json::from_reader(reader)?;
    let n = file.nodes.len();

    let mut model = Model::new("Spring Model", ModelType::Spring);
    add_nodes(&mut model, &file.nodes);

    for e in &file.elements {
        model.add_element(Spring::new([label(e.ni, n)?, label(e.nj, n)?], e.ke))?;
    }

    for c in &file.constraints {
        if let Some(ux) = c.ux.value() {
            model.add_constraint(label(c.node, n)?, Constraint::new().with_ux(ux))?;
        }
    }

    for f in &file.forces {
        model.add_force(label(f.node, n)?, &[f.fx])?;
    }

    Ok(model)
}

pub fn read_truss_model_file<P: AsRef<Path>>(path: P) -> FEAResult<Model> {
    read_truss_model(BufReader::new(File::open(path)?))
}

pub fn read_spring_model_file<P: AsRef<Path>>(path: P) -> FEAResult<Model> {
    read_spring_model(BufReader::new(File::open(path)?))
}
