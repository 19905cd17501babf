//! FE Model - node/element container and linear static pipeline
//!
//! A model owns its nodes and elements. Labels are assigned in insertion
//! order and double as indices into the model's tables; a node's label fixes
//! its block of rows in the global system.

use log::{info, warn};
use std::fmt;

use crate::analysis::{self, AnalysisOptions, Solution};
use crate::dof::{global_dof, Dof, ModelType};
use crate::elements::{Constraint, Element, Node};
use crate::error::{FEAError, FEAResult};
use crate::math::{Mat, Vec as FEVec};
use crate::results::{AnalysisSummary, NodeDisplacement, NodeForces, Strain, Stress};

/// Lifecycle of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ModelState {
    /// No nodes or elements yet
    Empty,
    /// Nodes/elements added since the last assembly
    Populated,
    /// Global matrix built, no loads or constraints yet
    Assembled,
    /// Loads or constraints registered
    Constrained,
    /// Displacements and forces available
    Solved,
}

/// A linear static model for a single element type
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    model_type: ModelType,
    nodes: Vec<Node>,
    elements: Vec<Element>,
    options: AnalysisOptions,
    state: ModelState,

    /// Global stiffness matrix, `None` until (re)assembled
    kg: Option<Mat>,
    /// Applied loads, indexed by global DOF
    forces: FEVec,
    /// Prescribed displacements, `None` for unknowns
    prescribed: Vec<Option<f64>>,
    solution: Option<Solution>,
}

impl Model {
    /// Create a new empty model
    pub fn new(name: &str, model_type: ModelType) -> Self {
        Self {
            name: name.to_string(),
            model_type,
            nodes: Vec::new(),
            elements: Vec::new(),
            options: AnalysisOptions::default(),
            state: ModelState::Empty,
            kg: None,
            forces: FEVec::zeros(0),
            prescribed: Vec::new(),
            solution: None,
        }
    }

    /// Model of springs with its default name
    pub fn spring() -> Self {
        Self::new(ModelType::Spring.default_name(), ModelType::Spring)
    }

    /// Model of bars with its default name
    pub fn bar() -> Self {
        Self::new(ModelType::Bar.default_name(), ModelType::Bar)
    }

    /// Model of beams with its default name
    pub fn beam() -> Self {
        Self::new(ModelType::Beam.default_name(), ModelType::Beam)
    }

    /// Model of truss members with its default name
    pub fn truss() -> Self {
        Self::new(ModelType::Truss.default_name(), ModelType::Truss)
    }

    /// Model of linear triangles with its default name
    pub fn linear_triangle() -> Self {
        Self::new(ModelType::LinearTriangle.default_name(), ModelType::LinearTriangle)
    }

    /// Replace the analysis options
    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    pub fn set_options(&mut self, options: AnalysisOptions) {
        self.options = options;
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a node to the model
    ///
    /// # Returns
    /// The node label (insertion order, 0-based)
    pub fn add_node(&mut self, mut node: Node) -> usize {
        let label = self.nodes.len();
        node.label = Some(label);
        node.elements.clear();
        node.reset_state();
        self.nodes.push(node);
        self.invalidate_assembly();
        label
    }

    /// Add an element to the model
    ///
    /// Fails with [`FEAError::TypeMismatch`] when the element kind does not
    /// belong to this model type.
    ///
    /// # Returns
    /// The element label (insertion order, 0-based)
    pub fn add_element(&mut self, element: impl Into<Element>) -> FEAResult<usize> {
        let element = element.into();

        if element.kind() != self.model_type.element_kind() {
            return Err(FEAError::TypeMismatch {
                expected: self.model_type,
                found: element.kind(),
            });
        }
        for &n in element.nodes() {
            self.check_node(n)?;
        }

        let label = self.elements.len();
        for &n in element.nodes() {
            let incident = &mut self.nodes[n].elements;
            if !incident.contains(&label) {
                incident.push(label);
            }
        }
        self.elements.push(element);
        self.invalidate_assembly();
        Ok(label)
    }

    /// Build the global stiffness matrix
    ///
    /// Also zero-initializes the load vector and marks every DOF unknown, so
    /// loads and constraints must be registered afterwards.
    pub fn build_global_matrix(&mut self) -> FEAResult<()> {
        if self.nodes.is_empty() {
            return Err(FEAError::InvalidInput("Model has no nodes".to_string()));
        }

        let d = self.model_type.dof_per_node();
        let kg = analysis::assemble_global_stiffness(&self.nodes, &self.elements, d)?;
        let n_dofs = kg.nrows();

        self.kg = Some(kg);
        self.forces = FEVec::zeros(n_dofs);
        self.prescribed = vec![None; n_dofs];
        self.solution = None;
        for node in &mut self.nodes {
            node.reset_state();
        }
        self.state = ModelState::Assembled;

        info!(
            "{}: assembled {n_dofs}x{n_dofs} global stiffness matrix from {} elements",
            self.name,
            self.elements.len()
        );
        Ok(())
    }

    // ========================
    // Boundary Conditions
    // ========================

    /// Set force components at a node
    ///
    /// Components map in order onto the model's translational DOFs
    /// (`fx` for springs/bars, `fy` for beams, `fx, fy` for trusses and
    /// triangles). Values overwrite any earlier load on the same DOF.
    pub fn add_force(&mut self, node: usize, components: &[f64]) -> FEAResult<()> {
        self.check_node(node)?;
        for &value in components {
            check_finite(value, "force", node)?;
        }
        self.ensure_assembled()?;
        self.invalidate_solution();

        let force_dofs = self.model_type.force_dofs();
        if components.len() > force_dofs.len() {
            warn!(
                "{}: ignoring {} extra force component(s) at node {node}",
                self.name,
                components.len() - force_dofs.len()
            );
        }

        for (&dof, &value) in force_dofs.iter().zip(components) {
            self.set_load(node, dof, value);
        }
        self.state = ModelState::Constrained;
        Ok(())
    }

    /// Set the moment at a node (beam models only)
    pub fn add_moment(&mut self, node: usize, value: f64) -> FEAResult<()> {
        if self.model_type != ModelType::Beam {
            return Err(FEAError::UnsupportedOperation(format!(
                "moments cannot be applied to a {} model",
                self.model_type
            )));
        }
        self.check_node(node)?;
        check_finite(value, "moment", node)?;
        self.ensure_assembled()?;
        self.invalidate_solution();

        self.set_load(node, Dof::Ur, value);
        self.state = ModelState::Constrained;
        Ok(())
    }

    /// Prescribe displacement components at a node
    ///
    /// The value is written to the node immediately. Components this model
    /// type does not carry are ignored.
    pub fn add_constraint(&mut self, node: usize, constraint: Constraint) -> FEAResult<()> {
        self.check_node(node)?;
        for (_, value) in constraint.components() {
            check_finite(value, "prescribed displacement", node)?;
        }
        self.ensure_assembled()?;
        self.invalidate_solution();

        let d = self.model_type.dof_per_node();
        for (dof, value) in constraint.components() {
            match self.model_type.dof_index(dof) {
                Some(local) => {
                    self.prescribed[global_dof(node, local, d)] = Some(value);
                    self.nodes[node].set_displacement(dof, Some(value));
                }
                None => warn!(
                    "{}: ignoring '{dof}' constraint at node {node}, not a {} DOF",
                    self.name, self.model_type
                ),
            }
        }
        self.state = ModelState::Constrained;
        Ok(())
    }

    fn set_load(&mut self, node: usize, dof: Dof, value: f64) {
        if let Some(local) = self.model_type.dof_index(dof) {
            let g = global_dof(node, local, self.model_type.dof_per_node());
            self.forces[g] = value;
            self.nodes[node].set_force(dof, value);
        }
    }

    // ========================
    // Analysis Methods
    // ========================

    /// Solve for nodal displacements and forces
    ///
    /// Unknown displacements and every nodal force (applied loads at free
    /// DOFs, reactions at constrained ones) are written back onto the nodes.
    pub fn solve(&mut self) -> FEAResult<()> {
        if self.nodes.is_empty() {
            return Err(FEAError::InvalidInput("Model has no nodes".to_string()));
        }
        self.ensure_assembled()?;

        let kg = self.kg.as_ref().ok_or(FEAError::NotSolved)?;
        let solution = analysis::solve_partitioned(
            kg,
            &self.forces,
            &self.prescribed,
            self.options.pivot_tolerance,
        )?;

        let dofs = self.model_type.dofs();
        let d = dofs.len();
        for (label, node) in self.nodes.iter_mut().enumerate() {
            for (local, &dof) in dofs.iter().enumerate() {
                let g = global_dof(label, local, d);
                node.set_displacement(dof, Some(solution.displacements[g]));
                node.set_force(dof, solution.forces[g]);
            }
        }

        if self.options.check_statics {
            self.check_statics(&solution);
        }

        info!(
            "{}: solved {} unknown DOFs ({} prescribed)",
            self.name,
            solution.partition.unknown.len(),
            solution.partition.known.len()
        );

        self.solution = Some(solution);
        self.state = ModelState::Solved;
        Ok(())
    }

    /// Compare recovered and applied forces at free DOFs
    fn check_statics(&self, solution: &Solution) {
        let scale = self.forces.amax().max(solution.forces.amax());
        if scale == 0.0 {
            return;
        }

        let residual = solution
            .partition
            .unknown
            .iter()
            .map(|&g| (solution.forces[g] - self.forces[g]).abs())
            .fold(0.0_f64, f64::max);

        if residual > self.options.statics_tolerance * scale {
            warn!(
                "{}: equilibrium residual {residual:e} exceeds tolerance (scale {scale:e})",
                self.name
            );
        }
    }

    fn ensure_assembled(&mut self) -> FEAResult<()> {
        if self.kg.is_none() {
            self.build_global_matrix()?;
        }
        Ok(())
    }

    /// Drop the assembled system after the mesh changed
    fn invalidate_assembly(&mut self) {
        if self.state >= ModelState::Constrained {
            warn!(
                "{}: mesh changed after loads/constraints were applied; they will be discarded on re-assembly",
                self.name
            );
        }
        self.kg = None;
        self.solution = None;
        for node in &mut self.nodes {
            node.reset_state();
        }
        self.state = ModelState::Populated;
    }

    /// Forget solved values so only prescribed displacements and applied loads remain
    fn invalidate_solution(&mut self) {
        if self.solution.take().is_none() {
            return;
        }
        let dofs = self.model_type.dofs();
        let d = dofs.len();
        for (label, node) in self.nodes.iter_mut().enumerate() {
            for (local, &dof) in dofs.iter().enumerate() {
                let g = global_dof(label, local, d);
                node.set_displacement(dof, self.prescribed[g]);
                node.set_force(dof, self.forces[g]);
            }
        }
    }

    fn check_node(&self, node: usize) -> FEAResult<()> {
        if node < self.nodes.len() {
            Ok(())
        } else {
            Err(FEAError::NodeNotFound(node))
        }
    }

    // ========================
    // Result Access Methods
    // ========================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    pub fn state(&self) -> ModelState {
        self.state
    }

    /// Check if the current loads and constraints have been solved
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn number_of_elements(&self) -> usize {
        self.elements.len()
    }

    /// All nodes, indexed by label
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All elements, indexed by label
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn node(&self, node: usize) -> FEAResult<&Node> {
        self.nodes.get(node).ok_or(FEAError::NodeNotFound(node))
    }

    pub fn element(&self, element: usize) -> FEAResult<&Element> {
        self.elements
            .get(element)
            .ok_or(FEAError::ElementNotFound(element))
    }

    /// Assembled global stiffness matrix
    pub fn global_matrix(&self) -> Option<&Mat> {
        self.kg.as_ref()
    }

    /// Applied load vector, indexed by global DOF
    pub fn force_vector(&self) -> &FEVec {
        &self.forces
    }

    /// Complete displacement vector `U`
    pub fn displacement_vector(&self) -> FEAResult<&FEVec> {
        self.solution
            .as_ref()
            .map(|s| &s.displacements)
            .ok_or(FEAError::NotSolved)
    }

    /// Recovered force vector `KG · U`
    pub fn nodal_force_vector(&self) -> FEAResult<&FEVec> {
        self.solution
            .as_ref()
            .map(|s| &s.forces)
            .ok_or(FEAError::NotSolved)
    }

    /// Displacement components of a node
    pub fn node_displacement(&self, node: usize) -> FEAResult<NodeDisplacement> {
        let n = self.node(node)?;
        Ok(NodeDisplacement {
            ux: n.ux(),
            uy: n.uy(),
            ur: n.ur(),
        })
    }

    /// Force components of a node (reactions at supports after solve)
    pub fn node_forces(&self, node: usize) -> FEAResult<NodeForces> {
        let n = self.node(node)?;
        Ok(NodeForces {
            fx: n.fx(),
            fy: n.fy(),
            m: n.m(),
        })
    }

    /// Current displacements of an element's DOFs, in local order
    pub fn element_displacements(&self, element: usize) -> FEAResult<Vec<f64>> {
        let e = self.element(element)?;
        let mut u = Vec::with_capacity(e.nodes().len() * self.model_type.dof_per_node());
        for &n in e.nodes() {
            let node = self.node(n)?;
            for &dof in self.model_type.dofs() {
                u.push(node.displacement(dof).ok_or(FEAError::NotSolved)?);
            }
        }
        Ok(u)
    }

    /// Element nodal forces `k_local · u_local`
    ///
    /// For beams this is `[V1, M1, V2, M2]`; for trusses the forces are in
    /// global axes.
    pub fn element_forces(&self, element: usize) -> FEAResult<Vec<f64>> {
        let e = self.element(element)?;
        let u = FEVec::from_vec(self.element_displacements(element)?);
        let f = e.local_stiffness(&self.nodes)? * u;
        Ok(f.iter().copied().collect())
    }

    /// Axial force of a spring, bar or truss member (tension positive)
    pub fn element_axial_force(&self, element: usize) -> FEAResult<f64> {
        let e = self.element(element)?;
        let u = self.element_displacements(element)?;
        e.axial_force(&self.nodes, &u)
    }

    /// Axial stress `N/A` of a bar or truss member
    pub fn element_axial_stress(&self, element: usize) -> FEAResult<f64> {
        let e = self.element(element)?;
        let area = e.area().ok_or_else(|| {
            FEAError::UnsupportedOperation(format!("{} elements have no cross-section", e.kind()))
        })?;
        Ok(self.element_axial_force(element)? / area)
    }

    /// Stress of a linear triangle, computed from current displacements
    pub fn element_stress(&self, element: usize) -> FEAResult<Stress> {
        let e = self.element(element)?;
        let u = self.element_displacements(element)?;
        e.stress(&self.nodes, &u)
    }

    /// Strain of a linear triangle, computed from current displacements
    pub fn element_strain(&self, element: usize) -> FEAResult<Strain> {
        let e = self.element(element)?;
        let u = self.element_displacements(element)?;
        e.strain(&self.nodes, &u)
    }

    /// Nodal stress: mean of the stresses of all incident elements
    pub fn node_stress(&self, node: usize) -> FEAResult<Stress> {
        let stresses = self
            .node(node)?
            .elements()
            .iter()
            .map(|&e| self.element_stress(e))
            .collect::<FEAResult<Vec<_>>>()?;
        Ok(Stress::mean(stresses))
    }

    /// Nodal strain: mean of the strains of all incident elements
    pub fn node_strain(&self, node: usize) -> FEAResult<Strain> {
        let strains = self
            .node(node)?
            .elements()
            .iter()
            .map(|&e| self.element_strain(e))
            .collect::<FEAResult<Vec<_>>>()?;
        Ok(Strain::mean(strains))
    }

    /// Get analysis summary
    pub fn summary(&self) -> FEAResult<AnalysisSummary> {
        let solution = self.solution.as_ref().ok_or(FEAError::NotSolved)?;
        let d = self.model_type.dof_per_node();

        let mut summary = AnalysisSummary {
            num_nodes: self.nodes.len(),
            num_elements: self.elements.len(),
            total_dofs: d * self.nodes.len(),
            free_dofs: solution.partition.unknown.len(),
            ..Default::default()
        };

        for (label, node) in self.nodes.iter().enumerate() {
            let disp = (node.ux().unwrap_or(0.0).powi(2) + node.uy().unwrap_or(0.0).powi(2)).sqrt();
            if disp > summary.max_displacement {
                summary.max_displacement = disp;
                summary.max_disp_node = label;
            }
        }

        for &g in &solution.partition.known {
            let reaction = solution.forces[g].abs();
            if reaction > summary.max_reaction {
                summary.max_reaction = reaction;
                summary.max_reaction_node = g / d;
            }
        }

        Ok(summary)
    }
}

fn check_finite(value: f64, what: &str, node: usize) -> FEAResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FEAError::InvalidInput(format!(
            "{what} at node {node} is not finite ({value})"
        )))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Model: {}\nNodes: {}\nElements: {}",
            self.name,
            self.number_of_nodes(),
            self.number_of_elements()
        )
    }
}
