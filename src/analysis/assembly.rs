//! Global stiffness assembly

use log::debug;

use crate::dof::global_dof;
use crate::elements::{Element, Node};
use crate::error::{FEAError, FEAResult};
use crate::math::Mat;

/// Scatter-add a local stiffness matrix into the global matrix
///
/// Local index `p` maps to global index
/// `dof_per_node * labels[p / dof_per_node] + p % dof_per_node`.
pub fn scatter_element(kg: &mut Mat, k_local: &Mat, labels: &[usize], dof_per_node: usize) -> FEAResult<()> {
    let n_local = labels.len() * dof_per_node;
    if k_local.shape() != (n_local, n_local) {
        return Err(FEAError::InvalidInput(format!(
            "Local stiffness is {}x{}, expected {n_local}x{n_local}",
            k_local.nrows(),
            k_local.ncols()
        )));
    }

    let map: Vec<usize> = (0..n_local)
        .map(|p| global_dof(labels[p / dof_per_node], p % dof_per_node, dof_per_node))
        .collect();

    if let Some(&out) = map.iter().find(|&&g| g >= kg.nrows()) {
        return Err(FEAError::NodeNotFound(out / dof_per_node));
    }

    for (p, &gp) in map.iter().enumerate() {
        for (q, &gq) in map.iter().enumerate() {
            kg[(gp, gq)] += k_local[(p, q)];
        }
    }

    Ok(())
}

/// Build the global stiffness matrix of size `(dof_per_node · N)²`
pub fn assemble_global_stiffness(nodes: &[Node], elements: &[Element], dof_per_node: usize) -> FEAResult<Mat> {
    let n_dofs = dof_per_node * nodes.len();
    let mut kg = Mat::zeros(n_dofs, n_dofs);

    for (label, element) in elements.iter().enumerate() {
        let k_local = element.local_stiffness(nodes)?;
        scatter_element(&mut kg, &k_local, element.nodes(), dof_per_node)?;
        debug!("scattered {} element {label} into nodes {:?}", element.kind(), element.nodes());
    }

    Ok(kg)
}
