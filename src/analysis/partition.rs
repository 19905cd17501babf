//! Known/unknown partition, reduced solve and force recovery

use log::debug;

use crate::error::{FEAError, FEAResult};
use crate::math::{self, Mat, Vec as FEVec};

/// Split of global DOF indices by whether their displacement is prescribed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// DOFs with a prescribed displacement
    pub known: Vec<usize>,
    /// DOFs solved for
    pub unknown: Vec<usize>,
}

impl Partition {
    /// Partition a displacement vector where `None` marks an unknown
    pub fn from_prescribed(prescribed: &[Option<f64>]) -> Self {
        let mut partition = Self::default();
        for (i, value) in prescribed.iter().enumerate() {
            match value {
                Some(_) => partition.known.push(i),
                None => partition.unknown.push(i),
            }
        }
        partition
    }
}

/// Complete displacement and force vectors of a solved system
#[derive(Debug, Clone)]
pub struct Solution {
    /// Global displacement vector `U` (prescribed and solved values)
    pub displacements: FEVec,
    /// Recovered force vector `KG · U`
    pub forces: FEVec,
    /// Partition used for the solve
    pub partition: Partition,
}

/// Solve `KG · U = F` with some entries of `U` prescribed
///
/// Rows and columns of known DOFs are removed from `KG`; their contribution
/// `K_uk · U_k` is moved to the right-hand side. After the reduced solve the
/// full force vector is recomputed as `KG · U`, giving reactions at the known
/// DOFs.
///
/// # Arguments
/// * `kg` - Global stiffness matrix
/// * `forces` - Applied load vector
/// * `prescribed` - Prescribed displacements, `None` for unknowns
/// * `pivot_tolerance` - Relative singularity threshold for the reduced solve
pub fn solve_partitioned(
    kg: &Mat,
    forces: &FEVec,
    prescribed: &[Option<f64>],
    pivot_tolerance: f64,
) -> FEAResult<Solution> {
    let n = kg.nrows();
    if kg.ncols() != n || forces.len() != n || prescribed.len() != n {
        return Err(FEAError::InvalidInput(format!(
            "Inconsistent system sizes: K {}x{}, F {}, U {}",
            n,
            kg.ncols(),
            forces.len(),
            prescribed.len()
        )));
    }

    let partition = Partition::from_prescribed(prescribed);
    let n_unknown = partition.unknown.len();
    debug!(
        "partitioned {n} DOFs into {} known and {n_unknown} unknown",
        partition.known.len()
    );

    let mut u = FEVec::from_iterator(n, prescribed.iter().map(|v| v.unwrap_or(0.0)));

    let mut k_reduced = Mat::zeros(n_unknown, n_unknown);
    let mut f_reduced = FEVec::zeros(n_unknown);

    for (i, &di) in partition.unknown.iter().enumerate() {
        f_reduced[i] = forces[di];

        for (j, &dj) in partition.unknown.iter().enumerate() {
            k_reduced[(i, j)] = kg[(di, dj)];
        }

        // Prescribed displacements
        for &dj in &partition.known {
            f_reduced[i] -= kg[(di, dj)] * u[dj];
        }
    }

    let u_unknown = math::solve_linear_system(&k_reduced, &f_reduced, pivot_tolerance)?;

    for (i, &di) in partition.unknown.iter().enumerate() {
        u[di] = u_unknown[i];
    }

    let recovered = kg * &u;

    Ok(Solution {
        displacements: u,
        forces: recovered,
        partition,
    })
}
