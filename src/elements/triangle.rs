//! Linear triangle element - constant strain triangle for plane stress

use serde::{Deserialize, Serialize};

use crate::error::FEAResult;
use crate::math::{self, Mat3x6, Mat6, Vec6};
use crate::results::{Strain, Stress};

/// A three-node plane-stress triangle (2 DOF per node: `ux`, `uy`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearTriangle {
    /// Labels of the corner nodes
    pub nodes: [usize; 3],
    /// Modulus of elasticity
    pub e: f64,
    /// Poisson's ratio
    pub nu: f64,
    /// Thickness
    pub thickness: f64,
}

impl LinearTriangle {
    /// Create a new triangle
    pub fn new(nodes: [usize; 3], e: f64, nu: f64, thickness: f64) -> Self {
        Self {
            nodes,
            e,
            nu,
            thickness,
        }
    }

    /// Strain-displacement matrix and signed area
    pub fn strain_displacement(&self, coords: &[[f64; 2]; 3]) -> FEAResult<(Mat3x6, f64)> {
        math::triangle_strain_displacement(coords)
    }

    /// Local stiffness matrix for `[u1, v1, u2, v2, u3, v3]`
    pub fn local_stiffness(&self, coords: &[[f64; 2]; 3]) -> FEAResult<Mat6> {
        math::triangle_stiffness(self.e, self.nu, self.thickness, coords)
    }

    /// Strain `B·u`
    pub fn strain(&self, coords: &[[f64; 2]; 3], u: &Vec6) -> FEAResult<Strain> {
        let (b, _) = self.strain_displacement(coords)?;
        let e = b * u;
        Ok(Strain::from_components(e[0], e[1], e[2]))
    }

    /// Stress `D·B·u`
    pub fn stress(&self, coords: &[[f64; 2]; 3], u: &Vec6) -> FEAResult<Stress> {
        let (b, _) = self.strain_displacement(coords)?;
        let s = math::plane_stress_matrix(self.e, self.nu) * b * u;
        Ok(Stress::from_components(s[0], s[1], s[2]))
    }
}
