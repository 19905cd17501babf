//! Displacement constraints (supports and prescribed displacements)

use serde::{Deserialize, Serialize};

use crate::dof::Dof;

/// Prescribed displacement components at a node
///
/// A component set to `Some(value)` is known; `None` leaves it free.
/// Components a model type does not carry are ignored when applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// Prescribed X translation
    pub ux: Option<f64>,
    /// Prescribed Y translation
    pub uy: Option<f64>,
    /// Prescribed rotation
    pub ur: Option<f64>,
}

impl Constraint {
    /// Create a constraint with no restrained components
    pub fn new() -> Self {
        Self::default()
    }

    /// Encastre: translations and rotation fixed
    pub fn fixed() -> Self {
        Self {
            ux: Some(0.0),
            uy: Some(0.0),
            ur: Some(0.0),
        }
    }

    /// Pin: translations fixed, rotation free
    pub fn pinned() -> Self {
        Self {
            ux: Some(0.0),
            uy: Some(0.0),
            ur: None,
        }
    }

    /// Simple support: transverse (Y) translation fixed only
    pub fn simple() -> Self {
        Self {
            uy: Some(0.0),
            ..Default::default()
        }
    }

    /// Roller restraining X translation only
    pub fn roller_x() -> Self {
        Self {
            ux: Some(0.0),
            ..Default::default()
        }
    }

    /// Prescribe X translation
    pub fn with_ux(mut self, value: f64) -> Self {
        self.ux = Some(value);
        self
    }

    /// Prescribe Y translation
    pub fn with_uy(mut self, value: f64) -> Self {
        self.uy = Some(value);
        self
    }

    /// Prescribe rotation
    pub fn with_ur(mut self, value: f64) -> Self {
        self.ur = Some(value);
        self
    }

    /// Prescribed value for a DOF
    pub fn value(&self, dof: Dof) -> Option<f64> {
        match dof {
            Dof::Ux => self.ux,
            Dof::Uy => self.uy,
            Dof::Ur => self.ur,
        }
    }

    /// Restrained components as `(dof, value)` pairs
    pub fn components(&self) -> impl Iterator<Item = (Dof, f64)> + '_ {
        [Dof::Ux, Dof::Uy, Dof::Ur]
            .into_iter()
            .filter_map(move |dof| self.value(dof).map(|v| (dof, v)))
    }

    /// Count number of restrained components
    pub fn num_restrained(&self) -> usize {
        self.components().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_constraint() {
        let c = Constraint::fixed();
        assert_eq!(c.num_restrained(), 3);
        assert_eq!(c.value(Dof::Ur), Some(0.0));
    }

    #[test]
    fn test_simple_and_pinned() {
        assert_eq!(Constraint::simple().num_restrained(), 1);
        assert_eq!(Constraint::simple().value(Dof::Uy), Some(0.0));
        assert_eq!(Constraint::pinned().value(Dof::Ur), None);
    }

    #[test]
    fn test_prescribed_displacement() {
        let c = Constraint::new().with_ux(0.02);
        let parts: Vec<(Dof, f64)> = c.components().collect();
        assert_eq!(parts, vec![(Dof::Ux, 0.02)]);
    }
}
