//! Error types for the linear FEA core

use thiserror::Error;

use crate::dof::ModelType;
use crate::elements::ElementKind;

/// Main error type for FEA operations
#[derive(Error, Debug)]
pub enum FEAError {
    #[error("Element type must be '{expected}', got '{found}'")]
    TypeMismatch {
        expected: ModelType,
        found: ElementKind,
    },

    #[error("Node {0} not found in model")]
    NodeNotFound(usize),

    #[error("Element {0} not found in model")]
    ElementNotFound(usize),

    #[error("Singular stiffness matrix - model may be unstable or have insufficient supports")]
    SingularMatrix,

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Model not solved - run solve() first")]
    NotSolved,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl FEAError {
    /// True when the failure comes from an ill-posed (insufficiently constrained) system
    pub fn is_ill_posed(&self) -> bool {
        matches!(self, FEAError::SingularMatrix)
    }
}

/// Result type for FEA operations
pub type FEAResult<T> = Result<T, FEAError>;
