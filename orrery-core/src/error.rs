use thiserror::Error;

/// Errors raised at the simulation boundary
///
/// Nothing that fails validation ever reaches the body store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid value {value} for parameter '{name}'")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("body mass must be positive and finite, got {0}")]
    InvalidMass(f64),

    #[error("{name} must have finite components")]
    NonFiniteVector { name: &'static str },
}

impl SimError {
    pub fn invalid_parameter(name: &'static str, value: f64) -> Self {
        Self::InvalidParameter { name, value }
    }

    /// Name of the offending parameter or field, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { name, .. } => Some(name),
            Self::InvalidMass(_) => Some("mass"),
            Self::NonFiniteVector { name } => Some(name),
        }
    }
}
