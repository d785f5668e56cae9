use thiserror::Error;

/// Rejected input at the boundary. Nothing has been written when this is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field '{0}' must not be empty")]
    MissingField(&'static str),

    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i32),
}
