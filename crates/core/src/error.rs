//! Domain error model.

use serde::Serialize;
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a deterministic, recoverable business failure. None of them
/// is fatal to a session; callers report the message and move on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input could not be parsed (e.g. malformed cell address).
    #[error("invalid format: {0}")]
    Format(String),

    /// Input parsed but lies outside the warehouse bounds.
    #[error("invalid address: {0}")]
    Range(String),

    /// A value failed validation (e.g. non-positive quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The cell already holds a different product.
    #[error("cell holds a different product: {stored}")]
    ProductMismatch { stored: String },

    /// Adding would push the cell past its capacity.
    #[error("capacity exceeded (max {max}), current quantity: {current}")]
    CapacityExceeded { max: u32, current: u32 },

    /// Removal targeted a cell with no stock.
    #[error("cell is empty")]
    EmptyCell,

    /// Removal asked for more units than the cell holds.
    #[error("insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: u32, requested: u64 },
}

/// Coarse classification of [`DomainError`] variants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Format,
    Range,
    Validation,
    Conflict,
    Capacity,
    Stock,
}

impl DomainError {
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn product_mismatch(stored: impl Into<String>) -> Self {
        Self::ProductMismatch {
            stored: stored.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DomainError::Format(_) => ErrorCategory::Format,
            DomainError::Range(_) => ErrorCategory::Range,
            DomainError::Validation(_) => ErrorCategory::Validation,
            DomainError::ProductMismatch { .. } => ErrorCategory::Conflict,
            DomainError::CapacityExceeded { .. } => ErrorCategory::Capacity,
            DomainError::EmptyCell | DomainError::InsufficientStock { .. } => ErrorCategory::Stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_errors_share_a_category() {
        assert_eq!(DomainError::EmptyCell.category(), ErrorCategory::Stock);
        assert_eq!(
            DomainError::InsufficientStock {
                available: 3,
                requested: 5
            }
            .category(),
            ErrorCategory::Stock
        );
    }

    #[test]
    fn messages_carry_reported_counts() {
        let err = DomainError::CapacityExceeded { max: 10, current: 5 };
        assert_eq!(err.to_string(), "capacity exceeded (max 10), current quantity: 5");

        let err = DomainError::InsufficientStock {
            available: 2,
            requested: 7,
        };
        assert_eq!(err.to_string(), "insufficient stock: available 2, requested 7");
    }

    #[test]
    fn mismatch_names_the_stored_product() {
        let err = DomainError::product_mismatch("Nuts");
        assert_eq!(err.category(), ErrorCategory::Conflict);
        assert_eq!(err.to_string(), "cell holds a different product: Nuts");
    }
}
