//! Inventory error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the inventory crates.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Inventory-level error.
///
/// Deterministic, business-level failures (validation, missing/duplicate ids)
/// plus the two ways persistence can go wrong: a corrupt stored record and a
/// plain filesystem failure. Every failure leaves the in-memory manager
/// untouched.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// A field failed validation (negative quantity/price, empty name, an
    /// adjustment that would drive quantity below zero).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An add targeted an id that is already present.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    /// A mutating operation targeted an absent id.
    #[error("no product with id {0}")]
    NotFound(ProductId),

    /// An identifier could not be parsed.
    #[error("invalid product id: {0}")]
    InvalidId(String),

    /// A persisted snapshot record was malformed.
    #[error("corrupt snapshot: {0}")]
    Persistence(String),

    /// Filesystem failure while saving, loading, or exporting.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl InventoryError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate(id: ProductId) -> Self {
        Self::DuplicateId(id)
    }

    pub fn not_found(id: ProductId) -> Self {
        Self::NotFound(id)
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}
