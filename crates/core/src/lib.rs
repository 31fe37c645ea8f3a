//! `stockpile-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;

pub use error::{InventoryError, InventoryResult};
pub use id::ProductId;
