//! Inventory domain module.
//!
//! This crate contains the product entity and the indexed inventory manager,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod manager;
pub mod product;

pub use manager::{Inventory, SortOrder, Summary};
pub use product::{Product, normalize_name};
