//! `stockpile-store` — snapshot persistence and CSV export.
//!
//! All file IO for the inventory lives here; the domain crates stay IO-free.
//! Persistence is whole-file read/replace with no partial-write recovery.

pub mod export;
pub mod snapshot;

pub use export::export_csv;
pub use snapshot::{load, save};
