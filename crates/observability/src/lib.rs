//! `stockpile-observability` — tracing/logging initialization.

mod tracing;

pub use tracing::init;
