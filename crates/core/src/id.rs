//! Strongly-typed product identifier.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

/// Identifier of a product. Unique within a manager, immutable after creation,
/// used as the primary map key.
///
/// Ids are caller-supplied integers (they come from user input or a persisted
/// snapshot), so this is a transparent wrapper rather than a generated id.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ProductId> for i64 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl FromStr for ProductId {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|e| InventoryError::invalid_id(format!("{s:?}: {e}")))?;
        Ok(Self(raw))
    }
}
