//! JSON snapshot persistence.
//!
//! A snapshot is the full product set serialized as a pretty-printed JSON
//! array of `{id, name, quantity, price}` objects, UTF-8, ordered by id.
//! Saves overwrite the whole file; loads replace the whole manager.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use stockpile_core::{InventoryError, InventoryResult, ProductId};
use stockpile_inventory::{Inventory, Product, SortOrder};

/// Wire shape of one snapshot record. Derived fields (total value) are
/// excluded; field invariants are re-checked when records become products.
#[derive(Debug, Serialize, Deserialize)]
struct ProductRecord {
    id: ProductId,
    name: String,
    quantity: i64,
    price: f64,
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id(),
            name: product.name().to_string(),
            quantity: product.quantity(),
            price: product.price(),
        }
    }
}

/// Serialize every product to `path`, overwriting any existing file.
pub fn save(inventory: &Inventory, path: &Path) -> InventoryResult<()> {
    let records: Vec<ProductRecord> = inventory
        .list(SortOrder::Id)
        .into_iter()
        .map(ProductRecord::from)
        .collect();
    let json = serde_json::to_string_pretty(&records)
        .map_err(|e| InventoryError::persistence(format!("serialize snapshot: {e}")))?;
    fs::write(path, json)?;
    info!(count = records.len(), path = %path.display(), "snapshot saved");
    Ok(())
}

/// Load a snapshot, replacing the manager's entire state.
///
/// A missing file is not an error: the manager is left as-is and the count is
/// zero. Otherwise the full array is parsed and validated into a fresh manager
/// before being swapped in, so any malformed record (bad shape, failed field
/// validation, duplicate id) aborts the whole load with `Persistence` and the
/// in-memory state stays unchanged. Records are never silently skipped.
pub fn load(inventory: &mut Inventory, path: &Path) -> InventoryResult<usize> {
    if !path.exists() {
        debug!(path = %path.display(), "no snapshot to load");
        return Ok(0);
    }

    let file = File::open(path)?;
    let records: Vec<ProductRecord> = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| InventoryError::persistence(format!("{}: {e}", path.display())))?;

    let mut fresh = Inventory::new();
    for (index, record) in records.into_iter().enumerate() {
        let id = record.id;
        Product::new(id, record.name, record.quantity, record.price)
            .and_then(|product| fresh.add(product))
            .map_err(|e| {
                InventoryError::persistence(format!(
                    "{}: record {index} (id {id}): {e}",
                    path.display()
                ))
            })?;
    }

    let count = fresh.len();
    *inventory = fresh;
    info!(count, path = %path.display(), "snapshot loaded");
    Ok(count)
}
