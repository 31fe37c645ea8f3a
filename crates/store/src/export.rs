//! CSV export.
//!
//! Tabular summary of the inventory in the manager's default (id) order, with
//! price and total value fixed to two decimals.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use stockpile_core::InventoryResult;
use stockpile_inventory::{Inventory, SortOrder};

const HEADER: &str = "ID,Nombre,Cantidad,Precio,Valor total";

/// Write the whole inventory to `path` as CSV, overwriting any existing file.
pub fn export_csv(inventory: &Inventory, path: &Path) -> InventoryResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{HEADER}")?;
    let products = inventory.list(SortOrder::Id);
    for product in &products {
        writeln!(
            writer,
            "{},{},{},{:.2},{:.2}",
            product.id(),
            csv_field(product.name()),
            product.quantity(),
            product.price(),
            product.total_value(),
        )?;
    }
    writer.flush()?;
    info!(count = products.len(), path = %path.display(), "csv exported");
    Ok(())
}

/// Quote a field when it contains a separator, a quote, or a line break;
/// embedded quotes are doubled. Numeric columns never need this.
fn csv_field(raw: &str) -> Cow<'_, str> {
    if raw.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", raw.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(raw)
    }
}
