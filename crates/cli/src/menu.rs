//! Interactive menu loop.
//!
//! Generic over reader/writer so whole sessions can be driven from tests.
//! Manager errors are printed and the loop continues; the snapshot is saved
//! after every successful mutation and on exit, as the original console tool
//! does. EOF on the input is treated as save-and-exit.

use std::io::{self, BufRead, Write};
use std::path::Path;

use stockpile_core::{InventoryResult, ProductId};
use stockpile_inventory::{Inventory, Product, SortOrder};

use crate::input;

const MENU: &str = "\n=== INVENTORY MENU ===\n\
1. Add product\n\
2. Remove product\n\
3. Update quantity\n\
4. Update price\n\
5. Rename product\n\
6. Search by name\n\
7. List products\n\
8. Export to CSV\n\
9. Summary\n\
0. Save and exit";

pub fn run<R: BufRead, W: Write>(
    inventory: &mut Inventory,
    snapshot: &Path,
    export: &Path,
    reader: &mut R,
    writer: &mut W,
) -> io::Result<()> {
    loop {
        writeln!(writer, "{MENU}")?;
        let Some(choice) = input::prompt_text(reader, writer, "Select an option: ")? else {
            break;
        };

        match choice.as_str() {
            "1" => {
                let Some(id) = input::prompt_i64(reader, writer, "ID (integer, unique): ")? else {
                    break;
                };
                let Some(name) = input::prompt_text(reader, writer, "Name: ")? else {
                    break;
                };
                let Some(quantity) = input::prompt_i64(reader, writer, "Quantity: ")? else {
                    break;
                };
                let Some(price) = input::prompt_f64(reader, writer, "Price: ")? else {
                    break;
                };
                let added = Product::new(ProductId::new(id), name, quantity, price)
                    .and_then(|product| inventory.add(product));
                if report(writer, added, "Product added.")? {
                    save_snapshot(inventory, snapshot, writer)?;
                }
            }

            "2" => {
                let Some(id) = input::prompt_i64(reader, writer, "ID to remove: ")? else {
                    break;
                };
                match inventory.remove(ProductId::new(id)) {
                    Ok(product) => {
                        writeln!(writer, "Removed: {} - {}", product.id(), product.name())?;
                        save_snapshot(inventory, snapshot, writer)?;
                    }
                    Err(e) => writeln!(writer, "Error: {e}")?,
                }
            }

            "3" => {
                let Some(id) = input::prompt_i64(reader, writer, "Product ID: ")? else {
                    break;
                };
                let Some(mode) =
                    input::prompt_text(reader, writer, "(A)djust +/- or (S)et exact quantity? [A/S]: ")?
                else {
                    break;
                };
                let updated = if mode.eq_ignore_ascii_case("a") {
                    let Some(delta) = input::prompt_i64(reader, writer, "Delta (may be negative): ")?
                    else {
                        break;
                    };
                    inventory.adjust_quantity(ProductId::new(id), delta)
                } else {
                    let Some(quantity) = input::prompt_i64(reader, writer, "New quantity: ")? else {
                        break;
                    };
                    inventory.set_quantity(ProductId::new(id), quantity)
                };
                if report(writer, updated, "Quantity updated.")? {
                    save_snapshot(inventory, snapshot, writer)?;
                }
            }

            "4" => {
                let Some(id) = input::prompt_i64(reader, writer, "Product ID: ")? else {
                    break;
                };
                let Some(price) = input::prompt_f64(reader, writer, "New price: ")? else {
                    break;
                };
                let updated = inventory.set_price(ProductId::new(id), price);
                if report(writer, updated, "Price updated.")? {
                    save_snapshot(inventory, snapshot, writer)?;
                }
            }

            "5" => {
                let Some(id) = input::prompt_i64(reader, writer, "Product ID: ")? else {
                    break;
                };
                let Some(name) = input::prompt_text(reader, writer, "New name: ")? else {
                    break;
                };
                let renamed = inventory.set_name(ProductId::new(id), &name);
                if report(writer, renamed, "Product renamed.")? {
                    save_snapshot(inventory, snapshot, writer)?;
                }
            }

            "6" => {
                let Some(text) = input::prompt_text(reader, writer, "Text to search: ")? else {
                    break;
                };
                let Some(exact) = input::prompt_text(reader, writer, "Exact match? [y/N]: ")? else {
                    break;
                };
                let mut matches = inventory.find_by_name(&text, exact.eq_ignore_ascii_case("y"));
                if matches.is_empty() {
                    writeln!(writer, "No matches.")?;
                } else {
                    matches.sort_by_key(|p| p.id());
                    writeln!(writer, "{} match(es):", matches.len())?;
                    for product in matches {
                        print_product_row(writer, product)?;
                    }
                }
            }

            "7" => {
                let Some(key) = input::prompt_text(
                    reader,
                    writer,
                    "Order by [id/name/price/quantity] (enter=id): ",
                )?
                else {
                    break;
                };
                if inventory.is_empty() {
                    writeln!(writer, "Inventory is empty.")?;
                }
                for product in inventory.list(SortOrder::parse(&key)) {
                    print_product_row(writer, product)?;
                }
            }

            "8" => match stockpile_store::export_csv(inventory, export) {
                Ok(()) => writeln!(writer, "Exported to '{}'.", export.display())?,
                Err(e) => writeln!(writer, "Error: {e}")?,
            },

            "9" => {
                let summary = inventory.summary();
                writeln!(writer, "\n-- Summary --")?;
                writeln!(writer, "Distinct products: {}", summary.distinct_items)?;
                writeln!(writer, "Total units      : {}", summary.total_units)?;
                writeln!(writer, "Total value      : $ {:.2}", summary.total_value)?;
            }

            "0" => {
                save_snapshot(inventory, snapshot, writer)?;
                writeln!(writer, "Inventory saved to '{}'. Goodbye!", snapshot.display())?;
                return Ok(());
            }

            _ => writeln!(writer, "Invalid option.")?,
        }
    }

    // EOF: persist whatever is in memory before leaving.
    save_snapshot(inventory, snapshot, writer)?;
    Ok(())
}

/// Print the outcome of a manager call; true when it succeeded.
fn report<W: Write>(writer: &mut W, result: InventoryResult<()>, done: &str) -> io::Result<bool> {
    match result {
        Ok(()) => {
            writeln!(writer, "{done}")?;
            Ok(true)
        }
        Err(e) => {
            writeln!(writer, "Error: {e}")?;
            Ok(false)
        }
    }
}

/// A save failure is reported but never tears down the session; the in-memory
/// state is still intact.
fn save_snapshot<W: Write>(inventory: &Inventory, path: &Path, writer: &mut W) -> io::Result<()> {
    if let Err(e) = stockpile_store::save(inventory, path) {
        tracing::warn!(error = %e, path = %path.display(), "snapshot save failed");
        writeln!(writer, "Error: could not save inventory: {e}")?;
    }
    Ok(())
}

fn print_product_row<W: Write>(writer: &mut W, product: &Product) -> io::Result<()> {
    writeln!(
        writer,
        "  ID:{:<4} | {:<20} | Qty:{:<5} | $ {:>8.2} | $Tot {:>8.2}",
        product.id(),
        product.name(),
        product.quantity(),
        product.price(),
        product.total_value(),
    )
}
