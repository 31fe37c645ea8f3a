//! `stockpile` — interactive inventory console.
//!
//! The menu carries no domain logic: every selection maps 1:1 onto one public
//! operation of the inventory manager or the store.

mod input;
mod menu;

use std::path::PathBuf;

use anyhow::Context;

const DEFAULT_SNAPSHOT: &str = "inventory.json";
const DEFAULT_EXPORT: &str = "inventory_export.csv";

fn main() -> anyhow::Result<()> {
    stockpile_observability::init();

    // Paths are resolved here and passed explicitly; the library crates carry
    // no default locations.
    let mut args = std::env::args().skip(1);
    let snapshot = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT));
    let export = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT));

    tracing::info!(snapshot = %snapshot.display(), "starting stockpile");

    let mut inventory = stockpile_inventory::Inventory::new();
    let loaded = stockpile_store::load(&mut inventory, &snapshot)
        .with_context(|| format!("loading snapshot {}", snapshot.display()))?;
    if loaded > 0 {
        println!("Loaded {loaded} products from '{}'.", snapshot.display());
    } else {
        println!("No existing inventory found; starting fresh.");
    }

    let stdin = std::io::stdin();
    let mut reader = stdin.lock();
    let mut writer = std::io::stdout();
    menu::run(&mut inventory, &snapshot, &export, &mut reader, &mut writer)?;

    tracing::info!("stockpile exiting");
    Ok(())
}
