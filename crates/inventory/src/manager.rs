//! Indexed inventory manager.
//!
//! Primary storage is a map from id to product; a secondary index maps
//! normalized names to the set of ids carrying that name. The index is kept
//! consistent on every add, remove, and rename: each product's id sits in
//! exactly the bucket for its current normalized name, and no bucket
//! references an absent id.

use std::collections::{HashMap, HashSet};

use stockpile_core::{InventoryError, InventoryResult, ProductId};

use crate::product::{Product, normalize_name};

/// Listing order for [`Inventory::list`]. Always ascending; ties broken by
/// ascending id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Id,
    Name,
    Price,
    Quantity,
}

impl SortOrder {
    /// Parse a user-supplied order key. Unknown keys fall back to id order.
    pub fn parse(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "name" => Self::Name,
            "price" => Self::Price,
            "quantity" => Self::Quantity,
            _ => Self::Id,
        }
    }
}

/// Aggregate totals over the whole inventory.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Summary {
    /// Number of distinct products (map entries).
    pub distinct_items: usize,
    /// Sum of quantities across all products.
    pub total_units: i64,
    /// Sum of `total_value()` across all products.
    pub total_value: f64,
}

/// In-memory inventory manager.
///
/// Single-threaded and synchronous; not safe for concurrent mutation. Every
/// failing operation leaves the manager observably unchanged.
#[derive(Debug, Default)]
pub struct Inventory {
    products: HashMap<ProductId, Product>,
    name_index: HashMap<String, HashSet<ProductId>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Insert a new product. Fails with `DuplicateId` if the id is taken.
    pub fn add(&mut self, product: Product) -> InventoryResult<()> {
        let id = product.id();
        if self.products.contains_key(&id) {
            return Err(InventoryError::duplicate(id));
        }
        self.index_insert(normalize_name(product.name()), id);
        self.products.insert(id, product);
        Ok(())
    }

    /// Remove a product, returning it. Fails with `NotFound` if absent.
    pub fn remove(&mut self, id: ProductId) -> InventoryResult<Product> {
        let product = self
            .products
            .remove(&id)
            .ok_or_else(|| InventoryError::not_found(id))?;
        self.index_remove(&normalize_name(product.name()), id);
        Ok(product)
    }

    /// Look up a product by id. Absence is not an error here, unlike the
    /// mutating operations.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> InventoryResult<()> {
        self.product_mut(id)?.set_quantity(quantity)
    }

    /// Add `delta` (possibly negative) to the current quantity. Fails without
    /// mutating if the result would be negative or would overflow.
    pub fn adjust_quantity(&mut self, id: ProductId, delta: i64) -> InventoryResult<()> {
        let product = self.product_mut(id)?;
        let adjusted = product.quantity().checked_add(delta).ok_or_else(|| {
            InventoryError::validation(format!("product {id}: quantity adjustment overflows"))
        })?;
        if adjusted < 0 {
            return Err(InventoryError::validation(format!(
                "product {id}: adjustment by {delta} would leave quantity negative"
            )));
        }
        product.set_quantity(adjusted)
    }

    pub fn set_price(&mut self, id: ProductId, price: f64) -> InventoryResult<()> {
        self.product_mut(id)?.set_price(price)
    }

    /// Rename a product, moving its id from the old name bucket to the new
    /// one. Validation runs before any index change, so a failed rename
    /// touches neither the product nor the index.
    pub fn set_name(&mut self, id: ProductId, name: &str) -> InventoryResult<()> {
        let product = self
            .products
            .get_mut(&id)
            .ok_or_else(|| InventoryError::not_found(id))?;
        let old_key = normalize_name(product.name());
        product.set_name(name)?;
        let new_key = normalize_name(product.name());
        if new_key != old_key {
            self.index_remove(&old_key, id);
            self.index_insert(new_key, id);
        }
        Ok(())
    }

    /// Search by name. With `exact` the normalized-name index answers in
    /// O(bucket); otherwise a case-insensitive substring scan over all
    /// products. Result order is unspecified.
    pub fn find_by_name(&self, text: &str, exact: bool) -> Vec<&Product> {
        if exact {
            return match self.name_index.get(&normalize_name(text)) {
                Some(ids) => ids.iter().filter_map(|id| self.products.get(id)).collect(),
                None => Vec::new(),
            };
        }
        let needle = normalize_name(text);
        self.products
            .values()
            .filter(|p| normalize_name(p.name()).contains(&needle))
            .collect()
    }

    /// All products sorted by the requested order, ties broken by ascending id.
    pub fn list(&self, order: SortOrder) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.values().collect();
        match order {
            SortOrder::Id => products.sort_by_key(|p| p.id()),
            SortOrder::Name => {
                products.sort_by_key(|p| (normalize_name(p.name()), p.id()));
            }
            SortOrder::Price => {
                products.sort_by(|a, b| {
                    a.price()
                        .total_cmp(&b.price())
                        .then_with(|| a.id().cmp(&b.id()))
                });
            }
            SortOrder::Quantity => products.sort_by_key(|p| (p.quantity(), p.id())),
        }
        products
    }

    pub fn summary(&self) -> Summary {
        Summary {
            distinct_items: self.products.len(),
            total_units: self.products.values().map(Product::quantity).sum(),
            total_value: self.products.values().map(Product::total_value).sum(),
        }
    }

    fn product_mut(&mut self, id: ProductId) -> InventoryResult<&mut Product> {
        self.products
            .get_mut(&id)
            .ok_or_else(|| InventoryError::not_found(id))
    }

    fn index_insert(&mut self, key: String, id: ProductId) {
        self.name_index.entry(key).or_default().insert(id);
    }

    fn index_remove(&mut self, key: &str, id: ProductId) {
        if let Some(ids) = self.name_index.get_mut(key) {
            ids.remove(&id);
            if ids.is_empty() {
                self.name_index.remove(key);
            }
        }
    }

    #[cfg(test)]
    fn index_is_consistent(&self) -> bool {
        // Every product appears under exactly its current normalized name.
        for (id, product) in &self.products {
            let key = normalize_name(product.name());
            match self.name_index.get(&key) {
                Some(ids) if ids.contains(id) => {}
                _ => return false,
            }
        }
        // No bucket is empty or references an absent/renamed id.
        for (key, ids) in &self.name_index {
            if ids.is_empty() {
                return false;
            }
            for id in ids {
                match self.products.get(id) {
                    Some(p) if normalize_name(p.name()) == *key => {}
                    _ => return false,
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(raw: i64) -> ProductId {
        ProductId::new(raw)
    }

    fn product(id: i64, name: &str, quantity: i64, price: f64) -> Product {
        Product::new(pid(id), name, quantity, price).unwrap()
    }

    fn sample_inventory() -> Inventory {
        let mut inv = Inventory::new();
        inv.add(product(1, "Widget", 10, 2.5)).unwrap();
        inv.add(product(2, "Gadget", 5, 4.0)).unwrap();
        inv
    }

    #[test]
    fn add_rejects_duplicate_id() {
        let mut inv = sample_inventory();
        let err = inv.add(product(1, "Other", 1, 1.0)).unwrap_err();
        assert!(matches!(err, InventoryError::DuplicateId(id) if id == pid(1)));
        assert_eq!(inv.len(), 2);
        assert!(inv.index_is_consistent());
    }

    #[test]
    fn remove_returns_product_and_prunes_bucket() {
        let mut inv = sample_inventory();
        let removed = inv.remove(pid(1)).unwrap();
        assert_eq!(removed.name(), "Widget");
        assert!(inv.find_by_name("widget", true).is_empty());
        assert!(inv.index_is_consistent());
    }

    #[test]
    fn remove_absent_id_is_not_found() {
        let mut inv = sample_inventory();
        let err = inv.remove(pid(99)).unwrap_err();
        assert!(matches!(err, InventoryError::NotFound(id) if id == pid(99)));
    }

    #[test]
    fn add_then_remove_restores_prior_summary() {
        let mut inv = sample_inventory();
        let before = inv.summary();
        inv.add(product(3, "Sprocket", 7, 1.25)).unwrap();
        inv.remove(pid(3)).unwrap();
        assert_eq!(inv.summary(), before);
        assert!(inv.index_is_consistent());
    }

    #[test]
    fn get_absent_id_returns_none() {
        let inv = sample_inventory();
        assert!(inv.get(pid(99)).is_none());
        assert_eq!(inv.get(pid(1)).unwrap().name(), "Widget");
    }

    #[test]
    fn adjust_quantity_applies_delta() {
        let mut inv = sample_inventory();
        inv.adjust_quantity(pid(1), -4).unwrap();
        assert_eq!(inv.get(pid(1)).unwrap().quantity(), 6);
    }

    #[test]
    fn adjust_quantity_rejects_going_negative() {
        let mut inv = sample_inventory();
        let err = inv.adjust_quantity(pid(1), -12).unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));
        assert_eq!(inv.get(pid(1)).unwrap().quantity(), 10);
    }

    #[test]
    fn adjust_quantity_rejects_overflow() {
        let mut inv = sample_inventory();
        let err = inv.adjust_quantity(pid(1), i64::MAX).unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));
        assert_eq!(inv.get(pid(1)).unwrap().quantity(), 10);
    }

    #[test]
    fn set_quantity_and_price_validate() {
        let mut inv = sample_inventory();
        assert!(inv.set_quantity(pid(1), -1).is_err());
        assert!(inv.set_price(pid(1), -0.5).is_err());
        assert!(matches!(
            inv.set_quantity(pid(99), 1),
            Err(InventoryError::NotFound(_))
        ));
        inv.set_quantity(pid(1), 3).unwrap();
        inv.set_price(pid(1), 9.99).unwrap();
        let p = inv.get(pid(1)).unwrap();
        assert_eq!(p.quantity(), 3);
        assert_eq!(p.price(), 9.99);
    }

    #[test]
    fn set_name_moves_index_entry() {
        let mut inv = sample_inventory();
        inv.set_name(pid(1), "Doohickey").unwrap();
        assert!(inv.find_by_name("widget", true).is_empty());
        let found = inv.find_by_name("DOOHICKEY", true);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), pid(1));
        assert!(inv.index_is_consistent());
    }

    #[test]
    fn set_name_failure_leaves_index_alone() {
        let mut inv = sample_inventory();
        assert!(inv.set_name(pid(1), "   ").is_err());
        assert_eq!(inv.find_by_name("widget", true).len(), 1);
        assert!(inv.index_is_consistent());
    }

    #[test]
    fn rename_onto_shared_name_shares_bucket() {
        let mut inv = sample_inventory();
        inv.set_name(pid(2), "Widget").unwrap();
        let mut ids: Vec<ProductId> = inv
            .find_by_name("widget", true)
            .iter()
            .map(|p| p.id())
            .collect();
        ids.sort();
        assert_eq!(ids, vec![pid(1), pid(2)]);
        assert!(inv.index_is_consistent());

        // Renaming one away leaves the other in place.
        inv.set_name(pid(2), "Gadget").unwrap();
        assert_eq!(inv.find_by_name("widget", true).len(), 1);
        assert!(inv.index_is_consistent());
    }

    #[test]
    fn exact_search_uses_normalized_key() {
        let mut inv = Inventory::new();
        inv.add(product(1, "  Widget  ", 1, 1.0)).unwrap();
        let found = inv.find_by_name(" WIDGET ", true);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), pid(1));
    }

    #[test]
    fn substring_search_is_case_insensitive() {
        let inv = sample_inventory();
        let mut ids: Vec<ProductId> = inv.find_by_name("GAD", false).iter().map(|p| p.id()).collect();
        ids.sort();
        assert_eq!(ids, vec![pid(2)]);
        // "get" is a substring of both Widget and Gadget.
        assert_eq!(inv.find_by_name("get", false).len(), 2);
        assert!(inv.find_by_name("zzz", false).is_empty());
    }

    #[test]
    fn list_by_price_ascending() {
        let mut inv = Inventory::new();
        inv.add(product(1, "A", 1, 9.99)).unwrap();
        inv.add(product(2, "B", 1, 3.0)).unwrap();
        let ids: Vec<ProductId> = inv.list(SortOrder::Price).iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![pid(2), pid(1)]);
    }

    #[test]
    fn list_ties_break_by_id() {
        let mut inv = Inventory::new();
        inv.add(product(3, "Same", 5, 1.0)).unwrap();
        inv.add(product(1, "Same", 5, 1.0)).unwrap();
        inv.add(product(2, "Same", 5, 1.0)).unwrap();
        for order in [
            SortOrder::Id,
            SortOrder::Name,
            SortOrder::Price,
            SortOrder::Quantity,
        ] {
            let ids: Vec<ProductId> = inv.list(order).iter().map(|p| p.id()).collect();
            assert_eq!(ids, vec![pid(1), pid(2), pid(3)], "{order:?}");
        }
    }

    #[test]
    fn sort_order_parse_defaults_to_id() {
        assert_eq!(SortOrder::parse("price"), SortOrder::Price);
        assert_eq!(SortOrder::parse(" Name "), SortOrder::Name);
        assert_eq!(SortOrder::parse("quantity"), SortOrder::Quantity);
        assert_eq!(SortOrder::parse("bogus"), SortOrder::Id);
        assert_eq!(SortOrder::parse(""), SortOrder::Id);
    }

    #[test]
    fn summary_matches_worked_example() {
        let mut inv = Inventory::new();
        inv.add(product(1, "Widget", 10, 2.5)).unwrap();
        assert_eq!(
            inv.summary(),
            Summary {
                distinct_items: 1,
                total_units: 10,
                total_value: 25.0
            }
        );
        inv.add(product(2, "Gadget", 5, 4.0)).unwrap();
        assert_eq!(
            inv.summary(),
            Summary {
                distinct_items: 2,
                total_units: 15,
                total_value: 45.0
            }
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add { id: i64, name: String, quantity: i64, price: f64 },
            Remove { id: i64 },
            Rename { id: i64, name: String },
            Adjust { id: i64, delta: i64 },
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            let id = 0i64..8;
            let name = "[ a-zA-Z]{0,6}";
            prop_oneof![
                (id.clone(), name.clone(), 0i64..100, 0.0f64..50.0)
                    .prop_map(|(id, name, quantity, price)| Op::Add { id, name, quantity, price }),
                id.clone().prop_map(|id| Op::Remove { id }),
                (id.clone(), name).prop_map(|(id, name)| Op::Rename { id, name }),
                (id, -20i64..20).prop_map(|(id, delta)| Op::Adjust { id, delta }),
            ]
        }

        proptest! {
            /// Property: the name index stays consistent with the primary map
            /// under arbitrary sequences of adds, removes, renames, and
            /// adjustments, whether each operation succeeds or fails.
            #[test]
            fn index_stays_consistent(ops in proptest::collection::vec(op_strategy(), 1..60)) {
                let mut inv = Inventory::new();
                for op in ops {
                    match op {
                        Op::Add { id, name, quantity, price } => {
                            if let Ok(p) = Product::new(ProductId::new(id), name, quantity, price) {
                                let _ = inv.add(p);
                            }
                        }
                        Op::Remove { id } => {
                            let _ = inv.remove(ProductId::new(id));
                        }
                        Op::Rename { id, name } => {
                            let _ = inv.set_name(ProductId::new(id), &name);
                        }
                        Op::Adjust { id, delta } => {
                            let _ = inv.adjust_quantity(ProductId::new(id), delta);
                        }
                    }
                    prop_assert!(inv.index_is_consistent());
                }
            }

            /// Property: a successful adjustment sets `quantity + delta`; a
            /// failed one leaves quantity untouched.
            #[test]
            fn adjust_is_exact_or_inert(start in 0i64..1000, delta in -2000i64..2000) {
                let mut inv = Inventory::new();
                inv.add(Product::new(ProductId::new(1), "Widget", start, 1.0).unwrap()).unwrap();
                let result = inv.adjust_quantity(ProductId::new(1), delta);
                let quantity = inv.get(ProductId::new(1)).unwrap().quantity();
                if start + delta < 0 {
                    prop_assert!(result.is_err());
                    prop_assert_eq!(quantity, start);
                } else {
                    prop_assert!(result.is_ok());
                    prop_assert_eq!(quantity, start + delta);
                }
            }
        }
    }
}
