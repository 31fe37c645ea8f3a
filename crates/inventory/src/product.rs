use stockpile_core::{InventoryError, InventoryResult, ProductId};

/// Normalize a product name for index lookups: trim and case-fold.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Product entity with validated fields.
///
/// Fields are private so every mutation goes through a validating setter.
/// Invariants held at all times: `name` is non-empty and stored trimmed,
/// `quantity >= 0`, `price` is finite and `>= 0`. A setter that fails leaves
/// the prior value intact.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    quantity: i64,
    price: f64,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        quantity: i64,
        price: f64,
    ) -> InventoryResult<Self> {
        let name = check_name(id, name.into())?;
        check_quantity(id, quantity)?;
        check_price(id, price)?;
        Ok(Self {
            id,
            name,
            quantity,
            price,
        })
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Derived value, always recomputed and never stored.
    pub fn total_value(&self) -> f64 {
        self.quantity as f64 * self.price
    }

    pub fn set_quantity(&mut self, quantity: i64) -> InventoryResult<()> {
        check_quantity(self.id, quantity)?;
        self.quantity = quantity;
        Ok(())
    }

    pub fn set_price(&mut self, price: f64) -> InventoryResult<()> {
        check_price(self.id, price)?;
        self.price = price;
        Ok(())
    }

    /// Stores the trimmed name. Callers that index by name must re-index
    /// themselves; see `Inventory::set_name`.
    pub fn set_name(&mut self, name: impl Into<String>) -> InventoryResult<()> {
        self.name = check_name(self.id, name.into())?;
        Ok(())
    }
}

fn check_name(id: ProductId, name: String) -> InventoryResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(InventoryError::validation(format!(
            "product {id}: name cannot be empty"
        )));
    }
    Ok(trimmed.to_string())
}

fn check_quantity(id: ProductId, quantity: i64) -> InventoryResult<()> {
    if quantity < 0 {
        return Err(InventoryError::validation(format!(
            "product {id}: quantity cannot be negative (got {quantity})"
        )));
    }
    Ok(())
}

fn check_price(id: ProductId, price: f64) -> InventoryResult<()> {
    // NaN slips past a plain `< 0.0` check and would poison sort order and
    // totals, so reject non-finite values outright.
    if !price.is_finite() || price < 0.0 {
        return Err(InventoryError::validation(format!(
            "product {id}: price must be finite and non-negative (got {price})"
        )));
    }
    Ok(())
}
