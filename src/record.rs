//! Stock records - the single entity managed by a repository
//!
//! A record is identified by its SKU. The SKU is stored exactly as entered;
//! no case normalisation happens at the storage layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::{Error, Result};

/// Quantity below which a record is flagged as low stock.
///
/// The flag is a presentation concern only; repositories never enforce it.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// A single stock item.
///
/// Quantity and price are deliberately unconstrained: zero and negative
/// values are stored as given so returns and adjustments can be recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    /// Stock keeping unit, the unique identity key
    pub sku: String,
    /// Display name (not unique)
    pub name: String,
    /// Units on hand
    pub quantity: i64,
    /// Unit price
    pub price: f64,
}

impl StockRecord {
    /// Create a new record
    pub fn new(name: impl Into<String>, sku: impl Into<String>, quantity: i64, price: f64) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            quantity,
            price,
        }
    }

    /// Stock value: `quantity * price`
    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.price
    }

    /// Whether the quantity falls below `threshold`
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.quantity < threshold
    }

    /// Exact (case-sensitive) SKU comparison, used by writes
    pub fn sku_is(&self, sku: &str) -> bool {
        self.sku == sku
    }

    /// Case-insensitive SKU comparison, used by lookups
    pub fn sku_matches(&self, sku: &str) -> bool {
        self.sku.eq_ignore_ascii_case(sku)
    }

    /// Reject values no backend can store. Only the price can be
    /// non-finite; everything else is accepted as given.
    pub fn validate(&self) -> Result<()> {
        ensure_finite_price(self.price)
    }

    /// Apply an update in place. The SKU never changes.
    pub fn apply(&mut self, update: &StockUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
    }
}

impl fmt::Display for StockRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, SKU: {}, Quantity: {}, Price: ${:.2}",
            self.name, self.sku, self.quantity, self.price
        )
    }
}

/// Replacement fields for an update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockUpdate {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
}

impl StockUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.quantity.is_none() && self.price.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        match self.price {
            Some(price) => ensure_finite_price(price),
            None => Ok(()),
        }
    }
}

fn ensure_finite_price(price: f64) -> Result<()> {
    if price.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!("price must be finite, got {}", price)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value() {
        assert_eq!(StockRecord::new("EGG", "SKU001", 12, 6.0).value(), 72.0);
        assert_eq!(StockRecord::new("Banana", "SKU002", 24, 0.5).value(), 12.0);
    }

    #[test]
    fn test_negative_quantity_is_kept() {
        let record = StockRecord::new("Returned", "SKU009", -3, 2.0);
        assert_eq!(record.quantity, -3);
        assert_eq!(record.value(), -6.0);
    }

    #[test]
    fn test_low_stock_threshold() {
        let record = StockRecord::new("Milk", "SKU010", 4, 1.0);
        assert!(record.is_low_stock(DEFAULT_LOW_STOCK_THRESHOLD));

        let record = StockRecord::new("Milk", "SKU010", 5, 1.0);
        assert!(!record.is_low_stock(DEFAULT_LOW_STOCK_THRESHOLD));
    }

    #[test]
    fn test_sku_comparisons() {
        let record = StockRecord::new("EGG", "SKU001", 12, 6.0);
        assert!(record.sku_is("SKU001"));
        assert!(!record.sku_is("sku001"));
        assert!(record.sku_matches("sku001"));
        assert!(!record.sku_matches("SKU002"));
    }

    #[test]
    fn test_apply_partial_update() {
        let mut record = StockRecord::new("EGG", "SKU001", 12, 6.0);
        record.apply(&StockUpdate::new().quantity(30).price(5.5));

        assert_eq!(record.name, "EGG");
        assert_eq!(record.sku, "SKU001");
        assert_eq!(record.quantity, 30);
        assert_eq!(record.price, 5.5);

        record.apply(&StockUpdate::new().name("Eggs"));
        assert_eq!(record.name, "Eggs");
        assert_eq!(record.quantity, 30);
    }

    #[test]
    fn test_non_finite_price_fails_validation() {
        assert!(StockRecord::new("Tea", "SKU050", 1, 0.0).validate().is_ok());
        assert!(StockRecord::new("Tea", "SKU050", 1, -2.5).validate().is_ok());

        let err = StockRecord::new("Tea", "SKU050", 1, f64::NAN).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(ref msg) if msg == "price must be finite, got NaN"));
        assert!(StockRecord::new("Tea", "SKU050", 1, f64::INFINITY).validate().is_err());

        assert!(StockUpdate::new().quantity(3).validate().is_ok());
        assert!(StockUpdate::new().price(f64::NEG_INFINITY).validate().is_err());
    }

    #[test]
    fn test_display() {
        let record = StockRecord::new("Banana", "SKU002", 24, 0.5);
        assert_eq!(
            record.to_string(),
            "Name: Banana, SKU: SKU002, Quantity: 24, Price: $0.50"
        );
    }
}
