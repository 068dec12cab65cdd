//! Repository - the only mutation and query surface for stock records
//!
//! Matching policy shared by every backend:
//! - writes (`add` uniqueness, `update`, `remove`) compare SKUs exactly
//! - reads (`find`, `valuate`) compare SKUs case-insensitively (ASCII);
//!   when several stored SKUs differ only by case, the exact match wins,
//!   otherwise the earliest inserted one

use crate::{Error, Result};
use crate::record::{StockRecord, StockUpdate};
use serde::Serialize;

/// Storage-agnostic access to the stock collection.
///
/// Every operation is a single step against the collection. Implementations
/// must leave the collection untouched when they return an error.
pub trait StockRepository {
    /// Insert a new record. Fails with `DuplicateKey` if the SKU exists.
    fn add(&mut self, record: StockRecord) -> Result<()>;

    /// All records in insertion order
    fn list(&self) -> Result<Vec<StockRecord>>;

    /// Look up a record by SKU, ignoring case. Fails with `NotFound`.
    fn find(&self, sku: &str) -> Result<StockRecord>;

    /// Replace the supplied fields on the record with exactly this SKU
    fn update(&mut self, sku: &str, update: StockUpdate) -> Result<StockRecord>;

    /// Delete the record with exactly this SKU and return it
    fn remove(&mut self, sku: &str) -> Result<StockRecord>;

    /// Stock value (`quantity * price`) of the record `find` returns
    fn valuate(&self, sku: &str) -> Result<f64> {
        Ok(self.find(sku)?.value())
    }

    /// Number of stored records
    fn count(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }

    /// Sum of stock values across every record
    fn total_value(&self) -> Result<f64> {
        Ok(self.list()?.iter().map(StockRecord::value).sum())
    }

    /// Records whose quantity is below `threshold`
    fn low_stock(&self, threshold: i64) -> Result<Vec<StockRecord>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| r.is_low_stock(threshold))
            .collect())
    }

    /// Aggregate figures for the whole collection
    fn stats(&self, low_stock_threshold: i64) -> Result<StockStats> {
        let records = self.list()?;
        Ok(StockStats {
            records: records.len(),
            total_quantity: total_quantity(&records)?,
            total_value: records.iter().map(StockRecord::value).sum(),
            low_stock: records
                .iter()
                .filter(|r| r.is_low_stock(low_stock_threshold))
                .count(),
        })
    }
}

/// Aggregate figures over a repository
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockStats {
    pub records: usize,
    pub total_quantity: i64,
    pub total_value: f64,
    pub low_stock: usize,
}

/// Sum of quantities in list order. Fails with `Overflow` as soon as a
/// partial sum leaves the `i64` range.
fn total_quantity(records: &[StockRecord]) -> Result<i64> {
    records.iter().try_fold(0i64, |sum, r| {
        sum.checked_add(r.quantity).ok_or(Error::Overflow("quantity"))
    })
}
