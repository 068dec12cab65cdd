//! In-memory storage implementation

use crate::{Result, Error};
use crate::record::{StockRecord, StockUpdate};
use crate::repository::StockRepository;

/// Vector-backed stock repository. Insertion order is list order.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: Vec<StockRecord>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with the three demo items
    pub fn with_demo_items() -> Self {
        Self {
            items: vec![
                StockRecord::new("EGG", "SKU001", 12, 6.0),
                StockRecord::new("Banana", "SKU002", 24, 0.5),
                StockRecord::new("Meat", "SKU003", 20, 6.0),
            ],
        }
    }

    /// Build a store from existing records, rejecting repeated SKUs
    pub fn from_records(records: impl IntoIterator<Item = StockRecord>) -> Result<Self> {
        let mut store = Self::new();
        for record in records {
            store.add(record)?;
        }
        Ok(store)
    }

    fn position_exact(&self, sku: &str) -> Option<usize> {
        self.items.iter().position(|r| r.sku_is(sku))
    }
}

impl StockRepository for MemoryStore {
    fn add(&mut self, record: StockRecord) -> Result<()> {
        record.validate()?;
        if self.position_exact(&record.sku).is_some() {
            tracing::warn!("Rejected duplicate SKU {}", record.sku);
            return Err(Error::DuplicateKey(record.sku));
        }
        tracing::debug!("Added {}", record.sku);
        self.items.push(record);
        Ok(())
    }

    fn list(&self) -> Result<Vec<StockRecord>> {
        Ok(self.items.clone())
    }

    fn find(&self, sku: &str) -> Result<StockRecord> {
        self.items
            .iter()
            .find(|r| r.sku_is(sku))
            .or_else(|| self.items.iter().find(|r| r.sku_matches(sku)))
            .cloned()
            .ok_or_else(|| Error::NotFound(sku.to_string()))
    }

    fn update(&mut self, sku: &str, update: StockUpdate) -> Result<StockRecord> {
        update.validate()?;
        let record = self
            .items
            .iter_mut()
            .find(|r| r.sku_is(sku))
            .ok_or_else(|| Error::NotFound(sku.to_string()))?;

        record.apply(&update);
        tracing::debug!("Updated {}", sku);
        Ok(record.clone())
    }

    fn remove(&mut self, sku: &str) -> Result<StockRecord> {
        let index = self
            .position_exact(sku)
            .ok_or_else(|| Error::NotFound(sku.to_string()))?;

        tracing::debug!("Removed {}", sku);
        Ok(self.items.remove(index))
    }

    fn count(&self) -> Result<usize> {
        Ok(self.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_items() {
        let store = MemoryStore::with_demo_items();
        let skus: Vec<_> = store.list().unwrap().into_iter().map(|r| r.sku).collect();
        assert_eq!(skus, vec!["SKU001", "SKU002", "SKU003"]);
        assert_eq!(store.valuate("SKU003").unwrap(), 120.0);
    }

    #[test]
    fn test_from_records_rejects_duplicates() {
        let err = MemoryStore::from_records(vec![
            StockRecord::new("EGG", "SKU001", 12, 6.0),
            StockRecord::new("Eggs", "SKU001", 1, 1.0),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(ref sku) if sku == "SKU001"));
    }

    #[test]
    fn test_remove_keeps_order_of_the_rest() {
        let mut store = MemoryStore::with_demo_items();
        store.remove("SKU002").unwrap();
        let skus: Vec<_> = store.list().unwrap().into_iter().map(|r| r.sku).collect();
        assert_eq!(skus, vec!["SKU001", "SKU003"]);
    }
}
