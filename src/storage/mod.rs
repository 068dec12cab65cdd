//! Storage Layer - interchangeable repository backends
//!
//! - `MemoryStore`: a vector of records, lost on exit
//! - `SqliteStore`: a single table `stock_items(sku, name, quantity, price)`

pub mod memory;
pub mod schema;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Behaviour every backend must share. Each check runs against both stores.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::record::{StockRecord, StockUpdate};
    use crate::repository::StockRepository;
    use tempfile::TempDir;

    fn with_each_backend(check: impl Fn(&mut dyn StockRepository)) {
        let mut memory = MemoryStore::new();
        check(&mut memory);

        let dir: TempDir = tempfile::tempdir().unwrap();
        let mut sqlite = SqliteStore::open(&dir.path().join("stock.db")).unwrap();
        check(&mut sqlite);
    }

    fn egg() -> StockRecord {
        StockRecord::new("EGG", "SKU001", 12, 6.0)
    }

    fn banana() -> StockRecord {
        StockRecord::new("Banana", "SKU002", 24, 0.5)
    }

    #[test]
    fn test_add_then_find() {
        with_each_backend(|repo| {
            repo.add(egg()).unwrap();
            assert_eq!(repo.find("SKU001").unwrap(), egg());
        });
    }

    #[test]
    fn test_duplicate_add_leaves_original() {
        with_each_backend(|repo| {
            repo.add(egg()).unwrap();
            let err = repo.add(StockRecord::new("Fake", "SKU001", 1, 99.0)).unwrap_err();
            assert!(matches!(err, Error::DuplicateKey(ref sku) if sku == "SKU001"));
            assert_eq!(repo.find("SKU001").unwrap(), egg());
            assert_eq!(repo.list().unwrap().len(), 1);
        });
    }

    #[test]
    fn test_remove_twice() {
        with_each_backend(|repo| {
            repo.add(egg()).unwrap();
            assert_eq!(repo.remove("SKU001").unwrap(), egg());
            assert!(matches!(repo.remove("SKU001"), Err(Error::NotFound(_))));
            assert!(matches!(repo.find("SKU001"), Err(Error::NotFound(_))));
        });
    }

    #[test]
    fn test_update_quantity_and_price_only() {
        with_each_backend(|repo| {
            repo.add(egg()).unwrap();
            let updated = repo
                .update("SKU001", StockUpdate::new().quantity(30).price(5.0))
                .unwrap();
            assert_eq!(updated, StockRecord::new("EGG", "SKU001", 30, 5.0));
            assert_eq!(repo.find("SKU001").unwrap(), updated);
        });
    }

    #[test]
    fn test_update_with_name() {
        with_each_backend(|repo| {
            repo.add(egg()).unwrap();
            repo.update("SKU001", StockUpdate::new().name("Free range eggs")).unwrap();
            let found = repo.find("SKU001").unwrap();
            assert_eq!(found.name, "Free range eggs");
            assert_eq!(found.quantity, 12);
            assert_eq!(found.price, 6.0);
        });
    }

    #[test]
    fn test_empty_update_requires_existing_record() {
        with_each_backend(|repo| {
            assert!(matches!(
                repo.update("SKU001", StockUpdate::new()),
                Err(Error::NotFound(_))
            ));
            repo.add(egg()).unwrap();
            assert_eq!(repo.update("SKU001", StockUpdate::new()).unwrap(), egg());
        });
    }

    #[test]
    fn test_valuate() {
        with_each_backend(|repo| {
            repo.add(egg()).unwrap();
            repo.add(banana()).unwrap();
            assert_eq!(repo.valuate("SKU001").unwrap(), 72.0);
            assert_eq!(repo.valuate("SKU002").unwrap(), 12.0);
            assert!(matches!(repo.valuate("SKU404"), Err(Error::NotFound(_))));
            assert_eq!(repo.total_value().unwrap(), 84.0);
        });
    }

    #[test]
    fn test_find_on_empty_and_missing() {
        with_each_backend(|repo| {
            assert!(matches!(repo.find("SKU001"), Err(Error::NotFound(_))));
            assert!(repo.list().unwrap().is_empty());
            repo.add(banana()).unwrap();
            assert!(matches!(repo.find("SKU001"), Err(Error::NotFound(ref sku)) if sku == "SKU001"));
        });
    }

    #[test]
    fn test_example_scenario() {
        with_each_backend(|repo| {
            repo.add(egg()).unwrap();
            repo.add(banana()).unwrap();
            assert_eq!(repo.list().unwrap(), vec![egg(), banana()]);
            assert_eq!(repo.valuate("SKU001").unwrap(), 72.0);
            repo.remove("SKU001").unwrap();
            assert!(matches!(repo.find("SKU001"), Err(Error::NotFound(_))));
            assert_eq!(repo.list().unwrap(), vec![banana()]);
        });
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        with_each_backend(|repo| {
            repo.add(StockRecord::new("Zucchini", "SKU900", 1, 1.0)).unwrap();
            repo.add(StockRecord::new("Apple", "SKU100", 1, 1.0)).unwrap();
            repo.add(StockRecord::new("Melon", "SKU500", 1, 1.0)).unwrap();
            let skus: Vec<_> = repo.list().unwrap().into_iter().map(|r| r.sku).collect();
            assert_eq!(skus, vec!["SKU900", "SKU100", "SKU500"]);
        });
    }

    // SKU case policy: lookups ignore case, writes do not.

    #[test]
    fn test_find_ignores_case() {
        with_each_backend(|repo| {
            repo.add(egg()).unwrap();
            assert_eq!(repo.find("sku001").unwrap(), egg());
            assert_eq!(repo.valuate("Sku001").unwrap(), 72.0);
        });
    }

    #[test]
    fn test_writes_match_case_exactly() {
        with_each_backend(|repo| {
            repo.add(egg()).unwrap();
            assert!(matches!(repo.remove("sku001"), Err(Error::NotFound(_))));
            assert!(matches!(
                repo.update("sku001", StockUpdate::new().quantity(1)),
                Err(Error::NotFound(_))
            ));
            assert_eq!(repo.find("SKU001").unwrap(), egg());
        });
    }

    #[test]
    fn test_skus_differing_by_case_are_distinct() {
        with_each_backend(|repo| {
            repo.add(egg()).unwrap();
            repo.add(StockRecord::new("Lower egg", "sku001", 1, 1.0)).unwrap();
            assert_eq!(repo.list().unwrap().len(), 2);

            assert_eq!(repo.find("SKU001").unwrap().name, "EGG");
            assert_eq!(repo.find("sku001").unwrap().name, "Lower egg");
            // No exact match: the earliest inserted wins
            assert_eq!(repo.find("Sku001").unwrap().name, "EGG");
        });
    }

    #[test]
    fn test_stats_agree() {
        with_each_backend(|repo| {
            repo.add(egg()).unwrap();
            repo.add(banana()).unwrap();
            repo.add(StockRecord::new("Milk", "SKU003", 2, 1.25)).unwrap();

            let stats = repo.stats(5).unwrap();
            assert_eq!(stats.records, 3);
            assert_eq!(stats.total_quantity, 38);
            assert_eq!(stats.total_value, 86.5);
            assert_eq!(stats.low_stock, 1);
        });
    }

    #[test]
    fn test_stats_quantity_overflow_is_an_error() {
        with_each_backend(|repo| {
            repo.add(StockRecord::new("Bulk", "SKU001", i64::MAX, 0.0)).unwrap();
            repo.add(StockRecord::new("One more", "SKU002", 1, 0.0)).unwrap();

            assert!(matches!(repo.stats(5), Err(Error::Overflow("quantity"))));
            assert_eq!(repo.count().unwrap(), 2);
        });
    }

    #[test]
    fn test_non_finite_price_is_rejected() {
        with_each_backend(|repo| {
            let err = repo.add(StockRecord::new("Tea", "SKU050", 1, f64::NAN)).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)));
            assert!(repo.list().unwrap().is_empty());

            repo.add(egg()).unwrap();
            assert!(matches!(
                repo.update("SKU001", StockUpdate::new().price(f64::INFINITY)),
                Err(Error::InvalidInput(_))
            ));
            assert_eq!(repo.find("SKU001").unwrap(), egg());
        });
    }

    #[test]
    fn test_negative_values_are_permitted() {
        with_each_backend(|repo| {
            repo.add(StockRecord::new("Refund", "SKU777", -4, -2.5)).unwrap();
            assert_eq!(repo.valuate("SKU777").unwrap(), 10.0);
            assert_eq!(repo.low_stock(5).unwrap().len(), 1);
        });
    }
}
