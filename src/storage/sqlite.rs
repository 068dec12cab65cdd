//! SQLite storage implementation

use std::path::{Path, PathBuf};
use rusqlite::{Connection, params, OptionalExtension};
use crate::{Result, Error};
use crate::record::{StockRecord, StockUpdate};
use crate::repository::{StockRepository, StockStats};
use super::schema;

const SELECT_COLUMNS: &str = "sku, name, quantity, price";

/// SQLite-backed stock repository.
///
/// Only the database path is held. Each operation opens its own connection
/// and drops it before returning, whatever the outcome.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let store = Self { path: path.to_path_buf() };
        store.initialize_schema()?;
        tracing::debug!("Opened stock database at {}", path.display());
        Ok(store)
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Helper to convert a row to a StockRecord
    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<StockRecord> {
        Ok(StockRecord {
            sku: row.get(0)?,
            name: row.get(1)?,
            quantity: row.get(2)?,
            price: row.get(3)?,
        })
    }
}

fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

/// `SUM()` over integers raises this once a partial sum leaves the i64 range
fn is_integer_overflow(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(_, Some(msg)) if msg == "integer overflow"
    )
}

impl StockRepository for SqliteStore {
    fn add(&mut self, record: StockRecord) -> Result<()> {
        // NaN binds as NULL and would trip NOT NULL
        record.validate()?;
        let conn = self.connect()?;
        let inserted = conn.execute(
            "INSERT INTO stock_items (sku, name, quantity, price) VALUES (?1, ?2, ?3, ?4)",
            params![record.sku, record.name, record.quantity, record.price],
        );

        match inserted {
            Ok(_) => {
                tracing::debug!("Added {}", record.sku);
                Ok(())
            }
            Err(e) if is_primary_key_violation(&e) => {
                tracing::warn!("Rejected duplicate SKU {}", record.sku);
                Err(Error::DuplicateKey(record.sku))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> Result<Vec<StockRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM stock_items ORDER BY rowid"
        ))?;

        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    fn find(&self, sku: &str) -> Result<StockRecord> {
        let conn = self.connect()?;
        // The column collation is BINARY, so `sku = ?1` in ORDER BY ranks the
        // exact-case match first.
        conn.query_row(
            &format!(
                "SELECT {SELECT_COLUMNS} FROM stock_items
                 WHERE sku = ?1 COLLATE NOCASE
                 ORDER BY (sku = ?1) DESC, rowid
                 LIMIT 1"
            ),
            [sku],
            Self::row_to_record,
        )
        .optional()?
        .ok_or_else(|| Error::NotFound(sku.to_string()))
    }

    fn update(&mut self, sku: &str, update: StockUpdate) -> Result<StockRecord> {
        update.validate()?;
        let conn = self.connect()?;
        let updated = conn
            .query_row(
                &format!(
                    "UPDATE stock_items SET
                        name = COALESCE(?2, name),
                        quantity = COALESCE(?3, quantity),
                        price = COALESCE(?4, price)
                     WHERE sku = ?1
                     RETURNING {SELECT_COLUMNS}"
                ),
                params![sku, update.name, update.quantity, update.price],
                Self::row_to_record,
            )
            .optional()?;

        match updated {
            Some(record) => {
                tracing::debug!("Updated {}", sku);
                Ok(record)
            }
            None => Err(Error::NotFound(sku.to_string())),
        }
    }

    fn remove(&mut self, sku: &str) -> Result<StockRecord> {
        let conn = self.connect()?;
        let removed = conn
            .query_row(
                &format!("DELETE FROM stock_items WHERE sku = ?1 RETURNING {SELECT_COLUMNS}"),
                [sku],
                Self::row_to_record,
            )
            .optional()?;

        match removed {
            Some(record) => {
                tracing::debug!("Removed {}", sku);
                Ok(record)
            }
            None => Err(Error::NotFound(sku.to_string())),
        }
    }

    fn count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM stock_items", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn total_value(&self) -> Result<f64> {
        let conn = self.connect()?;
        let total: f64 = conn.query_row(
            "SELECT COALESCE(SUM(quantity * price), 0.0) FROM stock_items",
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    fn low_stock(&self, threshold: i64) -> Result<Vec<StockRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM stock_items WHERE quantity < ?1 ORDER BY rowid"
        ))?;

        let records = stmt
            .query_map([threshold], Self::row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    fn stats(&self, low_stock_threshold: i64) -> Result<StockStats> {
        let conn = self.connect()?;
        let (records, total_quantity, total_value, low_stock): (i64, i64, f64, i64) = conn.query_row(
            "SELECT COUNT(*),
                    COALESCE(SUM(quantity), 0),
                    COALESCE(SUM(quantity * price), 0.0),
                    COUNT(CASE WHEN quantity < ?1 THEN 1 END)
             FROM stock_items",
            [low_stock_threshold],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .map_err(|e| {
            if is_integer_overflow(&e) {
                Error::Overflow("quantity")
            } else {
                e.into()
            }
        })?;

        Ok(StockStats {
            records: records as usize,
            total_quantity,
            total_value,
            low_stock: low_stock as usize,
        })
    }
}
