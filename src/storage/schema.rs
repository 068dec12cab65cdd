//! Database schema definitions

/// SQL to create the stock items table
pub const CREATE_STOCK_ITEMS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS stock_items (
    sku TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    price REAL NOT NULL
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_stock_items_sku_nocase ON stock_items(sku COLLATE NOCASE)",
];

/// All schema creation statements. Each one is idempotent.
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_STOCK_ITEMS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
