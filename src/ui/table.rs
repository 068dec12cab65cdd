use crate::record::StockRecord;
use tabled::{settings::Style, Table, Tabled};

/// Text shown in the flag column for low-stock rows
pub const LOW_STOCK_FLAG: &str = "LOW";

#[derive(Tabled)]
pub struct StockRow {
    #[tabled(rename = "SKU")]
    pub sku: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Quantity")]
    pub quantity: i64,
    #[tabled(rename = "Price")]
    pub price: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Stock")]
    pub flag: String,
}

impl StockRow {
    pub fn from_record(record: &StockRecord, low_stock_threshold: i64) -> Self {
        let flag = if record.is_low_stock(low_stock_threshold) {
            LOW_STOCK_FLAG.to_string()
        } else {
            String::new()
        };

        Self {
            sku: record.sku.clone(),
            name: record.name.clone(),
            quantity: record.quantity,
            price: format!("{:.2}", record.price),
            value: format!("{:.2}", record.value()),
            flag,
        }
    }
}

/// Record grid with a low-stock flag column
pub struct StockTable {
    rows: Vec<StockRow>,
}

impl StockTable {
    pub fn new(records: &[StockRecord], low_stock_threshold: i64) -> Self {
        Self {
            rows: records
                .iter()
                .map(|r| StockRow::from_record(r, low_stock_threshold))
                .collect(),
        }
    }

    pub fn low_stock_rows(&self) -> usize {
        self.rows.iter().filter(|r| !r.flag.is_empty()).count()
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

#[derive(Tabled)]
pub struct MetricRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub fn stats_table(stats: &[(&str, String)]) -> String {
    let rows: Vec<MetricRow> = stats
        .iter()
        .map(|(label, value)| MetricRow {
            metric: label.to_string(),
            value: value.clone(),
        })
        .collect();

    Table::new(&rows).with(Style::rounded()).to_string()
}
