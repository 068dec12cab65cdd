//! CSV export of the full stock table

use std::io::Write;
use std::path::Path;
use crate::Result;
use crate::record::StockRecord;

/// Header row of every export
pub const CSV_HEADER: [&str; 4] = ["SKU", "Name", "Quantity", "Price"];

/// Write the header followed by one row per record, in the given order
pub fn write_csv<W: Write>(records: &[StockRecord], writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(CSV_HEADER)?;
    for record in records {
        let quantity = record.quantity.to_string();
        let price = record.price.to_string();
        out.write_record([
            record.sku.as_str(),
            record.name.as_str(),
            quantity.as_str(),
            price.as_str(),
        ])?;
    }
    out.flush()?;
    Ok(())
}

/// Export to a file, replacing any existing file at `path`
pub fn export_to_path(records: &[StockRecord], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(records, file)?;
    tracing::info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}
