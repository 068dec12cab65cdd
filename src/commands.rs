use std::path::Path;
use anyhow::Context;
use owo_colors::OwoColorize;
use serde::Serialize;
use stockroom::config::{self, StockroomConfig};
use stockroom::console::ConsoleMenu;
use stockroom::output::{render_success, OutputMode};
use stockroom::ui::{self, stats_table, theme, Icons, StockTable};
use stockroom::{export, input, StockRepository};

pub fn emit_success<T: Serialize>(command: &'static str, data: T) -> anyhow::Result<()> {
    println!("{}", render_success(command, data)?);
    Ok(())
}

pub fn run_menu(repo: &mut dyn StockRepository, low_stock_threshold: i64) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    ConsoleMenu::new(repo, stdin.lock(), stdout.lock())
        .with_low_stock_threshold(low_stock_threshold)
        .run()?;
    Ok(())
}

pub fn run_list(
    repo: &dyn StockRepository,
    output_mode: OutputMode,
    low_stock_threshold: i64,
    low_stock_only: bool,
) -> anyhow::Result<()> {
    let records = if low_stock_only {
        repo.low_stock(low_stock_threshold)?
    } else {
        repo.list()?
    };

    if !output_mode.is_human() {
        return emit_success("list", records);
    }

    if records.is_empty() {
        println!("{} {}", Icons::INFO, ui::muted("No stock items."));
        return Ok(());
    }

    let table = StockTable::new(&records, low_stock_threshold);
    println!("{}", table.build());

    let flagged = table.low_stock_rows();
    if flagged > 0 {
        println!(
            "{} {}",
            Icons::LOW,
            format!("{} item(s) below {} units", flagged, low_stock_threshold)
                .style(theme().low_stock.clone())
        );
    }
    Ok(())
}

pub fn run_add(
    repo: &mut dyn StockRepository,
    output_mode: OutputMode,
    name: &str,
    sku: &str,
    quantity: &str,
    price: &str,
) -> anyhow::Result<()> {
    let record = input::parse_record(name, sku, quantity, price)?;
    repo.add(record.clone())?;

    if output_mode.is_human() {
        ui::success(&format!("Item added successfully: {}", record));
        Ok(())
    } else {
        emit_success("add", record)
    }
}

pub fn run_update(
    repo: &mut dyn StockRepository,
    output_mode: OutputMode,
    sku: &str,
    name: Option<&str>,
    quantity: Option<&str>,
    price: Option<&str>,
) -> anyhow::Result<()> {
    let sku = input::parse_sku(sku)?;
    let update = input::parse_update(
        name.and_then(input::non_blank),
        quantity.and_then(input::non_blank),
        price.and_then(input::non_blank),
    )?;
    if update.is_empty() && output_mode.is_human() {
        ui::warn("No fields given; nothing will change");
    }

    let record = repo.update(&sku, update)?;

    if output_mode.is_human() {
        println!("{} Updated {}", Icons::MOD, record);
        Ok(())
    } else {
        emit_success("update", record)
    }
}

pub fn run_remove(repo: &mut dyn StockRepository, output_mode: OutputMode, sku: &str) -> anyhow::Result<()> {
    let sku = input::parse_sku(sku)?;
    let record = repo.remove(&sku)?;

    if output_mode.is_human() {
        println!(
            "{} {}",
            Icons::DEL.style(theme().error.clone()),
            format!("Item with SKU {} removed.", record.sku.style(theme().sku.clone()))
        );
        Ok(())
    } else {
        emit_success("remove", record)
    }
}

pub fn run_find(
    repo: &dyn StockRepository,
    output_mode: OutputMode,
    low_stock_threshold: i64,
    sku: &str,
) -> anyhow::Result<()> {
    let sku = input::parse_sku(sku)?;
    let record = repo.find(&sku)?;

    if !output_mode.is_human() {
        return emit_success("find", record);
    }

    println!("{} {}", Icons::SEARCH, record);
    let level = if record.is_low_stock(low_stock_threshold) {
        format!("{} Low stock", Icons::LOW)
    } else {
        "In stock".to_string()
    };
    println!(
        "   {}",
        level.style(theme().stock_level(&record, low_stock_threshold).clone())
    );
    Ok(())
}

#[derive(Serialize)]
struct ValueReport {
    sku: Option<String>,
    value: f64,
}

pub fn run_value(
    repo: &dyn StockRepository,
    output_mode: OutputMode,
    sku: Option<&str>,
) -> anyhow::Result<()> {
    let report = match sku {
        Some(raw) => {
            let sku = input::parse_sku(raw)?;
            let value = repo.valuate(&sku)?;
            ValueReport { sku: Some(sku), value }
        }
        None => ValueReport {
            sku: None,
            value: repo.total_value()?,
        },
    };

    if !output_mode.is_human() {
        return emit_success("value", report);
    }

    let value = format!("{:.2}", report.value);
    match &report.sku {
        Some(sku) => println!(
            "{} Value of {}: {}",
            Icons::MONEY,
            sku.style(theme().sku.clone()),
            value.style(theme().money.clone())
        ),
        None => println!(
            "{} Total stock value: {}",
            Icons::MONEY,
            value.style(theme().money.clone())
        ),
    }
    Ok(())
}

pub fn run_export(repo: &dyn StockRepository, output_mode: OutputMode, path: &Path) -> anyhow::Result<()> {
    let records = repo.list()?;
    config::ensure_parent_dir(path)?;
    export::export_to_path(&records, path)
        .with_context(|| format!("exporting to {}", path.display()))?;

    if output_mode.is_human() {
        println!(
            "{} Exported {} record(s) to {}",
            Icons::EXPORT,
            records.len(),
            path.display()
        );
        Ok(())
    } else {
        emit_success(
            "export",
            serde_json::json!({ "path": path.display().to_string(), "records": records.len() }),
        )
    }
}

pub fn run_stats(
    repo: &dyn StockRepository,
    output_mode: OutputMode,
    low_stock_threshold: i64,
    location: &str,
) -> anyhow::Result<()> {
    let stats = repo.stats(low_stock_threshold)?;

    if !output_mode.is_human() {
        return emit_success("stats", stats);
    }

    ui::header(&format!("Stockroom Statistics ({})", location));
    println!(
        "{}",
        stats_table(&[
            ("Records", stats.records.to_string()),
            ("Units", stats.total_quantity.to_string()),
            ("Total value", format!("{:.2}", stats.total_value)),
            (
                "Low stock",
                format!("{} (below {})", stats.low_stock, low_stock_threshold),
            ),
        ])
    );
    Ok(())
}

pub fn run_init(output_mode: OutputMode, path: &Path, force: bool) -> anyhow::Result<()> {
    let starter = StockroomConfig::starter();
    config::write_config(path, &starter, force)?;

    if output_mode.is_human() {
        ui::success(&format!("Wrote {}", path.display()));
        ui::section("Defaults");
        if let Some(database) = &starter.database {
            ui::summary_row("database", database);
        }
        ui::summary_row("low_stock_threshold", &starter.low_stock_threshold().to_string());
        if let Some(export_path) = &starter.export_path {
            ui::summary_row("export_path", &ui::muted(export_path));
        }
        Ok(())
    } else {
        emit_success("init", starter)
    }
}
