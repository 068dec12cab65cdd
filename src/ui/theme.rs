//! Terminal styles for stock output

use owo_colors::Style;
use std::sync::OnceLock;
use crate::record::StockRecord;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles named after what they decorate: messages, labels, SKUs, money
/// and stock levels.
#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    /// Field labels in summaries
    pub label: Style,
    pub muted: Style,
    pub sku: Style,
    /// Prices and stock values
    pub money: Style,
    /// Quantities below the low-stock threshold
    pub low_stock: Style,
    pub in_stock: Style,
}

impl Theme {
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        if wants_color(console::Term::stdout().is_term(), no_color) {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
            label: Style::new().white().dimmed(),
            muted: Style::new().bright_black(),
            sku: Style::new().blue().bold(),
            money: Style::new().yellow(),
            low_stock: Style::new().red(),
            in_stock: Style::new().green(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            label: Style::new(),
            muted: Style::new(),
            sku: Style::new(),
            money: Style::new(),
            low_stock: Style::new(),
            in_stock: Style::new(),
        }
    }

    /// Stock-level style for `record` at `threshold`
    pub fn stock_level(&self, record: &StockRecord, threshold: i64) -> &Style {
        if record.is_low_stock(threshold) {
            &self.low_stock
        } else {
            &self.in_stock
        }
    }
}

/// Colour only on a terminal, and never when `NO_COLOR` is set
fn wants_color(is_term: bool, no_color: bool) -> bool {
    is_term && !no_color
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
