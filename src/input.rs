//! Boundary validation - raw text to typed values
//!
//! Every adapter funnels user input through these parsers before touching a
//! repository, so malformed input never reaches storage.

use crate::{Error, Result};
use crate::record::{StockRecord, StockUpdate};
use std::fmt;

/// Parse a SKU. Surrounding whitespace is trimmed; case is preserved.
pub fn parse_sku(raw: &str) -> Result<String> {
    let sku = raw.trim();
    if sku.is_empty() {
        return Err(Error::InvalidInput("SKU must not be empty".to_string()));
    }
    Ok(sku.to_string())
}

/// Parse a display name
pub fn parse_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

/// Parse a quantity. Negative values are accepted.
pub fn parse_quantity(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("quantity must be a whole number, got '{}'", raw.trim())))
}

/// Parse a unit price. Any finite number is accepted.
pub fn parse_price(raw: &str) -> Result<f64> {
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("price must be a number, got '{}'", raw.trim())))?;

    if !price.is_finite() {
        return Err(Error::InvalidInput(format!("price must be finite, got '{}'", raw.trim())));
    }
    Ok(price)
}

/// Parse all four fields of a new record
pub fn parse_record(name: &str, sku: &str, quantity: &str, price: &str) -> Result<StockRecord> {
    Ok(StockRecord::new(
        parse_name(name)?,
        parse_sku(sku)?,
        parse_quantity(quantity)?,
        parse_price(price)?,
    ))
}

/// Parse optional replacement fields. `None` leaves a field unchanged.
pub fn parse_update(name: Option<&str>, quantity: Option<&str>, price: Option<&str>) -> Result<StockUpdate> {
    Ok(StockUpdate {
        name: name.map(parse_name).transpose()?,
        quantity: quantity.map(parse_quantity).transpose()?,
        price: price.map(parse_price).transpose()?,
    })
}

/// Treat blank text as "not supplied"
pub fn non_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Console menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    View,
    Add,
    Remove,
    Search,
    Value,
    Exit,
}

impl MenuChoice {
    /// Get all menu entries in display order
    pub fn all() -> &'static [MenuChoice] {
        &[
            MenuChoice::View,
            MenuChoice::Add,
            MenuChoice::Remove,
            MenuChoice::Search,
            MenuChoice::Value,
            MenuChoice::Exit,
        ]
    }

    /// Menu number shown to the user
    pub fn number(&self) -> u8 {
        match self {
            MenuChoice::View => 1,
            MenuChoice::Add => 2,
            MenuChoice::Remove => 3,
            MenuChoice::Search => 4,
            MenuChoice::Value => 5,
            MenuChoice::Exit => 6,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::View => "View stock",
            MenuChoice::Add => "Add stock",
            MenuChoice::Remove => "Remove stock",
            MenuChoice::Search => "Search stock",
            MenuChoice::Value => "Search value",
            MenuChoice::Exit => "Exit",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

/// Parse a menu selection.
///
/// The error message differs for non-numeric and out-of-range input.
pub fn parse_menu_choice(raw: &str) -> Result<MenuChoice> {
    let number: i64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::InvalidInput("Please enter a valid number.".to_string()))?;

    MenuChoice::all()
        .iter()
        .copied()
        .find(|choice| i64::from(choice.number()) == number)
        .ok_or_else(|| Error::InvalidInput("Sorry, no valid option.".to_string()))
}
