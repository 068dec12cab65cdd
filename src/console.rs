//! Console menu - numbered text menu driving a repository
//!
//! The menu owns no stock state. It reads a line, calls one repository
//! operation and prints the outcome. Domain errors are printed and the menu
//! is shown again; only I/O and storage failures end the loop with an error.

use std::io::{BufRead, Write};
use crate::{Error, Result};
use crate::input::{self, MenuChoice};
use crate::record::{StockRecord, DEFAULT_LOW_STOCK_THRESHOLD};
use crate::repository::StockRepository;

/// Marker appended to records below the low-stock threshold
pub const LOW_STOCK_MARKER: &str = "[LOW STOCK]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive menu over any line-oriented input and output
pub struct ConsoleMenu<'a, R, W> {
    repo: &'a mut dyn StockRepository,
    input: R,
    output: W,
    low_stock_threshold: i64,
}

impl<'a, R: BufRead, W: Write> ConsoleMenu<'a, R, W> {
    pub fn new(repo: &'a mut dyn StockRepository, input: R, output: W) -> Self {
        Self {
            repo,
            input,
            output,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }

    pub fn with_low_stock_threshold(mut self, threshold: i64) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    /// Run until the user confirms exit or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let line = match self.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    tracing::debug!("Input closed, leaving menu");
                    return Ok(());
                }
                Err(e) => {
                    self.report(e)?;
                    continue;
                }
            };

            let choice = match input::parse_menu_choice(&line) {
                Ok(choice) => choice,
                Err(Error::InvalidInput(msg)) => {
                    writeln!(self.output, "{}", msg)?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            tracing::debug!("Menu choice: {:?}", choice);
            match self.handle(choice) {
                Ok(Flow::Exit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(e) => {
                    self.report(e)?;
                }
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "What would you like to do?")?;
        for choice in MenuChoice::all() {
            writeln!(self.output, "{}", choice)?;
        }
        self.output.flush()?;
        Ok(())
    }

    /// Read one line without its terminator; `None` at end of input.
    /// A line that is not UTF-8 is consumed and reported as `InvalidInput`.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8(bytes)
            .map_err(|_| Error::InvalidInput("input must be valid UTF-8".to_string()))?;
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    fn handle(&mut self, choice: MenuChoice) -> Result<Flow> {
        match choice {
            MenuChoice::View => self.view(),
            MenuChoice::Add => self.add(),
            MenuChoice::Remove => self.remove(),
            MenuChoice::Search => self.search(),
            MenuChoice::Value => self.value(),
            MenuChoice::Exit => self.exit(),
        }
    }

    /// Print a recoverable error; pass anything else up
    fn report(&mut self, err: Error) -> Result<Flow> {
        if err.is_recoverable() {
            writeln!(self.output, "{}.", err)?;
            Ok(Flow::Continue)
        } else {
            Err(err)
        }
    }

    fn view(&mut self) -> Result<Flow> {
        let records = self.repo.list()?;
        if records.is_empty() {
            writeln!(self.output, "No stock items.")?;
        }
        for record in &records {
            self.print_record(record)?;
        }
        Ok(Flow::Continue)
    }

    fn print_record(&mut self, record: &StockRecord) -> Result<()> {
        if record.is_low_stock(self.low_stock_threshold) {
            writeln!(self.output, "{} {}", record, LOW_STOCK_MARKER)?;
        } else {
            writeln!(self.output, "{}", record)?;
        }
        Ok(())
    }

    fn add(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Enter item name: ")? else { return Ok(Flow::Exit) };
        let Some(sku) = self.prompt("Enter SKU, e.g. SKU001: ")? else { return Ok(Flow::Exit) };
        let Some(quantity) = self.prompt("Enter quantity: ")? else { return Ok(Flow::Exit) };
        let Some(price) = self.prompt("Enter price: ")? else { return Ok(Flow::Exit) };

        let added = input::parse_record(&name, &sku, &quantity, &price)
            .and_then(|record| self.repo.add(record));

        match added {
            Ok(()) => {
                writeln!(self.output, "Item added successfully.")?;
                Ok(Flow::Continue)
            }
            Err(e) => self.report(e),
        }
    }

    fn remove(&mut self) -> Result<Flow> {
        let Some(raw) = self.prompt("Enter SKU, e.g. SKU001: ")? else { return Ok(Flow::Exit) };

        match input::parse_sku(&raw).and_then(|sku| self.repo.remove(&sku)) {
            Ok(record) => {
                writeln!(self.output, "Item with SKU {} removed.", record.sku)?;
                Ok(Flow::Continue)
            }
            Err(e) => self.report(e),
        }
    }

    fn search(&mut self) -> Result<Flow> {
        let Some(raw) = self.prompt("Enter SKU for item search: ")? else { return Ok(Flow::Exit) };

        match input::parse_sku(&raw).and_then(|sku| self.repo.find(&sku)) {
            Ok(record) => {
                self.print_record(&record)?;
                Ok(Flow::Continue)
            }
            Err(Error::NotFound(sku)) => {
                writeln!(self.output, "Couldn't find item with SKU {}.", sku)?;
                Ok(Flow::Continue)
            }
            Err(e) => self.report(e),
        }
    }

    fn value(&mut self) -> Result<Flow> {
        let Some(raw) = self.prompt("Enter SKU for value search: ")? else { return Ok(Flow::Exit) };

        match input::parse_sku(&raw).and_then(|sku| self.repo.find(&sku)) {
            Ok(record) => {
                writeln!(
                    self.output,
                    "The value for the product {} is {:.2}",
                    record,
                    record.value()
                )?;
                Ok(Flow::Continue)
            }
            Err(Error::NotFound(sku)) => {
                writeln!(self.output, "Couldn't find item with SKU {}.", sku)?;
                Ok(Flow::Continue)
            }
            Err(e) => self.report(e),
        }
    }

    fn exit(&mut self) -> Result<Flow> {
        let Some(answer) = self.prompt("Are you sure? y/n ")? else { return Ok(Flow::Exit) };

        if answer.trim().eq_ignore_ascii_case("y") {
            writeln!(self.output, "Exiting...")?;
            Ok(Flow::Exit)
        } else {
            Ok(Flow::Continue)
        }
    }
}
