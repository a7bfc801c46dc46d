//! Quote form state
//!
//! [`QuoteSession`] is the context object a UI layer drives: it owns the loaded
//! [`PriceBook`], the cascading selections and their option domains, the price
//! inputs, the tier choice, manual adjustments and the displayed total. Each
//! method mirrors one form event.

use crate::book::PriceBook;
use crate::csv_reader::PriceListReader;
use crate::error::{QuoteError, Result};
use crate::index::MainKey;
use crate::money::{format_cents, format_money, to_fixed2};
use crate::options::options_for;
use crate::price::{adjustments_total_cents, parse_price_to_number};
use crate::quote::{calculate, Quote};
use crate::types::{column, Currency, NoteDisplay};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// A selection control of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selector {
    Size,
    Series,
    Material,
    Seat,
    /// Independent cylinder-size selector
    Cylinder,
}

impl Selector {
    /// Main cascade, top to bottom
    pub const CASCADE: [Selector; 4] = [
        Selector::Size,
        Selector::Series,
        Selector::Material,
        Selector::Seat,
    ];

    /// Price list column the selector reads
    pub fn column(&self) -> &'static str {
        match self {
            Selector::Size | Selector::Cylinder => column::SIZE,
            Selector::Series => column::SERIES,
            Selector::Material => column::MATERIAL,
            Selector::Seat => column::SEAT,
        }
    }

    /// Placeholder shown when nothing is selected
    pub fn placeholder(&self) -> &'static str {
        match self {
            Selector::Cylinder => "— No Cylinder —",
            _ => "— Select —",
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Selector::Size => "size",
            Selector::Series => "series",
            Selector::Material => "material",
            Selector::Seat => "seat",
            Selector::Cylinder => "cylinder",
        };
        f.write_str(name)
    }
}

impl FromStr for Selector {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "size" => Ok(Selector::Size),
            "series" => Ok(Selector::Series),
            "material" => Ok(Selector::Material),
            "seat" => Ok(Selector::Seat),
            "cylinder" | "cyl" => Ok(Selector::Cylinder),
            other => Err(format!("Unknown selector: {}", other)),
        }
    }
}

/// Option lists currently offered by each selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domains {
    pub size: Vec<String>,
    pub series: Vec<String>,
    pub material: Vec<String>,
    pub seat: Vec<String>,
    pub cylinder: Vec<String>,
}

impl Domains {
    pub fn get(&self, selector: Selector) -> &[String] {
        match selector {
            Selector::Size => &self.size,
            Selector::Series => &self.series,
            Selector::Material => &self.material,
            Selector::Seat => &self.seat,
            Selector::Cylinder => &self.cylinder,
        }
    }
}

/// Current value of each selector, `""` meaning the placeholder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    pub size: String,
    pub series: String,
    pub material: String,
    pub seat: String,
    pub cylinder: String,
}

impl Selection {
    pub fn get(&self, selector: Selector) -> &str {
        match selector {
            Selector::Size => &self.size,
            Selector::Series => &self.series,
            Selector::Material => &self.material,
            Selector::Seat => &self.seat,
            Selector::Cylinder => &self.cylinder,
        }
    }

    /// Main product key, once all four main selectors have a value
    pub fn main_key(&self) -> Option<MainKey> {
        if Selector::CASCADE.iter().any(|s| self.get(*s).is_empty()) {
            return None;
        }
        Some(MainKey::new(
            self.size.as_str(),
            self.series.as_str(),
            self.material.as_str(),
            self.seat.as_str(),
        ))
    }
}

/// State of one quoting form
#[derive(Debug, Clone)]
pub struct QuoteSession {
    currency: Currency,
    book: Arc<PriceBook>,
    selection: Selection,
    domains: Domains,
    list_price: String,
    cylinder_price: String,
    tier: String,
    adjustments: Vec<String>,
    main_note: NoteDisplay,
    cylinder_note: NoteDisplay,
    total_display: String,
}

impl Default for QuoteSession {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

impl QuoteSession {
    /// Empty session with no price list loaded
    pub fn new(currency: Currency) -> Self {
        QuoteSession {
            currency,
            book: Arc::new(PriceBook::default()),
            selection: Selection::default(),
            domains: Domains::default(),
            list_price: String::new(),
            cylinder_price: String::new(),
            tier: String::new(),
            adjustments: Vec::new(),
            main_note: NoteDisplay::cleared(),
            cylinder_note: NoteDisplay::cleared(),
            total_display: format_money(0.0, currency),
        }
    }

    // ----- loading -----

    /// Swap in a freshly built price book and reset the selectors
    pub fn load(&mut self, book: PriceBook) {
        tracing::info!(
            main_rows = book.main_rows().len(),
            cylinder_rows = book.cylinder_rows().len(),
            "price list loaded"
        );
        self.book = Arc::new(book);

        self.selection = Selection::default();
        self.domains = Domains {
            size: options_for(self.book.main_rows(), column::SIZE, &[]),
            cylinder: options_for(self.book.cylinder_rows(), column::SIZE, &[]),
            ..Domains::default()
        };
        self.list_price.clear();
        self.cylinder_price.clear();
        self.main_note = NoteDisplay::cleared();
        self.cylinder_note = NoteDisplay::cleared();
    }

    /// Load price list text with the default delimiter
    pub fn load_text(&mut self, text: &str) {
        self.load(PriceBook::from_text(text));
    }

    /// Load a price list through a configured reader
    pub fn load_reader(&mut self, reader: &PriceListReader) {
        self.load(PriceBook::from_reader(reader));
    }

    /// Load a price list file; on error the current book is kept
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let reader = PriceListReader::open(path)?;
        self.load_reader(&reader);
        Ok(())
    }

    // ----- cascading selection -----

    /// Apply a selector change and return the domain of the next selector
    ///
    /// Selecting seat or cylinder returns an empty slice.
    pub fn select(&mut self, selector: Selector, value: &str) -> &[String] {
        match selector {
            Selector::Size => self.select_size(value),
            Selector::Series => self.select_series(value),
            Selector::Material => self.select_material(value),
            Selector::Seat => {
                self.select_seat(value);
                &[]
            }
            Selector::Cylinder => {
                self.select_cylinder(value);
                &[]
            }
        }
    }

    /// Choose a size; offers the series available for it
    ///
    /// Choosing the placeholder (`""`) here or further down the cascade leaves
    /// every lower domain empty. It never falls back to the unfiltered series
    /// list.
    pub fn select_size(&mut self, value: &str) -> &[String] {
        self.selection.size = value.to_string();
        self.selection.series.clear();
        self.selection.material.clear();
        self.selection.seat.clear();

        self.domains.series = if value.trim().is_empty() {
            Vec::new()
        } else {
            options_for(
                self.book.main_rows(),
                column::SERIES,
                &[(column::SIZE, value)],
            )
        };
        self.domains.material.clear();
        self.domains.seat.clear();
        self.list_price.clear();
        self.refresh_main_note();
        &self.domains.series
    }

    /// Choose a series; offers the materials available for size + series
    pub fn select_series(&mut self, value: &str) -> &[String] {
        self.selection.series = value.to_string();
        self.selection.material.clear();
        self.selection.seat.clear();

        self.domains.material = if value.trim().is_empty() {
            Vec::new()
        } else {
            options_for(
                self.book.main_rows(),
                column::MATERIAL,
                &[
                    (column::SIZE, self.selection.size.as_str()),
                    (column::SERIES, value),
                ],
            )
        };
        self.domains.seat.clear();
        self.list_price.clear();
        self.refresh_main_note();
        &self.domains.material
    }

    /// Choose a material; offers the seats available for the first three choices
    pub fn select_material(&mut self, value: &str) -> &[String] {
        self.selection.material = value.to_string();
        self.selection.seat.clear();

        self.domains.seat = if value.trim().is_empty() {
            Vec::new()
        } else {
            options_for(
                self.book.main_rows(),
                column::SEAT,
                &[
                    (column::SIZE, self.selection.size.as_str()),
                    (column::SERIES, self.selection.series.as_str()),
                    (column::MATERIAL, value),
                ],
            )
        };
        self.list_price.clear();
        self.refresh_main_note();
        &self.domains.seat
    }

    /// Choose a seat; fills in the list price and main note
    pub fn select_seat(&mut self, value: &str) {
        self.selection.seat = value.to_string();
        self.refresh_main_price();
        self.refresh_main_note();
    }

    /// Choose a cylinder size (`""` for none); fills in its price and note
    pub fn select_cylinder(&mut self, value: &str) {
        self.selection.cylinder = value.to_string();
        self.refresh_cylinder_price();
        self.refresh_cylinder_note();
    }

    fn refresh_main_price(&mut self) {
        self.list_price = match self.selection.main_key() {
            Some(key) => {
                let raw = self.book.main_index().raw_price(&key, self.currency);
                price_input(raw)
            }
            None => String::new(),
        };
    }

    fn refresh_main_note(&mut self) {
        self.main_note = match self.selection.main_key() {
            Some(key) => NoteDisplay::new(self.book.main_index().note(&key)),
            None => NoteDisplay::cleared(),
        };
    }

    fn refresh_cylinder_price(&mut self) {
        let size = self.selection.cylinder.as_str();
        self.cylinder_price = if size.is_empty() {
            String::new()
        } else {
            price_input(self.book.cylinder_index().raw_price(size, self.currency))
        };
    }

    fn refresh_cylinder_note(&mut self) {
        let size = self.selection.cylinder.trim();
        self.cylinder_note = if size.is_empty() || size.eq_ignore_ascii_case("none") {
            NoteDisplay::cleared()
        } else {
            NoteDisplay::new(self.book.cylinder_index().note(size))
        };
    }

    // ----- free inputs -----

    /// Overwrite the list price input
    pub fn set_list_price(&mut self, value: &str) {
        self.list_price = value.to_string();
    }

    /// Overwrite the cylinder price input
    pub fn set_cylinder_price(&mut self, value: &str) {
        self.cylinder_price = value.to_string();
    }

    /// Choose a discount tier key (`""` for the placeholder)
    pub fn set_tier(&mut self, key: &str) {
        self.tier = key.to_string();
    }

    /// Switch currency; clears every selection and the total
    ///
    /// Adjustment rows are kept.
    pub fn set_currency(&mut self, currency: Currency) {
        tracing::info!(from = %self.currency, to = %currency, "currency changed");
        self.currency = currency;
        self.reset_all();
        self.total_display = format_money(0.0, currency);
    }

    // ----- adjustments -----

    /// Append an adjustment row, optionally prefilled; returns its index
    pub fn add_adjustment(&mut self, amount: Option<f64>) -> usize {
        let value = match amount {
            Some(n) => to_fixed2(n),
            _ => String::new(),
        };
        self.adjustments.push(value);
        self.adjustments.len() - 1
    }

    /// Edit an adjustment row; false when the row does not exist
    pub fn set_adjustment(&mut self, index: usize, value: &str) -> bool {
        match self.adjustments.get_mut(index) {
            Some(slot) => {
                *slot = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove an adjustment row and re-quote if the form is complete
    ///
    /// Returns the refreshed quote when one could be computed.
    pub fn remove_adjustment(&mut self, index: usize) -> Option<Quote> {
        if index >= self.adjustments.len() {
            return None;
        }
        self.adjustments.remove(index);

        if !self.is_complete() {
            return None;
        }
        let quote = self.quote().ok()?;
        self.total_display = format_cents(quote.total_cents, self.currency);
        Some(quote)
    }

    /// Drop every adjustment row
    pub fn clear_adjustments(&mut self) {
        self.adjustments.clear();
    }

    /// Sum of all adjustments in cents
    pub fn adjustments_cents(&self) -> i64 {
        adjustments_total_cents(&self.adjustments)
    }

    /// Label shown under the adjustment rows
    pub fn adjustments_label(&self) -> String {
        format!(
            "Additions: {}",
            format_cents(self.adjustments_cents(), self.currency)
        )
    }

    // ----- quoting -----

    /// True when the required inputs (list price, tier) are filled in
    pub fn is_complete(&self) -> bool {
        !self.list_price.trim().is_empty() && !self.tier.is_empty()
    }

    /// Price the current inputs without touching the display
    pub fn quote(&self) -> Result<Quote> {
        calculate(
            &self.list_price,
            &self.cylinder_price,
            &self.tier,
            &self.adjustments,
        )
    }

    /// Submit the form: validate, price, and update the total display
    pub fn submit(&mut self) -> Result<Quote> {
        let result = if self.is_complete() {
            self.quote()
        } else {
            Err(QuoteError::IncompleteSelection)
        };

        match result {
            Ok(quote) => {
                self.total_display = format_cents(quote.total_cents, self.currency);
                Ok(quote)
            }
            Err(e) => {
                tracing::warn!(error = %e, "quote rejected");
                Err(e)
            }
        }
    }

    // ----- resets -----

    /// Rebuild selector domains from the loaded book and clear all inputs
    ///
    /// Adjustments and the total display are left alone.
    pub fn reset_all(&mut self) {
        self.selection = Selection::default();
        self.domains = Domains {
            size: options_for(self.book.main_rows(), column::SIZE, &[]),
            cylinder: options_for(self.book.cylinder_rows(), column::SIZE, &[]),
            ..Domains::default()
        };
        self.list_price.clear();
        self.cylinder_price.clear();
        self.tier.clear();
        self.main_note = NoteDisplay::cleared();
        self.cylinder_note = NoteDisplay::cleared();
    }

    /// Form reset: everything in [`reset_all`](Self::reset_all), plus
    /// adjustments and the total
    pub fn reset_form(&mut self) {
        self.reset_all();
        self.clear_adjustments();
        self.total_display = format_money(0.0, self.currency);
    }

    // ----- accessors -----

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Snapshot of the loaded price book
    pub fn book(&self) -> Arc<PriceBook> {
        Arc::clone(&self.book)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    pub fn domain(&self, selector: Selector) -> &[String] {
        self.domains.get(selector)
    }

    pub fn list_price(&self) -> &str {
        &self.list_price
    }

    pub fn cylinder_price(&self) -> &str {
        &self.cylinder_price
    }

    pub fn tier(&self) -> &str {
        &self.tier
    }

    pub fn adjustments(&self) -> &[String] {
        &self.adjustments
    }

    pub fn main_note(&self) -> &NoteDisplay {
        &self.main_note
    }

    pub fn cylinder_note(&self) -> &NoteDisplay {
        &self.cylinder_note
    }

    /// Formatted total as last displayed
    pub fn total_display(&self) -> &str {
        &self.total_display
    }

    /// Format an amount in the session currency
    pub fn format(&self, amount: f64) -> String {
        format_money(amount, self.currency)
    }
}

// Price input text: two decimals, or empty when unparsable
fn price_input(raw: &str) -> String {
    parse_price_to_number(raw)
        .map(to_fixed2)
        .unwrap_or_default()
}
