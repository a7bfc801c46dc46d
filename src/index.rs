//! Price and note indexes built from price list rows

use crate::types::{column, Currency, PriceEntry, Row};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

// ASCII word boundaries: "Cylinder Kit" and "cyl." match, "Cylinders" does not
static CYLINDER_SERIES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?-u:\b)cyl(?:inder)?\.?(?-u:\b)").unwrap());

/// True when a `Series` value denotes a cylinder product
pub fn is_cylinder_series(series: &str) -> bool {
    CYLINDER_SERIES.is_match(series)
}

/// True when the row belongs to the cylinder set
pub fn is_cylinder_row(row: &Row) -> bool {
    is_cylinder_series(row.get(column::SERIES))
}

/// Composite key of a main product
///
/// Kept as a struct so attribute values never need a reserved separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MainKey {
    pub size: String,
    pub series: String,
    pub material: String,
    pub seat: String,
}

impl MainKey {
    pub fn new(
        size: impl Into<String>,
        series: impl Into<String>,
        material: impl Into<String>,
        seat: impl Into<String>,
    ) -> Self {
        MainKey {
            size: size.into(),
            series: series.into(),
            material: material.into(),
            seat: seat.into(),
        }
    }

    /// Key of a row
    pub fn from_row(row: &Row) -> Self {
        MainKey::new(
            row.get(column::SIZE),
            row.get(column::SERIES),
            row.get(column::MATERIAL),
            row.get(column::SEAT),
        )
    }
}

impl fmt::Display for MainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}¦{}¦{}¦{}",
            self.size, self.series, self.material, self.seat
        )
    }
}

/// Prices and notes of main products, keyed by [`MainKey`]
///
/// Duplicate keys: the last row wins for both price and note.
#[derive(Debug, Clone, Default)]
pub struct MainIndex {
    prices: HashMap<MainKey, PriceEntry>,
    notes: HashMap<MainKey, String>,
}

impl MainIndex {
    /// Index all given rows
    pub fn build<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a Row>,
    {
        let mut index = MainIndex::default();
        for row in rows {
            let key = MainKey::from_row(row);
            index.prices.insert(key.clone(), row.price_entry());
            index.notes.insert(key, row.note().to_string());
        }
        index
    }

    pub fn price_entry(&self, key: &MainKey) -> Option<&PriceEntry> {
        self.prices.get(key)
    }

    /// Raw price for a currency, `""` when unknown
    pub fn raw_price(&self, key: &MainKey, currency: Currency) -> &str {
        self.prices.get(key).map(|e| e.get(currency)).unwrap_or("")
    }

    /// Note text, `""` when unknown
    pub fn note(&self, key: &MainKey) -> &str {
        self.notes.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Prices and notes of cylinder add-ons, keyed by size
///
/// Duplicate sizes: the first price wins; a stored empty note is replaced by a
/// later non-empty one, a non-empty note is never replaced. Rows without a
/// size are ignored.
#[derive(Debug, Clone, Default)]
pub struct CylinderIndex {
    prices: HashMap<String, PriceEntry>,
    notes: HashMap<String, String>,
}

impl CylinderIndex {
    /// Index all given rows
    pub fn build<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a Row>,
    {
        let mut index = CylinderIndex::default();
        for row in rows {
            let size = row.get(column::SIZE);
            if size.is_empty() {
                continue;
            }

            index
                .prices
                .entry(size.to_string())
                .or_insert_with(|| row.price_entry());

            let note = row.note().trim();
            let stored = index.notes.entry(size.to_string()).or_default();
            if stored.is_empty() && !note.is_empty() {
                *stored = note.to_string();
            }
        }
        index
    }

    pub fn price_entry(&self, size: &str) -> Option<&PriceEntry> {
        self.prices.get(size)
    }

    /// Raw price for a currency, `""` when unknown
    pub fn raw_price(&self, size: &str, currency: Currency) -> &str {
        self.prices.get(size).map(|e| e.get(currency)).unwrap_or("")
    }

    /// Note text, `""` when unknown
    pub fn note(&self, size: &str) -> &str {
        self.notes.get(size).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
