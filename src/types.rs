//! Type definitions for price list data

use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

/// Column names recognized in a price list header
pub mod column {
    pub const SIZE: &str = "Size";
    pub const SERIES: &str = "Series";
    pub const MATERIAL: &str = "Material";
    pub const SEAT: &str = "Seat";
    pub const PRICE: &str = "Price";
    pub const PRICE_CAD: &str = "PriceCAD";
    pub const NOTE: &str = "Note";
    /// Alternate note column used by older lists
    pub const NOTES: &str = "notes";
}

/// Color the page uses to flag a non-empty note
pub const NOTE_ALERT_COLOR: &str = "#c00";

/// One data record of a price list, keyed by header name
///
/// Values are trimmed at construction. Fields keep header order; when a header
/// repeats, the later column wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    fields: IndexMap<String, String>,
}

impl Row {
    /// Build a row by zipping headers with field values
    ///
    /// Headers past the end of `values` map to an empty string; surplus values
    /// are ignored.
    pub fn from_record(headers: &[String], values: &[String]) -> Self {
        let mut fields = IndexMap::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            let value = values.get(i).map(|v| v.trim()).unwrap_or("");
            fields.insert(header.clone(), value.to_string());
        }
        Row { fields }
    }

    /// Look up a field, tolerating header casing
    ///
    /// Tries the exact name, then its lowercase form, then any header equal
    /// ignoring ASCII case. Missing fields read as `""`.
    pub fn get(&self, key: &str) -> &str {
        if let Some(v) = self.fields.get(key) {
            return v;
        }
        let lower = key.to_lowercase();
        if let Some(v) = self.fields.get(&lower) {
            return v;
        }
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Note text, falling back to the `notes` column
    pub fn note(&self) -> &str {
        let note = self.get(column::NOTE);
        if note.is_empty() {
            self.get(column::NOTES)
        } else {
            note
        }
    }

    /// Raw prices for both currencies
    pub fn price_entry(&self) -> PriceEntry {
        PriceEntry {
            usd: self.get(column::PRICE).to_string(),
            cad: self.get(column::PRICE_CAD).to_string(),
        }
    }

    /// Header names in file order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// True when every value is empty
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.is_empty())
    }
}

impl<K: Into<String>, V: AsRef<str>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.as_ref().trim().to_string()))
                .collect(),
        }
    }
}

/// Quoting currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Currency {
    /// US dollars, read from the `Price` column
    #[default]
    Usd,
    /// Canadian dollars, read from the `PriceCAD` column
    Cad,
}

impl Currency {
    /// ISO-style code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Cad => "CAD",
        }
    }

    /// Prefix used when displaying amounts
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "USD$",
            Currency::Cad => "CAD$",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "CAD" => Ok(Currency::Cad),
            other => Err(format!("Unknown currency: {}", other)),
        }
    }
}

/// Raw price strings for each supported currency
///
/// A missing price is an empty string, never zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceEntry {
    pub usd: String,
    pub cad: String,
}

impl PriceEntry {
    /// Raw price for a currency
    pub fn get(&self, currency: Currency) -> &str {
        match currency {
            Currency::Usd => &self.usd,
            Currency::Cad => &self.cad,
        }
    }
}

/// Note text plus whether it should be painted in the alert color
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteDisplay {
    pub text: String,
    pub alert: bool,
}

impl NoteDisplay {
    /// Display for a note, flagged when non-empty
    pub fn new(note: &str) -> Self {
        let text = note.trim().to_string();
        let alert = !text.is_empty();
        NoteDisplay { text, alert }
    }

    /// Empty, unflagged display
    pub fn cleared() -> Self {
        NoteDisplay::default()
    }

    /// CSS color for the note, if flagged
    pub fn color(&self) -> Option<&'static str> {
        self.alert.then_some(NOTE_ALERT_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_record_trims_and_pads() {
        let row = Row::from_record(
            &headers(&["Size", "Series", "Price"]),
            &[" 2 ".to_string(), "A".to_string()],
        );
        assert_eq!(row.get("Size"), "2");
        assert_eq!(row.get("Series"), "A");
        assert_eq!(row.get("Price"), "");
    }

    #[test]
    fn test_case_fallback() {
        let row: Row = [("size", "4"), ("SERIES", "B")].into_iter().collect();
        assert_eq!(row.get("Size"), "4");
        assert_eq!(row.get("Series"), "B");
        assert_eq!(row.get("Material"), "");
    }

    #[test]
    fn test_exact_casing_preferred() {
        let row: Row = [("size", "lower"), ("Size", "exact")].into_iter().collect();
        assert_eq!(row.get("Size"), "exact");
    }

    #[test]
    fn test_note_fallback() {
        let row: Row = [("notes", "call first")].into_iter().collect();
        assert_eq!(row.note(), "call first");

        let row: Row = [("Note", "primary"), ("notes", "other")].into_iter().collect();
        assert_eq!(row.note(), "primary");
    }

    #[test]
    fn test_price_entry() {
        let row: Row = [("Price", "10,50"), ("PriceCAD", "14")].into_iter().collect();
        let entry = row.price_entry();
        assert_eq!(entry.get(Currency::Usd), "10,50");
        assert_eq!(entry.get(Currency::Cad), "14");

        let row: Row = [("Price", "3")].into_iter().collect();
        assert_eq!(row.price_entry().get(Currency::Cad), "");
    }

    #[test]
    fn test_currency() {
        assert_eq!("cad".parse::<Currency>(), Ok(Currency::Cad));
        assert_eq!(Currency::Usd.symbol(), "USD$");
        assert_eq!(Currency::Cad.to_string(), "CAD");
        assert!("EUR".parse::<Currency>().is_err());
    }

    #[test]
    fn test_note_display() {
        let note = NoteDisplay::new("  lead time 6 weeks ");
        assert_eq!(note.text, "lead time 6 weeks");
        assert_eq!(note.color(), Some(NOTE_ALERT_COLOR));
        assert_eq!(NoteDisplay::new("   ").color(), None);
    }
}
