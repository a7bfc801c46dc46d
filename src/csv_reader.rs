//! Price list reading: text or file in, header-keyed rows out

use crate::csv::CsvParser;
use crate::error::{QuoteError, Result};
use crate::types::Row;
use std::path::Path;

/// Price list reader
///
/// Holds the decoded document and tokenizes it on demand. The first record is
/// the header row; data records whose fields are all blank are skipped.
///
/// # Examples
///
/// ```
/// use pricequote::csv_reader::PriceListReader;
///
/// let rows = PriceListReader::from_text("Size;Price\n2;10,50\n").rows();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].get("Price"), "10,50");
/// ```
///
/// # Custom delimiter
///
/// ```
/// use pricequote::csv_reader::PriceListReader;
///
/// let rows = PriceListReader::from_text("Size,Price\n2,10.50")
///     .delimiter(b',')
///     .rows();
/// assert_eq!(rows[0].get("Size"), "2");
/// ```
pub struct PriceListReader {
    text: String,

    // Configuration
    delimiter: u8,
    quote_char: u8,
}

impl PriceListReader {
    /// Reader over already-decoded text
    ///
    /// A leading byte order mark is dropped.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if text.starts_with('\u{feff}') {
            text.drain(..'\u{feff}'.len_utf8());
        }
        PriceListReader {
            text,
            delimiter: b';',
            quote_char: b'"',
        }
    }

    /// Open a price list file - auto-detects compression from file extension
    ///
    /// # File Extensions
    /// - `.csv` (or anything else) → Uncompressed, direct read
    /// - `.csv.zst`, `.csv.zip`, `.csv.gz` → first CSV entry of the archive
    ///   (requires the `compressed` feature)
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_str().unwrap_or("");

        let data = if path_str.ends_with(".csv.zst")
            || path_str.ends_with(".csv.zip")
            || path_str.ends_with(".csv.gz")
        {
            read_archive(path_ref)?
        } else {
            std::fs::read(path_ref).map_err(|e| {
                QuoteError::ReadError(format!("Failed to open price list: {}", e))
            })?
        };

        tracing::debug!(path = %path_ref.display(), bytes = data.len(), "read price list");
        Ok(Self::from_text(String::from_utf8_lossy(&data).into_owned()))
    }

    /// Set custom delimiter (builder pattern)
    pub fn delimiter(mut self, delim: u8) -> Self {
        self.delimiter = delim;
        self
    }

    /// Set custom quote character (builder pattern)
    pub fn quote_char(mut self, quote: u8) -> Self {
        self.quote_char = quote;
        self
    }

    /// Trimmed header names, if the document has any records
    pub fn headers(&self) -> Option<Vec<String>> {
        let parser = CsvParser::new(self.delimiter, self.quote_char);
        parser
            .parse_records(&self.text)
            .into_iter()
            .next()
            .map(|header| header.iter().map(|h| h.trim().to_string()).collect())
    }

    /// Tokenize the document into data rows
    pub fn rows(&self) -> Vec<Row> {
        let parser = CsvParser::new(self.delimiter, self.quote_char);
        let mut records = parser.parse_records(&self.text).into_iter();

        let headers: Vec<String> = match records.next() {
            Some(header) => header.iter().map(|h| h.trim().to_string()).collect(),
            None => return Vec::new(),
        };

        records
            .filter(|record| record.iter().any(|field| !field.trim().is_empty()))
            .map(|record| Row::from_record(&headers, &record))
            .collect()
    }
}

#[cfg(feature = "compressed")]
fn read_archive(path: &Path) -> Result<Vec<u8>> {
    use s_zip::StreamingZipReader;

    let mut zip = StreamingZipReader::open(path)
        .map_err(|e| QuoteError::ReadError(format!("Failed to open ZIP: {}", e)))?;

    // Find first .csv entry
    let entry_name = zip
        .entries()
        .iter()
        .find(|e| e.name.ends_with(".csv"))
        .or_else(|| zip.entries().first())
        .ok_or_else(|| QuoteError::ReadError("No CSV entry found in archive".to_string()))?
        .name
        .clone();

    zip.read_entry_by_name(&entry_name)
        .map_err(|e| QuoteError::ReadError(format!("Failed to read ZIP entry: {}", e)))
}

#[cfg(not(feature = "compressed"))]
fn read_archive(path: &Path) -> Result<Vec<u8>> {
    Err(QuoteError::ReadError(format!(
        "Compressed price lists need the `compressed` feature: {}",
        path.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_rows_with_header() {
        let rows = PriceListReader::from_text(" Size ; Series ;Price\n2;A;10\n3;B;12\n").rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Size"), "2");
        assert_eq!(rows[1].get("Series"), "B");
        assert_eq!(rows[1].get("Price"), "12");
    }

    #[test]
    fn test_blank_rows_skipped() {
        let rows = PriceListReader::from_text("Size;Price\n\n ; \n2;10\n;;\n").rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Size"), "2");
    }

    #[test]
    fn test_header_only_and_empty() {
        assert!(PriceListReader::from_text("Size;Price").rows().is_empty());
        assert!(PriceListReader::from_text("").rows().is_empty());
        assert_eq!(PriceListReader::from_text("").headers(), None);
    }

    #[test]
    fn test_bom_stripped() {
        let reader = PriceListReader::from_text("\u{feff}Size;Price\n2;10");
        assert_eq!(reader.headers(), Some(vec!["Size".to_string(), "Price".to_string()]));
        assert_eq!(reader.rows()[0].get("Size"), "2");
    }

    #[test]
    fn test_quoted_value() {
        let rows = PriceListReader::from_text("Size;Note\n2;\"a;\"\"b\"\"\"\n").rows();
        assert_eq!(rows[0].get("Note"), "a;\"b\"");
    }

    #[test]
    fn test_open_plain_file() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"Size;Price\r\n4;99,90\r\n").unwrap();

        let rows = PriceListReader::open(file.path())?.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Price"), "99,90");
        Ok(())
    }

    #[test]
    fn test_open_missing_file() {
        let err = PriceListReader::open("does/not/exist.csv").err();
        assert!(matches!(err, Some(QuoteError::ReadError(_))));
    }
}
