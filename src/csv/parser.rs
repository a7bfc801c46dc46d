//! CSV tokenizing with RFC 4180-like quoting over a whole document

/// CSV parser for price list text
///
/// Unlike a line reader, the parser scans the whole document so quoted fields
/// may span lines. Malformed quoting is tolerated: an unterminated quote
/// swallows the rest of the input into the current field instead of failing.
pub struct CsvParser {
    delimiter: u8,
    quote_char: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new(b';', b'"')
    }
}

impl CsvParser {
    /// Create a new CSV parser with custom delimiter and quote character
    pub fn new(delimiter: u8, quote_char: u8) -> Self {
        Self {
            delimiter,
            quote_char,
        }
    }

    /// Split a document into records of raw (untrimmed) fields
    ///
    /// `\n` ends a record, `\r` is dropped outside quotes, and a trailing
    /// record without a final newline is still emitted.
    pub fn parse_records(&self, text: &str) -> Vec<Vec<String>> {
        let quote = self.quote_char as char;
        let delimiter = self.delimiter as char;

        let mut records = Vec::new();
        let mut record = Vec::new();
        let mut current_field = String::new();
        let mut in_quotes = false;
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            if in_quotes {
                if ch == quote {
                    // Check for escaped quote ("")
                    if chars.peek() == Some(&quote) {
                        current_field.push(quote);
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    current_field.push(ch);
                }
            } else if ch == quote {
                in_quotes = true;
            } else if ch == delimiter {
                record.push(std::mem::take(&mut current_field));
            } else if ch == '\n' {
                record.push(std::mem::take(&mut current_field));
                records.push(std::mem::take(&mut record));
            } else if ch != '\r' {
                current_field.push(ch);
            }
        }

        if !current_field.is_empty() || !record.is_empty() {
            record.push(current_field);
            records.push(record);
        }
        records
    }

    /// Parse a single line into fields
    pub fn parse_line(&self, line: &str) -> Vec<String> {
        self.parse_records(line)
            .into_iter()
            .next()
            .unwrap_or_else(|| vec![String::new()])
    }
}
