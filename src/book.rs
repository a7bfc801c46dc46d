//! One loaded price list and everything derived from it

use crate::csv_reader::PriceListReader;
use crate::index::{is_cylinder_row, CylinderIndex, MainIndex};
use crate::types::Row;

/// Immutable dataset for one load cycle
///
/// Rows are split into main products and cylinder add-ons, and both indexes
/// are built up front. A new load builds a new book; nothing is updated in
/// place.
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    main_rows: Vec<Row>,
    cylinder_rows: Vec<Row>,
    main_index: MainIndex,
    cylinder_index: CylinderIndex,
}

impl PriceBook {
    /// Split rows and build both indexes
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let total = rows.len();
        let (cylinder_rows, main_rows): (Vec<Row>, Vec<Row>) =
            rows.into_iter().partition(is_cylinder_row);

        let main_index = MainIndex::build(&main_rows);
        let cylinder_index = CylinderIndex::build(&cylinder_rows);

        tracing::debug!(
            rows = total,
            main_rows = main_rows.len(),
            cylinder_rows = cylinder_rows.len(),
            main_keys = main_index.len(),
            cylinder_sizes = cylinder_index.len(),
            "built price book"
        );

        PriceBook {
            main_rows,
            cylinder_rows,
            main_index,
            cylinder_index,
        }
    }

    /// Parse price list text with the default `;` delimiter
    pub fn from_text(text: &str) -> Self {
        Self::from_reader(&PriceListReader::from_text(text))
    }

    pub fn from_reader(reader: &PriceListReader) -> Self {
        Self::from_rows(reader.rows())
    }

    /// Rows that drive the size/series/material/seat selectors
    pub fn main_rows(&self) -> &[Row] {
        &self.main_rows
    }

    /// Rows that drive the cylinder selector
    pub fn cylinder_rows(&self) -> &[Row] {
        &self.cylinder_rows
    }

    pub fn main_index(&self) -> &MainIndex {
        &self.main_index
    }

    pub fn cylinder_index(&self) -> &CylinderIndex {
        &self.cylinder_index
    }

    pub fn is_empty(&self) -> bool {
        self.main_rows.is_empty() && self.cylinder_rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::MainKey;
    use crate::types::Currency;

    const LIST: &str = "Size;Series;Material;Seat;Price;PriceCAD;Note\n\
        2;A;SS;PTFE;100,00;135,00;\n\
        2;Cyl;;;40;55;first\n\
        3;Cylinder;;;60;80;\n";

    #[test]
    fn test_split_and_index() {
        let book = PriceBook::from_text(LIST);
        assert_eq!(book.main_rows().len(), 1);
        assert_eq!(book.cylinder_rows().len(), 2);
        assert_eq!(
            book.main_index()
                .raw_price(&MainKey::new("2", "A", "SS", "PTFE"), Currency::Cad),
            "135,00"
        );
        assert_eq!(book.cylinder_index().raw_price("3", Currency::Usd), "60");
        assert_eq!(book.cylinder_index().note("2"), "first");
    }

    #[test]
    fn test_empty() {
        assert!(PriceBook::from_text("").is_empty());
        assert!(PriceBook::default().is_empty());
    }
}
