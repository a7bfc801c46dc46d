//! # pricequote
//!
//! Quoting core for a price-list driven order form.
//!
//! A semicolon-separated price list is tokenized into header-keyed rows, split
//! into main products and cylinder add-ons, and indexed. A [`QuoteSession`]
//! drives the cascading selectors (size → series → material → seat, plus an
//! independent cylinder size), looks up list and cylinder prices, and turns
//! them into a quote: a discount tier is applied in integer cents, the result
//! is rounded **up** to a whole dollar, and manual adjustments are added on top.
//!
//! ## Quick Start
//!
//! ```
//! use pricequote::{Currency, QuoteSession};
//!
//! let csv = "Size;Series;Material;Seat;Price;PriceCAD\n\
//!            2;A;SS;PTFE;100,00;135,00\n\
//!            2;Cyl;;;40;55\n";
//!
//! let mut session = QuoteSession::new(Currency::Usd);
//! session.load_text(csv);
//!
//! session.select_size("2");
//! session.select_series("A");
//! session.select_material("SS");
//! session.select_seat("PTFE");
//! session.select_cylinder("2");
//! session.set_tier("TierB");
//!
//! // (100 + 40) * 0.78 = 109.20, rounded up to 110
//! let quote = session.submit().unwrap();
//! assert_eq!(quote.total_cents, 11_000);
//! assert_eq!(session.total_display(), "USD$110.00");
//! ```
//!
//! ## Leniency
//!
//! Parsing never fails. Malformed CSV quoting consumes the rest of the input,
//! unparsable prices become empty inputs, invalid adjustments count as zero.
//! Only missing required inputs surface as [`QuoteError`].
//!
//! ## Features
//!
//! - `compressed` (default): read `.csv.zst` / `.csv.gz` / `.csv.zip` price lists
//! - `serde`: serialize public value types
//! - `cli`: the `pricequote` command line tool

pub mod book;
pub mod csv;
pub mod csv_reader;
pub mod error;
pub mod index;
pub mod money;
pub mod options;
pub mod price;
pub mod quote;
pub mod session;
pub mod types;

pub use book::PriceBook;
pub use csv_reader::PriceListReader;
pub use error::{QuoteError, Result};
pub use index::{is_cylinder_series, CylinderIndex, MainIndex, MainKey};
pub use money::{format_cents, format_money};
pub use options::options_for;
pub use price::parse_price_to_number;
pub use quote::{calculate, DiscountTier, Quote};
pub use session::{Domains, QuoteSession, Selection, Selector};
pub use types::{Currency, NoteDisplay, PriceEntry, Row};
