//! CSV utilities for tokenizing price lists

mod parser;

pub use parser::CsvParser;
