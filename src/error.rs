//! Error types for price list loading and quoting

use thiserror::Error;

/// Errors surfaced by the quoting core
///
/// Lenient parsing (prices, adjustments, malformed CSV) never produces an
/// error; it degrades to an empty or zero value instead. Only the checks a
/// user must act on, and I/O failures, are reported here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// List price is missing or not a number
    #[error("Enter a valid list price.")]
    InvalidListPrice,

    /// Tier key is not in the discount table
    #[error("Choose a discount tier.")]
    MissingTier,

    /// A required form input is empty
    #[error("Please fill in the required fields.")]
    IncompleteSelection,

    /// Price list could not be opened or decoded
    #[error("Read error: {0}")]
    ReadError(String),
}

impl QuoteError {
    /// True for errors the user fixes by correcting input
    pub fn is_validation(&self) -> bool {
        !matches!(self, QuoteError::ReadError(_))
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, QuoteError>;
