//! Quote arithmetic
//!
//! All math runs on integer cents. The discounted subtotal is rounded up to a
//! whole dollar; manual adjustments are added afterwards and are the only part
//! of a total that may carry cents.

use crate::error::{QuoteError, Result};
use crate::price::{adjustments_total_cents, from_cents, parse_leading_float, to_cents};
use std::fmt;
use std::str::FromStr;

/// Basis points meaning "no discount"
pub const FULL_RATE_BPS: u32 = 10_000;

// 10,000 bp scale times 100 cents per dollar
const BPS_CENTS_SCALE: i128 = 1_000_000;

/// Discount tier, expressed as the net multiplier kept after the discount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiscountTier {
    TierA,
    TierB,
    TierC,
    TierD,
    TierE,
    None,
}

impl DiscountTier {
    /// Every tier, in menu order
    pub const ALL: [DiscountTier; 6] = [
        DiscountTier::TierA,
        DiscountTier::TierB,
        DiscountTier::TierC,
        DiscountTier::TierD,
        DiscountTier::TierE,
        DiscountTier::None,
    ];

    /// Identifier used by the form and the CLI
    pub fn key(&self) -> &'static str {
        match self {
            DiscountTier::TierA => "TierA",
            DiscountTier::TierB => "TierB",
            DiscountTier::TierC => "TierC",
            DiscountTier::TierD => "TierD",
            DiscountTier::TierE => "TierE",
            DiscountTier::None => "None",
        }
    }

    /// Net multiplier in basis points (10000 = full price)
    pub fn basis_points(&self) -> u32 {
        match self {
            DiscountTier::TierA => 7_100,
            DiscountTier::TierB => 7_800,
            DiscountTier::TierC => 8_500,
            DiscountTier::TierD => 9_200,
            DiscountTier::TierE => 6_500,
            DiscountTier::None => FULL_RATE_BPS,
        }
    }

    /// Percentage taken off the list price
    pub fn discount_percent(&self) -> u32 {
        (FULL_RATE_BPS - self.basis_points()) / 100
    }

    /// Exact, case-sensitive lookup of a tier key
    pub fn from_key(key: &str) -> Option<Self> {
        DiscountTier::ALL.into_iter().find(|tier| tier.key() == key)
    }
}

impl fmt::Display for DiscountTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DiscountTier {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        DiscountTier::from_key(s).ok_or(QuoteError::MissingTier)
    }
}

/// Successful quote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quote {
    /// List plus cylinder, before discount
    pub subtotal_cents: i64,
    /// Net multiplier applied
    pub basis_points: u32,
    /// Discounted subtotal, rounded up to whole dollars
    pub discounted_dollars: i64,
    /// Sum of manual adjustments
    pub adjustments_cents: i64,
    /// Final amount
    pub total_cents: i64,
}

impl Quote {
    /// Pre-discount subtotal in dollars
    pub fn subtotal(&self) -> f64 {
        from_cents(self.subtotal_cents)
    }

    /// Net multiplier as a fraction (0.71 for TierA)
    pub fn rate(&self) -> f64 {
        self.basis_points as f64 / FULL_RATE_BPS as f64
    }

    /// Final total in dollars
    pub fn total(&self) -> f64 {
        from_cents(self.total_cents)
    }
}

/// Price a quote from the raw form inputs
///
/// `list_price` must start with a number; `cylinder_price` is optional and
/// anything unparsable counts as zero. `tier_key` must name a
/// [`DiscountTier`]. Adjustments are parsed one by one, invalid entries
/// contributing nothing.
///
/// ```
/// use pricequote::quote::calculate;
///
/// let quote = calculate("10.00", "", "TierB", &["5.25", "-1.10"]).unwrap();
/// assert_eq!(quote.discounted_dollars, 8);
/// assert_eq!(quote.total_cents, 1215);
/// ```
pub fn calculate<S: AsRef<str>>(
    list_price: &str,
    cylinder_price: &str,
    tier_key: &str,
    adjustments: &[S],
) -> Result<Quote> {
    let list = parse_leading_float(list_price)
        .filter(|n| n.is_finite())
        .ok_or(QuoteError::InvalidListPrice)?;

    let cylinder = parse_leading_float(cylinder_price)
        .filter(|n| n.is_finite())
        .unwrap_or(0.0);

    let tier = DiscountTier::from_key(tier_key).ok_or(QuoteError::MissingTier)?;

    Ok(price_quote(
        to_cents(list).saturating_add(to_cents(cylinder)),
        tier.basis_points(),
        adjustments_total_cents(adjustments),
    ))
}

/// Apply a net multiplier to a subtotal and add adjustments
///
/// The discounted amount is ceiling-divided to whole dollars, so any fraction
/// of a dollar rounds up, including for negative subtotals.
pub fn price_quote(subtotal_cents: i64, basis_points: u32, adjustments_cents: i64) -> Quote {
    let scaled = subtotal_cents as i128 * basis_points as i128;
    let dollars = (scaled + BPS_CENTS_SCALE - 1).div_euclid(BPS_CENTS_SCALE);
    let discounted_dollars = dollars.clamp(i64::MIN as i128 / 100, i64::MAX as i128 / 100) as i64;
    let base_cents = discounted_dollars * 100;

    Quote {
        subtotal_cents,
        basis_points,
        discounted_dollars,
        adjustments_cents,
        total_cents: base_cents.saturating_add(adjustments_cents),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_ADJ: [&str; 0] = [];

    #[test]
    fn test_tier_table() {
        let bps: Vec<(&str, u32)> = DiscountTier::ALL
            .iter()
            .map(|t| (t.key(), t.basis_points()))
            .collect();
        assert_eq!(
            bps,
            vec![
                ("TierA", 7100),
                ("TierB", 7800),
                ("TierC", 8500),
                ("TierD", 9200),
                ("TierE", 6500),
                ("None", 10000),
            ]
        );
        assert_eq!(DiscountTier::TierA.discount_percent(), 29);
        assert_eq!(DiscountTier::from_key("tiera"), None);
    }

    #[test]
    fn test_no_discount() {
        let quote = calculate("10.00", "", "None", &NO_ADJ).unwrap();
        assert_eq!(quote.total_cents, 1000);
        assert_eq!(quote.rate(), 1.0);
    }

    #[test]
    fn test_tier_a_rounding() {
        // 1000 * 7100 = 7,100,000 -> 7.1 dollars -> 8
        let quote = calculate("10.00", "", "TierA", &NO_ADJ).unwrap();
        assert_eq!(quote.discounted_dollars, 8);

        // exact division is not bumped
        let quote = calculate("100", "", "TierA", &NO_ADJ).unwrap();
        assert_eq!(quote.discounted_dollars, 71);
        assert_eq!(quote.total(), 71.0);
    }

    #[test]
    fn test_remainder_rounds_up() {
        let quote = calculate("10.00", "", "TierB", &NO_ADJ).unwrap();
        assert_eq!(quote.subtotal_cents, 1000);
        assert_eq!(quote.discounted_dollars, 8);
        assert_eq!(quote.total_cents, 800);
    }

    #[test]
    fn test_adjustments_after_rounding() {
        let quote = calculate("10.00", "", "TierB", &["5.25", "-1.10"]).unwrap();
        assert_eq!(quote.adjustments_cents, 415);
        assert_eq!(quote.total_cents, 1215);
        assert_eq!(quote.total(), 12.15);
    }

    #[test]
    fn test_cylinder_added_before_discount() {
        let quote = calculate("100", "50.50", "TierC", &NO_ADJ).unwrap();
        assert_eq!(quote.subtotal_cents, 15050);
        // 15050 * 8500 = 127,925,000 -> 127.925 -> 128
        assert_eq!(quote.discounted_dollars, 128);
        assert_eq!(quote.subtotal(), 150.5);
    }

    #[test]
    fn test_invalid_cylinder_is_zero() {
        let quote = calculate("20", "n/a", "None", &NO_ADJ).unwrap();
        assert_eq!(quote.subtotal_cents, 2000);
    }

    #[test]
    fn test_invalid_list_price() {
        assert_eq!(
            calculate("", "5", "None", &NO_ADJ),
            Err(QuoteError::InvalidListPrice)
        );
        assert_eq!(
            calculate("abc", "5", "None", &NO_ADJ),
            Err(QuoteError::InvalidListPrice)
        );
    }

    #[test]
    fn test_list_price_checked_before_tier() {
        assert_eq!(
            calculate("x", "", "", &NO_ADJ),
            Err(QuoteError::InvalidListPrice)
        );
    }

    #[test]
    fn test_unknown_tier() {
        assert_eq!(calculate("10", "", "", &NO_ADJ), Err(QuoteError::MissingTier));
        assert_eq!(
            calculate("10", "", "Gold", &NO_ADJ),
            Err(QuoteError::MissingTier)
        );
    }

    #[test]
    fn test_negative_subtotal_rounds_up() {
        // -1000 * 7800 = -7,800,000 -> -7.8 -> ceil -7
        let quote = price_quote(-1000, 7800, 0);
        assert_eq!(quote.discounted_dollars, -7);
    }

    #[test]
    fn test_one_cent_rounds_up() {
        let quote = price_quote(1, FULL_RATE_BPS, 0);
        assert_eq!(quote.discounted_dollars, 1);
        assert_eq!(price_quote(0, 7100, 0).discounted_dollars, 0);
    }
}
