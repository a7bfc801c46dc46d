//! Money display formatting

use crate::types::Currency;

/// Format an amount as `<symbol><sign><grouped digits>.<cents>`
///
/// Non-finite amounts display as zero. The sign follows the currency symbol.
///
/// ```
/// use pricequote::money::format_money;
/// use pricequote::types::Currency;
///
/// assert_eq!(format_money(1234.5, Currency::Usd), "USD$1,234.50");
/// assert_eq!(format_money(-7.0, Currency::Usd), "USD$-7.00");
/// assert_eq!(format_money(f64::NAN, Currency::Cad), "CAD$0.00");
/// ```
pub fn format_money(amount: f64, currency: Currency) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    render(currency, amount < 0.0, round_cents(amount))
}

/// Render an amount with exactly two decimals and no grouping
///
/// Rounds the exact binary value half up, so `0.125` gives `"0.13"` while
/// `1.115` (stored just below the tie) gives `"1.11"`. Non-finite amounts
/// give an empty string.
pub fn to_fixed2(amount: f64) -> String {
    if !amount.is_finite() {
        return String::new();
    }
    let cents = round_cents(amount);
    let mut buf = itoa::Buffer::new();
    let mut out = String::with_capacity(24);
    if amount < 0.0 {
        out.push('-');
    }
    out.push_str(buf.format(cents / 100));
    out.push('.');
    let frac = cents % 100;
    if frac < 10 {
        out.push('0');
    }
    out.push_str(buf.format(frac));
    out
}

/// Magnitude of a finite amount in cents, ties rounded away from zero
///
/// Works on the mantissa and exponent directly so no multiply error creeps in.
/// Saturates at `u64::MAX`.
pub fn round_cents(amount: f64) -> u64 {
    let bits = amount.abs().to_bits();
    let exp_bits = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exp) = if exp_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exp_bits - 1075)
    };

    // amount * 100 = mantissa * 100 * 2^exp, with mantissa * 100 < 2^60
    let scaled = u128::from(mantissa) * 100;
    let cents = if exp >= 0 {
        if exp >= 64 {
            u128::MAX
        } else {
            scaled << exp
        }
    } else {
        let shift = -exp;
        if shift > 64 {
            0
        } else {
            (scaled + (1u128 << (shift - 1))) >> shift
        }
    };
    u64::try_from(cents).unwrap_or(u64::MAX)
}

/// Format a whole number of cents
pub fn format_cents(cents: i64, currency: Currency) -> String {
    render(currency, cents < 0, cents.unsigned_abs())
}

fn render(currency: Currency, negative: bool, cents: u64) -> String {
    let mut buf = itoa::Buffer::new();
    let digits = buf.format(cents / 100);

    let symbol = currency.symbol();
    let mut out = String::with_capacity(symbol.len() + digits.len() * 4 / 3 + 5);
    out.push_str(symbol);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(digits));
    out.push('.');
    let frac = cents % 100;
    if frac < 10 {
        out.push('0');
    }
    out.push_str(buf.format(frac));
    out
}

/// Insert `,` between every group of three digits, counting from the right
pub fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.5, Currency::Usd), "USD$1,234.50");
        assert_eq!(format_money(0.0, Currency::Usd), "USD$0.00");
        assert_eq!(format_money(12.15, Currency::Cad), "CAD$12.15");
        assert_eq!(format_money(1_000_000.0, Currency::Usd), "USD$1,000,000.00");
    }

    #[test]
    fn test_sign_after_symbol() {
        assert_eq!(format_money(-7.0, Currency::Usd), "USD$-7.00");
        assert_eq!(format_money(-1234.56, Currency::Usd), "USD$-1,234.56");
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(format_money(f64::NAN, Currency::Usd), "USD$0.00");
        assert_eq!(format_money(f64::INFINITY, Currency::Usd), "USD$0.00");
    }

    #[test]
    fn test_exact_ties_round_up() {
        assert_eq!(to_fixed2(0.125), "0.13");
        assert_eq!(to_fixed2(0.375), "0.38");
        assert_eq!(to_fixed2(2.5), "2.50");
        assert_eq!(to_fixed2(-0.125), "-0.13");
        assert_eq!(format_money(0.125, Currency::Usd), "USD$0.13");
    }

    #[test]
    fn test_stored_value_below_tie_rounds_down() {
        assert_eq!(format_money(1.115, Currency::Usd), "USD$1.11");
        assert_eq!(format_money(2.675, Currency::Usd), "USD$2.67");
        assert_eq!(format_money(10.235, Currency::Usd), "USD$10.23");
        assert_eq!(to_fixed2(1.115), "1.11");
    }

    #[test]
    fn test_to_fixed2() {
        assert_eq!(to_fixed2(1234.56), "1234.56");
        assert_eq!(to_fixed2(512.0), "512.00");
        assert_eq!(to_fixed2(0.05), "0.05");
        assert_eq!(to_fixed2(-1.1), "-1.10");
        assert_eq!(to_fixed2(f64::NAN), "");
    }

    #[test]
    fn test_round_cents_extremes() {
        assert_eq!(round_cents(0.0), 0);
        assert_eq!(round_cents(f64::MIN_POSITIVE), 0);
        assert_eq!(round_cents(0.004), 0);
        assert_eq!(round_cents(0.005), 1);
        assert_eq!(round_cents(1e300), u64::MAX);
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(1215, Currency::Usd), "USD$12.15");
        assert_eq!(format_cents(-110, Currency::Cad), "CAD$-1.10");
        assert_eq!(format_cents(5, Currency::Usd), "USD$0.05");
    }
}
