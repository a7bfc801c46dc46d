//! Lenient money parsing
//!
//! Nothing in here fails: unparsable input yields `None` (or zero for
//! adjustments) so callers only ever check for emptiness.

/// Parse the longest leading decimal number in `s`
///
/// Leading whitespace is skipped and trailing garbage ignored, so `"12.5 kg"`
/// reads as `12.5` and `"kg"` as `None`. Accepts an optional sign, digits with
/// an optional fraction, an optional exponent, and `Infinity`.
pub fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut probe = end + 1;
        while probe < bytes.len() && bytes[probe].is_ascii_digit() {
            probe += 1;
        }
        frac_digits = probe - end - 1;
        if int_digits > 0 || frac_digits > 0 {
            end = probe;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut probe = end + 1;
        if probe < bytes.len() && matches!(bytes[probe], b'+' | b'-') {
            probe += 1;
        }
        let exp_start = probe;
        while probe < bytes.len() && bytes[probe].is_ascii_digit() {
            probe += 1;
        }
        if probe > exp_start {
            end = probe;
        }
    }

    // Normalize "5." and ".5" forms before handing off to the std parser
    let mut literal = String::with_capacity(end + 2);
    for (i, ch) in s[..end].char_indices() {
        if ch == '.' && i == int_start {
            literal.push('0');
        }
        literal.push(ch);
    }
    literal = literal.replace(".e", "e").replace(".E", "E");
    if literal.ends_with('.') {
        literal.pop();
    }
    literal.parse().ok()
}

/// Normalize a locale-ambiguous money string into a number
///
/// Currency symbols and other noise are stripped. When both `,` and `.` appear
/// the one occurring last is the decimal point and the other groups thousands;
/// a lone comma is the decimal point (only the first one is converted).
/// Returns `None` for empty, unparsable or non-finite input.
///
/// ```
/// use pricequote::price::parse_price_to_number;
///
/// assert_eq!(parse_price_to_number("1.234,56"), Some(1234.56));
/// assert_eq!(parse_price_to_number("$ 12.00 USD"), Some(12.0));
/// assert_eq!(parse_price_to_number(""), None);
/// ```
pub fn parse_price_to_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut s: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();

    match (s.rfind(','), s.rfind('.')) {
        // "1,234.56": commas group thousands
        (Some(comma), Some(dot)) if dot > comma => s = s.replace(',', ""),
        // "1.234,56": dots group thousands
        (Some(_), Some(_)) => s = s.replace('.', "").replacen(',', ".", 1),
        (Some(_), None) => s = s.replacen(',', ".", 1),
        _ => {}
    }

    parse_leading_float(&s).filter(|n| n.is_finite())
}

/// Convert a dollar amount to whole cents, rounding halves up
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0 + 0.5).floor() as i64
}

/// Convert whole cents back to dollars
pub fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Cent value of a free-form manual adjustment
///
/// Empty or invalid entries count as zero.
pub fn adjustment_cents(raw: &str) -> i64 {
    match parse_leading_float(raw.trim()) {
        Some(n) if n.is_finite() => to_cents(n),
        _ => 0,
    }
}

/// Sum of the cent values of all adjustments
pub fn adjustments_total_cents<S: AsRef<str>>(adjustments: &[S]) -> i64 {
    adjustments
        .iter()
        .map(|a| adjustment_cents(a.as_ref()))
        .fold(0i64, i64::saturating_add)
}
