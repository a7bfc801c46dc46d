//! Cascading selector domains
//!
//! Given the rows behind a selector and the choices already made above it,
//! compute the sorted, de-duplicated values that remain valid.

use crate::price::parse_leading_float;
use crate::types::Row;
use indexmap::IndexSet;
use std::cmp::Ordering;

/// Valid values of `target` among rows matching every non-empty filter
///
/// A filter value matches when the row's field equals the trimmed value. Empty
/// results are dropped and the output is ordered by [`compare_options`].
///
/// ```
/// use pricequote::options::options_for;
/// use pricequote::types::Row;
///
/// let rows: Vec<Row> = vec![
///     [("Size", "10"), ("Series", "A")].into_iter().collect(),
///     [("Size", "2"), ("Series", "B")].into_iter().collect(),
///     [("Size", "2"), ("Series", "A")].into_iter().collect(),
/// ];
/// assert_eq!(options_for(&rows, "Size", &[]), vec!["2", "10"]);
/// assert_eq!(options_for(&rows, "Series", &[("Size", "2")]), vec!["A", "B"]);
/// ```
pub fn options_for(rows: &[Row], target: &str, filter: &[(&str, &str)]) -> Vec<String> {
    let filter: Vec<(&str, &str)> = filter
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(field, value)| (*field, value.trim()))
        .collect();

    let unique: IndexSet<&str> = rows
        .iter()
        .filter(|row| filter.iter().all(|(field, value)| row.get(field) == *value))
        .map(|row| row.get(target))
        .filter(|value| !value.is_empty())
        .collect();

    let mut values: Vec<String> = unique.into_iter().map(str::to_string).collect();
    values.sort_by(|a, b| compare_options(a, b));
    values
}

/// Numeric-aware ordering for option labels
///
/// When both labels start with a number (comma accepted as decimal point) they
/// compare numerically; otherwise they compare naturally, ignoring case, with
/// digit runs compared by value so `"2 in"` sorts before `"10 in"`.
pub fn compare_options(a: &str, b: &str) -> Ordering {
    match (option_number(a), option_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => natural_cmp(a, b),
    }
}

fn option_number(s: &str) -> Option<f64> {
    parse_leading_float(&s.replacen(',', ".", 1)).filter(|n| n.is_finite())
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Other,
    Digit,
    Letter,
}

fn char_class(c: char) -> CharClass {
    if c.is_ascii_digit() {
        CharClass::Digit
    } else if c.is_alphabetic() {
        CharClass::Letter
    } else {
        CharClass::Other
    }
}

/// Case-insensitive comparison treating digit runs as numbers
///
/// Accented letters are not folded: `"é"` and `"e"` compare as distinct
/// characters.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let (l, r) = match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => (l, r),
        };

        if l.is_ascii_digit() && r.is_ascii_digit() {
            let x = take_digits(&mut left);
            let y = take_digits(&mut right);
            let ord = x.len().cmp(&y.len()).then_with(|| x.cmp(&y));
            if ord != Ordering::Equal {
                return ord;
            }
            continue;
        }

        let ord = char_class(l).cmp(&char_class(r)).then_with(|| {
            l.to_lowercase().cmp(r.to_lowercase())
        });
        if ord != Ordering::Equal {
            return ord;
        }
        left.next();
        right.next();
    }
}

// Digit run with leading zeros removed
fn take_digits<I: Iterator<Item = char>>(chars: &mut std::iter::Peekable<I>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        if !(run.is_empty() && c == '0') {
            run.push(c);
        }
    }
    run
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Row> {
        let data = [
            ("2", "A", "SS", "PTFE"),
            ("2", "A", "CS", "PTFE"),
            ("2", "B", "SS", "Metal"),
            ("10", "A", "SS", "PTFE"),
            ("1/2", "C", "Brass", "PTFE"),
        ];
        data.iter()
            .map(|(size, series, material, seat)| {
                [
                    ("Size", *size),
                    ("Series", *series),
                    ("Material", *material),
                    ("Seat", *seat),
                ]
                .into_iter()
                .collect()
            })
            .collect()
    }

    #[test]
    fn test_unique_sorted_sizes() {
        assert_eq!(options_for(&rows(), "Size", &[]), vec!["1/2", "2", "10"]);
    }

    #[test]
    fn test_cascade_filters() {
        let rows = rows();
        assert_eq!(options_for(&rows, "Series", &[("Size", "2")]), vec!["A", "B"]);
        assert_eq!(
            options_for(&rows, "Material", &[("Size", "2"), ("Series", "A")]),
            vec!["CS", "SS"]
        );
        assert_eq!(
            options_for(
                &rows,
                "Seat",
                &[("Size", "2"), ("Series", "B"), ("Material", "SS")]
            ),
            vec!["Metal"]
        );
    }

    #[test]
    fn test_empty_filter_value_ignored_and_trimmed() {
        let rows = rows();
        assert_eq!(
            options_for(&rows, "Series", &[("Size", "")]),
            vec!["A", "B", "C"]
        );
        assert_eq!(options_for(&rows, "Series", &[("Size", " 10 ")]), vec!["A"]);
    }

    #[test]
    fn test_missing_field_yields_nothing() {
        assert!(options_for(&rows(), "Color", &[]).is_empty());
        assert!(options_for(&rows(), "Series", &[("Size", "99")]).is_empty());
    }

    #[test]
    fn test_compare_numeric() {
        assert_eq!(compare_options("2", "10"), Ordering::Less);
        assert_eq!(compare_options("2,5", "2.25"), Ordering::Greater);
        assert_eq!(compare_options("3 in", "12 in"), Ordering::Less);
    }

    #[test]
    fn test_compare_natural() {
        assert_eq!(compare_options("DN 50", "DN 100"), Ordering::Less);
        assert_eq!(compare_options("brass", "Carbon"), Ordering::Less);
        assert_eq!(compare_options("PTFE", "ptfe"), Ordering::Equal);
        assert_eq!(compare_options("Metal", "Metal seat"), Ordering::Less);
        assert_eq!(compare_options("10", "A"), Ordering::Less);
    }

    #[test]
    fn test_accents_are_distinct() {
        assert_ne!(compare_options("é", "e"), Ordering::Equal);
        assert_ne!(compare_options("Laiton", "Laitón"), Ordering::Equal);
    }
}
