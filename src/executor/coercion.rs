/// Value coercion and comparison
///
/// Everything here follows a "numeric if possible" policy: source data is
/// untyped text at heart, so a numeric string and a number compare equal,
/// ordering always goes through numbers, and string predicates go through
/// lower-cased text.
///
/// Two cases read as not-a-number rather than zero: `Null` and blank text.
/// Empty CSV cells must not drag an average towards zero.

use std::cmp::Ordering;

use crate::types::Value;

/// Numeric view of a value; `NaN` when there is none.
#[must_use]
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => *n,
        Value::Boolean(true) => 1.0,
        Value::Boolean(false) => 0.0,
        Value::Text(s) => parse_number(s).unwrap_or(f64::NAN),
        Value::Null => f64::NAN,
    }
}

/// Parses text the way a lenient `Number(...)` conversion does.
///
/// Accepts surrounding whitespace, decimal and exponent forms, signed
/// `Infinity`, and unsigned `0x`/`0o`/`0b` integer literals. Blank text is
/// not a number.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    if let Some(n) = parse_radix_literal(s) {
        return Some(n);
    }

    // f64::from_str also takes "inf" and "NaN", which are not numbers here
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    s.parse::<f64>().ok()
}

fn parse_radix_literal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    u64::from_str_radix(&s[2..], radix).ok().map(|n| n as f64)
}

/// Loose equality: `"12000"` equals `12000`, `true` equals `1`.
///
/// Same-type operands compare directly. A boolean operand is first turned
/// into a number; a number against text compares numerically. `Null` only
/// equals `Null`.
#[must_use]
pub fn loose_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Text(x), Value::Text(y)) => x == y,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Boolean(_), _) | (_, Value::Boolean(_)) => to_number(a) == to_number(b),
        (Value::Number(n), Value::Text(s)) | (Value::Text(s), Value::Number(n)) => {
            parse_number(s).is_some_and(|parsed| parsed == *n)
        }
    }
}

/// Lower-cased textual form used by `contains`/`startsWith`/`endsWith`.
#[must_use]
pub fn to_lower_text(value: &Value) -> String {
    value.to_string().to_lowercase()
}

/// Row comparator for ORDER BY (ascending).
///
/// Two numbers compare numerically; two non-numbers compare by their
/// textual form with `locale_compare`. In a mixed column numbers sort
/// before everything else, which keeps the comparator a total order.
/// This departs from comparing a number against a non-number as text:
/// `50` sorts before `"5"` here, after it under a textual comparison.
#[must_use]
pub fn sort_compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match x.partial_cmp(y) {
            Some(ord) => ord,
            None => x.is_nan().cmp(&y.is_nan()),
        },
        (Value::Number(_), _) => Ordering::Less,
        (_, Value::Number(_)) => Ordering::Greater,
        _ => locale_compare(&a.to_string(), &b.to_string()),
    }
}

/// Case-insensitive collation; on a case-only tie lower case sorts first.
#[must_use]
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&Value::Number(4.5)), 4.5);
        assert_eq!(to_number(&Value::text(" 12000 ")), 12000.0);
        assert_eq!(to_number(&Value::text("1e3")), 1000.0);
        assert_eq!(to_number(&Value::text("0x10")), 16.0);
        assert_eq!(to_number(&Value::Boolean(true)), 1.0);
        assert!(to_number(&Value::text("abc")).is_nan());
        assert!(to_number(&Value::text("")).is_nan());
        assert!(to_number(&Value::Null).is_nan());
    }

    #[test]
    fn test_parse_number_rejects_rust_only_forms() {
        assert_eq!(parse_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number("1_000"), None);
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("-0x10"), None);
    }

    #[test]
    fn test_loose_equals() {
        assert!(loose_equals(&Value::text("12000"), &Value::Number(12000.0)));
        assert!(loose_equals(&Value::Number(12000.0), &Value::text("12000.0")));
        assert!(loose_equals(&Value::Boolean(true), &Value::Number(1.0)));
        assert!(loose_equals(&Value::text("1"), &Value::Boolean(true)));
        assert!(loose_equals(&Value::Null, &Value::Null));

        assert!(!loose_equals(&Value::text("abc"), &Value::text("ABC")));
        assert!(!loose_equals(&Value::Null, &Value::Number(0.0)));
        assert!(!loose_equals(&Value::Number(f64::NAN), &Value::Number(f64::NAN)));
        assert!(!loose_equals(&Value::text("true"), &Value::Boolean(true)));
    }

    #[test]
    fn test_sort_compare() {
        assert_eq!(sort_compare(&Value::Number(2.0), &Value::Number(10.0)), Ordering::Less);
        // text compares as text, not as numbers
        assert_eq!(sort_compare(&Value::text("2"), &Value::text("10")), Ordering::Greater);
        assert_eq!(sort_compare(&Value::text("apple"), &Value::text("Banana")), Ordering::Less);
        assert_eq!(sort_compare(&Value::text("a"), &Value::text("A")), Ordering::Less);
        assert_eq!(sort_compare(&Value::text("b"), &Value::text("b")), Ordering::Equal);
        assert_eq!(sort_compare(&Value::Number(50.0), &Value::text("5")), Ordering::Less);
        assert_eq!(sort_compare(&Value::Null, &Value::Number(1.0)), Ordering::Greater);
        assert_eq!(
            sort_compare(&Value::Number(f64::NAN), &Value::Number(1.0)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_to_lower_text() {
        assert_eq!(to_lower_text(&Value::text("Widget A")), "widget a");
        assert_eq!(to_lower_text(&Value::Number(10.0)), "10");
        assert_eq!(to_lower_text(&Value::Null), "null");
    }
}
