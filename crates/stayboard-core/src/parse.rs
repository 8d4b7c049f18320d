//! Field parsers: turn messy source values into typed column values.
//!
//! Every parser takes a raw [`serde_json::Value`] and is total: unparsable or
//! absent input yields `None` (or an empty list), never an error or a panic.
//! Non-string scalars are stringified first, so the JSON number `4.5` and the
//! string `"4.5"` parse identically.

use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::LazyLock;

/// First decimal number in a string, e.g. `4.5` in `"4.5 stars"`.
static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)").expect("static regex"));

/// A whole string of the form `1.2k` / `3 k`.
static THOUSANDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+(?:\.[0-9]+)?)\s*k$").expect("static regex"));

/// Additional amenity delimiters that are folded into commas before splitting.
const AMENITY_DELIMITERS: &[char] = &['|', '•', ';'];

/// Rupee sign stripped from counts and prices.
const CURRENCY_SYMBOL: &str = "₹";

// ---------------------------------------------------------------------------
// Numeric parsers
// ---------------------------------------------------------------------------

/// Extract the first decimal number from a rating string.
///
/// `"4.5 stars"` → `Some(4.5)`, `"New"` → `None`.
pub fn parse_rating(value: &Value) -> Option<f64> {
    first_number(&as_text(value)?)
}

/// Parse a review count such as `"1.2k"`, `"₹1,234"` or `"(56 ratings)"`.
///
/// A trailing `k` multiplies by 1000. Otherwise every character that is not
/// a digit or `.` is dropped. Either way the result is truncated.
pub fn parse_count(value: &Value) -> Option<i64> {
    let text = as_text(value)?;
    let cleaned = strip_currency(&text.to_lowercase());
    let cleaned = cleaned.trim();

    if let Some(caps) = THOUSANDS.captures(cleaned) {
        let n: f64 = caps[1].parse().ok()?;
        return Some((n * 1000.0).trunc() as i64);
    }

    let n = parse_digits(cleaned)?;
    Some(n.trunc() as i64)
}

/// Parse a currency amount such as `"₹1,499"` or `"₹ 899.50"`.
pub fn parse_currency(value: &Value) -> Option<f64> {
    let text = as_text(value)?;
    parse_digits(&strip_currency(&text.to_lowercase()))
}

/// First decimal number of a room-size string, e.g. `"120 sqft"` → `120.0`.
pub fn parse_room_size(value: &Value) -> Option<f64> {
    first_number(&as_text(value)?.to_lowercase())
}

// ---------------------------------------------------------------------------
// Categorical parsers
// ---------------------------------------------------------------------------

/// Derive a city from a comma-separated address.
///
/// Segments are scanned from the end; the first one containing a letter and
/// at least three characters wins. Falls back to the last segment, so
/// `"12, 4B, 56"` yields `"56"`.
pub fn extract_city(value: &Value) -> Option<String> {
    let text = as_text(value)?;
    let parts: Vec<&str> = text
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let last = *parts.last()?;
    let city = parts
        .iter()
        .rev()
        .find(|p| p.chars().any(|c| c.is_ascii_alphabetic()) && p.chars().count() >= 3)
        .copied()
        .unwrap_or(last);
    Some(city.to_string())
}

/// Split an amenity field into trimmed, non-empty names.
///
/// Arrays are taken element-wise; strings are split on `,`, `|`, `•` and `;`.
pub fn split_amenities(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .filter_map(as_text)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        other => {
            let Some(text) = as_text(other) else {
                return Vec::new();
            };
            text.replace(AMENITY_DELIMITERS, ",")
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        }
    }
}

/// Plain optional string, `None` for `null` and blank values.
pub fn parse_text(value: &Value) -> Option<String> {
    let text = as_text(value)?;
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Stringify a scalar the way it would print; `null` is absent.
fn as_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        other => Some(Cow::Owned(other.to_string())),
    }
}

fn first_number(text: &str) -> Option<f64> {
    FIRST_NUMBER.captures(text)?[1].parse().ok()
}

fn strip_currency(text: &str) -> String {
    text.replace(CURRENCY_SYMBOL, "").replace(',', "")
}

/// Keep only digits and dots, then parse. `"1.2.3"` and `"."` are `None`.
fn parse_digits(text: &str) -> Option<f64> {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok().filter(|n| n.is_finite())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("4.5 stars"), Some(4.5))]
    #[case(json!("3"), Some(3.0))]
    #[case(json!(4.2), Some(4.2))]
    #[case(json!("Rated 3.9/5"), Some(3.9))]
    #[case(json!("NEW"), None)]
    #[case(json!(""), None)]
    #[case(Value::Null, None)]
    fn rating(#[case] input: Value, #[case] expected: Option<f64>) {
        assert_eq!(parse_rating(&input), expected);
    }

    #[rstest]
    #[case(json!("1.2k"), Some(1200))]
    #[case(json!("3 K"), Some(3000))]
    #[case(json!("1.0009k"), Some(1000))]
    #[case(json!("0.0005k"), Some(0))]
    #[case(json!("₹1,234"), Some(1234))]
    #[case(json!("(56 ratings)"), Some(56))]
    #[case(json!("12.9"), Some(12))]
    #[case(json!(87), Some(87))]
    #[case(json!("1.2.3"), None)]
    #[case(json!("no reviews"), None)]
    #[case(Value::Null, None)]
    fn count(#[case] input: Value, #[case] expected: Option<i64>) {
        assert_eq!(parse_count(&input), expected);
    }

    #[rstest]
    #[case(json!("₹1,499"), Some(1499.0))]
    #[case(json!("₹ 899.50"), Some(899.5))]
    #[case(json!(1200), Some(1200.0))]
    #[case(json!("free"), None)]
    #[case(Value::Null, None)]
    fn currency(#[case] input: Value, #[case] expected: Option<f64>) {
        assert_eq!(parse_currency(&input), expected);
    }

    #[test]
    fn room_size_takes_first_number() {
        assert_eq!(parse_room_size(&json!("120 SQFT")), Some(120.0));
        assert_eq!(parse_room_size(&json!("Room 2, 150.5 sq.ft")), Some(2.0));
        assert_eq!(parse_room_size(&json!("standard")), None);
    }

    #[rstest]
    #[case("123 Main St, Pune, MH", Some("Pune"))]
    #[case("Plot 4, Sector 12, Gurgaon", Some("Gurgaon"))]
    #[case("Near Station, Goa ,  ", Some("Goa"))]
    #[case("12, 4B, 56", Some("56"))]
    #[case("Delhi", Some("Delhi"))]
    #[case(" , , ", None)]
    fn city(#[case] address: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_city(&json!(address)).as_deref(), expected);
    }

    #[test]
    fn city_of_null_is_missing() {
        assert_eq!(extract_city(&Value::Null), None);
    }

    #[test]
    fn amenities_from_mixed_delimiters() {
        assert_eq!(split_amenities(&json!("WiFi|AC;TV")), vec!["WiFi", "AC", "TV"]);
        assert_eq!(
            split_amenities(&json!("Geyser • Power backup, , CCTV")),
            vec!["Geyser", "Power backup", "CCTV"]
        );
    }

    #[test]
    fn amenities_from_array() {
        assert_eq!(
            split_amenities(&json!([" WiFi ", "", null, 24])),
            vec!["WiFi", "24"]
        );
    }

    #[test]
    fn amenities_missing_or_empty() {
        assert!(split_amenities(&Value::Null).is_empty());
        assert!(split_amenities(&json!("")).is_empty());
        assert!(split_amenities(&json!([])).is_empty());
    }

    #[test]
    fn text_blank_is_missing() {
        assert_eq!(parse_text(&json!("  Townhouse  ")).as_deref(), Some("Townhouse"));
        assert_eq!(parse_text(&json!("   ")), None);
    }

    proptest! {
        #[test]
        fn parsers_are_total(s in ".*") {
            let v = Value::String(s);
            let _ = parse_rating(&v);
            let _ = parse_count(&v);
            let _ = parse_currency(&v);
            let _ = parse_room_size(&v);
            let _ = extract_city(&v);
            let _ = split_amenities(&v);
        }

        #[test]
        fn rating_is_never_negative(s in ".*") {
            if let Some(r) = parse_rating(&Value::String(s)) {
                prop_assert!(r >= 0.0);
            }
        }

        #[test]
        fn amenities_are_trimmed_and_non_empty(s in ".*") {
            for a in split_amenities(&Value::String(s)) {
                prop_assert!(!a.is_empty());
                prop_assert_eq!(a.trim(), a.as_str());
            }
        }
    }
}
