use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Returns the first non-null value stored under any of `keys`.
pub(crate) fn field<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
}

/// Reads a JSON number or numeric string as a decimal.
///
/// Missing, unparsable, or non-finite values yield `None`.
pub(crate) fn decimal(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::Number(n) => parse_decimal(&n.to_string()).or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .trim_end_matches('%')
                .chars()
                .filter(|c| !matches!(c, ',' | '_' | ' '))
                .collect();
            parse_decimal(&cleaned)
        }
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}

/// A non-negative amount; anything missing, invalid, or negative becomes zero.
pub(crate) fn amount(value: Option<&Value>) -> Decimal {
    decimal(value)
        .filter(|d| d.is_sign_positive())
        .unwrap_or(Decimal::ZERO)
}

/// A percentage clamped to `[0, 100]`.
pub(crate) fn percent(value: Option<&Value>) -> Decimal {
    amount(value).min(core_types::HUNDRED)
}

/// A whole number of months, truncated toward zero.
pub(crate) fn months(value: Option<&Value>) -> u32 {
    amount(value).trunc().to_u32().unwrap_or(u32::MAX)
}

/// A trimmed, non-empty string.
pub(crate) fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
