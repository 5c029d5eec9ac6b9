//! Forgiving field deserializers for client-submitted forms.
//!
//! Browser forms send `""` for untouched inputs and strings for numeric
//! inputs. These helpers accept both shapes; serialization is unaffected.
//! Use with `#[serde(deserialize_with = "lenient::...")]` next to a
//! struct-level `#[serde(default)]`.

use chrono::NaiveDate;
use common::RecordId;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Integer(i64),
    Float(f64),
    Text(String),
}

fn parse_text<T: std::str::FromStr, E: serde::de::Error>(text: &str, what: &str) -> Result<T, E> {
    text.trim()
        .parse()
        .map_err(|_| E::custom(format!("invalid {what}: {text:?}")))
}

/// Record ID given as a number or numeric string. Blank or non-numeric
/// strings and null mean "no ID".
pub fn record_id<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Integer(n)) => Ok(Some(RecordId::new(n))),
        Some(Loose::Text(s)) => Ok(s.trim().parse().ok()),
        Some(Loose::Float(n)) => Err(D::Error::custom(format!("invalid id: {n}"))),
        None => Ok(None),
    }
}

/// ISO date (`YYYY-MM-DD`); blank string or null means absent.
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_text(&s, "date").map(Some),
        None => Ok(None),
    }
}

/// Decimal given as a number or numeric string; blank or null is zero.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_number(deserializer)?.unwrap_or_default())
}

/// Decimal given as a number or numeric string; blank or null is absent.
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Integer(n)) => Ok(Some(n as f64)),
        Some(Loose::Float(n)) => Ok(Some(n)),
        Some(Loose::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Loose::Text(s)) => parse_text(&s, "number").map(Some),
        None => Ok(None),
    }
}

/// Whole number given as a number or numeric string; blank or null is zero.
pub fn integer<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Integer(n)) => {
            i32::try_from(n).map_err(|_| D::Error::custom(format!("integer out of range: {n}")))
        }
        Some(Loose::Float(n)) if n.fract() == 0.0 && n.abs() <= f64::from(i32::MAX) => {
            Ok(n as i32)
        }
        Some(Loose::Float(n)) => Err(D::Error::custom(format!("invalid integer: {n}"))),
        Some(Loose::Text(s)) if s.trim().is_empty() => Ok(0),
        Some(Loose::Text(s)) => parse_text(&s, "integer"),
        None => Ok(0),
    }
}

/// Free text; numbers are kept as their decimal form and null is empty.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Text(s)) => s,
        Some(Loose::Integer(n)) => n.to_string(),
        Some(Loose::Float(n)) => n.to_string(),
        None => String::new(),
    })
}
