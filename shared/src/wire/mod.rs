//! Wire mapping at the API boundary
//!
//! The backend has been observed returning the same records under different
//! field names (Portuguese camelCase, English camelCase and snake_case) and
//! with loosely typed values. Every record goes through a `Raw*` shape that
//! accepts all known spellings and is then converted with `TryFrom` into the
//! canonical model, coercing harmless inconsistencies and rejecting the rest.
//!
//! The `Wire*` and `*Body` types are the outgoing shapes, written in the
//! backend's own spelling.

mod product;
mod tab;
mod waiter;

pub use product::{ProductBody, RawProduct, WireProduct};
pub use tab::{CloseTabBody, OpenTabBody, RawTab, RawTabItem, TabItemBody, WireTab, WireTabItem};
pub use waiter::{RawWaiter, StatusBody, WaiterCreateBody, WaiterUpdateBody, WireWaiter};

use crate::error::{AppError, ErrorCode};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Display format used by the backend for dates
pub const DATE_FORMAT: &str = "%d/%m/%Y";
/// Display format used by the backend for date + time
pub const DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";
/// Marker the backend uses for "never logged in"
pub const NEVER: &str = "Nunca";

/// Mapping failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Inconsistent record: {0}")]
    Inconsistent(String),

    #[error("Malformed payload: {0}")]
    Malformed(String),
}

impl WireError {
    pub(crate) fn invalid(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidValue {
            field,
            value: value.to_string(),
        }
    }
}

impl From<WireError> for AppError {
    fn from(err: WireError) -> Self {
        AppError::with_message(ErrorCode::InvalidFormat, err.to_string())
    }
}

/// Identifier sent either as a JSON number or a string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    pub fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }

    pub fn as_i64(&self, field: &'static str) -> Result<i64, WireError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s.trim().parse().map_err(|_| WireError::invalid(field, s)),
        }
    }
}

/// Unsigned number sent either as a JSON number or numeric text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Number(u32),
    Text(String),
}

impl RawCount {
    pub fn value(&self, field: &'static str) -> Result<u32, WireError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) if s.trim().is_empty() => Ok(0),
            Self::Text(s) => s.trim().parse().map_err(|_| WireError::invalid(field, s)),
        }
    }
}

/// Decode one record from a JSON value
///
/// Responses wrapped in a `{"data": ...}` envelope are unwrapped first.
pub fn decode<R, T>(value: Value) -> Result<T, WireError>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = WireError>,
{
    let raw: R = serde_json::from_value(unwrap_envelope(value))
        .map_err(|e| WireError::Malformed(e.to_string()))?;
    T::try_from(raw)
}

/// Decode a list of records from a JSON value
pub fn decode_list<R, T>(value: Value) -> Result<Vec<T>, WireError>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = WireError>,
{
    match unwrap_envelope(value) {
        Value::Array(items) => items.into_iter().map(decode::<R, T>).collect(),
        other => Err(WireError::Malformed(format!(
            "expected a list, got {}",
            json_kind(&other)
        ))),
    }
}

/// Strip a `{"data": ...}` envelope, if any
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") && !map.contains_key("id") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Parse a timestamp in any of the backend's formats
///
/// Zone-less timestamps are taken as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", DATE_TIME_FORMAT]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Parse a calendar date (`dd/mm/yyyy`, ISO date, or the date part of a timestamp)
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
        .or_else(|| parse_timestamp(s).map(|dt| dt.date_naive()))
}

/// Parse a last-login value; "Nunca"/"never"/empty mean no login yet
pub fn parse_last_login(s: &str) -> Result<Option<NaiveDateTime>, WireError> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case(NEVER) || s.eq_ignore_ascii_case("never") {
        return Ok(None);
    }
    parse_timestamp(s)
        .map(|dt| Some(dt.naive_utc()))
        .ok_or_else(|| WireError::invalid("last_login", s))
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-08-30T14:30:00Z").is_some());
        assert!(parse_timestamp("2024-08-30T14:30:00.1234567").is_some());
        assert!(parse_timestamp("30/08/2024 14:30").is_some());
        assert!(parse_timestamp("ontem").is_none());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15);
        assert_eq!(parse_date("15/01/2024"), expected);
        assert_eq!(parse_date("2024-01-15"), expected);
        assert_eq!(parse_date("2024-01-15T10:00:00Z"), expected);
    }

    #[test]
    fn test_parse_last_login_never() {
        assert_eq!(parse_last_login("Nunca"), Ok(None));
        assert_eq!(parse_last_login(""), Ok(None));
        assert!(parse_last_login("30/08/2024 14:30").unwrap().is_some());
        assert!(parse_last_login("soon").is_err());
    }

    #[test]
    fn test_raw_id_and_count() {
        let id: RawId = serde_json::from_value(json!(17)).unwrap();
        assert_eq!(id.into_string(), "17");
        let id: RawId = serde_json::from_value(json!("42")).unwrap();
        assert_eq!(id.as_i64("id"), Ok(42));

        let n: RawCount = serde_json::from_value(json!("5")).unwrap();
        assert_eq!(n.value("mesa"), Ok(5));
        let n: RawCount = serde_json::from_value(json!("cinco")).unwrap();
        assert!(n.value("mesa").is_err());
    }

    #[test]
    fn test_wire_error_maps_to_invalid_format() {
        let err: AppError = WireError::MissingField("number").into();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert_eq!(err.message, "Missing field: number");
    }
}
