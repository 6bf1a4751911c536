//! Wire-value adapters for scalars VoIP.ms encodes inconsistently.
//!
//! The provider sends most values as JSON strings whatever their real type, but
//! some endpoints (and some accounts) answer with native JSON scalars instead.
//! Each adapter accepts both shapes: the string form is tried first, then the
//! native one. Failures keep the raw JSON token in [`WireError`] so an
//! unannounced format change is easy to spot.
//!
//! The adapters are public so callers can decode fields this crate passes
//! through untouched (for example client records).

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;

/// Date format used by VoIP.ms (`2024-03-01`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Datetime format used by VoIP.ms (`2024-03-01 13:45:00`).
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot decode {kind} from {raw}")]
/// A wire value had a shape its adapter does not accept.
pub struct WireError {
    /// Adapter that rejected the value (`bool`, `integer`, ...).
    pub kind: &'static str,
    /// The JSON token exactly as received.
    pub raw: String,
}

impl WireError {
    fn new(kind: &'static str, raw: &str) -> Self {
        Self {
            kind,
            raw: raw.to_owned(),
        }
    }
}

/// A scalar decodable from a single raw JSON token.
pub trait WireValue: Sized {
    /// Adapter name reported in [`WireError::kind`].
    const KIND: &'static str;

    /// Decode from a raw JSON token such as `"123"`, `123` or `"Yes"`.
    fn from_raw(raw: &str) -> Result<Self, WireError>;
}

fn string_token(raw: &str) -> Option<String> {
    if raw.starts_with('"') {
        serde_json::from_str::<String>(raw).ok()
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Boolean sent as `"Yes"`/`"No"` (case-sensitive) or as a native JSON boolean.
pub struct WireBool(pub bool);

impl WireValue for WireBool {
    const KIND: &'static str = "bool";

    fn from_raw(raw: &str) -> Result<Self, WireError> {
        let raw = raw.trim();
        if let Some(text) = string_token(raw) {
            return match text.as_str() {
                "Yes" => Ok(Self(true)),
                "No" => Ok(Self(false)),
                _ => Err(WireError::new(Self::KIND, raw)),
            };
        }
        serde_json::from_str::<bool>(raw)
            .map(Self)
            .map_err(|_| WireError::new(Self::KIND, raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
/// Signed 64-bit integer sent as a decimal string or a native JSON number.
pub struct WireInt(pub i64);

impl WireValue for WireInt {
    const KIND: &'static str = "integer";

    fn from_raw(raw: &str) -> Result<Self, WireError> {
        let raw = raw.trim();
        if let Some(text) = string_token(raw) {
            return text
                .parse::<i64>()
                .map(Self)
                .map_err(|_| WireError::new(Self::KIND, raw));
        }
        serde_json::from_str::<i64>(raw)
            .map(Self)
            .map_err(|_| WireError::new(Self::KIND, raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Calendar date in provider-local time, `YYYY-MM-DD`.
pub struct WireDate(pub NaiveDate);

impl WireValue for WireDate {
    const KIND: &'static str = "date";

    fn from_raw(raw: &str) -> Result<Self, WireError> {
        let raw = raw.trim();
        string_token(raw)
            .and_then(|text| NaiveDate::parse_from_str(&text, DATE_FORMAT).ok())
            .map(Self)
            .ok_or_else(|| WireError::new(Self::KIND, raw))
    }
}

impl fmt::Display for WireDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Wall-clock timestamp in provider-local time, `YYYY-MM-DD HH:MM:SS`.
pub struct WireDateTime(pub NaiveDateTime);

impl WireValue for WireDateTime {
    const KIND: &'static str = "datetime";

    fn from_raw(raw: &str) -> Result<Self, WireError> {
        let raw = raw.trim();
        string_token(raw)
            .and_then(|text| NaiveDateTime::parse_from_str(&text, DATETIME_FORMAT).ok())
            .map(Self)
            .ok_or_else(|| WireError::new(Self::KIND, raw))
    }
}

impl fmt::Display for WireDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATETIME_FORMAT))
    }
}

/// Money-like value sent as either JSON string or JSON number.
///
/// For numbers, the raw JSON token is preserved to avoid formatting drift
/// (`10.00` remains `"10.00"` instead of becoming `"10.0"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WireDecimal(String);

impl WireDecimal {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl WireValue for WireDecimal {
    const KIND: &'static str = "decimal";

    fn from_raw(raw: &str) -> Result<Self, WireError> {
        let raw = raw.trim();
        if let Some(text) = string_token(raw) {
            return Ok(Self(text));
        }
        match raw.as_bytes().first().copied() {
            Some(b'-' | b'0'..=b'9') => Ok(Self(raw.to_owned())),
            _ => Err(WireError::new(Self::KIND, raw)),
        }
    }
}

/// Free-form token: a JSON string's contents, or any other scalar's raw text.
///
/// Used for flags the provider spells in many ways (`"1"`, `"yes"`, `true`) and
/// whose exact spelling must survive decoding. `null` becomes an empty string;
/// objects and arrays are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct WireText(String);

impl WireText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl WireValue for WireText {
    const KIND: &'static str = "text";

    fn from_raw(raw: &str) -> Result<Self, WireError> {
        let raw = raw.trim();
        if let Some(text) = string_token(raw) {
            return Ok(Self(text));
        }
        match raw.as_bytes().first().copied() {
            Some(b'{' | b'[') | None => Err(WireError::new(Self::KIND, raw)),
            _ if raw == "null" => Ok(Self(String::new())),
            _ => Ok(Self(raw.to_owned())),
        }
    }
}

macro_rules! deserialize_via_raw {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    let raw: Box<RawValue> = Deserialize::deserialize(deserializer)?;
                    <$ty as WireValue>::from_raw(raw.get()).map_err(D::Error::custom)
                }
            }
        )*
    };
}

deserialize_via_raw!(
    WireBool,
    WireInt,
    WireDate,
    WireDateTime,
    WireDecimal,
    WireText,
);

/// `deserialize_with` helper for optional fields.
///
/// A missing key (with `#[serde(default)]`), `null`, or `""` all decode as `None`;
/// anything else must satisfy the adapter.
pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: WireValue,
{
    let raw: Option<Box<RawValue>> = Deserialize::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(raw) if matches!(raw.get().trim(), "\"\"" | "null") => Ok(None),
        Some(raw) => T::from_raw(raw.get()).map(Some).map_err(D::Error::custom),
    }
}
