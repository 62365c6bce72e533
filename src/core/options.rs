//! Ordered option storage and flag-name normalization.
//!
//! Options keep the order in which they were first set. Writing an existing key
//! again replaces its value in place, so the flag keeps its original position.
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Value attached to a single option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Bare `--flag` when true, omitted when false.
    Flag(bool),
    /// `--flag "value"`; an empty string emits nothing.
    Value(String),
    /// One `--flag "v"` occurrence per element, in order.
    Sequence(Vec<String>),
    /// A single `--flag` followed by every element (`--extent "0" "0" "10" "10"`).
    List(Vec<String>),
}

impl OptionValue {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OptionValue::List(values.into_iter().map(Into::into).collect())
    }

    pub fn sequence<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OptionValue::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Flag(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Value(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Value(value)
    }
}

impl From<&String> for OptionValue {
    fn from(value: &String) -> Self {
        OptionValue::Value(value.clone())
    }
}

macro_rules! numeric_option_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for OptionValue {
                fn from(value: $t) -> Self {
                    OptionValue::Value(value.to_string())
                }
            }
        )*
    };
}

numeric_option_value!(i32, i64, u32, u64, usize, f32, f64);

impl From<Vec<String>> for OptionValue {
    fn from(values: Vec<String>) -> Self {
        OptionValue::Sequence(values)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(values: Vec<&str>) -> Self {
        OptionValue::sequence(values)
    }
}

impl From<&[&str]> for OptionValue {
    fn from(values: &[&str]) -> Self {
        OptionValue::sequence(values.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for OptionValue {
    fn from(values: [&str; N]) -> Self {
        OptionValue::sequence(values)
    }
}

// JSON shapes: true/false, "text", 12.5, ["a", "b"], {"list": ["0", "0"]}
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawScalar {
    fn into_string(self) -> String {
        match self {
            RawScalar::Int(v) => v.to_string(),
            RawScalar::Float(v) => v.to_string(),
            RawScalar::Text(v) => v,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Flag(bool),
    Scalar(RawScalar),
    Items(Vec<RawScalar>),
    List { list: Vec<RawScalar> },
}

#[derive(Serialize)]
#[serde(untagged)]
enum RawValueRef<'a> {
    Flag(bool),
    Text(&'a str),
    Items(&'a [String]),
    List { list: &'a [String] },
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let raw = match self {
            OptionValue::Flag(v) => RawValueRef::Flag(*v),
            OptionValue::Value(v) => RawValueRef::Text(v),
            OptionValue::Sequence(v) => RawValueRef::Items(v),
            OptionValue::List(v) => RawValueRef::List { list: v },
        };
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OptionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match RawValue::deserialize(deserializer)? {
            RawValue::Flag(v) => OptionValue::Flag(v),
            RawValue::Scalar(v) => OptionValue::Value(v.into_string()),
            RawValue::Items(v) => OptionValue::sequence(v.into_iter().map(RawScalar::into_string)),
            RawValue::List { list } => {
                OptionValue::list(list.into_iter().map(RawScalar::into_string))
            }
        })
    }
}

/// Map an attribute-style option name to the external flag spelling.
///
/// Leading `_`/`-` are dropped and every remaining `_` becomes `-`; case is kept,
/// so `include_3D_symbol` becomes `include-3D-symbol`.
pub fn normalize_flag(name: &str) -> String {
    name.trim_start_matches(['_', '-']).replace('_', "-")
}

/// Reject flag names that would produce a malformed command line.
pub fn validate_flag(flag: &str) -> Result<()> {
    let malformed = flag.is_empty()
        || flag
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '=');
    if malformed {
        return Err(Error::InvalidOption {
            name: flag.to_string(),
        });
    }
    Ok(())
}

/// Options keyed by normalized flag name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSet {
    entries: IndexMap<String, OptionValue>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<OptionValue>) {
        self.entries.insert(normalize_flag(name), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<OptionValue> {
        self.entries.shift_remove(&normalize_flag(name))
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entries.get(&normalize_flag(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
