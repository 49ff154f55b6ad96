//! Raw tag values and insertion-ordered maps.
//!
//! Decoders hand us tag values of many shapes: integers, rationals, byte
//! blobs, strings and lists of those. [`TagValue`] is a closed set of those
//! shapes so that every consumer (the formatter, the GPS converter, JSON
//! output) matches on it exhaustively.
//!
//! Maps keep the order entries were inserted in. Camera and settings blocks
//! are displayed in decoder order, so a sorted map would lose information.
//!
//! ## Generic string form
//!
//! `Display` renders the "generic" form used whenever no tag-specific rule
//! applies:
//!
//! | Value | Rendering |
//! |---|---|
//! | `Int(7)` | `7` |
//! | `Float(2.0)` | `2.0` |
//! | `Text("Canon")` | `Canon` |
//! | `Rational(1, 200)` | `1/200` |
//! | `Bytes([2, 2, 0, 0])` | `b"\x02\x02\x00\x00"` |
//! | `Sequence([40, 26])` | `(40, 26)` |
//! | `Mapping({a: 1})` | `{a: 1}` |

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// A single raw tag value as produced by a container decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Int(i64),
    Float(f64),
    Text(String),
    /// Numerator / denominator, exactly as stored. Never reduced.
    Rational(i64, i64),
    Bytes(Vec<u8>),
    Sequence(Vec<TagValue>),
    Mapping(TagMap),
}

impl TagValue {
    /// The `(numerator, denominator)` pair if this is a rational.
    pub fn as_rational(&self) -> Option<(i64, i64)> {
        match self {
            TagValue::Rational(num, den) => Some((*num, *den)),
            _ => None,
        }
    }

    /// Coerce a scalar to a float.
    ///
    /// Rationals with a zero denominator and text that doesn't parse as a
    /// number are not coercible. Composites never are.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            TagValue::Int(i) => Some(*i as f64),
            TagValue::Float(f) => Some(*f),
            TagValue::Rational(_, 0) => None,
            TagValue::Rational(num, den) => Some(*num as f64 / *den as f64),
            TagValue::Text(s) => s.trim().parse::<f64>().ok(),
            TagValue::Bytes(_) | TagValue::Sequence(_) | TagValue::Mapping(_) => None,
        }
    }
}

/// Float rendering shared by tag values and map links: shortest round-trip
/// digits, with `.0` kept on integral values.
pub(crate) fn fmt_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Int(i) => write!(f, "{}", i),
            TagValue::Float(v) => f.write_str(&fmt_float(*v)),
            TagValue::Text(s) => f.write_str(s),
            TagValue::Rational(num, den) => write!(f, "{}/{}", num, den),
            TagValue::Bytes(bytes) => {
                f.write_str("b\"")?;
                for b in bytes {
                    write!(f, "{}", std::ascii::escape_default(*b))?;
                }
                f.write_str("\"")
            }
            TagValue::Sequence(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
            TagValue::Mapping(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl Serialize for TagValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TagValue::Int(i) => serializer.serialize_i64(*i),
            TagValue::Float(v) => serializer.serialize_f64(*v),
            TagValue::Text(s) => serializer.serialize_str(s),
            TagValue::Rational(num, den) => [num, den].serialize(serializer),
            TagValue::Bytes(bytes) => bytes.serialize(serializer),
            TagValue::Sequence(items) => items.serialize(serializer),
            TagValue::Mapping(map) => map.serialize(serializer),
        }
    }
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        TagValue::Text(s.to_string())
    }
}

/// String-keyed map that iterates in insertion order.
///
/// Inserting an existing key replaces its value in place, keeping the
/// original position.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

/// The raw tag dictionary of one file.
pub type TagMap = OrderedMap<TagValue>;

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries sorted by key, for display blocks that are not order-sensitive.
    pub fn sorted(&self) -> Vec<(&str, &V)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        sorted
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
