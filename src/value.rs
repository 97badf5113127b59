// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Subject representation.
//!
//! A __subject__ is the arbitrarily nested, heterogeneously typed structure
//! that the accessor reads from and writes into. Rather than branching on
//! runtime reflection, subjects are modeled as the closed tagged union
//! [`Value`]: scalars, an ordered integer-indexed list, a string-keyed map,
//! and a named-property struct object (see [`record`]).
//!
//! # Emptiness
//!
//! Several accessor behaviors key off whether a value is "empty": `get`
//! short-circuits on empty non-struct subjects, and the default `fill`
//! test only replaces empty values. Emptiness here follows loose falsiness rules
//! rather than container emptiness alone: `Null`, `false`, `0`, `0.0`,
//! `""`, `"0"`, and contentless containers are all empty. See
//! [`Value::is_empty`].

pub mod convert;
pub mod record;

use crate::value::record::Structured;

use std::collections::BTreeMap;

/// A node in a nested heterogeneous subject tree.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Explicit null marker.
    #[default]
    Null,

    /// Boolean scalar.
    Bool(bool),

    /// Signed integer scalar.
    Int(i64),

    /// Floating point scalar.
    Float(f64),

    /// UTF-8 string scalar.
    String(String),

    /// Ordered, integer-indexed container.
    List(Vec<Value>),

    /// String-keyed container. Insertion order is irrelevant to lookup.
    Map(BTreeMap<String, Value>),

    /// Named-property struct object.
    Struct(Box<dyn Structured>),
}

/// Discriminant of a [`Value`] without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    String,
    List,
    Map,
    Struct,
}

impl Value {
    /// Discriminant of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Null => Kind::Null,
            Self::Bool(_) => Kind::Bool,
            Self::Int(_) => Kind::Int,
            Self::Float(_) => Kind::Float,
            Self::String(_) => Kind::String,
            Self::List(_) => Kind::List,
            Self::Map(_) => Kind::Map,
            Self::Struct(_) => Kind::Struct,
        }
    }

    /// Zero value of a kind.
    ///
    /// Used by the `strict` fill test, which compares the current value
    /// against the default derived from the replacement's kind.
    pub fn default_of(kind: Kind) -> Self {
        match kind {
            Kind::Null => Self::Null,
            Kind::Bool => Self::Bool(false),
            Kind::Int => Self::Int(0),
            Kind::Float => Self::Float(0.0),
            Kind::String => Self::String(String::new()),
            Kind::List => Self::List(Vec::new()),
            Kind::Map => Self::Map(BTreeMap::new()),
            // Structs have no kind-level zero; an absent object is null.
            Kind::Struct => Self::Null,
        }
    }

    /// Loose falsiness check, see module docs.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(value) => !value,
            Self::Int(value) => *value == 0,
            Self::Float(value) => *value == 0.0,
            Self::String(value) => value.is_empty() || value == "0",
            Self::List(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
            Self::Struct(object) => object.is_empty(),
        }
    }

    /// Whether this value is the explicit null marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Lossy integer coercion.
    ///
    /// Strings parse an optional sign and leading digits, ignoring any
    /// junk suffix; floats truncate; containers collapse to 1 when they
    /// hold anything and 0 otherwise.
    pub fn to_int_lossy(&self) -> i64 {
        match self {
            Self::Null => 0,
            Self::Bool(value) => i64::from(*value),
            Self::Int(value) => *value,
            Self::Float(value) => *value as i64,
            Self::String(value) => leading_int(value),
            Self::List(items) => i64::from(!items.is_empty()),
            Self::Map(entries) => i64::from(!entries.is_empty()),
            Self::Struct(object) => i64::from(!object.is_empty()),
        }
    }

    /// Lossy string coercion.
    ///
    /// Scalars render naturally, booleans as `"1"` and `""`, and null or
    /// container values as the empty string.
    pub fn to_text_lossy(&self) -> String {
        match self {
            Self::Bool(true) => "1".to_owned(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::String(value) => value.clone(),
            _ => String::new(),
        }
    }

    /// Read a child of a map or list by segment key.
    ///
    /// List keys must parse as indices; anything else simply does not
    /// resolve. Struct fields are read through [`Structured`] instead,
    /// since their lookup may involve registered resolvers.
    pub fn child(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Map(entries) => entries.get(key),
            Self::List(items) => key.parse::<usize>().ok().and_then(|idx| items.get(idx)),
            _ => None,
        }
    }

    /// Whether a map key, list index, or direct struct field exists.
    pub fn has_key(&self, key: &str) -> bool {
        match self {
            Self::Map(entries) => entries.contains_key(key),
            Self::List(items) => key
                .parse::<usize>()
                .is_ok_and(|idx| idx < items.len()),
            Self::Struct(object) => object.has_field(key),
            _ => false,
        }
    }

    /// Build a map value from key/value pairs.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Build a list value from items.
    pub fn from_items<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

fn leading_int(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(digits.len(), |(idx, _)| idx);

    digits[..end].parse::<i64>().map_or(0, |value| sign * value)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(lhs), Self::Bool(rhs)) => lhs == rhs,
            (Self::Int(lhs), Self::Int(rhs)) => lhs == rhs,
            (Self::Float(lhs), Self::Float(rhs)) => lhs == rhs,
            (Self::String(lhs), Self::String(rhs)) => lhs == rhs,
            (Self::List(lhs), Self::List(rhs)) => lhs == rhs,
            (Self::Map(lhs), Self::Map(rhs)) => lhs == rhs,
            (Self::Struct(lhs), Self::Struct(rhs)) => lhs.entries() == rhs.entries(),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self::Map(entries)
    }
}

impl From<Box<dyn Structured>> for Value {
    fn from(object: Box<dyn Structured>) -> Self {
        Self::Struct(object)
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_test_case::test_case;

    #[test_case(Value::Null, true; "null")]
    #[test_case(Value::Bool(false), true; "bool false")]
    #[test_case(Value::Bool(true), false; "bool true")]
    #[test_case(Value::Int(0), true; "zero int")]
    #[test_case(Value::Int(3), false; "nonzero int")]
    #[test_case(Value::Float(0.0), true; "zero float")]
    #[test_case(Value::String(String::new()), true; "empty string")]
    #[test_case(Value::String("0".into()), true; "zero string")]
    #[test_case(Value::String("/".into()), false; "slash string")]
    #[test_case(Value::List(Vec::new()), true; "empty list")]
    #[test_case(Value::from_items([1]), false; "filled list")]
    #[test_case(Value::Map(Default::default()), true; "empty map")]
    #[test_case(Value::from_entries([("do", "re")]), false; "filled map")]
    #[test]
    fn emptiness(value: Value, expect: bool) {
        assert_eq!(value.is_empty(), expect);
    }

    #[test_case(Value::Int(12), 12; "int")]
    #[test_case(Value::Float(3.9), 3; "float truncates")]
    #[test_case(Value::Bool(true), 1; "bool")]
    #[test_case(Value::String("12abc".into()), 12; "junk suffix")]
    #[test_case(Value::String("-4".into()), -4; "signed")]
    #[test_case(Value::String("abc".into()), 0; "no digits")]
    #[test_case(Value::from_items([1]), 1; "filled list")]
    #[test_case(Value::List(Vec::new()), 0; "empty list")]
    #[test]
    fn lossy_int_coercion(value: Value, expect: i64) {
        assert_eq!(value.to_int_lossy(), expect);
    }

    #[test]
    fn list_children_resolve_by_index_only() {
        let list = Value::from_items(["do", "re"]);

        assert_eq!(list.child("1"), Some(&Value::from("re")));
        assert_eq!(list.child("mi"), None);
        assert_eq!(list.child("9"), None);
        assert!(list.has_key("0"));
        assert!(!list.has_key("2"));
    }

    #[test]
    fn strict_defaults_follow_kind() {
        assert_eq!(Value::default_of(Kind::String), Value::String(String::new()));
        assert_eq!(Value::default_of(Kind::Int), Value::Int(0));
        assert_eq!(Value::default_of(Kind::List), Value::List(Vec::new()));
        assert_eq!(Value::default_of(Kind::Null), Value::Null);
    }
}
