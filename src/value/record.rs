// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Struct subjects and field resolvers.
//!
//! Subjects are not always plain containers. A [`Value::Struct`] node wraps
//! any type implementing [`Structured`]: an object exposing named
//! properties, able to clone an empty instance of itself so mutators can
//! materialize missing intermediate nodes of the same concrete type.
//!
//! # Field Resolvers
//!
//! Some struct objects do not expose every readable property as a direct
//! field, e.g., an object that answers arbitrary names through a
//! `fetch(name, default)` style method. The accessor supports these through
//! an ordered list of [`FieldResolver`] strategies registered at
//! construction. During traversal, a struct field that is not a direct
//! property is offered to each resolver in registration order; the first
//! resolver whose capability check passes answers the lookup, and later
//! resolvers are never consulted. Order of registration therefore matters
//! to callers stacking overlapping resolvers.

use crate::value::Value;

use std::{any::Any, collections::BTreeMap, fmt::Debug};

/// Named-property struct object.
///
/// Implementors provide direct field access plus the cloning hooks the
/// mutators need: `clone_box` for value semantics and `clone_empty` for
/// materializing fresh intermediate nodes of the same concrete type.
pub trait Structured: Debug {
    /// Read a direct field by name.
    fn field(&self, name: &str) -> Option<&Value>;

    /// Mutably borrow a direct field by name.
    fn field_mut(&mut self, name: &str) -> Option<&mut Value>;

    /// Write a field, creating it when missing.
    fn set_field(&mut self, name: &str, value: Value);

    /// Snapshot of all direct fields in a stable order.
    fn entries(&self) -> Vec<(String, Value)>;

    /// Whether a direct field exists, even when its value is null.
    fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Whether the object holds no fields at all.
    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Fresh fieldless instance of the same concrete type.
    fn clone_empty(&self) -> Box<dyn Structured>;

    /// Deep copy behind the trait object.
    fn clone_box(&self) -> Box<dyn Structured>;

    /// Capability hook for [`FieldResolver`] downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn Structured> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Stock [`Structured`] implementation backed by a field map.
///
/// Covers the common case where callers just want a struct-shaped node
/// without writing their own object type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Construct new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct record from field name/value pairs.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            fields: entries
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// Builder-style field insertion.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

impl Structured for Record {
    fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    fn set_field(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_owned(), value);
    }

    fn entries(&self) -> Vec<(String, Value)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn clone_empty(&self) -> Box<dyn Structured> {
        Box::new(Self::new())
    }

    fn clone_box(&self) -> Box<dyn Structured> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Struct(Box::new(record))
    }
}

/// Strategy for extracting a named property from a struct object.
///
/// Resolvers run only after direct field lookup misses, in registration
/// order; the first applicable resolver wins.
pub trait FieldResolver {
    /// Whether this resolver can answer lookups on the given object.
    fn applies_to(&self, object: &dyn Structured) -> bool;

    /// Extract a property value, falling back to the default.
    fn resolve(&self, object: &dyn Structured, name: &str, default: &Value) -> Value;
}

/// Adapt a closure over one concrete [`Structured`] type into a resolver.
///
/// The capability check is a downcast test against `T`, so the resolver
/// applies exactly to objects of that concrete type.
pub struct ResolveWith<T, F> {
    fetch: F,
    marker: std::marker::PhantomData<fn(&T)>,
}

impl<T, F> ResolveWith<T, F>
where
    T: Structured + 'static,
    F: Fn(&T, &str, &Value) -> Value,
{
    /// Construct new downcast-checked resolver.
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            marker: std::marker::PhantomData,
        }
    }
}

impl<T, F> FieldResolver for ResolveWith<T, F>
where
    T: Structured + 'static,
    F: Fn(&T, &str, &Value) -> Value,
{
    fn applies_to(&self, object: &dyn Structured) -> bool {
        object.as_any().is::<T>()
    }

    fn resolve(&self, object: &dyn Structured, name: &str, default: &Value) -> Value {
        match object.as_any().downcast_ref::<T>() {
            Some(concrete) => (self.fetch)(concrete, name, default),
            None => default.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_field_round_trip() {
        let mut record = Record::new();
        assert!(record.is_empty());

        record.set_field("do", Value::from("re"));
        assert_eq!(record.field("do"), Some(&Value::from("re")));
        assert!(record.has_field("do"));
        assert!(!record.has_field("mi"));

        *record.field_mut("do").unwrap() = Value::from("mi");
        assert_eq!(record.field("do"), Some(&Value::from("mi")));
    }

    #[test]
    fn clone_empty_discards_fields() {
        let record = Record::from_entries([("do", "re")]);
        let empty = record.clone_empty();
        assert!(empty.is_empty());
    }

    #[test]
    fn resolve_with_applies_to_concrete_type_only() {
        #[derive(Debug, Clone, Default)]
        struct Opaque;

        impl Structured for Opaque {
            fn field(&self, _: &str) -> Option<&Value> {
                None
            }
            fn field_mut(&mut self, _: &str) -> Option<&mut Value> {
                None
            }
            fn set_field(&mut self, _: &str, _: Value) {}
            fn entries(&self) -> Vec<(String, Value)> {
                Vec::new()
            }
            fn clone_empty(&self) -> Box<dyn Structured> {
                Box::new(Self)
            }
            fn clone_box(&self) -> Box<dyn Structured> {
                Box::new(Self)
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
        }

        let resolver = ResolveWith::<Opaque, _>::new(|_, name, _| Value::from(name));

        assert!(resolver.applies_to(&Opaque));
        assert!(!resolver.applies_to(&Record::new()));
        assert_eq!(
            resolver.resolve(&Opaque, "answer", &Value::Null),
            Value::from("answer")
        );
    }
}
