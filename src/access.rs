// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Path-based subject access.
//!
//! The [`Data`] accessor reads and writes nested heterogeneous subjects
//! through dotted paths. It holds configuration only: the path separator
//! and the ordered [`FieldResolver`] list for struct lookups. Subjects are
//! always supplied by the caller, so one accessor can serve any number of
//! them.
//!
//! # Reads
//!
//! [`Data::get`] is a pure recursive descent: it never mutates its subject
//! and falls back to a caller-supplied default wherever the path does not
//! resolve. [`Data::get_exists`] additionally distinguishes "resolved to
//! the default because the key was absent" from "the key exists and holds
//! an empty or null value" by checking presence directly at the final
//! segment.
//!
//! # Writes
//!
//! [`Data::set`] materializes missing intermediate containers from a
//! __child template__ as it walks, then assigns the terminal value in
//! place, preserving sibling branches at every level. [`Data::ensure`]
//! replaces only null terminals (though it always performs the write), and
//! [`Data::fill`] replaces conditionally under a [`FillTest`].
//!
//! Conditional read-transform-write chains live in [`chain`].

pub mod chain;

use crate::{
    path::{InvalidPath, Path, RawPath},
    value::{record::FieldResolver, Value},
};

use std::{collections::BTreeMap, fmt, str::FromStr};
use tracing::trace;

/// Path-based accessor over nested heterogeneous subjects.
pub struct Data {
    separator: char,
    resolvers: Vec<Box<dyn FieldResolver>>,
}

impl Default for Data {
    fn default() -> Self {
        Self::new()
    }
}

impl Data {
    /// Construct new accessor with the default `'.'` separator.
    pub fn new() -> Self {
        Self {
            separator: '.',
            resolvers: Vec::new(),
        }
    }

    /// Construct new accessor with a custom path separator.
    pub fn with_separator(separator: char) -> Self {
        Self {
            separator,
            resolvers: Vec::new(),
        }
    }

    /// Register a struct field resolver.
    ///
    /// Resolvers are consulted in registration order when a struct subject
    /// lacks a direct field; the first applicable resolver wins.
    pub fn register_resolver(mut self, resolver: impl FieldResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    /// Read the value at a path, or the default when it does not resolve.
    ///
    /// Never mutates the subject.
    ///
    /// # Errors
    ///
    /// - Return [`Error::InvalidPath`] if the path cannot be normalized.
    pub fn get(
        &self,
        subject: &Value,
        path: impl Into<RawPath>,
        default: impl Into<Value>,
    ) -> Result<Value> {
        self.get_with(subject, path, default, |value, _, _| value)
    }

    /// [`Data::get`] with a terminal callback.
    ///
    /// The callback receives the resolved value (or default), the default
    /// itself, and whether the full path existed. It fires exactly once,
    /// at the deepest resolution step, even for empty subjects.
    ///
    /// # Errors
    ///
    /// - Return [`Error::InvalidPath`] if the path cannot be normalized.
    pub fn get_with<F>(
        &self,
        subject: &Value,
        path: impl Into<RawPath>,
        default: impl Into<Value>,
        callback: F,
    ) -> Result<Value>
    where
        F: FnOnce(Value, &Value, bool) -> Value,
    {
        let path = Path::parse(path, self.separator)?;
        let default = default.into();
        let (value, path_exists) = self.resolve(subject, &path, &default);
        Ok(callback(value, &default, path_exists))
    }

    /// Read the value at a path as an integer.
    ///
    /// Null resolutions return the default untouched; everything else is
    /// coerced through [`Value::to_int_lossy`].
    ///
    /// # Errors
    ///
    /// - Return [`Error::InvalidPath`] if the path cannot be normalized.
    pub fn get_int(
        &self,
        subject: &Value,
        path: impl Into<RawPath>,
        default: i64,
    ) -> Result<i64> {
        let value = self.get_with(subject, path, Value::Int(default), |value, default, _| {
            if value.is_null() {
                default.clone()
            } else {
                Value::Int(value.to_int_lossy())
            }
        })?;

        Ok(value.to_int_lossy())
    }

    /// Read the value at a path along with its existence flag.
    ///
    /// Resolves the parent of the final segment, then checks key, index,
    /// or direct-field presence at the leaf. This distinguishes a stored
    /// null or empty value from an absent key, which plain [`Data::get`]
    /// cannot. Field resolvers are not consulted for the leaf presence
    /// check.
    ///
    /// # Errors
    ///
    /// - Return [`Error::InvalidPath`] if the path cannot be normalized.
    pub fn get_exists(
        &self,
        subject: &Value,
        path: impl Into<RawPath>,
        default: impl Into<Value>,
    ) -> Result<(bool, Value)> {
        let path = Path::parse(path, self.separator)?;
        let default = default.into();
        let (ancestry, leaf) = path.split_last();

        let parent = match ancestry {
            None => subject.clone(),
            Some(ancestry) => {
                // Resolve the parent against an empty value of the
                // subject's own kind, so a dead-end ancestry cannot be
                // mistaken for a present leaf.
                let empty = Value::default_of(subject.kind());
                self.resolve(subject, &ancestry, &empty).0
            }
        };

        if parent.has_key(leaf) {
            let value = match &parent {
                Value::Struct(object) => object.field(leaf).cloned().unwrap_or(Value::Null),
                _ => parent.child(leaf).cloned().unwrap_or(Value::Null),
            };
            return Ok((true, value));
        }

        let (value, _) = self.resolve(subject, &path, &default);
        Ok((false, value))
    }

    /// Write a value at a path, materializing missing intermediates.
    ///
    /// The child template for materialized nodes is inferred from the
    /// subject: maps beget maps, lists beget lists, structs beget empty
    /// clones of themselves, and scalar or null subjects beget maps.
    /// Sibling branches at intermediate nodes are preserved.
    ///
    /// # Errors
    ///
    /// - Return [`Error::InvalidPath`] if the path cannot be normalized.
    /// - Return [`Error::ListIndex`] if a non-numeric segment lands on a
    ///   list.
    pub fn set(
        &self,
        subject: &mut Value,
        path: impl Into<RawPath>,
        value: impl Into<Value>,
    ) -> Result<()> {
        self.set_with(subject, path, value, None)
    }

    /// [`Data::set`] with an explicit child template.
    ///
    /// The template should be a container-shaped value; each materialized
    /// intermediate node starts as a clone of it.
    ///
    /// # Errors
    ///
    /// Same as [`Data::set`].
    pub fn set_with(
        &self,
        subject: &mut Value,
        path: impl Into<RawPath>,
        value: impl Into<Value>,
        template: Option<Value>,
    ) -> Result<()> {
        let path = Path::parse(path, self.separator)?;
        let template = template.unwrap_or_else(|| infer_template(subject));
        self.write(subject, &path, value.into(), &template)
    }

    /// Write a default at a path unless a non-null value is already there.
    ///
    /// Idempotent in value, but the terminal write always happens, even
    /// when the existing value is kept.
    ///
    /// # Errors
    ///
    /// Same as [`Data::set`].
    pub fn ensure(
        &self,
        subject: &mut Value,
        path: impl Into<RawPath>,
        default: impl Into<Value>,
    ) -> Result<()> {
        self.ensure_with(subject, path, default, None)
    }

    /// [`Data::ensure`] with an explicit child template.
    ///
    /// # Errors
    ///
    /// Same as [`Data::set`].
    pub fn ensure_with(
        &self,
        subject: &mut Value,
        path: impl Into<RawPath>,
        default: impl Into<Value>,
        template: Option<Value>,
    ) -> Result<()> {
        let path = Path::parse(path, self.separator)?;
        let value = self.get_with(subject, path.clone(), default, |value, default, _| {
            if value.is_null() {
                default.clone()
            } else {
                value
            }
        })?;

        self.set_with(subject, path, value, template)
    }

    /// Write a value at a path only when the current value is empty.
    ///
    /// Shorthand for [`Data::fill_with`] under [`FillTest::Empty`].
    ///
    /// # Errors
    ///
    /// Same as [`Data::set`].
    pub fn fill(
        &self,
        subject: &mut Value,
        path: impl Into<RawPath>,
        value: impl Into<Value>,
    ) -> Result<()> {
        self.fill_with(subject, path, value, FillTest::Empty, None)
    }

    /// Write a value at a path when a replacement test passes.
    ///
    /// The test sees the current value, whether the final segment exists
    /// as a key or field, and the replacement. The `strict` test compares
    /// against the zero value of the replacement's kind, or against the
    /// template when one is given.
    ///
    /// # Errors
    ///
    /// Same as [`Data::set`].
    pub fn fill_with(
        &self,
        subject: &mut Value,
        path: impl Into<RawPath>,
        value: impl Into<Value>,
        test: FillTest,
        template: Option<Value>,
    ) -> Result<()> {
        let path = Path::parse(path, self.separator)?;
        let value = value.into();
        let strict_default = template
            .clone()
            .unwrap_or_else(|| Value::default_of(value.kind()));
        let (path_exists, old_value) =
            self.get_exists(subject, path.clone(), strict_default.clone())?;

        let replace = match &test {
            FillTest::Empty => old_value.is_empty(),
            FillTest::IsNull => old_value.is_null(),
            FillTest::Strict => old_value == strict_default,
            FillTest::NotExists => !path_exists,
            FillTest::With(test) => test(&old_value, path_exists, &value),
        };

        trace!(path = %path, replace, "fill test evaluated");
        if replace {
            self.set_with(subject, path, value, template)?;
        }

        Ok(())
    }

    /// [`Data::fill_with`] taking the test by builtin name.
    ///
    /// # Errors
    ///
    /// - Return [`Error::UnknownTest`] if the name is not one of `empty`,
    ///   `is_null`, `strict`, or `not_exists`. Surfaced before any test
    ///   evaluation or mutation.
    /// - Otherwise same as [`Data::set`].
    pub fn fill_named(
        &self,
        subject: &mut Value,
        path: impl Into<RawPath>,
        value: impl Into<Value>,
        test: &str,
    ) -> Result<()> {
        let test = test.parse::<FillTest>()?;
        self.fill_with(subject, path, value, test, None)
    }

    /// Recursive descent, reporting the resolved value and whether the
    /// full path existed.
    fn resolve(&self, subject: &Value, path: &Path, default: &Value) -> (Value, bool) {
        // INVARIANT: Struct subjects never short-circuit here; resolvers
        // may answer lookups even on field-less objects.
        if !matches!(subject, Value::Struct(_)) && subject.is_empty() {
            return (default.clone(), false);
        }

        let (key, rest) = path.split_first();
        let (base, path_exists) = match subject {
            Value::Map(_) | Value::List(_) => match subject.child(key) {
                Some(child) => (child.clone(), true),
                None => (default.clone(), false),
            },
            Value::Struct(object) => match object.field(key) {
                Some(field) => (field.clone(), true),
                None => {
                    let hit = self
                        .resolvers
                        .iter()
                        .find(|resolver| resolver.applies_to(object.as_ref()));
                    match hit {
                        Some(resolver) => {
                            (resolver.resolve(object.as_ref(), key, default), true)
                        }
                        None => (default.clone(), false),
                    }
                }
            },
            // Scalars end traversal; the rest of the path is moot.
            _ => return (default.clone(), false),
        };

        match rest {
            Some(rest) => self.resolve(&base, &rest, default),
            None => (base, path_exists),
        }
    }

    /// Traverse-and-materialize write.
    fn write(
        &self,
        subject: &mut Value,
        path: &Path,
        value: Value,
        template: &Value,
    ) -> Result<()> {
        // INVARIANT: Writes only traverse containers. A scalar or null
        // intermediate gives way to a fresh template clone.
        if !matches!(
            subject,
            Value::Map(_) | Value::List(_) | Value::Struct(_)
        ) {
            trace!("replacing scalar intermediate with child template");
            *subject = template.clone();
        }

        let (key, rest) = path.split_first();
        let slot = match subject {
            Value::Map(entries) => entries.entry(key.to_owned()).or_insert_with(|| {
                trace!(%key, "materializing missing map slot");
                template.clone()
            }),
            Value::List(items) => {
                let index = key.parse::<usize>().map_err(|_| Error::ListIndex {
                    segment: key.to_owned(),
                })?;
                if index >= items.len() {
                    trace!(%key, "materializing missing list slot");
                    items.resize(index, Value::Null);
                    items.push(template.clone());
                }
                &mut items[index]
            }
            Value::Struct(object) => {
                if !object.has_field(key) {
                    trace!(%key, "materializing missing struct field");
                    object.set_field(key, template.clone());
                }
                match object.field_mut(key) {
                    Some(slot) => slot,
                    // Objects that refuse the field swallow the write.
                    None => return Ok(()),
                }
            }
            // Scalar templates leave nothing to write into.
            _ => return Ok(()),
        };

        match rest {
            Some(rest) => self.write(slot, &rest, value, template),
            None => {
                *slot = value;
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Data")
            .field("separator", &self.separator)
            .field("resolvers", &self.resolvers.len())
            .finish()
    }
}

fn infer_template(subject: &Value) -> Value {
    match subject {
        Value::Map(_) => Value::Map(BTreeMap::new()),
        Value::List(_) => Value::List(Vec::new()),
        Value::Struct(object) => Value::Struct(object.clone_empty()),
        _ => Value::Map(BTreeMap::new()),
    }
}

/// Replacement test for [`Data::fill_with`].
pub enum FillTest {
    /// Replace when the current value is empty, see [`Value::is_empty`].
    Empty,

    /// Replace only when the current value is exactly null.
    IsNull,

    /// Replace only when the current value equals the zero value of the
    /// replacement's kind (empty _and_ same type).
    Strict,

    /// Replace only when the final segment is absent as a key or field.
    NotExists,

    /// Custom test over `(current, path_exists, replacement)`.
    With(Box<dyn Fn(&Value, bool, &Value) -> bool>),
}

impl FromStr for FillTest {
    type Err = UnknownTest;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "empty" => Ok(Self::Empty),
            "is_null" => Ok(Self::IsNull),
            "strict" => Ok(Self::Strict),
            "not_exists" => Ok(Self::NotExists),
            other => Err(UnknownTest {
                name: other.to_owned(),
            }),
        }
    }
}

impl fmt::Debug for FillTest {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "Empty",
            Self::IsNull => "IsNull",
            Self::Strict => "Strict",
            Self::NotExists => "NotExists",
            Self::With(_) => "With(..)",
        };
        fmt.write_str(name)
    }
}

/// Fill test name outside the builtin set.
#[derive(Clone, Debug, thiserror::Error)]
#[error("unknown fill test `{name}`; expected empty, is_null, strict, or not_exists")]
pub struct UnknownTest {
    /// The rejected name.
    pub name: String,
}

/// All possible error types for subject access.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Path argument cannot be normalized.
    #[error(transparent)]
    InvalidPath(#[from] InvalidPath),

    /// Fill test name outside the builtin set.
    #[error(transparent)]
    UnknownTest(#[from] UnknownTest),

    /// Write walked into a list with a segment that is not an index.
    #[error("cannot index list with segment `{segment}`")]
    ListIndex {
        /// The offending segment key.
        segment: String,
    },
}

/// Friendly result alias :3
pub type Result<T, E = Error> = std::result::Result<T, E>;
