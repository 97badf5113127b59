// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Conditional read-transform-write chains.
//!
//! A chain reads a value out of one subject, optionally transforms it, and
//! writes it somewhere else, all in a single expression:
//!
//! ```ignore
//! data.only_if(&config, "title")?
//!     .call(|title| Value::from(format!("Page: {title}")))
//!     .set_at(&mut page, "head.title")?;
//! ```
//!
//! Each gate ([`Data::only_if`] and friends) returns an owned [`Chain`]
//! value holding either a carried `(path, value)` pair or an abort marker.
//! A failed gate makes every later call on that chain a guaranteed no-op,
//! with no re-checking by the caller. Because the pending state lives in
//! the returned value rather than in the accessor, a fresh chain can never
//! inherit a stale abort, and overlapping chains on one accessor cannot
//! corrupt each other.

use crate::{
    access::{Data, FillTest, Result},
    path::{Path, RawPath},
    value::Value,
};

use tracing::trace;

impl Data {
    /// Start a chain carrying the value at a path, if it is non-empty.
    ///
    /// An empty resolved value aborts the chain.
    ///
    /// # Errors
    ///
    /// - Return [`Error::InvalidPath`] if the path cannot be normalized.
    ///
    /// [`Error::InvalidPath`]: crate::access::Error::InvalidPath
    pub fn only_if(&self, subject: &Value, path: impl Into<RawPath>) -> Result<Chain<'_>> {
        self.only_if_test(subject, path, |value, _| !value.is_empty())
    }

    /// Start a chain gated on an arbitrary test.
    ///
    /// The test sees the resolved value and whether the path existed; a
    /// false result aborts the chain.
    ///
    /// # Errors
    ///
    /// Same as [`Data::only_if`].
    pub fn only_if_test<F>(
        &self,
        subject: &Value,
        path: impl Into<RawPath>,
        test: F,
    ) -> Result<Chain<'_>>
    where
        F: FnOnce(&Value, bool) -> bool,
    {
        let path = Path::parse(path, self.separator)?;
        let (path_exists, value) = self.get_exists(subject, path.clone(), Value::Null)?;

        let state = if test(&value, path_exists) {
            State::Carrying { path, value }
        } else {
            trace!(%path, "chain aborted by gate");
            State::Aborted
        };

        Ok(Chain { data: self, state })
    }

    /// Start a chain only when the value at a path is exactly null.
    ///
    /// # Errors
    ///
    /// Same as [`Data::only_if`].
    pub fn only_if_null(&self, subject: &Value, path: impl Into<RawPath>) -> Result<Chain<'_>> {
        self.only_if_test(subject, path, |value, _| value.is_null())
    }

    /// Start a chain only when the path exists, whatever its value.
    ///
    /// # Errors
    ///
    /// Same as [`Data::only_if`].
    pub fn only_if_has(&self, subject: &Value, path: impl Into<RawPath>) -> Result<Chain<'_>> {
        self.only_if_test(subject, path, |_, path_exists| path_exists)
    }

    /// Start an unconditional chain carrying the value at a path.
    ///
    /// Missing paths carry null rather than aborting.
    ///
    /// # Errors
    ///
    /// Same as [`Data::only_if`].
    pub fn get_then(&self, subject: &Value, path: impl Into<RawPath>) -> Result<Chain<'_>> {
        self.get_then_or(subject, path, Value::Null)
    }

    /// [`Data::get_then`] with an explicit default for missing paths.
    ///
    /// # Errors
    ///
    /// Same as [`Data::only_if`].
    pub fn get_then_or(
        &self,
        subject: &Value,
        path: impl Into<RawPath>,
        default: impl Into<Value>,
    ) -> Result<Chain<'_>> {
        self.get_then_with(subject, path, default, |value, _, _| value)
    }

    /// [`Data::get_then`] with a default and a terminal get callback.
    ///
    /// # Errors
    ///
    /// Same as [`Data::only_if`].
    pub fn get_then_with<F>(
        &self,
        subject: &Value,
        path: impl Into<RawPath>,
        default: impl Into<Value>,
        callback: F,
    ) -> Result<Chain<'_>>
    where
        F: FnOnce(Value, &Value, bool) -> Value,
    {
        let path = Path::parse(path, self.separator)?;
        let value = self.get_with(subject, path.clone(), default, callback)?;

        Ok(Chain {
            data: self,
            state: State::Carrying { path, value },
        })
    }
}

/// In-flight conditional chain.
///
/// Produced by the gates on [`Data`]; consumed by a terminal call
/// ([`Chain::value`], [`Chain::set`], [`Chain::ensure`], [`Chain::fill`],
/// or a `*_at` variant). Transform calls pass the carried value along and
/// do nothing once aborted.
#[derive(Debug)]
pub struct Chain<'d> {
    data: &'d Data,
    state: State,
}

#[derive(Debug)]
enum State {
    Carrying { path: Path, value: Value },
    Aborted,
}

impl Chain<'_> {
    /// Whether a gate has aborted this chain.
    pub fn is_aborted(&self) -> bool {
        matches!(self.state, State::Aborted)
    }

    /// Transform the carried value with an arbitrary function.
    ///
    /// No-op when aborted.
    #[must_use]
    pub fn call(self, transform: impl FnOnce(Value) -> Value) -> Self {
        match self.state {
            State::Carrying { path, value } => Self {
                data: self.data,
                state: State::Carrying {
                    path,
                    value: transform(value),
                },
            },
            State::Aborted => self,
        }
    }

    /// Transform the carried value with a builtin [`Filter`].
    ///
    /// No-op when aborted.
    #[must_use]
    pub fn filter(self, filter: Filter) -> Self {
        self.call(|value| filter.apply(value))
    }

    /// Terminal: take the carried value, or null when aborted.
    pub fn value(self) -> Value {
        match self.state {
            State::Carrying { value, .. } => value,
            State::Aborted => Value::Null,
        }
    }

    /// Terminal: write the carried value at the carried path.
    ///
    /// Aborted chains leave the subject untouched.
    ///
    /// # Errors
    ///
    /// Same as [`Data::set`].
    pub fn set(self, subject: &mut Value) -> Result<()> {
        match self.state {
            State::Carrying { path, value } => self.data.set_with(subject, path, value, None),
            State::Aborted => Ok(()),
        }
    }

    /// Terminal: write the carried value at an explicit path.
    ///
    /// Aborted chains leave the subject untouched.
    ///
    /// # Errors
    ///
    /// Same as [`Data::set`].
    pub fn set_at(self, subject: &mut Value, path: impl Into<RawPath>) -> Result<()> {
        match self.state {
            State::Carrying { value, .. } => self.data.set(subject, path, value),
            State::Aborted => Ok(()),
        }
    }

    /// Terminal: ensure the carried value at the carried path.
    ///
    /// The carried value acts as the default for [`Data::ensure`].
    /// Aborted chains leave the subject untouched.
    ///
    /// # Errors
    ///
    /// Same as [`Data::set`].
    pub fn ensure(self, subject: &mut Value) -> Result<()> {
        match self.state {
            State::Carrying { path, value } => self.data.ensure(subject, path, value),
            State::Aborted => Ok(()),
        }
    }

    /// Terminal: ensure the carried value at an explicit path.
    ///
    /// # Errors
    ///
    /// Same as [`Data::set`].
    pub fn ensure_at(self, subject: &mut Value, path: impl Into<RawPath>) -> Result<()> {
        match self.state {
            State::Carrying { value, .. } => self.data.ensure(subject, path, value),
            State::Aborted => Ok(()),
        }
    }

    /// Terminal: fill the carried value at the carried path under the
    /// default empty test.
    ///
    /// # Errors
    ///
    /// Same as [`Data::set`].
    pub fn fill(self, subject: &mut Value) -> Result<()> {
        self.fill_test(subject, FillTest::Empty)
    }

    /// Terminal: fill the carried value at the carried path under an
    /// explicit test.
    ///
    /// # Errors
    ///
    /// Same as [`Data::set`].
    pub fn fill_test(self, subject: &mut Value, test: FillTest) -> Result<()> {
        match self.state {
            State::Carrying { path, value } => {
                self.data.fill_with(subject, path, value, test, None)
            }
            State::Aborted => Ok(()),
        }
    }
}

/// Builtin chain transforms.
///
/// Validators collapse non-conforming values to null; sanitizers strip
/// offending characters and always yield a string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    /// Validate as integer: integers pass, integral floats and trimmed
    /// integer strings convert, everything else becomes null.
    Int,

    /// Validate as float: floats pass, integers widen, trimmed numeric
    /// strings convert, everything else becomes null.
    Float,

    /// Validate as boolean from the usual spellings (`1`/`0`, `true`/
    /// `false`, `on`/`off`, `yes`/`no`, empty string); everything else
    /// becomes null.
    Boolean,

    /// Sanitize to the digits and sign characters of the value's text
    /// rendering.
    NumberInt,

    /// Sanitize to digits and sign characters, keeping the decimal point
    /// when fractions are allowed.
    NumberFloat {
        /// Keep `.` characters in the output.
        allow_fraction: bool,
    },
}

impl Filter {
    /// Apply this filter to a value.
    pub fn apply(&self, value: Value) -> Value {
        match self {
            Self::Int => filter_int(value),
            Self::Float => filter_float(value),
            Self::Boolean => filter_boolean(value),
            Self::NumberInt => sanitize_number(&value, false),
            Self::NumberFloat { allow_fraction } => sanitize_number(&value, *allow_fraction),
        }
    }
}

fn filter_int(value: Value) -> Value {
    match value {
        Value::Int(_) => value,
        Value::Float(number) if number.fract() == 0.0 => Value::Int(number as i64),
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map_or(Value::Null, Value::Int),
        _ => Value::Null,
    }
}

fn filter_float(value: Value) -> Value {
    match value {
        Value::Float(_) => value,
        Value::Int(number) => Value::Float(number as f64),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_or(Value::Null, Value::Float),
        _ => Value::Null,
    }
}

fn filter_boolean(value: Value) -> Value {
    match value {
        Value::Bool(_) => value,
        Value::Int(1) => Value::Bool(true),
        Value::Int(0) => Value::Bool(false),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => Value::Bool(true),
            "0" | "false" | "off" | "no" | "" => Value::Bool(false),
            _ => Value::Null,
        },
        _ => Value::Null,
    }
}

fn sanitize_number(value: &Value, allow_fraction: bool) -> Value {
    let kept = value
        .to_text_lossy()
        .chars()
        .filter(|ch| {
            ch.is_ascii_digit() || *ch == '+' || *ch == '-' || (allow_fraction && *ch == '.')
        })
        .collect::<String>();

    Value::String(kept)
}
