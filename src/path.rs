// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Path normalization.
//!
//! Every accessor entry point takes a path argument in one of several raw
//! shapes: a separator-delimited string, an explicit segment sequence, or a
//! bare numeric value. This module normalizes all of them into a canonical
//! [`Path`], an ordered non-empty list of segment keys.
//!
//! # Numeric Paths
//!
//! A bare numeric path is stringified first and _then_ split on the
//! separator. With the default separator of `'.'` this means the float
//! `1.1` becomes the two-segment path `["1", "1"]`, exactly as if the
//! caller had written the dotted string `"1.1"`. Callers that want a float
//! rendered as a single segment must pass it pre-stringified inside a
//! segment sequence.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Raw path argument accepted by the accessor.
///
/// Construct through the `From` impls rather than directly; splitting of
/// [`RawPath::Text`] happens against the owning accessor's separator during
/// [`Path::parse`].
#[derive(Clone, Debug, PartialEq)]
pub enum RawPath {
    /// Separator-delimited text, split at parse time.
    Text(String),

    /// Pre-split segment keys, used as-is.
    Segments(Vec<String>),
}

impl From<&str> for RawPath {
    fn from(path: &str) -> Self {
        Self::Text(path.to_owned())
    }
}

impl From<String> for RawPath {
    fn from(path: String) -> Self {
        Self::Text(path)
    }
}

impl From<Vec<String>> for RawPath {
    fn from(segments: Vec<String>) -> Self {
        Self::Segments(segments)
    }
}

impl From<&[&str]> for RawPath {
    fn from(segments: &[&str]) -> Self {
        Self::Segments(segments.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RawPath {
    fn from(segments: [&str; N]) -> Self {
        Self::Segments(segments.iter().map(|s| (*s).to_owned()).collect())
    }
}

// INVARIANT: Numeric paths stringify before splitting.
impl From<i64> for RawPath {
    fn from(path: i64) -> Self {
        Self::Text(path.to_string())
    }
}

impl From<u64> for RawPath {
    fn from(path: u64) -> Self {
        Self::Text(path.to_string())
    }
}

impl From<f64> for RawPath {
    fn from(path: f64) -> Self {
        Self::Text(path.to_string())
    }
}

/// Canonical parsed path.
///
/// An ordered sequence of segment keys with at least one segment. Integer
/// indices into lists are carried as stringified numbers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path(Vec<String>);

impl Path {
    /// Normalize a raw path argument against a separator.
    ///
    /// # Errors
    ///
    /// - Return [`InvalidPath`] if the raw path holds no segments.
    pub fn parse(raw: impl Into<RawPath>, separator: char) -> Result<Self> {
        let segments: Vec<String> = match raw.into() {
            RawPath::Text(text) => text.split(separator).map(str::to_owned).collect(),
            RawPath::Segments(segments) => segments,
        };

        if segments.is_empty() {
            return Err(InvalidPath { separator });
        }

        Ok(Self(segments))
    }

    /// First segment key and the remainder of the path, if any.
    pub fn split_first(&self) -> (&str, Option<Path>) {
        let rest = match self.0.len() {
            1 => None,
            _ => Some(Path(self.0[1..].to_vec())),
        };
        (self.0[0].as_str(), rest)
    }

    /// Ancestry of the final segment and the final segment key itself.
    ///
    /// The ancestry is `None` when the path holds a single segment, i.e.,
    /// the subject itself is the parent.
    pub fn split_last(&self) -> (Option<Path>, &str) {
        let ancestry = match self.0.len() {
            1 => None,
            len => Some(Path(self.0[..len - 1].to_vec())),
        };
        (ancestry, self.0[self.0.len() - 1].as_str())
    }

    /// Number of segment keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// A parsed path is never empty, but clippy insists on the pairing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over segment keys in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Display for Path {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(self.0.join(".").as_str())
    }
}

impl From<Path> for RawPath {
    fn from(path: Path) -> Self {
        Self::Segments(path.0)
    }
}

/// Path argument cannot be normalized into segment keys.
#[derive(Clone, Debug, thiserror::Error)]
#[error("path must be a non-empty sequence of '{separator}' separated segments")]
pub struct InvalidPath {
    /// Separator the accessor was configured with.
    pub separator: char,
}

/// Friendly result alias :3
pub type Result<T, E = InvalidPath> = std::result::Result<T, E>;
