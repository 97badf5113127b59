// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! # dotpath
//!
//! Path-based accessor for arbitrarily nested, heterogeneously typed data.
//!
//! Subjects are modeled by the [`Value`] tagged union: scalars, ordered
//! lists, string-keyed maps, and named-property struct objects. The
//! [`Data`] accessor reads and writes them through dotted paths:
//!
//! ```ignore
//! use dotpath::{Data, Value};
//!
//! let data = Data::new();
//! let mut subject = Value::Map(Default::default());
//!
//! data.set(&mut subject, "do.re.mi", "fa")?;
//! assert_eq!(data.get(&subject, "do.re.mi", Value::Null)?, Value::from("fa"));
//! ```
//!
//! Reads never mutate their subject and fall back to a caller-supplied
//! default. Writes materialize missing intermediate containers from a
//! child template while preserving sibling branches. Conditional
//! read-transform-write chains ([`Data::only_if`], [`Chain`]) move values
//! between subjects in a single expression, with abort propagation handled
//! by the chain itself.
//!
//! The accessor performs no I/O and holds no subject state; everything is
//! synchronous and caller-owned.

pub mod access;
pub mod path;
pub mod value;

pub use access::{
    chain::{Chain, Filter},
    Data, Error, FillTest, UnknownTest,
};
pub use path::{InvalidPath, Path, RawPath};
pub use value::{
    record::{FieldResolver, Record, ResolveWith, Structured},
    Kind, Value,
};
