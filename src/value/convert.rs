// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Subject conversions.
//!
//! Serde support for [`Value`] plus a bridge from [`toml::Value`], so
//! configuration trees deserialized elsewhere can be lifted into subjects
//! without hand-building containers. File I/O stays with the caller.
//!
//! Deserialization never produces [`Value::Struct`]: struct objects are a
//! runtime-only shape, and they serialize as plain maps of their entries.

use crate::value::Value;

use serde::{
    de::{self, Deserializer, MapAccess, SeqAccess, Visitor},
    ser::Serializer,
    Deserialize, Serialize,
};
use std::{collections::BTreeMap, fmt};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::String(value) => serializer.serialize_str(value),
            Self::List(items) => serializer.collect_seq(items),
            Self::Map(entries) => serializer.collect_map(entries),
            Self::Struct(object) => serializer.collect_map(object.entries()),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str("any scalar, sequence, or map")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Value, E> {
        Ok(Value::Int(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Value, E> {
        Ok(i64::try_from(value).map_or(Value::Float(value as f64), Value::Int))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Value, E> {
        Ok(Value::Float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Value, E> {
        Ok(Value::String(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Value, E> {
        Ok(Value::String(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut entries = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            entries.insert(key, value);
        }
        Ok(Value::Map(entries))
    }
}

impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(text) => Self::String(text),
            toml::Value::Integer(value) => Self::Int(value),
            toml::Value::Float(value) => Self::Float(value),
            toml::Value::Boolean(value) => Self::Bool(value),
            // No datetime kind in the subject model; keep the rendering.
            toml::Value::Datetime(value) => Self::String(value.to_string()),
            toml::Value::Array(items) => {
                Self::List(items.into_iter().map(Into::into).collect())
            }
            toml::Value::Table(table) => Self::Map(
                table
                    .into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::record::Record;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserialize_toml_document_into_subject() -> anyhow::Result<()> {
        let subject: Value = toml::de::from_str(indoc! {r#"
            [site]
            title = "blah"
            depth = 3

            [[site.pages]]
            href = "/"
        "#})?;

        let expect = Value::from_entries([(
            "site",
            Value::from_entries([
                ("title", Value::from("blah")),
                ("depth", Value::from(3)),
                (
                    "pages",
                    Value::from_items([Value::from_entries([("href", "/")])]),
                ),
            ]),
        )]);

        assert_eq!(subject, expect);

        Ok(())
    }

    #[test]
    fn lift_toml_value_into_subject() -> anyhow::Result<()> {
        let table: toml::Value = toml::de::from_str(r#"count = 2"#)?;
        let subject = Value::from(table);

        assert_eq!(subject, Value::from_entries([("count", 2)]));

        Ok(())
    }

    #[test]
    fn struct_serializes_as_map() -> anyhow::Result<()> {
        let subject = Value::from(Record::from_entries([("title", "blah")]));
        let rendered = toml::ser::to_string(&subject)?;

        assert_eq!(rendered, "title = \"blah\"\n");

        Ok(())
    }
}
