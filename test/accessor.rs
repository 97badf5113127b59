// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use crate::sitemap;

use dotpath::{Data, FillTest, Record, ResolveWith, Structured, Value};

use simple_test_case::test_case;

#[test]
fn get_is_pure_and_repeatable() -> anyhow::Result<()> {
    let data = Data::new();
    let original = sitemap();
    let probe = original.clone();

    let first = data.get(&probe, "site.pages.0.title", Value::Null)?;
    let second = data.get(&probe, "site.pages.0.title", Value::Null)?;
    assert_eq!(first, Value::from("Home"));
    assert_eq!(first, second);

    // Misses do not leave materialized droppings behind either.
    data.get(&probe, "site.missing.deeply.nested", Value::from_entries([("a", 1)]))?;
    assert_eq!(probe, original);

    Ok(())
}

#[test]
fn empty_subject_always_yields_default() -> anyhow::Result<()> {
    let data = Data::new();
    let empty = Value::Map(Default::default());

    assert_eq!(data.get(&empty, "any.path", -1)?, Value::from(-1));
    assert_eq!(data.get(&empty, "", -1)?, Value::from(-1));
    assert_eq!(data.get(&Value::Null, "any", "D")?, Value::from("D"));
    assert_eq!(data.get(&Value::from(""), "any", "D")?, Value::from("D"));

    Ok(())
}

#[test]
fn set_then_get_round_trip() -> anyhow::Result<()> {
    let data = Data::new();
    let mut subject = sitemap();

    data.set(&mut subject, "site.pages.1.href", "/broken")?;
    let result = data.get(&subject, "site.pages.1.href", Value::Null)?;
    assert_eq!(result, Value::from("/broken"));

    Ok(())
}

#[test]
fn deep_set_materializes_intermediate_containers() -> anyhow::Result<()> {
    let data = Data::new();
    let mut subject = Value::Map(Default::default());

    data.set(&mut subject, "do.re.mi", "fa")?;

    let expect = Value::from_entries([(
        "do",
        Value::from_entries([(
            "re",
            Value::from_entries([("mi", Value::from("fa"))]),
        )]),
    )]);
    assert_eq!(subject, expect);

    Ok(())
}

#[test]
fn ensure_is_idempotent_on_non_null() -> anyhow::Result<()> {
    let data = Data::new();
    let mut subject = Value::from_entries([("do", "re")]);

    data.ensure(&mut subject, "do", "mi")?;
    assert_eq!(subject, Value::from_entries([("do", "re")]));

    Ok(())
}

#[test]
fn ensure_fixes_null() -> anyhow::Result<()> {
    let data = Data::new();
    let mut subject = Value::from_entries([("do", Value::Null)]);

    data.ensure(&mut subject, "do", "mi")?;
    assert_eq!(subject, Value::from_entries([("do", "mi")]));

    Ok(())
}

#[test_case("site.base", "fallback", true; "empty string replaced")]
#[test_case("site.title", "fallback", false; "occupied slot kept")]
#[test]
fn fill_default_test_replaces_empty_only(
    path: &str,
    replacement: &str,
    replaced: bool,
) -> anyhow::Result<()> {
    let data = Data::new();
    let mut subject = sitemap();
    let before = data.get(&subject, path, Value::Null)?;

    data.fill(&mut subject, path, replacement)?;

    let after = data.get(&subject, path, Value::Null)?;
    if replaced {
        assert_eq!(after, Value::from(replacement));
    } else {
        assert_eq!(after, before);
    }

    Ok(())
}

#[test]
fn fill_not_exists_keeps_stored_null() -> anyhow::Result<()> {
    let data = Data::new();

    let mut subject = Value::Map(Default::default());
    data.fill_with(&mut subject, "href", "X", FillTest::NotExists, None)?;
    assert_eq!(subject, Value::from_entries([("href", "X")]));

    let mut subject = Value::from_entries([("href", Value::Null)]);
    data.fill_with(&mut subject, "href", "X", FillTest::NotExists, None)?;
    assert_eq!(subject, Value::from_entries([("href", Value::Null)]));

    Ok(())
}

#[test]
fn callback_reports_path_existence() -> anyhow::Result<()> {
    let data = Data::new();
    let subject = Value::from_entries([(
        "do",
        Value::from_entries([("re", Value::from("me"))]),
    )]);

    data.get_with(&subject, "do.re", -1, |value, default, exists| {
        assert_eq!(value, Value::from("me"));
        assert_eq!(default, &Value::from(-1));
        assert!(exists);
        value
    })?;

    data.get_with(&subject, "do.re.mi", -1, |value, default, exists| {
        assert_eq!(value, Value::from(-1));
        assert_eq!(default, &Value::from(-1));
        assert!(!exists);
        value
    })?;

    Ok(())
}

#[test]
fn float_path_splits_on_separator() -> anyhow::Result<()> {
    let data = Data::new();
    let subject = Value::from_items([
        Value::from_items(["a", "b"]),
        Value::from_items(["c", "d"]),
    ]);

    // A bare float path stringifies before splitting, so 1.1 addresses
    // row one, column one, exactly like the dotted string "1.1" would.
    let result = data.get(&subject, 1.1_f64, Value::Null)?;
    assert_eq!(result, Value::from("d"));
    assert_eq!(result, data.get(&subject, "1.1", Value::Null)?);

    Ok(())
}

#[test]
fn get_int_reads_fixture_numbers() -> anyhow::Result<()> {
    let data = Data::new();
    let subject = sitemap();

    assert_eq!(data.get_int(&subject, "site.depth", 0)?, 2);
    assert_eq!(data.get_int(&subject, "site.missing", 7)?, 7);

    Ok(())
}

#[test]
fn resolver_answers_nested_struct_lookup() -> anyhow::Result<()> {
    let data = Data::new().register_resolver(ResolveWith::<Record, _>::new(
        |record, name, default| match record.field(&format!("raw_{name}")) {
            Some(value) => value.clone(),
            None => default.clone(),
        },
    ));

    let mut subject = sitemap();
    data.set(
        &mut subject,
        "site.session",
        Record::from_entries([("raw_token", "sekret")]),
    )?;

    let result = data.get(&subject, "site.session.token", Value::Null)?;
    assert_eq!(result, Value::from("sekret"));

    Ok(())
}
