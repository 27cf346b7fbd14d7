//! Dynamic feature values and the text-format used for edition defaults.
//!
//! There is no descriptor pool here to reflect over, so schema introspection
//! is given one concrete shape: a `FeatureValue` is a `BTreeMap` keyed by
//! field name, and the text format for defaults is the flat
//! `{key: value, key: value}` record shape (e.g. `"{a:1}"`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::{FeatureContainerSchema, FieldKind};

/// The value held by a single field inside a [`FeatureValue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Scalar(String),
    Enum { name: String, number: i32 },
    Message(FeatureValue),
}

/// A populated feature container instance: the resolver's "dynamic message".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureValue(pub BTreeMap<String, FieldValue>);

impl FeatureValue {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
        self.0.insert(field.into(), value);
    }

    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    /// Returns the mutable sub-message for `field`, creating an empty one
    /// (and normalizing a mismatched existing entry) if necessary.
    pub fn message_mut(&mut self, field: &str) -> &mut FeatureValue {
        let entry = self
            .0
            .entry(field.to_string())
            .or_insert_with(|| FieldValue::Message(FeatureValue::empty()));
        if !matches!(entry, FieldValue::Message(_)) {
            *entry = FieldValue::Message(FeatureValue::empty());
        }
        match entry {
            FieldValue::Message(m) => m,
            _ => unreachable!("just normalized to Message above"),
        }
    }

    /// Overlays `overlay` onto `self`: scalar and enum fields overwrite
    /// when present on `overlay`; message-typed fields recurse. There is no
    /// append/repeated case because feature containers forbid repeated
    /// fields.
    pub fn merge_from(&mut self, overlay: &FeatureValue) {
        for (key, value) in &overlay.0 {
            match value {
                FieldValue::Message(sub) => {
                    let target = self.message_mut(key);
                    target.merge_from(sub);
                }
                other => {
                    self.0.insert(key.clone(), other.clone());
                }
            }
        }
    }
}

/// Splits a flat text-format message body into `(key, raw_value)` pairs,
/// respecting brace nesting so a nested message value isn't split on its
/// own internal commas. Accepts an optional enclosing `{ }`.
fn split_text_message(text: &str) -> std::result::Result<Vec<(String, String)>, String> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .unwrap_or(trimmed);

    let mut pairs = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for c in inner.chars() {
        match c {
            '{' => {
                depth += 1;
                current.push(c);
            }
            '}' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                if !current.trim().is_empty() {
                    pairs.push(current.clone());
                }
                current.clear();
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        pairs.push(current);
    }

    let mut result = Vec::new();
    for raw_pair in pairs {
        let mut split = raw_pair.splitn(2, ':');
        let key = split.next().unwrap_or("").trim().to_string();
        let value = split.next().unwrap_or("").trim().to_string();
        if key.is_empty() {
            return Err(format!("expected 'key: value' pair, got '{}'", raw_pair.trim()));
        }
        result.push((key, value));
    }
    Ok(result)
}

/// Parses `text` as a single field value of the given `kind`. Message kinds
/// are never parsed this way — they go through [`merge_text_into`], which
/// composes additively across editions rather than overwriting.
pub fn parse_field_value(kind: &FieldKind, text: &str) -> std::result::Result<FieldValue, String> {
    match kind {
        FieldKind::Scalar => Ok(FieldValue::Scalar(text.trim().to_string())),
        FieldKind::Enum(schema) => {
            let name = text.trim();
            match schema.value_named(name) {
                Some(v) => Ok(FieldValue::Enum {
                    name: v.name.clone(),
                    number: v.number,
                }),
                None => Err(format!(
                    "unknown enum value '{}' for enum '{}'",
                    name, schema.full_name
                )),
            }
        }
        FieldKind::Message(_) => Err(
            "message-typed fields must be merged as text, not parsed as a single value".to_string(),
        ),
    }
}

/// Merges the text-format message `text` into `target`, resolving each
/// `key: value` pair against `schema`'s fields and recursing into
/// message-typed sub-fields.
pub fn merge_text_into(
    schema: &FeatureContainerSchema,
    target: &mut FeatureValue,
    text: &str,
) -> std::result::Result<(), String> {
    for (key, raw_value) in split_text_message(text)? {
        let field = schema
            .field(&key)
            .ok_or_else(|| format!("unknown field '{}' in container '{}'", key, schema.full_name))?;

        match &field.kind {
            FieldKind::Message(sub_schema) => {
                let sub_target = target.message_mut(&field.name);
                merge_text_into(sub_schema, sub_target, &raw_value)?;
            }
            other_kind => {
                let value = parse_field_value(other_kind, &raw_value)?;
                target.set(field.name.clone(), value);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EnumSchema, EnumValueSchema, FieldSchema, Target};

    fn base_with_scalar_and_message() -> FeatureContainerSchema {
        let nested = FeatureContainerSchema::new("Nested")
            .with_field(FieldSchema::new("a", FieldKind::Scalar).with_target(Target::Field))
            .with_field(FieldSchema::new("b", FieldKind::Scalar).with_target(Target::Field));

        FeatureContainerSchema::new("Base")
            .with_field(FieldSchema::new("x", FieldKind::Scalar).with_target(Target::Field))
            .with_field(FieldSchema::new("m", FieldKind::Message(nested)).with_target(Target::Field))
    }

    #[test]
    fn split_flat_message_body() {
        let pairs = split_text_message("{a:1, b:2}").unwrap();
        assert_eq!(pairs, vec![("a".into(), "1".into()), ("b".into(), "2".into())]);
    }

    #[test]
    fn split_respects_nested_braces() {
        let pairs = split_text_message("{m:{a:1, b:2}, x:foo}").unwrap();
        assert_eq!(
            pairs,
            vec![("m".into(), "{a:1, b:2}".into()), ("x".into(), "foo".into())]
        );
    }

    #[test]
    fn merge_text_composes_nested_message_additively() {
        let schema = base_with_scalar_and_message();
        let mut target = FeatureValue::empty();

        merge_text_into(&schema, &mut target, "{m:{a:1}}").unwrap();
        merge_text_into(&schema, &mut target, "{m:{b:2}}").unwrap();

        let m = target.get("m").unwrap();
        match m {
            FieldValue::Message(inner) => {
                assert_eq!(inner.get("a"), Some(&FieldValue::Scalar("1".into())));
                assert_eq!(inner.get("b"), Some(&FieldValue::Scalar("2".into())));
            }
            other => panic!("expected message, got {:?}", other),
        }
    }

    #[test]
    fn scalar_merge_overwrites() {
        let schema = base_with_scalar_and_message();
        let mut target = FeatureValue::empty();
        merge_text_into(&schema, &mut target, "{x:A}").unwrap();
        merge_text_into(&schema, &mut target, "{x:B}").unwrap();
        assert_eq!(target.get("x"), Some(&FieldValue::Scalar("B".into())));
    }

    #[test]
    fn unknown_field_in_text_is_rejected() {
        let schema = base_with_scalar_and_message();
        let mut target = FeatureValue::empty();
        let err = merge_text_into(&schema, &mut target, "{nope:1}").unwrap_err();
        assert!(err.contains("nope"));
    }

    #[test]
    fn enum_field_resolves_to_its_number() {
        let enum_schema = EnumSchema {
            full_name: "Visibility".into(),
            values: vec![
                EnumValueSchema { name: "UNKNOWN".into(), number: 0 },
                EnumValueSchema { name: "PUBLIC".into(), number: 1 },
            ],
        };
        let value = parse_field_value(&FieldKind::Enum(enum_schema), "PUBLIC").unwrap();
        assert_eq!(value, FieldValue::Enum { name: "PUBLIC".into(), number: 1 });
    }

    #[test]
    fn unknown_enum_name_is_rejected() {
        let enum_schema = EnumSchema {
            full_name: "Visibility".into(),
            values: vec![EnumValueSchema { name: "PUBLIC".into(), number: 1 }],
        };
        assert!(parse_field_value(&FieldKind::Enum(enum_schema), "NOPE").is_err());
    }

    #[test]
    fn merge_from_recurses_and_overwrites_scalars() {
        let mut base = FeatureValue::empty();
        base.set("x", FieldValue::Scalar("1".into()));
        base.message_mut("m").set("a", FieldValue::Scalar("1".into()));

        let mut overlay = FeatureValue::empty();
        overlay.set("x", FieldValue::Scalar("2".into()));
        overlay.message_mut("m").set("b", FieldValue::Scalar("2".into()));

        base.merge_from(&overlay);

        assert_eq!(base.get("x"), Some(&FieldValue::Scalar("2".into())));
        match base.get("m").unwrap() {
            FieldValue::Message(m) => {
                assert_eq!(m.get("a"), Some(&FieldValue::Scalar("1".into())));
                assert_eq!(m.get("b"), Some(&FieldValue::Scalar("2".into())));
            }
            other => panic!("expected message, got {:?}", other),
        }
    }
}
