//! Feature container schema types
//!
//! A feature container schema describes the *shape* of a family of feature
//! fields: the base container plus whatever language/tool-specific
//! extensions hang off it. This module only models shape — it never
//! interprets what a feature means, per the resolver's stated non-goals.

use serde::{Deserialize, Serialize};

/// A descriptor kind a feature can apply to. Mirrors the common target
/// kinds a schema-feature system needs to discriminate (protobuf's own
/// feature system distinguishes the same set); the resolver never inspects
/// *which* targets are declared, only that at least one is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Target {
    File,
    Message,
    Field,
    Oneof,
    Enum,
    EnumEntry,
    Service,
    Method,
}

/// Field cardinality. Feature containers forbid `Repeated` and `Required`
/// fields; they are representable here so `SchemaValidator` can name the
/// violation precisely instead of refusing to parse the schema at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    Singular,
    Repeated,
    Required,
}

/// An enum value: a name paired with its wire number. Number `0` is always
/// the reserved "unknown" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValueSchema {
    pub name: String,
    pub number: i32,
}

/// An enum type usable as a feature field's kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumSchema {
    pub full_name: String,
    pub values: Vec<EnumValueSchema>,
}

impl EnumSchema {
    pub fn value_named(&self, name: &str) -> Option<&EnumValueSchema> {
        self.values.iter().find(|v| v.name == name)
    }

    pub fn value_numbered(&self, number: i32) -> Option<&EnumValueSchema> {
        self.values.iter().find(|v| v.number == number)
    }
}

/// The type of value a field holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Scalar,
    Message(FeatureContainerSchema),
    Enum(EnumSchema),
}

impl FieldKind {
    pub fn is_message(&self) -> bool {
        matches!(self, FieldKind::Message(_))
    }
}

/// A `(edition, text-value)` pair: the field's value from `edition` onward,
/// until a later entry supersedes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditionDefault {
    pub edition: String,
    pub value: String,
}

/// A single feature field on a container schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    pub full_name: String,
    pub kind: FieldKind,
    pub cardinality: Cardinality,
    /// Must be non-empty; `SchemaValidator` rejects an empty list.
    pub targets: Vec<Target>,
    pub edition_defaults: Vec<EditionDefault>,
    /// Name of the oneof this field belongs to, if any. Feature containers
    /// forbid oneofs; this exists so the violation can be reported with
    /// the offending oneof name rather than refused at parse time.
    pub oneof: Option<String>,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            full_name: name.clone(),
            name,
            kind,
            cardinality: Cardinality::Singular,
            targets: Vec::new(),
            edition_defaults: Vec::new(),
            oneof: None,
        }
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }

    pub fn with_default(mut self, edition: impl Into<String>, value: impl Into<String>) -> Self {
        self.edition_defaults.push(EditionDefault {
            edition: edition.into(),
            value: value.into(),
        });
        self
    }

    pub fn repeated(mut self) -> Self {
        self.cardinality = Cardinality::Repeated;
        self
    }

    pub fn required(mut self) -> Self {
        self.cardinality = Cardinality::Required;
        self
    }

    pub fn in_oneof(mut self, oneof: impl Into<String>) -> Self {
        self.oneof = Some(oneof.into());
        self
    }
}

/// A message-shaped feature container: the base, or the payload of an
/// extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureContainerSchema {
    pub full_name: String,
    pub fields: Vec<FieldSchema>,
    /// Extensions declared directly on this container. Non-empty only for
    /// the base; an extension's own payload must have none, or
    /// `SchemaValidator` rejects it as `NestedExtensions`.
    pub extensions: Vec<ExtensionSchema>,
}

impl FeatureContainerSchema {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            fields: Vec::new(),
            extensions: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_extension(mut self, extension: ExtensionSchema) -> Self {
        self.extensions.push(extension);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A message-typed extension field hanging off a base container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionSchema {
    /// The extension's own field descriptor (name, targets, edition
    /// defaults live on the base container's view of the extension).
    pub field: FieldSchema,
    /// Full name of the schema this extension extends.
    pub extendee: String,
    /// The extension's payload schema (its own fields).
    pub payload: FeatureContainerSchema,
}

impl ExtensionSchema {
    pub fn new(field: FieldSchema, extendee: impl Into<String>, payload: FeatureContainerSchema) -> Self {
        Self {
            field,
            extendee: extendee.into(),
            payload,
        }
    }
}
