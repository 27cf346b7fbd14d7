//! Schema validation
//!
//! Inspects a feature container's schema and the extension fields that hang
//! off it, rejecting shapes the resolver cannot handle. Both operations are
//! pure and side-effect-free.

use crate::error::{FeatureResolverError, Result};
use crate::schema::{Cardinality, ExtensionSchema, FeatureContainerSchema};

/// Validates that `schema` satisfies the feature-container invariants: no
/// oneofs, no required fields, no repeated fields, and every field carries
/// at least one target.
pub fn validate_container(schema: &FeatureContainerSchema) -> Result<()> {
    for field in &schema.fields {
        if let Some(oneof) = &field.oneof {
            return Err(FeatureResolverError::UnsupportedShape {
                schema: schema.full_name.clone(),
                reason: format!("field '{}' belongs to oneof '{}'", field.full_name, oneof),
            });
        }
        if field.cardinality == Cardinality::Required {
            return Err(FeatureResolverError::UnsupportedShape {
                schema: schema.full_name.clone(),
                reason: format!("field '{}' is required", field.full_name),
            });
        }
        if field.cardinality == Cardinality::Repeated {
            return Err(FeatureResolverError::UnsupportedShape {
                schema: schema.full_name.clone(),
                reason: format!("field '{}' is repeated", field.full_name),
            });
        }
        if field.targets.is_empty() {
            return Err(FeatureResolverError::UnsupportedShape {
                schema: schema.full_name.clone(),
                reason: format!("field '{}' has no targets", field.full_name),
            });
        }
    }
    Ok(())
}

/// Validates that `extension` is a legal extension of `base`: singular,
/// message-typed, and carrying no further extensions of its own.
pub fn validate_extension(base: &FeatureContainerSchema, extension: &ExtensionSchema) -> Result<()> {
    if extension.extendee != base.full_name {
        return Err(FeatureResolverError::NotAnExtensionOf {
            base: base.full_name.clone(),
            extension: extension.field.full_name.clone(),
            actual: extension.extendee.clone(),
        });
    }

    if !extension.field.kind.is_message() {
        return Err(FeatureResolverError::NotMessageTyped {
            extension: extension.field.full_name.clone(),
        });
    }

    if extension.field.cardinality == Cardinality::Repeated {
        return Err(FeatureResolverError::RepeatedExtension {
            extension: extension.field.full_name.clone(),
        });
    }

    if !extension.payload.extensions.is_empty() {
        return Err(FeatureResolverError::NestedExtensions {
            extension: extension.field.full_name.clone(),
        });
    }

    Ok(())
}

/// Looks up `name` among `base`'s declared extensions, validating the match
/// before returning it.
///
/// Fails with [`FeatureResolverError::UnknownExtension`] if `base` declares
/// no extension field named `name`.
pub fn resolve_extension<'a>(
    base: &'a FeatureContainerSchema,
    name: &str,
) -> Result<&'a ExtensionSchema> {
    let found = base
        .extensions
        .iter()
        .find(|ext| ext.field.name == name)
        .ok_or_else(|| FeatureResolverError::UnknownExtension {
            base: base.full_name.clone(),
            extension: name.to_string(),
        })?;
    validate_extension(base, found)?;
    Ok(found)
}
