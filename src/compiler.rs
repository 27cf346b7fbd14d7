//! The defaults compiler.
//!
//! Turns a validated base feature container schema plus its extensions into
//! a serialized per-edition defaults table. `compile_defaults` is the only
//! entry point; `fill_defaults` is its per-message, per-edition helper.

use std::collections::BTreeSet;

use crate::defaults::{FeatureSetDefaults, FeatureSetDefaultsRow};
use crate::edition::{edition_cmp, less};
use crate::error::{FeatureResolverError, Result};
use crate::schema::{EditionDefault, ExtensionSchema, FeatureContainerSchema, FieldKind};
use crate::validator::{validate_container, validate_extension};
use crate::value::{merge_text_into, parse_field_value, FeatureValue};

/// Compiles `base` plus `extensions` into a [`FeatureSetDefaults`] table
/// valid over `[min_edition, max_edition]`.
pub fn compile_defaults(
    base: &FeatureContainerSchema,
    extensions: &[ExtensionSchema],
    min_edition: &str,
    max_edition: &str,
) -> Result<FeatureSetDefaults> {
    validate_container(base)?;
    for extension in extensions {
        validate_extension(base, extension)?;
        validate_container(&extension.payload)?;
    }

    let editions = collect_editions(base, extensions, max_edition);

    let mut rows = Vec::with_capacity(editions.len());
    for edition in &editions {
        let mut container = FeatureValue::empty();
        fill_defaults(base, edition, &mut container)?;
        for extension in extensions {
            let nested = container.message_mut(&extension.field.name);
            fill_defaults(&extension.payload, edition, nested)?;
        }
        rows.push(FeatureSetDefaultsRow::new(edition.clone(), &container));
    }

    Ok(FeatureSetDefaults {
        minimum_edition: min_edition.to_string(),
        maximum_edition: max_edition.to_string(),
        defaults: rows,
    })
}

/// Builds the set of editions relevant to compilation: the union of every
/// `edition_defaults` entry across `base` and each extension's payload whose
/// edition is `<= max_edition`, in `EditionOrder`. `min_edition` does not
/// filter this set — a compiled table may carry rows below the minimum, and
/// `ResolverInstance::create` is what actually rejects editions below it.
fn collect_editions(
    base: &FeatureContainerSchema,
    extensions: &[ExtensionSchema],
    max_edition: &str,
) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();

    for field in &base.fields {
        for default in &field.edition_defaults {
            if !less(max_edition, &default.edition) {
                seen.insert(default.edition.clone());
            }
        }
    }
    for extension in extensions {
        for field in &extension.payload.fields {
            for default in &field.edition_defaults {
                if !less(max_edition, &default.edition) {
                    seen.insert(default.edition.clone());
                }
            }
        }
    }

    let mut editions: Vec<String> = seen.into_iter().collect();
    editions.sort_by(|a, b| edition_cmp(a, b));
    editions
}

/// Populates every field of `target` (an instance of `schema`) with its
/// default value at `edition`.
///
/// Message-typed fields compose additively: every qualifying edition default
/// up to and including the latest one `<= edition` is merged, in ascending
/// order, so a composite feature can pick up new sub-fields edition by
/// edition without losing ones set earlier. Scalar and enum fields instead
/// take only the latest qualifying default — there is no notion of
/// "merging" two scalar values.
fn fill_defaults(schema: &FeatureContainerSchema, edition: &str, target: &mut FeatureValue) -> Result<()> {
    for field in &schema.fields {
        target.clear(&field.name);

        let mut field_defaults: Vec<&EditionDefault> = field.edition_defaults.iter().collect();
        field_defaults.sort_by(|a, b| edition_cmp(&a.edition, &b.edition));

        let first_nonmatch = field_defaults
            .iter()
            .position(|default| less(edition, &default.edition))
            .unwrap_or(field_defaults.len());

        if first_nonmatch == 0 {
            return Err(FeatureResolverError::NoDefaultForEdition {
                field: field.full_name.clone(),
                edition: edition.to_string(),
            });
        }

        match &field.kind {
            FieldKind::Message(sub_schema) => {
                let sub_target = target.message_mut(&field.name);
                for default in &field_defaults[..first_nonmatch] {
                    merge_text_into(sub_schema, sub_target, &default.value).map_err(|reason| {
                        FeatureResolverError::MalformedDefault {
                            field: field.full_name.clone(),
                            edition: default.edition.clone(),
                            reason,
                        }
                    })?;
                }
            }
            other_kind => {
                let chosen = field_defaults[first_nonmatch - 1];
                let value = parse_field_value(other_kind, &chosen.value).map_err(|reason| {
                    FeatureResolverError::MalformedDefault {
                        field: field.full_name.clone(),
                        edition: chosen.edition.clone(),
                        reason,
                    }
                })?;
                target.set(field.name.clone(), value);
            }
        }
    }
    Ok(())
}
