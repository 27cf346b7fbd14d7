//! `ResolverInstance`: binds a compiled defaults table to a single edition
//! and exposes the parent/child merge operation.

use std::cmp::Ordering;

use crate::defaults::FeatureSetDefaults;
use crate::edition::{edition_cmp, less};
use crate::error::{FeatureResolverError, Result};
use crate::value::{FeatureValue, FieldValue};

/// A resolver bound to a single edition and a compiled defaults snapshot.
///
/// Immutable after [`ResolverInstance::create`] returns — `merge` takes its
/// inputs by reference and returns a new value, so a single instance is
/// `Send + Sync` and freely shareable across callers without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverInstance {
    defaults: FeatureValue,
}

impl ResolverInstance {
    /// Selects the default row for `edition` out of `compiled`.
    pub fn create(edition: &str, compiled: &FeatureSetDefaults) -> Result<Self> {
        if less(edition, &compiled.minimum_edition) {
            return Err(FeatureResolverError::EditionBelowMin {
                edition: edition.to_string(),
                minimum: compiled.minimum_edition.clone(),
            });
        }
        if less(&compiled.maximum_edition, edition) {
            return Err(FeatureResolverError::EditionAboveMax {
                edition: edition.to_string(),
                maximum: compiled.maximum_edition.clone(),
            });
        }

        for pair in compiled.defaults.windows(2) {
            if edition_cmp(&pair[0].edition, &pair[1].edition) != Ordering::Less {
                return Err(FeatureResolverError::DefaultsNotMonotone {
                    previous: pair[0].edition.clone(),
                    next: pair[1].edition.clone(),
                });
            }
        }

        let first_nonmatch = compiled
            .defaults
            .iter()
            .position(|row| less(edition, &row.edition))
            .unwrap_or(compiled.defaults.len());

        if first_nonmatch == 0 {
            return Err(FeatureResolverError::NoDefaultForEdition {
                field: "<compiled defaults>".to_string(),
                edition: edition.to_string(),
            });
        }

        let row = &compiled.defaults[first_nonmatch - 1];
        let defaults = row.decode().map_err(|error| FeatureResolverError::MalformedDefault {
            field: "<compiled defaults>".to_string(),
            edition: row.edition.clone(),
            reason: error.to_string(),
        })?;

        Ok(Self { defaults })
    }

    /// The edition-default feature set captured at construction time.
    pub fn defaults(&self) -> &FeatureValue {
        &self.defaults
    }

    /// Overlays `parent` then `child` on top of the edition defaults and
    /// validates the result. Precedence is `child > parent > defaults`
    /// because each overlay is applied in that order and scalar overwrite
    /// always wins.
    pub fn merge(&self, parent: &FeatureValue, child: &FeatureValue) -> Result<FeatureValue> {
        let mut merged = self.defaults.clone();
        merged.merge_from(parent);
        merged.merge_from(child);
        validate_merged(&merged)?;
        Ok(merged)
    }
}

/// Walks every field of `msg`, recursing into sub-messages, and fails if any
/// enum-typed field resolved to the reserved zero sentinel. Enum identity
/// (name + number) is carried directly on `FieldValue::Enum`, so no schema
/// lookup is needed to tell an enum field from a scalar one here.
fn validate_merged(msg: &FeatureValue) -> Result<()> {
    validate_merged_at(msg, "")
}

fn validate_merged_at(msg: &FeatureValue, prefix: &str) -> Result<()> {
    for (key, value) in &msg.0 {
        let full_name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            FieldValue::Enum { name, number } if *number == 0 => {
                return Err(FeatureResolverError::UnknownEnumValue {
                    field: full_name,
                    value_name: name.clone(),
                });
            }
            FieldValue::Enum { .. } | FieldValue::Scalar(_) => {}
            FieldValue::Message(sub) => validate_merged_at(sub, &full_name)?,
        }
    }
    Ok(())
}
