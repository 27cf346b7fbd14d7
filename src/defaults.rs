//! The compiled `FeatureSetDefaults` artifact.
//!
//! A structured record of `minimum_edition`, `maximum_edition`, and an
//! ordered `defaults` list of `{edition, features}` rows, each row's
//! `features` a serialized feature container. Serialization goes through
//! `serde_json` rather than a bespoke binary format — there is no wire
//! protocol upstream of this crate to match, so JSON keeps the artifact
//! human-inspectable without adding a hand-rolled encoder.

use serde::{Deserialize, Serialize};

use crate::value::FeatureValue;

/// One row of the compiled defaults table: the fully-populated feature
/// container for a single edition, serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSetDefaultsRow {
    pub edition: String,
    pub features: Vec<u8>,
}

impl FeatureSetDefaultsRow {
    /// Builds a row by serializing `features`. Serialization of this
    /// crate's own `FeatureValue` type (string keys, string/i32 leaves)
    /// cannot fail, so this is infallible.
    pub fn new(edition: impl Into<String>, features: &FeatureValue) -> Self {
        let bytes = serde_json::to_vec(features)
            .expect("FeatureValue serializes to JSON unconditionally");
        Self {
            edition: edition.into(),
            features: bytes,
        }
    }

    /// Deserializes this row's `features` back into a [`FeatureValue`].
    /// Fails only if `features` was corrupted after compilation — rows
    /// produced by [`crate::compiler::compile`] always decode cleanly.
    pub fn decode(&self) -> std::result::Result<FeatureValue, serde_json::Error> {
        serde_json::from_slice(&self.features)
    }
}

/// The compiled table of per-edition defaults over `[minimum_edition,
/// maximum_edition]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSetDefaults {
    pub minimum_edition: String,
    pub maximum_edition: String,
    pub defaults: Vec<FeatureSetDefaultsRow>,
}

impl FeatureSetDefaults {
    /// Serializes the whole table, used to round-trip it across a process
    /// boundary.
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("FeatureSetDefaults serializes to JSON unconditionally")
    }

    pub fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
