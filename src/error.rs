//! Error types for the feature resolver

use thiserror::Error;

/// Result type for feature resolver operations
pub type Result<T> = std::result::Result<T, FeatureResolverError>;

/// Feature resolver errors
///
/// Every variant names the offending entity (a field's full name, an edition
/// string, or an extension's full name) so callers can build an actionable
/// diagnostic without re-deriving context from a bare message string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureResolverError {
    #[error("feature container '{schema}' has unsupported shape: {reason}")]
    UnsupportedShape { schema: String, reason: String },

    #[error("extension '{extension}' is not registered on base '{base}'")]
    UnknownExtension { base: String, extension: String },

    #[error("extension '{extension}' does not extend base '{base}' (extends '{actual}')")]
    NotAnExtensionOf {
        base: String,
        extension: String,
        actual: String,
    },

    #[error("extension '{extension}' must be message-typed")]
    NotMessageTyped { extension: String },

    #[error("extension '{extension}' must not be repeated")]
    RepeatedExtension { extension: String },

    #[error("extension '{extension}' payload must not itself declare extensions")]
    NestedExtensions { extension: String },

    #[error("field '{field}' has no edition default applicable at or before edition '{edition}'")]
    NoDefaultForEdition { field: String, edition: String },

    #[error("field '{field}' has a malformed default for edition '{edition}': {reason}")]
    MalformedDefault {
        field: String,
        edition: String,
        reason: String,
    },

    #[error("edition '{edition}' is below the compiled minimum '{minimum}'")]
    EditionBelowMin { edition: String, minimum: String },

    #[error("edition '{edition}' is above the compiled maximum '{maximum}'")]
    EditionAboveMax { edition: String, maximum: String },

    #[error("compiled defaults are not monotone: '{previous}' does not precede '{next}'")]
    DefaultsNotMonotone { previous: String, next: String },

    #[error("field '{field}' resolved to the reserved zero enum value '{value_name}'")]
    UnknownEnumValue { field: String, value_name: String },
}
