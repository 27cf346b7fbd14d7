//! Feature Resolver
//!
//! Computes the effective set of schema "features" that apply to a
//! descriptor element at a particular schema edition. A schema language
//! evolves default behaviors (field presence, repeated-field encoding, UTF-8
//! validation, ...) at well-defined edition boundaries rather than bumping a
//! single monolithic version number; this crate is the algorithmic core
//! that turns a family of feature definitions into per-edition defaults and
//! merges them against explicit overrides declared on a descriptor tree.
//!
//! ## Pipeline
//!
//! - [`validator`] rejects feature container shapes the resolver cannot
//!   handle (oneofs, required/repeated fields, untargeted fields, malformed
//!   extensions).
//! - [`compiler`] compiles a validated base schema plus its extensions into
//!   a serialized [`defaults::FeatureSetDefaults`] table, one row per
//!   relevant edition.
//! - [`resolver::ResolverInstance`] binds that table to a single edition and
//!   exposes the three-layer `defaults -> parent -> child` merge.
//! - [`edition`] is the total order over edition identifiers threaded
//!   through all three.
//!
//! ## What this crate does not do
//!
//! It does not define what any individual feature *means*, decode wire
//! formats, cache compiled defaults across processes, or support concurrent
//! mutation of a compiled table after construction — those are the
//! responsibility of the surrounding descriptor/codegen tooling that
//! consumes this library.

pub mod compiler;
pub mod defaults;
pub mod edition;
pub mod error;
pub mod resolver;
pub mod schema;
pub mod validator;
pub mod value;

pub use compiler::compile_defaults;
pub use defaults::{FeatureSetDefaults, FeatureSetDefaultsRow};
pub use edition::{edition_cmp, less as edition_less, Edition};
pub use error::{FeatureResolverError, Result};
pub use resolver::ResolverInstance;
pub use schema::{
    Cardinality, EditionDefault, EnumSchema, EnumValueSchema, ExtensionSchema,
    FeatureContainerSchema, FieldKind, FieldSchema, Target,
};
pub use value::{FeatureValue, FieldValue};
