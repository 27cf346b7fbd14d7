//! Edition ordering
//!
//! Editions are opaque dotted strings (`"2023"`, `"2023.1"`, `"99997_TEST"`).
//! They are not semantic versions: components may be alphanumeric, and the
//! ordering is defined purely structurally, so we cannot reuse `semver` the
//! way the rest of the platform reuses it for release versions. This module
//! is the one place that ordering is implemented; every other component
//! threads through it rather than comparing edition strings directly.

use std::cmp::Ordering;
use std::fmt;

/// Splits an edition string into its dot-separated components.
fn components(edition: &str) -> Vec<&str> {
    edition.split('.').collect()
}

/// Compares two edition identifiers under the total order described in the
/// data model: component length dominates (so `"2"` < `"10"`), then
/// lexicographic comparison, then shorter-is-less when one is a prefix of
/// the other.
pub fn edition_cmp(a: &str, b: &str) -> Ordering {
    let a_parts = components(a);
    let b_parts = components(b);

    for (ac, bc) in a_parts.iter().zip(b_parts.iter()) {
        if ac.len() != bc.len() {
            return ac.len().cmp(&bc.len());
        }
        if ac != bc {
            return ac.cmp(bc);
        }
    }
    a_parts.len().cmp(&b_parts.len())
}

/// Returns `true` iff `a` strictly precedes `b` under [`edition_cmp`].
pub fn less(a: &str, b: &str) -> bool {
    edition_cmp(a, b) == Ordering::Less
}

/// Returns `true` iff `edition` falls within `[minimum, maximum]` inclusive.
pub fn in_range(edition: &str, minimum: &str, maximum: &str) -> bool {
    !less(edition, minimum) && !less(maximum, edition)
}

/// A newtype wrapper giving edition strings `Ord`/`PartialOrd` under
/// [`edition_cmp`], so editions can be used directly as sort or `BTreeMap`
/// keys without callers re-deriving the comparator each time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Edition(pub String);

impl Edition {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Edition {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Edition {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialOrd for Edition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edition {
    fn cmp(&self, other: &Self) -> Ordering {
        edition_cmp(&self.0, &other.0)
    }
}
