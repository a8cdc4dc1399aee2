//! Chain name aliasing.
//!
//! The two catalogs spell chains differently ("eth" vs "Ethereum", "sol" vs
//! "solana", "near" vs "Near Protocol"). Every comparison between chain names
//! goes through the alias groups below so canonicalization, expansion and
//! matching share one table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A bucket of raw spellings that all mean the same chain.
#[derive(Debug)]
struct AliasGroup {
    canonical: &'static str,
    /// Every accepted lower-case spelling, canonical first.
    spellings: &'static [&'static str],
}

const ALIAS_GROUPS: &[AliasGroup] = &[
    AliasGroup {
        canonical: "sol",
        spellings: &["sol", "solana"],
    },
    AliasGroup {
        canonical: "eth",
        spellings: &["eth", "ethereum"],
    },
    AliasGroup {
        canonical: "near",
        spellings: &["near", "near protocol"],
    },
];

/// Normalized lower-case chain identifier (e.g. `eth`, `sol`, `near`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalChain(String);

impl CanonicalChain {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalChain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CanonicalChain {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CanonicalChain {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn group_of(spelling: &str) -> Option<&'static AliasGroup> {
    ALIAS_GROUPS
        .iter()
        .find(|group| group.spellings.iter().any(|s| *s == spelling))
}

/// Canonicalize a free-form chain name. Unknown chains pass through
/// lower-cased and trimmed as their own canonical form.
pub fn canonicalize(raw: &str) -> CanonicalChain {
    let lower = normalize(raw);
    match group_of(&lower) {
        Some(group) => CanonicalChain(group.canonical.to_string()),
        None => CanonicalChain(lower),
    }
}

/// All raw spellings that refer to `canonical`, for membership lookups.
///
/// `sol` expands to `["sol", "solana"]`; a chain outside the alias table
/// expands to itself.
pub fn expand(canonical: &str) -> Vec<String> {
    let lower = normalize(canonical);
    match ALIAS_GROUPS.iter().find(|group| group.canonical == lower) {
        Some(group) => group.spellings.iter().map(|s| s.to_string()).collect(),
        None => vec![lower],
    }
}

/// Whether two raw chain names denote the same chain.
///
/// Either side may be canonical or a raw catalog spelling. Reflexive and
/// symmetric; transitivity only holds within a single alias group.
pub fn matches(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    if a == b {
        return true;
    }
    match (group_of(&a), group_of(&b)) {
        (Some(ga), Some(gb)) => std::ptr::eq(ga, gb),
        _ => false,
    }
}
