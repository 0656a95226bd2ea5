//! Read-only registry views and learned-unit deltas.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Deref;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UnitRegistry;

/// An immutable registry shared by every message of a batch.
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    registry: Arc<UnitRegistry>,
    version: String,
    taken_at: DateTime<Utc>,
}

impl RegistrySnapshot {
    #[must_use]
    pub fn new(registry: UnitRegistry) -> Self {
        let version = registry.version();
        Self {
            registry: Arc::new(registry),
            version,
            taken_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    /// Content fingerprint of the vocabulary at snapshot time.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub const fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }
}

impl Deref for RegistrySnapshot {
    type Target = UnitRegistry;

    fn deref(&self) -> &Self::Target {
        &self.registry
    }
}

/// Spellings observed during parsing, keyed by canonical guess.
///
/// Recording the same pair twice keeps one entry, so deltas from several
/// messages or several workers can be combined freely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LearnedUnits {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl LearnedUnits {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect unknown unit tokens, each as its own canonical guess.
    #[must_use]
    pub fn from_unknown<'a>(tokens: impl IntoIterator<Item = &'a String>) -> Self {
        let mut learned = Self::new();
        for token in tokens {
            learned.record_unknown(token);
        }
        learned
    }

    /// Record that `token` spells `canonical_guess`.
    pub fn record(&mut self, canonical_guess: &str, token: &str) {
        let canonical = canonical_guess.trim().to_lowercase();
        let token = token.trim().to_lowercase();
        if canonical.is_empty() || token.is_empty() {
            return;
        }
        self.entries.entry(canonical).or_default().insert(token);
    }

    /// Record a token no unit claimed, as its own canonical guess.
    pub fn record_unknown(&mut self, token: &str) {
        self.record(token, token);
    }

    /// Combine another delta into this one.
    pub fn extend(&mut self, other: Self) {
        for (canonical, tokens) in other.entries {
            self.entries.entry(canonical).or_default().extend(tokens);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of `(canonical, token)` pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    /// `(canonical, token)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(canonical, tokens)| {
            tokens
                .iter()
                .map(move |token| (canonical.as_str(), token.as_str()))
        })
    }
}

/// Counts returned by [`UnitRegistry::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSummary {
    pub created: usize,
    pub added: usize,
    pub unchanged: usize,
    /// Tokens that were not applied.
    pub conflicts: Vec<String>,
}

impl MergeSummary {
    /// Whether the registry changed.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.created > 0 || self.added > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reports_registry_version() {
        let registry = UnitRegistry::new();
        let version = registry.version();
        let snapshot = registry.snapshot();
        assert_eq!(snapshot.version(), version);
        assert!(snapshot.is_known("kg"));
    }

    #[test]
    fn snapshot_is_not_affected_by_later_learning() {
        let mut registry = UnitRegistry::new();
        let snapshot = registry.snapshot();
        let _ = registry.learn("bolsón", "bolsones");
        assert!(!snapshot.is_known("bolsones"));
        assert!(registry.is_known("bolsones"));
    }

    #[test]
    fn learned_units_deduplicate() {
        let mut learned = LearnedUnits::new();
        learned.record_unknown("Bolsón");
        learned.record_unknown("bolsón");
        assert_eq!(learned.len(), 1);
        assert_eq!(learned.iter().collect::<Vec<_>>(), vec![("bolsón", "bolsón")]);
    }

    #[test]
    fn extend_merges_tokens_per_canonical() {
        let mut a = LearnedUnits::new();
        a.record("kilo", "kgr");
        let mut b = LearnedUnits::new();
        b.record("kilo", "kgr");
        b.record("kilo", "kilogr");
        a.extend(b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn merge_applies_delta_once() {
        let mut registry = UnitRegistry::new();
        let mut learned = LearnedUnits::new();
        learned.record_unknown("bolsón");
        learned.record("kilo", "kgr");

        let first = registry.merge(&learned);
        assert_eq!(first.created, 1);
        assert_eq!(first.added, 1);
        assert!(first.changed());

        let second = registry.merge(&learned);
        assert_eq!(second.unchanged, 2);
        assert!(!second.changed());
    }
}
