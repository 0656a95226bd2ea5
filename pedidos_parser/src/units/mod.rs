//! Unit vocabulary.
//!
//! Each canonical unit groups the spellings senders use for it (`kg`,
//! `kilos`, `kilogramo`...). Lookups are case and accent insensitive.
//!
//! A [`UnitRegistry`] is read through an immutable [`RegistrySnapshot`]
//! while messages are parsed. Unknown unit tokens seen during parsing are
//! collected as [`LearnedUnits`] and merged back by whoever owns the
//! stored vocabulary, so parsing never mutates shared state.

mod builtin;
mod plural;
mod snapshot;

use std::collections::HashMap;

use pedidos_core::{fingerprint, fold};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub use builtin::builtin_units;
pub use plural::{is_one, pluralize};
pub use snapshot::{LearnedUnits, MergeSummary, RegistrySnapshot};

/// A canonical unit and its surface forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDefinition {
    /// Singular display name.
    pub canonical: String,

    /// Other spellings. The canonical name always matches itself and need
    /// not be listed.
    #[serde(default)]
    pub variations: Vec<String>,

    /// Added by learning rather than shipped with the vocabulary.
    #[serde(default)]
    pub custom: bool,

    /// Explicit plural, for names the pluralizer gets wrong.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,

    /// Singular and plural are the same word.
    #[serde(default)]
    pub invariant: bool,
}

impl UnitDefinition {
    #[must_use]
    pub fn new(canonical: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            variations: Vec::new(),
            custom: false,
            plural: None,
            invariant: false,
        }
    }

    #[must_use]
    pub fn with_variations(mut self, variations: &[&str]) -> Self {
        self.variations
            .extend(variations.iter().map(|v| (*v).to_string()));
        self
    }

    #[must_use]
    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    #[must_use]
    pub const fn invariant(mut self) -> Self {
        self.invariant = true;
        self
    }

    #[must_use]
    pub const fn custom(mut self) -> Self {
        self.custom = true;
        self
    }

    /// Plural display name.
    #[must_use]
    pub fn plural_form(&self) -> String {
        if self.invariant {
            return self.canonical.clone();
        }
        self.plural
            .clone()
            .unwrap_or_else(|| pluralize(&self.canonical))
    }

    /// Display name agreeing with `quantity`.
    #[must_use]
    pub fn form_for(&self, quantity: f64) -> String {
        if is_one(quantity) {
            self.canonical.clone()
        } else {
            self.plural_form()
        }
    }

    /// Whether `token` is the canonical name or one of the variations.
    #[must_use]
    pub fn has_variation(&self, token: &str) -> bool {
        let folded = fold(token.trim());
        self.surface_forms().any(|form| fold(form) == folded)
    }

    fn surface_forms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical.as_str()).chain(self.variations.iter().map(String::as_str))
    }

    fn validate(&self) -> Result<()> {
        if self.canonical.trim().is_empty() {
            return Err(Error::EmptyCanonical);
        }
        if self.variations.iter().any(|v| v.trim().is_empty()) {
            return Err(Error::EmptyVariation(self.canonical.clone()));
        }
        Ok(())
    }
}

/// Result of [`UnitRegistry::learn`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LearnOutcome {
    /// A new canonical unit was created.
    Created,
    /// The token was appended to an existing unit.
    Added,
    /// Nothing to do.
    AlreadyPresent,
    /// The token already belongs to another unit; nothing changed.
    Conflict { existing: String },
}

/// The unit vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<UnitDefinition>", into = "Vec<UnitDefinition>")]
pub struct UnitRegistry {
    units: Vec<UnitDefinition>,
    /// Folded surface form -> position in `units`.
    index: HashMap<String, usize>,
}

impl UnitRegistry {
    /// Registry holding the built-in vocabulary.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for unit in builtin_units() {
            registry.insert(unit);
        }
        registry
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            units: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a registry from stored definitions.
    ///
    /// A spelling claimed by two units stays with the first one.
    pub fn from_definitions(definitions: Vec<UnitDefinition>) -> Result<Self> {
        let mut registry = Self::empty();
        for definition in definitions {
            definition.validate()?;
            registry.insert(definition);
        }
        Ok(registry)
    }

    #[must_use]
    pub fn definitions(&self) -> &[UnitDefinition] {
        &self.units
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Whether `token` is a known spelling of any unit.
    #[must_use]
    pub fn is_known(&self, token: &str) -> bool {
        self.lookup(token).is_some()
    }

    /// The unit `token` spells.
    #[must_use]
    pub fn lookup(&self, token: &str) -> Option<&UnitDefinition> {
        let folded = fold(token.trim());
        self.index.get(&folded).map(|&i| &self.units[i])
    }

    /// The unit whose canonical name is `canonical`.
    #[must_use]
    pub fn get(&self, canonical: &str) -> Option<&UnitDefinition> {
        let folded = fold(canonical.trim());
        self.units.iter().find(|unit| fold(&unit.canonical) == folded)
    }

    /// All spellings of a canonical unit, canonical name first.
    ///
    /// Empty when the unit is not registered.
    #[must_use]
    pub fn variations_of(&self, canonical: &str) -> Vec<String> {
        self.get(canonical)
            .map(|unit| unit.surface_forms().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Canonical form of `token` agreeing with `quantity`, if known.
    #[must_use]
    pub fn normalize(&self, token: &str, quantity: f64) -> Option<String> {
        self.lookup(token).map(|unit| unit.form_for(quantity))
    }

    /// Display form of a unit named by configuration (`kilo`, `unidad`).
    ///
    /// Falls back to the pluralizer when the vocabulary does not hold it.
    #[must_use]
    pub fn display_form(&self, name: &str, quantity: f64) -> String {
        self.normalize(name, quantity).unwrap_or_else(|| {
            if is_one(quantity) {
                name.to_string()
            } else {
                pluralize(name)
            }
        })
    }

    /// Record that `token` spells `canonical_guess`.
    ///
    /// Appends the token when the guess names an existing unit, by its
    /// canonical name or any of its spellings. Otherwise creates
    /// a custom unit seeded with both. Calling it again with the same
    /// arguments changes nothing.
    pub fn learn(&mut self, canonical_guess: &str, token: &str) -> Result<LearnOutcome> {
        let canonical_guess = canonical_guess.trim();
        let token = token.trim();
        if canonical_guess.is_empty() {
            return Err(Error::EmptyCanonical);
        }
        if token.is_empty() {
            return Err(Error::EmptyVariation(canonical_guess.to_string()));
        }

        let folded_guess = fold(canonical_guess);
        let existing = self
            .units
            .iter()
            .position(|unit| fold(&unit.canonical) == folded_guess)
            .or_else(|| self.index.get(&folded_guess).copied());

        let outcome = match existing {
            Some(position) => self.append_variation(position, token),
            None => self.create_unit(canonical_guess, token),
        };
        debug!(canonical = canonical_guess, token, ?outcome, "Learn unit");
        Ok(outcome)
    }

    /// Apply a batch of learned spellings.
    pub fn merge(&mut self, learned: &LearnedUnits) -> MergeSummary {
        let mut summary = MergeSummary::default();
        for (canonical, token) in learned.iter() {
            match self.learn(canonical, token) {
                Ok(LearnOutcome::Created) => summary.created += 1,
                Ok(LearnOutcome::Added) => summary.added += 1,
                Ok(LearnOutcome::AlreadyPresent) => summary.unchanged += 1,
                Ok(LearnOutcome::Conflict { existing }) => {
                    warn!(canonical, token, existing = %existing, "Learned unit conflicts with vocabulary");
                    summary.conflicts.push(token.to_string());
                }
                Err(e) => {
                    warn!(canonical, token, "Skipping learned unit: {e}");
                    summary.conflicts.push(token.to_string());
                }
            }
        }
        summary
    }

    /// Content fingerprint, independent of definition order.
    #[must_use]
    pub fn version(&self) -> String {
        let mut lines: Vec<String> = self
            .units
            .iter()
            .map(|unit| {
                let mut forms: Vec<String> = unit.variations.iter().map(|v| fold(v)).collect();
                forms.sort();
                format!(
                    "{}|{}|{}|{}",
                    fold(&unit.canonical),
                    unit.plural_form(),
                    unit.custom,
                    forms.join(",")
                )
            })
            .collect();
        lines.sort();
        fingerprint(lines.iter().map(String::as_str))
    }

    /// Freeze the current vocabulary for a batch of messages.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot::new(self.clone())
    }

    fn append_variation(&mut self, position: usize, token: &str) -> LearnOutcome {
        let folded = fold(token);
        match self.index.get(&folded) {
            Some(&owner) if owner == position => LearnOutcome::AlreadyPresent,
            Some(&owner) => LearnOutcome::Conflict {
                existing: self.units[owner].canonical.clone(),
            },
            None => {
                self.units[position].variations.push(token.to_lowercase());
                self.index.insert(folded, position);
                LearnOutcome::Added
            }
        }
    }

    fn create_unit(&mut self, canonical: &str, token: &str) -> LearnOutcome {
        for form in [canonical, token] {
            if let Some(&owner) = self.index.get(&fold(form)) {
                return LearnOutcome::Conflict {
                    existing: self.units[owner].canonical.clone(),
                };
            }
        }
        let mut unit = UnitDefinition::new(canonical.to_lowercase()).custom();
        // A guess that already ends in `s` is the plural the sender wrote.
        if fold(canonical).ends_with('s') {
            unit.invariant = true;
        }
        if fold(token) != fold(canonical) {
            unit.variations.push(token.to_lowercase());
        }
        self.insert(unit);
        LearnOutcome::Created
    }

    fn insert(&mut self, unit: UnitDefinition) {
        let position = self.units.len();
        for form in unit.surface_forms() {
            let folded = fold(form.trim());
            match self.index.get(&folded) {
                Some(&owner) if owner != position => {
                    warn!(
                        form,
                        unit = %unit.canonical,
                        owner = %self.units[owner].canonical,
                        "Spelling already belongs to another unit"
                    );
                }
                Some(_) => {}
                None => {
                    self.index.insert(folded, position);
                }
            }
        }
        self.units.push(unit);
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<UnitDefinition>> for UnitRegistry {
    type Error = Error;

    fn try_from(definitions: Vec<UnitDefinition>) -> Result<Self> {
        Self::from_definitions(definitions)
    }
}

impl From<UnitRegistry> for Vec<UnitDefinition> {
    fn from(registry: UnitRegistry) -> Self {
        registry.units
    }
}
