//! Single-segment parsing.
//!
//! A segment is one item description such as `3 kilos de tomates`. It is
//! cleaned, tokenized and run through an ordered cascade of rules; the first
//! rule that recognises it decides quantity, unit and product. A segment no
//! rule recognises becomes an explicit unparsed line.

mod rules;
mod tokens;

use pedidos_core::{OrderLineItem, Quantity, Strategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::units::UnitRegistry;
use rules::{CASCADE, Candidate, UnitSource};
pub use tokens::clean_segment;
use tokens::Segment;

/// Units assumed when a segment names none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Unit of fractional quantities without a unit (`medio de cebollas`).
    #[serde(default = "default_weight_unit")]
    pub weight_unit: String,
    /// Unit of counted products (`5 pepinos`, `lechuga`).
    #[serde(default = "default_count_unit")]
    pub count_unit: String,
}

fn default_weight_unit() -> String {
    "kilo".to_string()
}

fn default_count_unit() -> String {
    "unidad".to_string()
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            weight_unit: default_weight_unit(),
            count_unit: default_count_unit(),
        }
    }
}

/// Result of matching a segment against the cascade.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentOutcome {
    Matched {
        strategy: Strategy,
        quantity: f64,
        unit: String,
        product: String,
        /// Set when the unit token is not in the vocabulary.
        unknown_unit: Option<String>,
    },
    Unparsed {
        /// First vocabulary unit found in the segment, if any.
        unit_hint: Option<String>,
    },
}

/// One parsed segment.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSegment {
    pub item: OrderLineItem,
    pub unknown_unit: Option<String>,
}

/// Runs the cascade against a fixed vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct SegmentParser<'a> {
    registry: &'a UnitRegistry,
    config: &'a ParserConfig,
}

impl<'a> SegmentParser<'a> {
    #[must_use]
    pub const fn new(registry: &'a UnitRegistry, config: &'a ParserConfig) -> Self {
        Self { registry, config }
    }

    /// Parse one segment into an order line.
    #[must_use]
    pub fn parse(&self, segment: &str) -> ParsedSegment {
        let raw_segment = segment.trim().to_string();
        match self.classify(segment) {
            SegmentOutcome::Matched {
                strategy,
                quantity,
                unit,
                product,
                unknown_unit,
            } => ParsedSegment {
                item: OrderLineItem {
                    quantity: Quantity::Amount(quantity),
                    unit,
                    product,
                    raw_segment,
                    strategy,
                },
                unknown_unit,
            },
            SegmentOutcome::Unparsed { unit_hint } => ParsedSegment {
                item: OrderLineItem::unparsed(raw_segment, unit_hint.unwrap_or_default()),
                unknown_unit: None,
            },
        }
    }

    /// Match `segment` against the cascade without building an order line.
    #[must_use]
    pub fn classify(&self, segment: &str) -> SegmentOutcome {
        let segment = Segment::new(segment, self.registry);
        let matched = CASCADE
            .iter()
            .find_map(|(strategy, rule)| rule(&segment).map(|candidate| (*strategy, candidate)));

        let Some((strategy, candidate)) = matched else {
            debug!(segment = %segment.text, "No strategy matched");
            return SegmentOutcome::Unparsed {
                unit_hint: self.unit_hint(&segment),
            };
        };

        debug!(
            segment = %segment.text,
            strategy = strategy.as_str(),
            "Segment matched"
        );
        let (unit, unknown_unit) = self.resolve_unit(&segment, &candidate);
        SegmentOutcome::Matched {
            strategy,
            quantity: candidate.quantity,
            unit,
            product: candidate.product,
            unknown_unit,
        }
    }

    fn resolve_unit(&self, segment: &Segment<'_>, candidate: &Candidate) -> (String, Option<String>) {
        let quantity = candidate.quantity;
        match candidate.unit {
            UnitSource::Weight => (self.registry.display_form(&self.config.weight_unit, quantity), None),
            UnitSource::Count => (self.registry.display_form(&self.config.count_unit, quantity), None),
            UnitSource::Explicit(index) => {
                if let Some(unit) = self.registry.normalize(segment.word(index), quantity) {
                    return (unit, None);
                }
                let raw = segment.raw_lower(index);
                (raw.clone(), Some(raw))
            }
        }
    }

    fn unit_hint(&self, segment: &Segment<'_>) -> Option<String> {
        segment
            .words()
            .into_iter()
            .find_map(|word| self.registry.lookup(word))
            .map(|unit| unit.canonical.clone())
    }
}
