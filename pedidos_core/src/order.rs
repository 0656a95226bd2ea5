//! Parsed order lines.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Quantity of an order line.
///
/// `Unparsed` is the explicit marker for "no determinable quantity". It is
/// never collapsed into zero, so a line nobody could read stays visible for
/// a human to repair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Amount(f64),
    Unparsed,
}

impl Quantity {
    /// The numeric amount, if the line was parsed.
    #[must_use]
    pub const fn amount(&self) -> Option<f64> {
        match self {
            Self::Amount(value) => Some(*value),
            Self::Unparsed => None,
        }
    }

    #[must_use]
    pub const fn is_unparsed(&self) -> bool {
        matches!(self, Self::Unparsed)
    }
}

/// The cascade rule that produced an order line.
///
/// Variants are listed in evaluation order; the discriminant is the rule's
/// position in the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Strategy {
    /// `1 1/2 tomates`
    MixedFraction = 1,
    /// `1 1/2 kilo tomates`
    MixedFractionUnit = 2,
    /// `1 1/2 kilo de tomates`
    MixedFractionUnitDe = 3,
    /// `1 1/2 de tomates`
    MixedFractionDe = 4,
    /// `2 y medio kilos de papas`
    CompoundFractionUnitDe = 5,
    /// `2 y medio de papas`
    CompoundFraction = 6,
    /// `medio kilo de cebollas`, `una caja de uvas`
    WordQuantityUnitDe = 7,
    /// `medio de cebollas`
    WordQuantityDe = 8,
    /// `3 kilos de tomates`
    QuantityUnitDe = 9,
    /// `3 kilos tomates`
    QuantityUnit = 10,
    /// `5 pepinos`
    QuantityProduct = 11,
    /// `tomates 3 kilos`
    ProductQuantityUnit = 12,
    /// `pepinos 5`
    ProductQuantity = 13,
    /// `kilo de tomates`
    UnitDeProduct = 14,
    /// `lechuga`
    BareProduct = 15,
    /// Nothing matched.
    Unparsed = 16,
}

impl Strategy {
    /// Position in the cascade, starting at 1.
    #[must_use]
    pub const fn position(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MixedFraction => "mixed_fraction",
            Self::MixedFractionUnit => "mixed_fraction_unit",
            Self::MixedFractionUnitDe => "mixed_fraction_unit_de",
            Self::MixedFractionDe => "mixed_fraction_de",
            Self::CompoundFractionUnitDe => "compound_fraction_unit_de",
            Self::CompoundFraction => "compound_fraction",
            Self::WordQuantityUnitDe => "word_quantity_unit_de",
            Self::WordQuantityDe => "word_quantity_de",
            Self::QuantityUnitDe => "quantity_unit_de",
            Self::QuantityUnit => "quantity_unit",
            Self::QuantityProduct => "quantity_product",
            Self::ProductQuantityUnit => "product_quantity_unit",
            Self::ProductQuantity => "product_quantity",
            Self::UnitDeProduct => "unit_de_product",
            Self::BareProduct => "bare_product",
            Self::Unparsed => "unparsed",
        }
    }
}

/// One structured line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub quantity: Quantity,
    /// Canonical unit name, or the raw lowercase token when the unit is not
    /// in the vocabulary.
    pub unit: String,
    pub product: String,
    /// The segment as the sender wrote it.
    pub raw_segment: String,
    pub strategy: Strategy,
}

impl OrderLineItem {
    /// A line no cascade rule could read.
    ///
    /// The whole segment is kept as the product so the line can be fixed by
    /// hand; `unit` carries whatever unit could still be recognised.
    #[must_use]
    pub fn unparsed(raw_segment: impl Into<String>, unit: impl Into<String>) -> Self {
        let raw_segment = raw_segment.into();
        Self {
            quantity: Quantity::Unparsed,
            unit: unit.into(),
            product: raw_segment.clone(),
            raw_segment,
            strategy: Strategy::Unparsed,
        }
    }

    #[must_use]
    pub const fn is_unparsed(&self) -> bool {
        self.quantity.is_unparsed()
    }
}

/// Everything read out of one message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Lines in order of appearance.
    pub items: Vec<OrderLineItem>,
    /// Unit tokens seen in the message that the vocabulary does not know.
    pub unknown_units: BTreeSet<String>,
}

impl ParseResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of lines that ended up as [`Quantity::Unparsed`].
    #[must_use]
    pub fn unparsed_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_unparsed()).count()
    }
}
