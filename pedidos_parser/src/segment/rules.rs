//! The cascade rules, one function per strategy.
//!
//! Each rule either recognises the whole segment or returns `None`. Rules
//! only look at folded words; product text is taken from the raw tokens.

use pedidos_core::Strategy;

use super::tokens::Segment;
use crate::quantity::{leading_quantity, parse_words, trailing_quantity};
use crate::vocab;

/// Where the unit of a match comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSource {
    /// The token at this index.
    Explicit(usize),
    /// The configured weight unit.
    Weight,
    /// The configured count unit.
    Count,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub quantity: f64,
    pub unit: UnitSource,
    pub product: String,
}

impl Candidate {
    fn new(quantity: f64, unit: UnitSource, product: String) -> Self {
        Self {
            quantity,
            unit,
            product,
        }
    }
}

pub type Rule = fn(&Segment<'_>) -> Option<Candidate>;

/// Rules in evaluation order. The first match wins.
pub const CASCADE: [(Strategy, Rule); 15] = [
    (Strategy::MixedFraction, mixed_fraction),
    (Strategy::MixedFractionUnit, mixed_fraction_unit),
    (Strategy::MixedFractionUnitDe, mixed_fraction_unit_de),
    (Strategy::MixedFractionDe, mixed_fraction_de),
    (Strategy::CompoundFractionUnitDe, compound_fraction_unit_de),
    (Strategy::CompoundFraction, compound_fraction),
    (Strategy::WordQuantityUnitDe, word_quantity_unit_de),
    (Strategy::WordQuantityDe, word_quantity_de),
    (Strategy::QuantityUnitDe, quantity_unit_de),
    (Strategy::QuantityUnit, quantity_unit),
    (Strategy::QuantityProduct, quantity_product),
    (Strategy::ProductQuantityUnit, product_quantity_unit),
    (Strategy::ProductQuantity, product_quantity),
    (Strategy::UnitDeProduct, unit_de_product),
    (Strategy::BareProduct, bare_product),
];

/// `int a/b` in the first two words.
fn mixed_number(segment: &Segment<'_>) -> Option<f64> {
    parse_words(&[segment.word(0), segment.word(1)])
}

/// `num y {medio|media|cuarto|tercio}` in the first three words.
fn compound_number(segment: &Segment<'_>) -> Option<f64> {
    let tail = segment.word(2);
    vocab::fraction_word(tail)?;
    parse_words(&[segment.word(0), "y", tail])
}

/// A fraction word or an indefinite article in the first word.
fn word_number(segment: &Segment<'_>) -> Option<f64> {
    let head = segment.word(0);
    vocab::fraction_word(head).or_else(|| vocab::is_article(head).then_some(1.0))
}

fn mixed_fraction(segment: &Segment<'_>) -> Option<Candidate> {
    let quantity = mixed_number(segment)?;
    if segment.is_de(2) || segment.is_unit(2) {
        return None;
    }
    let product = segment.product(2..segment.len())?;
    Some(Candidate::new(quantity, UnitSource::Weight, product))
}

fn mixed_fraction_unit(segment: &Segment<'_>) -> Option<Candidate> {
    let quantity = mixed_number(segment)?;
    if !segment.is_unit(2) || segment.is_de(3) {
        return None;
    }
    let product = segment.product(3..segment.len())?;
    Some(Candidate::new(quantity, UnitSource::Explicit(2), product))
}

fn mixed_fraction_unit_de(segment: &Segment<'_>) -> Option<Candidate> {
    let quantity = mixed_number(segment)?;
    if !segment.is_unit(2) || !segment.is_de(3) {
        return None;
    }
    let product = segment.product(4..segment.len())?;
    Some(Candidate::new(quantity, UnitSource::Explicit(2), product))
}

fn mixed_fraction_de(segment: &Segment<'_>) -> Option<Candidate> {
    let quantity = mixed_number(segment)?;
    if !segment.is_de(2) {
        return None;
    }
    let product = segment.product(3..segment.len())?;
    Some(Candidate::new(quantity, UnitSource::Weight, product))
}

fn compound_fraction_unit_de(segment: &Segment<'_>) -> Option<Candidate> {
    let quantity = compound_number(segment)?;
    if !segment.is_unit(3) || !segment.is_de(4) {
        return None;
    }
    let product = segment.product(5..segment.len())?;
    Some(Candidate::new(quantity, UnitSource::Explicit(3), product))
}

fn compound_fraction(segment: &Segment<'_>) -> Option<Candidate> {
    let quantity = compound_number(segment)?;
    if segment.is_unit(3) {
        return None;
    }
    let product = segment.product(3..segment.len())?;
    Some(Candidate::new(quantity, UnitSource::Weight, product))
}

fn word_quantity_unit_de(segment: &Segment<'_>) -> Option<Candidate> {
    let quantity = word_number(segment)?;
    if !segment.is_unit(1) || !segment.is_de(2) {
        return None;
    }
    let product = segment.product(3..segment.len())?;
    Some(Candidate::new(quantity, UnitSource::Explicit(1), product))
}

fn word_quantity_de(segment: &Segment<'_>) -> Option<Candidate> {
    let quantity = word_number(segment)?;
    if !segment.is_de(1) {
        return None;
    }
    let product = segment.product(2..segment.len())?;
    Some(Candidate::new(quantity, UnitSource::Weight, product))
}

/// The unit slot of `qty unit de product` accepts any single word, known or
/// not. Unknown ones are reported back to the caller.
fn quantity_unit_de(segment: &Segment<'_>) -> Option<Candidate> {
    let (quantity, at) = leading_quantity(&segment.words())?;
    let unit = segment.word(at);
    if unit.is_empty() || unit == "de" || !unit.chars().all(char::is_alphabetic) {
        return None;
    }
    if !segment.is_de(at + 1) {
        return None;
    }
    let product = segment.product(at + 2..segment.len())?;
    Some(Candidate::new(quantity, UnitSource::Explicit(at), product))
}

fn quantity_unit(segment: &Segment<'_>) -> Option<Candidate> {
    let (quantity, at) = leading_quantity(&segment.words())?;
    if !segment.is_unit(at) {
        return None;
    }
    let product = segment.product(at + 1..segment.len())?;
    Some(Candidate::new(quantity, UnitSource::Explicit(at), product))
}

fn quantity_product(segment: &Segment<'_>) -> Option<Candidate> {
    let (quantity, at) = leading_quantity(&segment.words())?;
    if segment.is_unit(at) {
        return None;
    }
    let product = segment.product(at..segment.len())?;
    Some(Candidate::new(quantity, UnitSource::Count, product))
}

fn product_quantity_unit(segment: &Segment<'_>) -> Option<Candidate> {
    let last = segment.len().checked_sub(1)?;
    if !segment.is_unit(last) {
        return None;
    }
    let words = segment.words();
    let (quantity, span) = trailing_quantity(&words[..last])?;
    let product = segment.product(0..last - span)?;
    Some(Candidate::new(quantity, UnitSource::Explicit(last), product))
}

fn product_quantity(segment: &Segment<'_>) -> Option<Candidate> {
    let (quantity, span) = trailing_quantity(&segment.words())?;
    let end = segment.len() - span;
    let last_product_word = end.checked_sub(1)?;
    if segment.is_unit(last_product_word) {
        return None;
    }
    let product = segment.product(0..end)?;
    Some(Candidate::new(quantity, UnitSource::Count, product))
}

fn unit_de_product(segment: &Segment<'_>) -> Option<Candidate> {
    if !segment.is_unit(0) || !segment.is_de(1) {
        return None;
    }
    let product = segment.product(2..segment.len())?;
    Some(Candidate::new(1.0, UnitSource::Explicit(0), product))
}

fn bare_product(segment: &Segment<'_>) -> Option<Candidate> {
    if segment.is_empty() || segment.has_digit() || segment.is_unit(0) {
        return None;
    }
    let product = segment.product(0..segment.len())?;
    Some(Candidate::new(1.0, UnitSource::Count, product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitRegistry;

    fn first_match(text: &str) -> Option<(Strategy, Candidate)> {
        let registry = UnitRegistry::new();
        let segment = Segment::new(text, &registry);
        CASCADE
            .iter()
            .find_map(|(strategy, rule)| rule(&segment).map(|c| (*strategy, c)))
    }

    fn strategy_of(text: &str) -> Option<Strategy> {
        first_match(text).map(|(strategy, _)| strategy)
    }

    #[test]
    fn cascade_is_in_strategy_order() {
        let positions: Vec<u8> = CASCADE.iter().map(|(s, _)| s.position()).collect();
        assert_eq!(positions, (1..=15).collect::<Vec<u8>>());
    }

    #[test]
    fn mixed_fraction_family() {
        assert_eq!(strategy_of("1 1/2 tomates"), Some(Strategy::MixedFraction));
        assert_eq!(strategy_of("1 1/2 kilo tomates"), Some(Strategy::MixedFractionUnit));
        assert_eq!(
            strategy_of("1 1/2 kilo de tomates"),
            Some(Strategy::MixedFractionUnitDe)
        );
        assert_eq!(strategy_of("1 1/2 de tomates"), Some(Strategy::MixedFractionDe));
    }

    #[test]
    fn compound_fraction_family() {
        assert_eq!(
            strategy_of("2 y medio kilos de papas"),
            Some(Strategy::CompoundFractionUnitDe)
        );
        assert_eq!(strategy_of("2 y medio de papas"), Some(Strategy::CompoundFraction));
        assert_eq!(strategy_of("dos y cuarto papas"), Some(Strategy::CompoundFraction));
    }

    #[test]
    fn compound_without_de_falls_to_quantity_unit() {
        let (strategy, candidate) = first_match("2 y medio kilo papas").unwrap_or_else(|| {
            panic!("segment should match");
        });
        assert_eq!(strategy, Strategy::QuantityUnit);
        assert!((candidate.quantity - 2.5).abs() < 1e-9);
        assert_eq!(candidate.unit, UnitSource::Explicit(3));
    }

    #[test]
    fn word_quantity_family() {
        assert_eq!(
            strategy_of("medio kilo de cebollas"),
            Some(Strategy::WordQuantityUnitDe)
        );
        assert_eq!(
            strategy_of("una caja de uvas"),
            Some(Strategy::WordQuantityUnitDe)
        );
        assert_eq!(strategy_of("medio de cebollas"), Some(Strategy::WordQuantityDe));
    }

    #[test]
    fn quantity_first_family() {
        assert_eq!(strategy_of("3 kilos de tomates"), Some(Strategy::QuantityUnitDe));
        assert_eq!(strategy_of("3 kilos tomates"), Some(Strategy::QuantityUnit));
        assert_eq!(strategy_of("5 pepinos"), Some(Strategy::QuantityProduct));
        assert_eq!(strategy_of("tres docenas de huevos"), Some(Strategy::QuantityUnitDe));
    }

    #[test]
    fn unknown_unit_only_matches_with_de() {
        let (strategy, candidate) = first_match("2 bolsones de acelga").unwrap_or_else(|| {
            panic!("segment should match");
        });
        assert_eq!(strategy, Strategy::QuantityUnitDe);
        assert_eq!(candidate.unit, UnitSource::Explicit(1));
        assert_eq!(candidate.product, "acelga");
    }

    #[test]
    fn product_first_family() {
        assert_eq!(strategy_of("tomates 3 kilos"), Some(Strategy::ProductQuantityUnit));
        assert_eq!(strategy_of("pepinos 5"), Some(Strategy::ProductQuantity));
        assert_eq!(strategy_of("papa 1 1/2 kilo"), Some(Strategy::ProductQuantityUnit));
    }

    #[test]
    fn quantityless_family() {
        assert_eq!(strategy_of("kilo de tomates"), Some(Strategy::UnitDeProduct));
        assert_eq!(strategy_of("lechuga"), Some(Strategy::BareProduct));
        assert_eq!(strategy_of("sal y pimienta"), Some(Strategy::BareProduct));
    }

    #[test]
    fn zero_and_overflowing_mixed_numbers_fall_through() {
        assert_eq!(strategy_of("0 0/3 tomates"), None);
        assert_eq!(strategy_of("0 0/3 kilo de tomates"), None);
        assert_eq!(strategy_of("0 y medio kilo de papas"), Some(Strategy::CompoundFractionUnitDe));
        assert_eq!(strategy_of(&format!("{} 1/2 tomates", "9".repeat(400))), None);
    }

    #[test]
    fn unreadable_segments_match_nothing() {
        assert_eq!(strategy_of("kilos 3"), None);
        assert_eq!(strategy_of("3 kilos"), None);
        assert_eq!(strategy_of("kilos"), None);
        assert_eq!(strategy_of("a12b"), None);
    }
}
