//! Property tests for the parser and the unit vocabulary.

use pedidos_core::Strategy as Rule;
use pedidos_parser::{LearnOutcome, ParserConfig, SegmentParser, UnitRegistry, parse_order};
use proptest::prelude::*;

const PRODUCTS: &[&str] = &["tomates", "papas", "cebollas", "manzanas", "zanahorias", "lechuga"];
const UNITS: &[&str] = &["kilo", "kilos", "kg", "caja", "cajas", "bolsa", "atados", "docena"];
const FRACTION_WORDS: &[(&str, f64)] = &[("medio", 0.5), ("media", 0.5), ("cuarto", 0.25), ("tercio", 0.33)];

fn product() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(PRODUCTS)
}

fn unit() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(UNITS)
}

fn fraction_word() -> impl Strategy<Value = (&'static str, f64)> {
    proptest::sample::select(FRACTION_WORDS)
}

fn message() -> impl Strategy<Value = String> {
    prop::collection::vec((1u32..50, unit(), product()), 1..6).prop_map(|lines| {
        lines
            .iter()
            .map(|(q, u, p)| format!("{q} {u} de {p}"))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn assert_close(actual: Option<f64>, expected: f64) -> Result<(), TestCaseError> {
    let actual = actual.unwrap_or(f64::NAN);
    prop_assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    Ok(())
}

proptest! {
    /// Parsing is a pure function of text, vocabulary and configuration.
    #[test]
    fn test_parse_is_deterministic(text in message()) {
        let registry = UnitRegistry::new();
        let config = ParserConfig::default();
        let first = parse_order(&text, &registry, &config);
        let second = parse_order(&text, &registry, &config);
        prop_assert_eq!(first, second);
    }

    /// Arbitrary input never panics and every line keeps its text.
    #[test]
    fn test_any_text_parses(text in "\\PC{0,80}") {
        let registry = UnitRegistry::new();
        let result = parse_order(&text, &registry, &ParserConfig::default());
        for item in &result.items {
            prop_assert!(!item.raw_segment.is_empty());
            if item.is_unparsed() {
                prop_assert!(!item.product.is_empty());
            }
        }
    }

    /// Every `int a/b` shape sums the integer and the fraction.
    #[test]
    fn test_mixed_fraction_sums(whole in 1u32..20, num in 1u32..8, den in 2u32..9, u in unit(), p in product()) {
        let registry = UnitRegistry::new();
        let config = ParserConfig::default();
        let parser = SegmentParser::new(&registry, &config);
        let expected = f64::from(whole) + f64::from(num) / f64::from(den);

        let shapes = [
            (format!("{whole} {num}/{den} {p}"), Rule::MixedFraction),
            (format!("{whole} {num}/{den} {u} {p}"), Rule::MixedFractionUnit),
            (format!("{whole} {num}/{den} {u} de {p}"), Rule::MixedFractionUnitDe),
            (format!("{whole} {num}/{den} de {p}"), Rule::MixedFractionDe),
        ];
        for (text, strategy) in shapes {
            let parsed = parser.parse(&text);
            prop_assert_eq!(parsed.item.strategy, strategy, "{}", text);
            assert_close(parsed.item.quantity.amount(), expected)?;
            prop_assert_eq!(parsed.item.product.as_str(), p);
        }
    }

    /// `int y fraction ...` sums the integer and the fraction word.
    #[test]
    fn test_compound_fraction_sums(whole in 1u32..20, (word, value) in fraction_word(), u in unit(), p in product()) {
        let registry = UnitRegistry::new();
        let config = ParserConfig::default();
        let parser = SegmentParser::new(&registry, &config);

        let with_unit = parser.parse(&format!("{whole} y {word} {u} de {p}"));
        prop_assert_eq!(with_unit.item.strategy, Rule::CompoundFractionUnitDe);
        assert_close(with_unit.item.quantity.amount(), f64::from(whole) + value)?;

        let without_unit = parser.parse(&format!("{whole} y {word} de {p}"));
        prop_assert_eq!(without_unit.item.strategy, Rule::CompoundFraction);
        assert_close(without_unit.item.quantity.amount(), f64::from(whole) + value)?;
    }

    /// Learning the same spelling twice stores it once.
    #[test]
    fn test_learn_is_idempotent(canonical in "[a-z]{3,8}", token in "[a-z]{3,8}") {
        let mut registry = UnitRegistry::new();
        let first = registry.learn(&canonical, &token);
        let version = registry.version();
        let second = registry.learn(&canonical, &token);
        prop_assert_eq!(registry.version(), version);
        if matches!(first, Ok(LearnOutcome::Created | LearnOutcome::Added)) {
            prop_assert_eq!(second, Ok(LearnOutcome::AlreadyPresent));
            let count = registry
                .variations_of(&canonical)
                .iter()
                .filter(|form| **form == token)
                .count();
            prop_assert_eq!(count, 1);
        }
    }

    /// Singular and plural differ for every unit not marked invariant.
    #[test]
    fn test_plural_differs_from_singular(quantity in 0.01f64..100.0) {
        prop_assume!((quantity - 1.0).abs() > 1e-6);
        let registry = UnitRegistry::new();
        for unit in registry.definitions() {
            let one = registry.normalize(&unit.canonical, 1.0);
            let many = registry.normalize(&unit.canonical, quantity);
            prop_assert_eq!(one.as_deref(), Some(unit.canonical.as_str()));
            if !unit.invariant {
                prop_assert_ne!(one, many);
            }
        }
    }
}
