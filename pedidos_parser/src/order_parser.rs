use pedidos_core::ParseResult;
use tracing::{debug, info};

use crate::extractor::ProductListExtractor;
use crate::segment::{ParserConfig, SegmentParser};
use crate::segmenter::LineSegmenter;
use crate::units::UnitRegistry;

/// Read every order line out of a message.
///
/// Extracts the product list, splits each line into segments and parses
/// each segment. Lines keep their order of appearance. The result depends
/// only on `text`, the vocabulary and the configuration.
#[must_use]
pub fn parse_order(text: &str, registry: &UnitRegistry, config: &ParserConfig) -> ParseResult {
    let list = ProductListExtractor::new(registry).extract(text);
    let segmenter = LineSegmenter::new();
    let parser = SegmentParser::new(registry, config);

    let mut result = ParseResult::default();
    for line in list.lines() {
        for segment in segmenter.segment(line) {
            let parsed = parser.parse(&segment);
            if let Some(unit) = parsed.unknown_unit {
                info!(unit = %unit, segment = %segment, "Unknown unit");
                result.unknown_units.insert(unit);
            }
            result.items.push(parsed.item);
        }
    }

    debug!(
        items = result.items.len(),
        unparsed = result.unparsed_count(),
        unknown_units = result.unknown_units.len(),
        "Parsed order"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_only_message_has_no_items() {
        let registry = UnitRegistry::new();
        let result = parse_order("Hola, buenos días", &registry, &ParserConfig::default());
        assert!(result.is_empty());
        assert!(result.unknown_units.is_empty());
    }

    #[test]
    fn collects_unknown_units_once() {
        let registry = UnitRegistry::new();
        let result = parse_order(
            "2 bolsones de acelga\n1 bolsón de espinaca\n3 bolsones de rúcula",
            &registry,
            &ParserConfig::default(),
        );
        assert_eq!(result.items.len(), 3);
        assert_eq!(
            result.unknown_units.iter().collect::<Vec<_>>(),
            vec!["bolsones", "bolsón"]
        );
    }
}
