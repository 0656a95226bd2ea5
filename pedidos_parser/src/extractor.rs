//! Product-list isolation.
//!
//! Chat orders arrive wrapped in conversation: a greeting, a "quiero pedir",
//! a "gracias" at the end, sometimes a question on its own line. The
//! extractor peels that off and keeps the lines that look like items.

use pedidos_core::{FoldedText, compose, fold};
use tracing::debug;

use crate::units::UnitRegistry;
use crate::vocab::{self, LEADING_CHATTER, TRAILING_CLOSING};

/// Keeps the product lines of a message.
#[derive(Debug, Clone, Copy)]
pub struct ProductListExtractor<'a> {
    registry: &'a UnitRegistry,
}

impl<'a> ProductListExtractor<'a> {
    #[must_use]
    pub const fn new(registry: &'a UnitRegistry) -> Self {
        Self { registry }
    }

    /// Best-effort product list of `text`, one item line per output line.
    ///
    /// Never returns less than the cleaned message: when no line looks like
    /// an item (`lechuga`), the cleaned message is returned as is.
    #[must_use]
    pub fn extract(&self, text: &str) -> String {
        let composed = compose(text);
        let cleaned = strip_chatter(&composed);

        let kept: Vec<&str> = cleaned
            .lines()
            .filter_map(|line| self.product_line(line))
            .collect();

        if kept.is_empty() {
            debug!("No line carries product data, keeping whole message");
            return cleaned.to_string();
        }
        kept.join("\n")
    }

    /// The line without its chatter, if it should be kept.
    fn product_line<'l>(&self, line: &'l str) -> Option<&'l str> {
        if line.contains(['?', '¿']) {
            return None;
        }
        let line = strip_chatter(line);
        if line.is_empty() {
            return None;
        }
        self.carries_product_data(line).then_some(line)
    }

    fn carries_product_data(&self, line: &str) -> bool {
        if line.chars().any(|c| c.is_ascii_digit()) {
            return true;
        }
        line.split_whitespace().any(|word| {
            let word = fold(word.trim_matches(|c: char| !c.is_alphanumeric()));
            !word.is_empty() && (vocab::is_quantity_word(&word) || self.registry.is_known(&word))
        })
    }
}

/// `text` without opening chatter and closing phrases, trimmed.
fn strip_chatter(text: &str) -> &str {
    let folded = FoldedText::new(text);
    let haystack = folded.folded();
    let start = LEADING_CHATTER.find(haystack).map_or(0, |m| m.end());
    let end = TRAILING_CLOSING
        .find_at(haystack, start)
        .map_or(haystack.len(), |m| m.start());
    folded.raw_slice(start..end).trim()
}
