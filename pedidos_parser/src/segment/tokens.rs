//! Segment cleanup and tokenizing.

use once_cell::sync::Lazy;
use pedidos_core::fold;
use regex::Regex;

use crate::units::UnitRegistry;

/// Bullets and list numbering: `•`, `-`, `*`, `1.`, `1)`, `(a)`, `[1]`.
#[expect(clippy::expect_used, reason = "Static regex pattern")]
static LIST_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[-*•·▪‣◦>–—]+\s*|\d{1,3}[.)]\s+|\(\w{1,3}\)\s*|\[\w{1,3}\]\s*)")
        .expect("Static regex pattern is guaranteed to be valid")
});

/// A digit glued to the word after it: `3kg`, `1/2kilo`.
#[expect(clippy::expect_used, reason = "Static regex pattern")]
static GLUED_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d)(\p{L})").expect("Static regex pattern is guaranteed to be valid")
});

const TRAILING_PUNCTUATION: &[char] = &['.', '!', ':', ';', ',', '¡', '?', '¿'];

/// Normalize an item description before matching.
#[must_use]
pub fn clean_segment(segment: &str) -> String {
    let trimmed = segment.trim();
    let unlisted = LIST_MARKER.replace(trimmed, "");
    let spaced = GLUED_UNIT.replace_all(&unlisted, "$1 $2");
    spaced
        .trim()
        .trim_end_matches(TRAILING_PUNCTUATION)
        .trim()
        .to_string()
}

/// A word of the segment, as written and folded.
#[derive(Debug, Clone)]
pub struct Token {
    pub raw: String,
    pub folded: String,
}

/// A cleaned segment ready for the cascade.
#[derive(Debug)]
pub struct Segment<'r> {
    pub text: String,
    pub tokens: Vec<Token>,
    /// Folded words, parallel to `tokens`.
    words: Vec<String>,
    registry: &'r UnitRegistry,
}

impl<'r> Segment<'r> {
    #[must_use]
    pub fn new(segment: &str, registry: &'r UnitRegistry) -> Self {
        let text = clean_segment(segment);
        let tokens: Vec<Token> = text
            .split_whitespace()
            .map(|word| Token {
                raw: word.to_string(),
                folded: fold_word(word, registry),
            })
            .collect();
        let words = tokens.iter().map(|t| t.folded.clone()).collect();
        Self {
            text,
            tokens,
            words,
            registry,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Folded words as string slices.
    #[must_use]
    pub fn words(&self) -> Vec<&str> {
        self.words.iter().map(String::as_str).collect()
    }

    /// Folded word at `index`, or `""` past the end.
    #[must_use]
    pub fn word(&self, index: usize) -> &str {
        self.words.get(index).map_or("", String::as_str)
    }

    /// Whether the word at `index` is a known unit spelling.
    #[must_use]
    pub fn is_unit(&self, index: usize) -> bool {
        self.words
            .get(index)
            .is_some_and(|word| self.registry.is_known(word))
    }

    /// Whether the word at `index` is the partitive `de`.
    #[must_use]
    pub fn is_de(&self, index: usize) -> bool {
        self.word(index) == "de"
    }

    #[must_use]
    pub fn has_digit(&self) -> bool {
        self.text.chars().any(|c| c.is_ascii_digit())
    }

    /// Raw words in `range` joined with single spaces, without a leading
    /// partitive `de`. `None` when nothing is left.
    #[must_use]
    pub fn product(&self, range: std::ops::Range<usize>) -> Option<String> {
        let mut tokens = self.tokens.get(range)?;
        if tokens.first().is_some_and(|t| t.folded == "de") {
            tokens = &tokens[1..];
        }
        if tokens.is_empty() {
            return None;
        }
        Some(
            tokens
                .iter()
                .map(|t| t.raw.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    /// Raw word at `index`, lowercased.
    #[must_use]
    pub fn raw_lower(&self, index: usize) -> String {
        self.tokens
            .get(index)
            .map(|t| t.raw.to_lowercase())
            .unwrap_or_default()
    }
}

/// Fold a word, dropping the period of an abbreviated unit (`kg.`).
fn fold_word(word: &str, registry: &UnitRegistry) -> String {
    let folded = fold(word);
    match folded.strip_suffix('.') {
        Some(stem) if registry.is_known(stem) => stem.to_string(),
        _ => folded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_list_markup() {
        assert_eq!(clean_segment("- 3 kilos de papa"), "3 kilos de papa");
        assert_eq!(clean_segment("* 3 kilos de papa"), "3 kilos de papa");
        assert_eq!(clean_segment("• tomates"), "tomates");
        assert_eq!(clean_segment("1. 3 kilos de papa"), "3 kilos de papa");
        assert_eq!(clean_segment("2) cebolla"), "cebolla");
        assert_eq!(clean_segment("(a) cebolla"), "cebolla");
        assert_eq!(clean_segment("[1] cebolla"), "cebolla");
    }

    #[test]
    fn keeps_decimal_quantities() {
        assert_eq!(clean_segment("1.5 kilos de papa"), "1.5 kilos de papa");
        assert_eq!(clean_segment("3 kilos de papa"), "3 kilos de papa");
    }

    #[test]
    fn separates_glued_units() {
        assert_eq!(clean_segment("3kg de papa"), "3 kg de papa");
        assert_eq!(clean_segment("1/2kg tomate"), "1/2 kg tomate");
    }

    #[test]
    fn drops_trailing_punctuation() {
        assert_eq!(clean_segment("3 kilos de papa."), "3 kilos de papa");
        assert_eq!(clean_segment("lechuga!!"), "lechuga");
    }

    #[test]
    fn product_skips_leading_de() {
        let registry = UnitRegistry::new();
        let segment = Segment::new("3 kilos de Tomates Perita", &registry);
        assert_eq!(segment.product(2..4).as_deref(), Some("Tomates Perita"));
        assert_eq!(segment.product(2..3), None);
        assert_eq!(segment.product(5..9), None);
    }

    #[test]
    fn abbreviated_unit_keeps_no_period() {
        let registry = UnitRegistry::new();
        let segment = Segment::new("3 kg. de papa", &registry);
        assert!(segment.is_unit(1));
        assert_eq!(segment.word(1), "kg");
        assert_eq!(Segment::new("3 papa. de", &registry).word(1), "papa.");
    }

    #[test]
    fn unit_checks_use_folded_words() {
        let registry = UnitRegistry::new();
        let segment = Segment::new("2 CAJÓN de uvas", &registry);
        assert!(segment.is_unit(1));
        assert!(segment.is_de(2));
        assert!(!segment.is_unit(3));
    }
}
