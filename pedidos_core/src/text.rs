//! Case and accent folding.
//!
//! Matchers are written once against folded text (lowercase, no acute,
//! grave, circumflex or diaeresis accents) instead of listing accented and
//! unaccented spellings in every pattern. `ñ` is kept: it is a distinct
//! letter, not an accented `n`.
//!
//! Folding maps exactly one char to one char, which is what lets
//! [`FoldedText`] translate a match in the folded text back to the
//! sender's original spelling.

use std::ops::Range;

use unicode_normalization::UnicodeNormalization;

/// Compose `text` to Unicode NFC.
///
/// Applied once when a message enters the engine so that decomposed input
/// (`o` + combining acute) folds the same way as precomposed `ó`.
#[must_use]
pub fn compose(text: &str) -> String {
    text.nfc().collect()
}

/// Fold a single char: lowercase it and drop Spanish accents.
#[must_use]
pub fn fold_char(c: char) -> char {
    let lower = c.to_lowercase().next().unwrap_or(c);
    match lower {
        'á' | 'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        other => other,
    }
}

/// Fold a whole string with [`fold_char`].
#[must_use]
pub fn fold(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

/// A raw string paired with its fold.
///
/// Byte offsets found in [`FoldedText::folded`] can be mapped back to the
/// raw text with [`FoldedText::raw_slice`].
#[derive(Debug, Clone)]
pub struct FoldedText<'a> {
    raw: &'a str,
    folded: String,
    /// Byte offset of every char boundary in `raw`, including the end.
    raw_bounds: Vec<usize>,
    /// Byte offset of every char boundary in `folded`, including the end.
    folded_bounds: Vec<usize>,
}

impl<'a> FoldedText<'a> {
    /// Fold `raw` and index the char boundaries of both strings.
    #[must_use]
    pub fn new(raw: &'a str) -> Self {
        let mut folded = String::with_capacity(raw.len());
        let mut raw_bounds = Vec::with_capacity(raw.len() + 1);
        let mut folded_bounds = Vec::with_capacity(raw.len() + 1);

        for (offset, c) in raw.char_indices() {
            raw_bounds.push(offset);
            folded_bounds.push(folded.len());
            folded.push(fold_char(c));
        }
        raw_bounds.push(raw.len());
        folded_bounds.push(folded.len());

        Self {
            raw,
            folded,
            raw_bounds,
            folded_bounds,
        }
    }

    /// The original text.
    #[must_use]
    pub const fn raw(&self) -> &'a str {
        self.raw
    }

    /// The folded text.
    #[must_use]
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Map a byte range of the folded text to the same chars in the raw text.
    ///
    /// Offsets that fall inside a multi-byte char are rounded up to the
    /// next char boundary.
    #[must_use]
    pub fn raw_slice(&self, range: Range<usize>) -> &'a str {
        let start = self.raw_offset(range.start);
        let end = self.raw_offset(range.end).max(start);
        &self.raw[start..end]
    }

    /// The raw text from a folded offset to the end.
    #[must_use]
    pub fn raw_from(&self, folded_offset: usize) -> &'a str {
        self.raw_slice(folded_offset..self.folded.len())
    }

    fn raw_offset(&self, folded_offset: usize) -> usize {
        let index = match self.folded_bounds.binary_search(&folded_offset) {
            Ok(i) | Err(i) => i,
        };
        self.raw_bounds
            .get(index)
            .copied()
            .unwrap_or(self.raw.len())
    }
}
