//! Line splitting.

use pedidos_core::fold;

use crate::quantity::parse_token;
use crate::vocab;

const DELIMITERS: &[char] = &[',', ';', '|'];

/// Splits one line of a product list into item descriptions.
///
/// Explicit delimiters (`,` `;` `|`) win. Without them, the conjunction `y`
/// splits the line only when a quantity follows it, so `sal y pimienta`
/// stays whole while `3 kilos de papa y 2 de cebolla` becomes two items.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineSegmenter;

impl LineSegmenter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn segment(&self, line: &str) -> Vec<String> {
        let pieces = if has_delimiter(line) {
            split_on_delimiters(line)
        } else {
            split_on_conjunction(line)
        };
        pieces
            .into_iter()
            .map(|piece| piece.trim().to_string())
            .filter(|piece| !piece.is_empty())
            .collect()
    }
}

/// A comma between two digits is a decimal separator.
fn is_delimiter(chars: &[char], i: usize) -> bool {
    match chars[i] {
        ',' => {
            let before = i.checked_sub(1).map(|j| chars[j]);
            let after = chars.get(i + 1).copied();
            !(before.is_some_and(|c| c.is_ascii_digit()) && after.is_some_and(|c| c.is_ascii_digit()))
        }
        c => DELIMITERS.contains(&c),
    }
}

fn has_delimiter(line: &str) -> bool {
    let chars: Vec<char> = line.chars().collect();
    (0..chars.len()).any(|i| is_delimiter(&chars, i))
}

fn split_on_delimiters(line: &str) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let mut pieces = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if is_delimiter(&chars, i) {
            pieces.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    pieces.push(current);
    pieces
}

fn split_on_conjunction(line: &str) -> Vec<String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let folded: Vec<String> = words.iter().map(|w| fold(w)).collect();

    let mut pieces = Vec::new();
    let mut start = 0;
    for i in 1..words.len().saturating_sub(1) {
        if folded[i] == "y" && splits_at(&folded[i - 1], &folded[i + 1]) {
            pieces.push(words[start..i].join(" "));
            start = i + 1;
        }
    }
    pieces.push(words[start..].join(" "));
    pieces
}

/// Whether `prev y next` separates two items.
fn splits_at(prev: &str, next: &str) -> bool {
    let starts_quantity = next.starts_with(|c: char| c.is_ascii_digit())
        || vocab::is_quantity_word(next)
        || vocab::is_article(next);
    if !starts_quantity {
        return false;
    }
    // `2 y medio`, `dos y cuarto`
    if parse_token(prev).is_some() && vocab::fraction_word(next).is_some() {
        return false;
    }
    // `treinta y dos`
    if vocab::tens_word(prev).is_some() && vocab::number_word(next).is_some() {
        return false;
    }
    true
}
