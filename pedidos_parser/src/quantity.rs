//! Quantity tokens.
//!
//! A quantity is one of:
//! - an integer or decimal (`3`, `2.5`, `2,5`)
//! - a vulgar fraction (`1/2`)
//! - a mixed number (`1 1/2`)
//! - a compound with a fraction word (`2 y medio`, `dos y cuarto`)
//! - a number word from one to fifty (`tres`, `veintidos`, `treinta y dos`)
//! - a fraction word (`medio`, `media`, `cuarto`, `tercio`)
//!
//! Every function takes folded words. Text that is not a quantity, or that
//! evaluates to zero, yields `None`; a cascade rule treats that as a
//! non-match and the next rule is tried.

use crate::vocab;

/// Longest quantity phrase, in words (`treinta y dos`).
pub const MAX_QUANTITY_WORDS: usize = 3;

/// Parse a whole quantity phrase.
#[must_use]
pub fn parse_quantity(text: &str) -> Option<f64> {
    let words: Vec<&str> = text.split_whitespace().collect();
    parse_words(&words)
}

/// Parse `words` as exactly one quantity.
#[must_use]
pub fn parse_words(words: &[&str]) -> Option<f64> {
    let value = match words {
        [single] => parse_token(single)?,
        [whole, fraction] => integer(whole)? + vulgar_fraction(fraction)?,
        [head, "y", tail] => compound(head, tail)?,
        _ => return None,
    };
    positive(value)
}

/// The longest quantity at the start of `words`.
///
/// Returns the value and the number of words it spans.
#[must_use]
pub fn leading_quantity(words: &[&str]) -> Option<(f64, usize)> {
    (1..=MAX_QUANTITY_WORDS.min(words.len()))
        .rev()
        .find_map(|len| parse_words(&words[..len]).map(|value| (value, len)))
}

/// The longest quantity at the end of `words`.
#[must_use]
pub fn trailing_quantity(words: &[&str]) -> Option<(f64, usize)> {
    (1..=MAX_QUANTITY_WORDS.min(words.len()))
        .rev()
        .find_map(|len| parse_words(&words[words.len() - len..]).map(|value| (value, len)))
}

/// Parse a single word.
#[must_use]
pub fn parse_token(word: &str) -> Option<f64> {
    let value = decimal(word)
        .or_else(|| vulgar_fraction(word))
        .or_else(|| vocab::number_word(word).map(f64::from))
        .or_else(|| vocab::fraction_word(word))?;
    positive(value)
}

/// A run of ASCII digits.
#[must_use]
pub fn integer(word: &str) -> Option<f64> {
    if word.is_empty() || !word.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    word.parse::<f64>().ok()
}

/// `a/b` with a non-zero denominator.
#[must_use]
pub fn vulgar_fraction(word: &str) -> Option<f64> {
    let (numerator, denominator) = word.split_once('/')?;
    let numerator = integer(numerator)?;
    let denominator = integer(denominator)?;
    (denominator > 0.0).then(|| numerator / denominator)
}

/// Digits with at most one `.` or `,` decimal separator between them.
fn decimal(word: &str) -> Option<f64> {
    match word.find(['.', ',']) {
        None => integer(word),
        Some(pos) => {
            let (whole, rest) = word.split_at(pos);
            let fraction = &rest[1..];
            integer(whole)?;
            integer(fraction)?;
            format!("{whole}.{fraction}").parse::<f64>().ok()
        }
    }
}

/// `2 y medio`, `dos y cuarto`, `treinta y dos`.
fn compound(head: &str, tail: &str) -> Option<f64> {
    if let Some(fraction) = vocab::fraction_word(tail) {
        let whole = integer(head).or_else(|| vocab::number_word(head).map(f64::from))?;
        return Some(whole + fraction);
    }
    let tens = vocab::tens_word(head)?;
    let units = vocab::number_word(tail).filter(|n| (1..=9).contains(n))?;
    Some(f64::from(tens + units))
}

fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: Option<f64>, expected: f64) -> bool {
        actual.is_some_and(|v| (v - expected).abs() < 1e-9)
    }

    #[test]
    fn integers_and_decimals() {
        assert!(approx(parse_quantity("3"), 3.0));
        assert!(approx(parse_quantity("2.5"), 2.5));
        assert!(approx(parse_quantity("2,5"), 2.5));
        assert_eq!(parse_quantity("2,"), None);
        assert_eq!(parse_quantity("1.2.3"), None);
    }

    #[test]
    fn fractions_and_mixed_numbers() {
        assert!(approx(parse_quantity("1/2"), 0.5));
        assert!(approx(parse_quantity("1 1/2"), 1.5));
        assert!(approx(parse_quantity("2 3/4"), 2.75));
        assert_eq!(parse_quantity("1/0"), None);
        assert_eq!(parse_quantity("1.5 1/2"), None);
    }

    #[test]
    fn words() {
        assert!(approx(parse_quantity("tres"), 3.0));
        assert!(approx(parse_quantity("una"), 1.0));
        assert!(approx(parse_quantity("medio"), 0.5));
        assert!(approx(parse_quantity("tercio"), 0.33));
        assert!(approx(parse_quantity("treinta y dos"), 32.0));
        assert!(approx(parse_quantity("cuarenta y nueve"), 49.0));
        assert_eq!(parse_quantity("veinte y dos"), None);
    }

    #[test]
    fn compound_fraction_words() {
        assert!(approx(parse_quantity("2 y medio"), 2.5));
        assert!(approx(parse_quantity("dos y cuarto"), 2.25));
        assert!(approx(parse_quantity("1 y media"), 1.5));
    }

    #[test]
    fn zero_and_garbage_are_not_quantities() {
        assert_eq!(parse_quantity("0"), None);
        assert_eq!(parse_quantity("0/3"), None);
        assert_eq!(parse_quantity("kilos"), None);
        assert_eq!(parse_quantity(""), None);
    }

    #[test]
    fn leading_quantity_is_greedy() {
        let words = ["2", "y", "medio", "kilos"];
        assert_eq!(leading_quantity(&words), Some((2.5, 3)));
        let words = ["1", "1/2", "kilo"];
        assert_eq!(leading_quantity(&words), Some((1.5, 2)));
        let words = ["tomates", "3"];
        assert_eq!(leading_quantity(&words), None);
    }

    #[test]
    fn trailing_quantity_is_greedy() {
        let words = ["tomates", "1", "1/2"];
        assert_eq!(trailing_quantity(&words), Some((1.5, 2)));
        let words = ["tomates", "3"];
        assert_eq!(trailing_quantity(&words), Some((3.0, 1)));
    }
}
