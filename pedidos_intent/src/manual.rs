//! Splitting a `manual` message into customer name and order body.
//!
//! Accepted shapes, tried in this order:
//!
//! ```text
//! manual #Ana Pérez# 3 kilos de papa
//! manual Ana Pérez
//! 3 kilos de papa
//! manual Ana Pérez 3 kilos de papa
//! ```

use once_cell::sync::Lazy;
use pedidos_core::FoldedText;
use pedidos_parser::vocab;
use regex::Regex;

/// Reply shown when a manual message cannot be split.
pub const MANUAL_FORMAT_GUIDANCE: &str = "No pude separar el nombre del cliente del pedido. \
Escribilo así:\n\
manual #Nombre del cliente# 3 kilos de papa, 2 de cebolla\n\
o en dos líneas:\n\
manual Nombre del cliente\n\
3 kilos de papa, 2 de cebolla";

#[expect(clippy::expect_used, reason = "Static regex pattern")]
static HASH_DELIMITED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#\s*([^#\n]*?)\s*#").expect("Static regex pattern is guaranteed to be valid")
});

/// Name words followed by the first quantity-looking token, on folded text.
#[expect(
    clippy::expect_used,
    reason = "Pattern is built from static word lists"
)]
static NAME_THEN_QUANTITY: Lazy<Regex> = Lazy::new(|| {
    let mut words: Vec<&str> = vocab::quantity_words().collect();
    words.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    words.dedup();
    Regex::new(&format!(
        r"(?s)^(\p{{L}}[\p{{L}}'.]*(?:\s+\p{{L}}[\p{{L}}'.]*)*?)[\s,:;-]+((?:\d|(?:{})\b).*)$",
        words.join("|")
    ))
    .expect("Static manual pattern is guaranteed to be valid")
});

/// A manual message taken apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualOrder {
    pub customer_name: String,
    pub body: String,
}

/// Split the text that follows the `manual` keyword.
///
/// Returns `None` unless both a customer name and an order body are found.
#[must_use]
pub fn split_manual(text: &str) -> Option<ManualOrder> {
    let text = text.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, ':' | ',' | '-'));
    let text = text.trim_end();
    if text.is_empty() {
        return None;
    }
    by_hash_delimiter(text)
        .or_else(|| by_first_line(text))
        .or_else(|| by_quantity_boundary(text))
}

fn by_hash_delimiter(text: &str) -> Option<ManualOrder> {
    let captures = HASH_DELIMITED.captures(text)?;
    let whole = captures.get(0)?;
    let name = captures.get(1)?.as_str();
    let body = format!("{} {}", &text[..whole.start()], &text[whole.end()..]);
    ManualOrder::new(name, &body)
}

/// First line is the name, provided it holds no digits.
fn by_first_line(text: &str) -> Option<ManualOrder> {
    let (first, rest) = text.split_once('\n')?;
    if first.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    ManualOrder::new(first, rest)
}

fn by_quantity_boundary(text: &str) -> Option<ManualOrder> {
    let line = text.lines().next()?;
    let folded = FoldedText::new(line);
    let captures = NAME_THEN_QUANTITY.captures(folded.folded())?;
    let name = captures.get(1)?;
    let body = captures.get(2)?;
    let rest = &text[line.len()..];
    ManualOrder::new(
        folded.raw_slice(name.range()),
        &format!("{}{rest}", folded.raw_slice(body.range())),
    )
}

impl ManualOrder {
    fn new(name: &str, body: &str) -> Option<Self> {
        let customer_name = name.split_whitespace().collect::<Vec<_>>().join(" ");
        let body = body.trim();
        if customer_name.is_empty() || body.is_empty() {
            return None;
        }
        Some(Self {
            customer_name,
            body: body.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Option<(String, String)> {
        split_manual(text).map(|m| (m.customer_name, m.body))
    }

    #[test]
    fn hash_delimited_name() {
        assert_eq!(
            split(" #Ana Pérez# 3 kilos de papa"),
            Some(("Ana Pérez".to_string(), "3 kilos de papa".to_string()))
        );
        assert_eq!(
            split("3 kilos de papa #Ana#"),
            Some(("Ana".to_string(), "3 kilos de papa".to_string()))
        );
    }

    #[test]
    fn empty_hash_name_falls_through() {
        assert_eq!(split("## 3 kilos de papa"), None);
    }

    #[test]
    fn name_on_first_line() {
        assert_eq!(
            split(" Don José\n3 kilos de papa\n2 de cebolla"),
            Some((
                "Don José".to_string(),
                "3 kilos de papa\n2 de cebolla".to_string()
            ))
        );
    }

    #[test]
    fn first_line_with_digits_is_not_a_name() {
        assert_eq!(split("3 kilos de papa\n2 de cebolla"), None);
    }

    #[test]
    fn name_before_first_quantity() {
        assert_eq!(
            split(": Ana Pérez 3 kilos de papa, 2 de cebolla"),
            Some((
                "Ana Pérez".to_string(),
                "3 kilos de papa, 2 de cebolla".to_string()
            ))
        );
        assert_eq!(
            split("María una docena de huevos"),
            Some(("María".to_string(), "una docena de huevos".to_string()))
        );
    }

    #[test]
    fn missing_parts_fail() {
        assert_eq!(split(""), None);
        assert_eq!(split("Ana Pérez"), None);
        assert_eq!(split("3 kilos de papa"), None);
    }
}
