//! Fixed Spanish word lists shared by the matchers.
//!
//! All entries are folded (lowercase, unaccented) and are compared against
//! folded tokens.

use once_cell::sync::Lazy;
use regex::Regex;

/// Cardinal number words, 1 to 50.
///
/// Numbers above thirty are written as two words (`treinta y dos`); only
/// the tens appear here, the compound form is assembled by the quantity
/// parser from [`TENS_WORDS`] and the units.
const NUMBER_WORDS: &[(&str, u32)] = &[
    ("un", 1),
    ("uno", 1),
    ("una", 1),
    ("dos", 2),
    ("tres", 3),
    ("cuatro", 4),
    ("cinco", 5),
    ("seis", 6),
    ("siete", 7),
    ("ocho", 8),
    ("nueve", 9),
    ("diez", 10),
    ("once", 11),
    ("doce", 12),
    ("trece", 13),
    ("catorce", 14),
    ("quince", 15),
    ("dieciseis", 16),
    ("diecisiete", 17),
    ("dieciocho", 18),
    ("diecinueve", 19),
    ("veinte", 20),
    ("veintiun", 21),
    ("veintiuno", 21),
    ("veintiuna", 21),
    ("veintidos", 22),
    ("veintitres", 23),
    ("veinticuatro", 24),
    ("veinticinco", 25),
    ("veintiseis", 26),
    ("veintisiete", 27),
    ("veintiocho", 28),
    ("veintinueve", 29),
    ("treinta", 30),
    ("cuarenta", 40),
    ("cincuenta", 50),
];

const TENS_WORDS: &[(&str, u32)] = &[("treinta", 30), ("cuarenta", 40)];

const FRACTION_WORDS: &[(&str, f64)] = &[
    ("medio", 0.5),
    ("media", 0.5),
    ("cuarto", 0.25),
    ("tercio", 0.33),
];

/// Indefinite articles that double as the quantity one.
const ARTICLES: &[&str] = &["un", "uno", "una"];

/// Greetings that open a message.
pub const GREETINGS: &[&str] = &[
    "hola",
    "holis",
    "buenas",
    "buen dia",
    "buenos dias",
    "buenas tardes",
    "buenas noches",
    "que tal",
    "como estas",
    "como esta",
    "como va",
    "hola que tal",
];

/// Closings and thanks that end a message.
pub const CLOSINGS: &[&str] = &[
    "gracias",
    "muchas gracias",
    "mil gracias",
    "saludos",
    "un saludo",
    "abrazo",
    "un abrazo",
    "chau",
    "chao",
    "adios",
    "hasta luego",
    "hasta mañana",
    "nos vemos",
    "bendiciones",
];

/// Request phrasing that wraps an order without carrying product data.
pub const FILLERS: &[&str] = &[
    "por favor",
    "porfa",
    "porfavor",
    "xfa",
    "quisiera",
    "queria",
    "quiero",
    "quiero pedir",
    "queria pedir",
    "quisiera pedir",
    "te pido",
    "le pido",
    "necesito",
    "me mandas",
    "me mandan",
    "me envias",
    "me traes",
    "mandame",
    "enviame",
    "traeme",
    "el pedido es",
    "mi pedido es",
    "les paso el pedido",
    "te paso el pedido",
    "paso pedido",
    "pedido",
    "para hoy",
    "para mañana",
];

/// Phrases that ask for help rather than place an order.
pub const HELP_PHRASES: &[&str] = &[
    "ayuda",
    "como pido",
    "como hago un pedido",
    "como hago el pedido",
    "como funciona",
    "menu",
    "lista de precios",
    "precios",
    "info",
    "informacion",
    "horario",
    "horarios",
];

/// Value of a cardinal number word.
#[must_use]
pub fn number_word(folded: &str) -> Option<u32> {
    NUMBER_WORDS
        .iter()
        .find(|(word, _)| *word == folded)
        .map(|(_, value)| *value)
}

/// Value of a tens word that can start a compound (`treinta y ...`).
#[must_use]
pub fn tens_word(folded: &str) -> Option<u32> {
    TENS_WORDS
        .iter()
        .find(|(word, _)| *word == folded)
        .map(|(_, value)| *value)
}

/// Value of a fraction word.
#[must_use]
pub fn fraction_word(folded: &str) -> Option<f64> {
    FRACTION_WORDS
        .iter()
        .find(|(word, _)| *word == folded)
        .map(|(_, value)| *value)
}

#[must_use]
pub fn is_article(folded: &str) -> bool {
    ARTICLES.contains(&folded)
}

/// A word that can stand for a quantity on its own.
#[must_use]
pub fn is_quantity_word(folded: &str) -> bool {
    number_word(folded).is_some() || fraction_word(folded).is_some()
}

/// Every word that can stand for a quantity on its own.
pub fn quantity_words() -> impl Iterator<Item = &'static str> {
    NUMBER_WORDS
        .iter()
        .map(|(word, _)| *word)
        .chain(FRACTION_WORDS.iter().map(|(word, _)| *word))
}

/// Build an alternation of `phrases`, longest first so the regex engine
/// prefers `buenos dias` over `buenas`.
fn alternation<'a>(phrases: impl IntoIterator<Item = &'a &'a str>) -> String {
    let mut sorted: Vec<&str> = phrases.into_iter().copied().collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    sorted.dedup();
    sorted
        .iter()
        .map(|phrase| regex::escape(phrase).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|")
}

/// One or more greeting, closing or filler phrases at the start of folded
/// text, with the punctuation around them.
#[expect(
    clippy::expect_used,
    reason = "Pattern is built from static word lists"
)]
pub static LEADING_CHATTER: Lazy<Regex> = Lazy::new(|| {
    let phrases = alternation(GREETINGS.iter().chain(CLOSINGS).chain(FILLERS));
    Regex::new(&format!(
        r"^[\s[:punct:]¡¿]*(?:(?:{phrases})\b[\s[:punct:]¡!]*)+"
    ))
    .expect("Static chatter pattern is guaranteed to be valid")
});

/// A closing phrase at the end of folded text.
#[expect(
    clippy::expect_used,
    reason = "Pattern is built from static word lists"
)]
pub static TRAILING_CLOSING: Lazy<Regex> = Lazy::new(|| {
    let phrases = alternation(CLOSINGS.iter().chain(&["por favor", "porfa", "porfavor", "xfa"]));
    Regex::new(&format!(
        r"(?:[\s[:punct:]]*\b(?:{phrases})\b)+[\s[:punct:]¡!]*$"
    ))
    .expect("Static closing pattern is guaranteed to be valid")
});

/// A help request anywhere in folded text.
#[expect(
    clippy::expect_used,
    reason = "Pattern is built from static word lists"
)]
pub static HELP_REQUEST: Lazy<Regex> = Lazy::new(|| {
    let phrases = alternation(HELP_PHRASES);
    Regex::new(&format!(r"\b(?:{phrases})\b"))
        .expect("Static help pattern is guaranteed to be valid")
});
