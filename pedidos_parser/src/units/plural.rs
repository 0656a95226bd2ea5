//! Fixed-vocabulary Spanish pluralizer for unit names.
//!
//! Append `s`, turn a final `z` into `ces`, or take the plural from a
//! one-entry irregular table. Right for the built-in vocabulary only. A
//! unit added later whose plural does not follow it (`cajón` → `cajones`)
//! must carry an explicit plural on its definition.

use pedidos_core::fold;

const IRREGULAR: &[(&str, &str)] = &[("unidad", "unidades")];

/// Plural of a singular unit name.
#[must_use]
pub fn pluralize(singular: &str) -> String {
    let folded = fold(singular);
    if let Some((_, plural)) = IRREGULAR.iter().find(|(word, _)| *word == folded) {
        return (*plural).to_string();
    }
    if let Some(stem) = singular.strip_suffix('z') {
        return format!("{stem}ces");
    }
    format!("{singular}s")
}

/// Whether `quantity` reads as exactly one.
#[must_use]
pub fn is_one(quantity: f64) -> bool {
    (quantity - 1.0).abs() < 1e-9
}
