#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Shared data model for the order-message engine.
//!
//! Everything that crosses a crate boundary lives here: parsed order lines,
//! message intents, the per-sender conversation context and the text
//! folding helpers every matcher relies on.

pub mod intent;
pub mod order;
pub mod text;
mod util;

pub use intent::{ActiveOrder, ConversationContext, MessageIntent, OrderStatus};
pub use order::{OrderLineItem, ParseResult, Quantity, Strategy};
pub use text::{FoldedText, compose, fold, fold_char};
pub use util::fingerprint;
