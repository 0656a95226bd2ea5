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
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

//! Order-text parsing.
//!
//! ```text
//! message -> ProductListExtractor -> lines
//!         -> LineSegmenter        -> segments
//!         -> SegmentParser        -> OrderLineItem (+ unknown unit)
//! ```
//!
//! Every stage reads the unit vocabulary through a [`UnitRegistry`] it is
//! handed; none of them writes to it. Unknown units come back in the
//! [`pedidos_core::ParseResult`] for the caller to learn and persist.

mod error;
pub mod extractor;
mod order_parser;
pub mod quantity;
pub mod segment;
pub mod segmenter;
pub mod units;
pub mod vocab;

pub use error::{Error, Result};
pub use extractor::ProductListExtractor;
pub use order_parser::parse_order;
pub use segment::{ParsedSegment, ParserConfig, SegmentOutcome, SegmentParser};
pub use segmenter::LineSegmenter;
pub use units::{
    LearnOutcome, LearnedUnits, MergeSummary, RegistrySnapshot, UnitDefinition, UnitRegistry,
};
