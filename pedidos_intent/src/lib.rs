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

//! Intent routing and the message pipeline.

pub mod classifier;
pub mod engine;
mod error;
pub mod manual;

pub use classifier::{Classification, ClassifierConfig, MessageClassifier};
pub use engine::{
    BatchReport, EngineConfig, InboundMessage, MessageOutcome, OrderEngine, ProcessedMessage,
};
pub use error::ProcessError;
pub use manual::{MANUAL_FORMAT_GUIDANCE, ManualOrder, split_manual};
