use thiserror::Error;

/// Reasons a message is turned away before classification.
///
/// Order text that cannot be read is not an error; it comes back as
/// unparsed lines or as a manual-format guidance intent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("message has {length} characters, the limit is {limit}")]
    TooLong { length: usize, limit: usize },
}
