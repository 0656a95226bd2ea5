use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or extending the unit vocabulary.
///
/// Order text itself never produces an error; unreadable lines come back as
/// unparsed items instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unit definition has an empty canonical name")]
    EmptyCanonical,

    #[error("unit '{0}' has an empty variation")]
    EmptyVariation(String),
}
