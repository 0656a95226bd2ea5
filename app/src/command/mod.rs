//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input type, so
//! dispatch is resolved at compile time.

use pedidos_config::Config;
use pedidos_intent::OrderEngine;
use pedidos_parser::UnitRegistry;

use crate::store::RegistryStore;

mod batch;
mod classify;
mod info;
mod init;
mod parse;
mod units;
mod version;

pub use batch::{BatchInput, BatchStrategy};
pub use classify::{ClassifyInput, ClassifyStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use parse::{ParseInput, ParseStrategy};
pub use units::UnitsStrategy;
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```rust,ignore
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Vocabulary store named by the config.
fn registry_store(config: &Config) -> anyhow::Result<RegistryStore> {
    Ok(RegistryStore::new(config.units.resolve_registry_path()?))
}

/// Load the vocabulary named by the config.
async fn load_registry(config: &Config) -> anyhow::Result<UnitRegistry> {
    registry_store(config)?.load().await
}

fn build_engine(config: &Config) -> OrderEngine {
    OrderEngine::new(
        &config.classifier,
        config.parser.clone(),
        config.engine.clone(),
    )
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
