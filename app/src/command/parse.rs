use pedidos_config::Config;
use pedidos_parser::parse_order;
use tracing::info;

/// Input parameters for the Parse command strategy.
#[derive(Debug, Clone)]
pub struct ParseInput {
    /// Order text to parse
    pub message: String,
}

/// Strategy for parsing one message into order lines.
///
/// Prints the `ParseResult` as JSON. The message is parsed as an order
/// whatever its intent; use `classify` to see the routing decision.
#[derive(Debug, Clone, Copy)]
pub struct ParseStrategy;

impl super::CommandStrategy for ParseStrategy {
    type Input = ParseInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let registry = super::load_registry(&config).await?;

        let result = parse_order(&input.message, &registry, &config.parser);
        info!(
            items = result.items.len(),
            unparsed = result.unparsed_count(),
            "Parsed message"
        );
        super::print_json(&result)
    }
}
