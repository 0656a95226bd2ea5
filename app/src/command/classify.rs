use pedidos_config::Config;
use pedidos_core::{ActiveOrder, OrderStatus};

/// Input parameters for the Classify command strategy.
#[derive(Debug, Clone)]
pub struct ClassifyInput {
    /// Message text
    pub message: String,
    /// Sender identity
    pub sender: String,
    /// Id of the sender's latest order
    pub active_order: Option<String>,
    /// Status of that order
    pub status: OrderStatus,
}

/// Strategy for showing how a message would be routed.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyStrategy;

impl super::CommandStrategy for ClassifyStrategy {
    type Input = ClassifyInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let engine = super::build_engine(&config);
        let classifier = engine.classifier();

        let order = input
            .active_order
            .map(|id| ActiveOrder::new(id, input.status));
        let context = classifier.context(&input.sender, order);
        let classification = classifier.classify(&input.message, &context);
        super::print_json(&classification)
    }
}
