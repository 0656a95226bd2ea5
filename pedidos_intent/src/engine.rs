//! Message pipeline: classify, then parse order-bearing messages.

use chrono::{DateTime, Utc};
use pedidos_core::{ActiveOrder, ConversationContext, MessageIntent, ParseResult};
use pedidos_parser::{LearnedUnits, ParserConfig, RegistrySnapshot, UnitRegistry, parse_order};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::classifier::{ClassifierConfig, MessageClassifier};
use crate::error::ProcessError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Longest message accepted, in characters.
    #[serde(default = "EngineConfig::default_max_message_chars")]
    pub max_message_chars: usize,
}

impl EngineConfig {
    const fn default_max_message_chars() -> usize {
        4000
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_message_chars: Self::default_max_message_chars(),
        }
    }
}

/// A message as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub sender: String,
    pub text: String,
    /// The sender's latest order, as known to the order store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_order: Option<ActiveOrder>,
}

/// Everything the engine read out of one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedMessage {
    pub intent: MessageIntent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Empty unless the intent carries an order.
    pub result: ParseResult,
}

/// Per-message result inside a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MessageOutcome {
    Processed(ProcessedMessage),
    Rejected { sender: String, reason: String },
}

impl MessageOutcome {
    #[must_use]
    pub const fn processed(&self) -> Option<&ProcessedMessage> {
        match self {
            Self::Processed(message) => Some(message),
            Self::Rejected { .. } => None,
        }
    }
}

/// Results of one delivery batch, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    /// Version of the vocabulary every message was parsed against.
    pub registry_version: String,
    pub started_at: DateTime<Utc>,
    pub outcomes: Vec<MessageOutcome>,
    /// Unknown units seen across the batch, for the caller to persist.
    pub learned: LearnedUnits,
}

impl BatchReport {
    #[must_use]
    pub fn processed_count(&self) -> usize {
        self.outcomes.iter().filter_map(MessageOutcome::processed).count()
    }

    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.outcomes.len() - self.processed_count()
    }
}

/// Classifies messages and parses the ones that carry orders.
#[derive(Debug, Clone)]
pub struct OrderEngine {
    classifier: MessageClassifier,
    parser: ParserConfig,
    config: EngineConfig,
}

impl OrderEngine {
    #[must_use]
    pub fn new(classifier: &ClassifierConfig, parser: ParserConfig, config: EngineConfig) -> Self {
        Self {
            classifier: MessageClassifier::new(classifier),
            parser,
            config,
        }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(
            &ClassifierConfig::default(),
            ParserConfig::default(),
            EngineConfig::default(),
        )
    }

    #[must_use]
    pub const fn classifier(&self) -> &MessageClassifier {
        &self.classifier
    }

    /// Classify one message and parse its order body.
    pub fn process(
        &self,
        text: &str,
        context: &ConversationContext,
        registry: &UnitRegistry,
    ) -> Result<ProcessedMessage, ProcessError> {
        self.validate(text)?;

        let classification = self.classifier.classify(text, context);
        let result = match (&classification.intent, &classification.body) {
            (intent, Some(body)) if intent.carries_order() => {
                parse_order(body, registry, &self.parser)
            }
            _ => ParseResult::default(),
        };
        let customer_name = match &classification.intent {
            MessageIntent::ManualOrder { customer_name } => Some(customer_name.clone()),
            _ => None,
        };

        Ok(ProcessedMessage {
            intent: classification.intent,
            customer_name,
            result,
        })
    }

    /// Process a delivery batch against one vocabulary snapshot.
    ///
    /// Messages are independent: a rejected message is reported and the
    /// rest of the batch goes on.
    #[must_use]
    pub fn process_batch(&self, messages: &[InboundMessage], snapshot: &RegistrySnapshot) -> BatchReport {
        let batch_id = Uuid::now_v7();
        let started_at = Utc::now();

        let outcomes: Vec<MessageOutcome> = messages
            .par_iter()
            .map(|message| {
                let context = self
                    .classifier
                    .context(&message.sender, message.active_order.clone());
                match self.process(&message.text, &context, snapshot.registry()) {
                    Ok(processed) => MessageOutcome::Processed(processed),
                    Err(e) => {
                        warn!(%batch_id, sender = %message.sender, "Rejected message: {e}");
                        MessageOutcome::Rejected {
                            sender: message.sender.clone(),
                            reason: e.to_string(),
                        }
                    }
                }
            })
            .collect();

        let mut learned = LearnedUnits::new();
        for processed in outcomes.iter().filter_map(MessageOutcome::processed) {
            learned.extend(LearnedUnits::from_unknown(&processed.result.unknown_units));
        }

        let report = BatchReport {
            batch_id,
            registry_version: snapshot.version().to_string(),
            started_at,
            outcomes,
            learned,
        };
        info!(
            %batch_id,
            messages = messages.len(),
            processed = report.processed_count(),
            rejected = report.rejected_count(),
            learned = report.learned.len(),
            "Batch processed"
        );
        report
    }

    fn validate(&self, text: &str) -> Result<(), ProcessError> {
        if text.trim().is_empty() {
            return Err(ProcessError::EmptyMessage);
        }
        let length = text.chars().count();
        if length > self.config.max_message_chars {
            return Err(ProcessError::TooLong {
                length,
                limit: self.config.max_message_chars,
            });
        }
        Ok(())
    }
}

impl Default for OrderEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
