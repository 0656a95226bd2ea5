//! Message intent routing.
//!
//! The decision order is fixed:
//!
//! 1. senders in the always-new-order set skip follow-up routing;
//! 2. a sender with an order in progress is asking about it, unless the
//!    message contains a new-order trigger phrase;
//! 3. trigger phrases are removed from the text;
//! 4. a message starting with the manual keyword names a customer;
//! 5. greetings, thanks, questions and help requests get a help reply;
//! 6. anything else is a new order.

use std::collections::HashSet;
use std::sync::Arc;

use pedidos_core::{
    ActiveOrder, ConversationContext, FoldedText, MessageIntent, compose, fold,
};
use pedidos_parser::vocab::{HELP_REQUEST, LEADING_CHATTER};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::manual::{MANUAL_FORMAT_GUIDANCE, split_manual};

/// Configuration for intent routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Senders whose messages are always new orders.
    #[serde(default)]
    pub always_new_order: Vec<String>,

    /// Phrases that open a new order even while another is in progress.
    #[serde(default = "default_new_order_triggers")]
    pub new_order_triggers: Vec<String>,

    /// Leading word of an order entered on behalf of a customer.
    #[serde(default = "default_manual_keyword")]
    pub manual_keyword: String,
}

fn default_new_order_triggers() -> Vec<String> {
    ["nuevo pedido", "pedido nuevo", "otro pedido", "nueva orden"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_manual_keyword() -> String {
    "manual".to_string()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            always_new_order: Vec::new(),
            new_order_triggers: default_new_order_triggers(),
            manual_keyword: default_manual_keyword(),
        }
    }
}

/// Intent of a message plus the text to parse, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub intent: MessageIntent,
    /// Order text for [`MessageIntent::NewOrder`] and
    /// [`MessageIntent::ManualOrder`], without trigger phrases, keyword or
    /// customer name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Classification {
    const fn intent_only(intent: MessageIntent) -> Self {
        Self { intent, body: None }
    }
}

/// Decides what a message is asking for.
#[derive(Debug, Clone)]
pub struct MessageClassifier {
    triggers: Option<Regex>,
    manual_keyword: String,
    always_new_order: Arc<HashSet<String>>,
}

impl MessageClassifier {
    #[must_use]
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            triggers: trigger_pattern(&config.new_order_triggers),
            manual_keyword: fold(config.manual_keyword.trim()),
            always_new_order: Arc::new(config.always_new_order.iter().cloned().collect()),
        }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(&ClassifierConfig::default())
    }

    /// Conversation context for `sender`, carrying the override set.
    #[must_use]
    pub fn context(&self, sender: &str, latest_order: Option<ActiveOrder>) -> ConversationContext {
        let context =
            ConversationContext::new(sender).with_overrides(Arc::clone(&self.always_new_order));
        match latest_order {
            Some(order) => context.with_order(order),
            None => context,
        }
    }

    /// Classify a message.
    #[must_use]
    pub fn classify(&self, text: &str, context: &ConversationContext) -> Classification {
        let composed = compose(text);
        let folded = FoldedText::new(composed.trim());
        let has_trigger = self
            .triggers
            .as_ref()
            .is_some_and(|re| re.is_match(folded.folded()));

        if !context.is_always_new_order() && !has_trigger {
            if let Some(order) = context.active_order() {
                debug!(sender = %context.sender, order = %order.id, "Follow-up on active order");
                return Classification::intent_only(MessageIntent::Query {
                    order_id: order.id.clone(),
                    status: order.status,
                });
            }
        }

        let remaining = self.strip_triggers(&folded);
        let classification = self.classify_body(&remaining);
        debug!(
            sender = %context.sender,
            intent = classification.intent.as_str(),
            trigger = has_trigger,
            "Classified message"
        );
        classification
    }

    fn classify_body(&self, text: &str) -> Classification {
        if let Some(after_keyword) = self.strip_manual_keyword(text) {
            return match split_manual(after_keyword) {
                Some(manual) => Classification {
                    intent: MessageIntent::ManualOrder {
                        customer_name: manual.customer_name,
                    },
                    body: Some(manual.body),
                },
                None => Classification::intent_only(MessageIntent::ManualFormatError {
                    guidance: MANUAL_FORMAT_GUIDANCE.to_string(),
                }),
            };
        }

        if is_greeting(text) {
            return Classification::intent_only(MessageIntent::Greeting);
        }

        Classification {
            intent: MessageIntent::NewOrder,
            body: Some(text.to_string()),
        }
    }

    /// The raw text with every trigger phrase cut out.
    fn strip_triggers(&self, folded: &FoldedText<'_>) -> String {
        let Some(triggers) = &self.triggers else {
            return folded.raw().to_string();
        };
        let mut kept = String::new();
        let mut last = 0;
        for found in triggers.find_iter(folded.folded()) {
            kept.push_str(folded.raw_slice(last..found.start()));
            last = found.end();
        }
        kept.push_str(folded.raw_from(last));
        kept.trim()
            .trim_start_matches(|c: char| c.is_ascii_punctuation())
            .trim()
            .to_string()
    }

    /// Text after the manual keyword, if the message starts with it.
    fn strip_manual_keyword<'t>(&self, text: &'t str) -> Option<&'t str> {
        if self.manual_keyword.is_empty() {
            return None;
        }
        let folded = FoldedText::new(text);
        let rest = folded.folded().strip_prefix(self.manual_keyword.as_str())?;
        if rest.starts_with(|c: char| c.is_alphanumeric()) {
            return None;
        }
        Some(folded.raw_from(self.manual_keyword.len()))
    }
}

impl Default for MessageClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Greeting, thanks, a question, or a help request.
///
/// Text that is nothing but greeting, closing and filler phrases counts;
/// a greeting followed by products does not.
fn is_greeting(text: &str) -> bool {
    if text.contains(['?', '¿']) {
        return true;
    }
    let folded = fold(text);
    if HELP_REQUEST.is_match(&folded) {
        return true;
    }
    let chatter_end = LEADING_CHATTER.find(&folded).map_or(0, |m| m.end());
    folded[chatter_end..]
        .trim_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .is_empty()
}

fn trigger_pattern(triggers: &[String]) -> Option<Regex> {
    let mut phrases: Vec<String> = triggers
        .iter()
        .map(|t| fold(t.trim()))
        .filter(|t| !t.is_empty())
        .collect();
    if phrases.is_empty() {
        return None;
    }
    phrases.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    phrases.dedup();
    let alternation = phrases
        .iter()
        .map(|phrase| regex::escape(phrase).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    match Regex::new(&format!(r"\b(?:{alternation})\b")) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Ignoring new-order triggers: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pedidos_core::OrderStatus;

    use super::*;

    fn classify(text: &str) -> Classification {
        let classifier = MessageClassifier::with_defaults();
        classifier.classify(text, &classifier.context("5491100000000", None))
    }

    fn classify_with_order(text: &str, status: OrderStatus) -> Classification {
        let classifier = MessageClassifier::with_defaults();
        let context = classifier.context("5491100000000", Some(ActiveOrder::new("P-7", status)));
        classifier.classify(text, &context)
    }

    #[test]
    fn greeting_without_order() {
        assert_eq!(classify("Hola, buenos días").intent, MessageIntent::Greeting);
        assert_eq!(classify("muchas gracias!").intent, MessageIntent::Greeting);
        assert_eq!(classify("").intent, MessageIntent::Greeting);
    }

    #[test]
    fn questions_and_help_are_greetings() {
        assert_eq!(classify("¿Hasta qué hora abren?").intent, MessageIntent::Greeting);
        assert_eq!(classify("como hago un pedido").intent, MessageIntent::Greeting);
    }

    #[test]
    fn greeting_followed_by_products_is_an_order() {
        let classification = classify("Hola! 3 kilos de papa");
        assert_eq!(classification.intent, MessageIntent::NewOrder);
        assert_eq!(classification.body.as_deref(), Some("Hola! 3 kilos de papa"));
    }

    #[test]
    fn active_order_makes_a_query() {
        let classification = classify_with_order("3 kilos de papa", OrderStatus::Preparing);
        assert_eq!(
            classification.intent,
            MessageIntent::Query {
                order_id: "P-7".to_string(),
                status: OrderStatus::Preparing
            }
        );
        assert_eq!(classification.body, None);
    }

    #[test]
    fn finished_order_does_not_make_a_query() {
        let classification = classify_with_order("3 kilos de papa", OrderStatus::Delivered);
        assert_eq!(classification.intent, MessageIntent::NewOrder);
    }

    #[test]
    fn trigger_phrase_opens_new_order_and_is_removed() {
        let classification =
            classify_with_order("Nuevo pedido: 3 kilos de papa", OrderStatus::Pending);
        assert_eq!(classification.intent, MessageIntent::NewOrder);
        assert_eq!(classification.body.as_deref(), Some("3 kilos de papa"));
    }

    #[test]
    fn override_sender_skips_query_routing() {
        let config = ClassifierConfig {
            always_new_order: vec!["shop".to_string()],
            ..ClassifierConfig::default()
        };
        let classifier = MessageClassifier::new(&config);
        let context = classifier.context("shop", Some(ActiveOrder::new("P-1", OrderStatus::Ready)));
        assert_eq!(
            classifier.classify("2 cajones de uva", &context).intent,
            MessageIntent::NewOrder
        );
    }

    #[test]
    fn manual_order_names_customer() {
        let classification = classify("Manual #Ana Pérez# 3 kilos de papa");
        assert_eq!(
            classification.intent,
            MessageIntent::ManualOrder {
                customer_name: "Ana Pérez".to_string()
            }
        );
        assert_eq!(classification.body.as_deref(), Some("3 kilos de papa"));
    }

    #[test]
    fn manual_without_customer_is_a_format_error() {
        let classification = classify("manual 3 kilos de papa");
        assert!(matches!(
            classification.intent,
            MessageIntent::ManualFormatError { .. }
        ));
        assert_eq!(classification.body, None);
    }

    #[test]
    fn manual_keyword_needs_word_boundary() {
        assert_eq!(classify("manuales 3").intent, MessageIntent::NewOrder);
    }

    #[test]
    fn active_order_wins_over_manual_keyword() {
        let classification =
            classify_with_order("manual #Ana# 3 kilos de papa", OrderStatus::Ready);
        assert_eq!(classification.intent.as_str(), "query");
    }
}
