//! Message intents and the conversation state they are decided against.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order held by the order store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Work-in-progress statuses. Only these make a message a follow-up.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Preparing | Self::Ready)
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "ready" => Ok(Self::Ready),
            "delivered" => Ok(Self::Delivered),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// The sender's most recent order, as reported by the order store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveOrder {
    pub id: String,
    pub status: OrderStatus,
}

impl ActiveOrder {
    #[must_use]
    pub fn new(id: impl Into<String>, status: OrderStatus) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }
}

/// Per-message view of the conversation.
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    /// Sender identity (phone number or channel id).
    pub sender: String,
    /// The sender's latest order, whatever its status.
    pub latest_order: Option<ActiveOrder>,
    /// Senders whose messages are always treated as new orders.
    pub always_new_order: Arc<HashSet<String>>,
}

impl ConversationContext {
    #[must_use]
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            latest_order: None,
            always_new_order: Arc::default(),
        }
    }

    #[must_use]
    pub fn with_order(mut self, order: ActiveOrder) -> Self {
        self.latest_order = Some(order);
        self
    }

    #[must_use]
    pub fn with_overrides(mut self, always_new_order: Arc<HashSet<String>>) -> Self {
        self.always_new_order = always_new_order;
        self
    }

    /// The sender's order if it is still in progress.
    #[must_use]
    pub fn active_order(&self) -> Option<&ActiveOrder> {
        self.latest_order
            .as_ref()
            .filter(|order| order.status.is_active())
    }

    /// Whether the sender skips follow-up routing.
    #[must_use]
    pub fn is_always_new_order(&self) -> bool {
        self.always_new_order.contains(&self.sender)
    }
}

/// What an inbound message is asking for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageIntent {
    /// Greeting, thanks or a help request; answered with a help reply.
    Greeting,
    /// Follow-up on an order that is still in progress.
    Query { order_id: String, status: OrderStatus },
    /// Order typed in on behalf of a named customer.
    ManualOrder { customer_name: String },
    /// A plain order.
    NewOrder,
    /// A `manual` message whose customer name or body could not be separated.
    ManualFormatError { guidance: String },
}

impl MessageIntent {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Query { .. } => "query",
            Self::ManualOrder { .. } => "manual_order",
            Self::NewOrder => "new_order",
            Self::ManualFormatError { .. } => "manual_format_error",
        }
    }

    /// Whether the message body should be parsed into order lines.
    #[must_use]
    pub const fn carries_order(&self) -> bool {
        matches!(self, Self::ManualOrder { .. } | Self::NewOrder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_work_in_progress_orders_are_active() {
        let ctx = ConversationContext::new("5491100000000")
            .with_order(ActiveOrder::new("A-1", OrderStatus::Delivered));
        assert!(ctx.active_order().is_none());

        let ctx = ctx.with_order(ActiveOrder::new("A-2", OrderStatus::Preparing));
        assert_eq!(ctx.active_order().map(|o| o.id.as_str()), Some("A-2"));
    }

    #[test]
    fn override_set_is_checked_by_sender() {
        let overrides: HashSet<String> = ["shop".to_string()].into_iter().collect();
        let ctx = ConversationContext::new("shop").with_overrides(Arc::new(overrides));
        assert!(ctx.is_always_new_order());
        assert!(!ConversationContext::new("other").is_always_new_order());
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Ready".parse::<OrderStatus>(), Ok(OrderStatus::Ready));
        assert!("lost".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn order_bearing_intents() {
        assert!(MessageIntent::NewOrder.carries_order());
        assert!(
            MessageIntent::ManualOrder {
                customer_name: "Ana".to_string()
            }
            .carries_order()
        );
        assert!(!MessageIntent::Greeting.carries_order());
    }
}
