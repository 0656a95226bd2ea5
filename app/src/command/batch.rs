use std::path::PathBuf;

use pedidos_config::Config;
use pedidos_intent::InboundMessage;
use tracing::{info, warn};

/// Input parameters for the Batch command strategy.
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// JSON Lines file, one inbound message per line
    pub input: PathBuf,
    /// Merge unknown units into the vocabulary file
    pub learn: bool,
}

/// Strategy for processing a delivery batch.
///
/// Every message is parsed against the same vocabulary snapshot. With
/// `learn` set, the unknown units the batch collected are merged and the
/// vocabulary file is rewritten when it changed.
#[derive(Debug, Clone, Copy)]
pub struct BatchStrategy;

impl super::CommandStrategy for BatchStrategy {
    type Input = BatchInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let store = super::registry_store(&config)?;
        let mut registry = store.load().await?;

        let content = tokio::fs::read_to_string(&input.input)
            .await
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", input.input.display()))?;
        let messages = read_messages(&content);
        info!(
            messages = messages.len(),
            "Read batch from {}",
            input.input.display()
        );

        let engine = super::build_engine(&config);
        let snapshot = registry.snapshot();
        let report =
            tokio::task::spawn_blocking(move || engine.process_batch(&messages, &snapshot))
                .await?;
        super::print_json(&report)?;

        if input.learn && !report.learned.is_empty() {
            let summary = registry.merge(&report.learned);
            info!(
                created = summary.created,
                added = summary.added,
                unchanged = summary.unchanged,
                conflicts = summary.conflicts.len(),
                "Merged learned units"
            );
            for token in &summary.conflicts {
                warn!("Unit token {token} already belongs to another unit");
            }
            if summary.changed() {
                store.save(&registry).await?;
            }
        }

        Ok(())
    }
}

/// Parse JSON Lines, skipping blank and malformed lines.
fn read_messages(content: &str) -> Vec<InboundMessage> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| match serde_json::from_str(line) {
            Ok(message) => Some(message),
            Err(e) => {
                warn!(line = index + 1, "Skipping malformed message: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_lines_are_skipped() {
        let content = concat!(
            r#"{"sender":"a","text":"3 kilos de papa"}"#,
            "\n\n",
            "not json\n",
            r#"{"sender":"b","text":"hola","active_order":{"id":"P-1","status":"ready"}}"#,
            "\n",
        );
        let messages = read_messages(content);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, "a");
        assert!(messages[1].active_order.is_some());
    }
}
