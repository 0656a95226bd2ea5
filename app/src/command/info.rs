use pedidos_config::Config;

/// Strategy for displaying configuration information.
///
/// Outputs the classifier, parser and engine settings and a summary of the
/// unit vocabulary in use.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== pedidos Configuration ===\n");

        println!("Classifier:");
        println!("  Manual Keyword: {}", config.classifier.manual_keyword);
        println!(
            "  New Order Triggers: {}",
            config.classifier.new_order_triggers.join(", ")
        );
        if config.classifier.always_new_order.is_empty() {
            println!("  Always New Order: (none)");
        } else {
            println!(
                "  Always New Order: {}",
                config.classifier.always_new_order.join(", ")
            );
        }
        println!();

        println!("Parser:");
        println!("  Weight Unit: {}", config.parser.weight_unit);
        println!("  Count Unit: {}", config.parser.count_unit);
        println!();

        println!("Engine:");
        println!("  Max Message Chars: {}", config.engine.max_message_chars);
        println!();

        let store = super::registry_store(&config)?;
        println!("Units:");
        println!("  Path: {}", store.path().display());
        match store.load().await {
            Ok(registry) => {
                let learned = registry.definitions().iter().filter(|u| u.custom).count();
                println!("  Units: {} ({learned} learned)", registry.len());
                println!("  Version: {}", truncate(&registry.version(), 16));
            }
            Err(e) => {
                println!("  Status: Load failed");
                println!("  Error: {e}");
            }
        }

        Ok(())
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len])
    }
}
