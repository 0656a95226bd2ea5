use pedidos_config::Config;

/// Strategy for listing the unit vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct UnitsStrategy;

impl super::CommandStrategy for UnitsStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let store = super::registry_store(&config)?;
        let registry = store.load().await?;

        println!("=== Units ({}) ===", store.path().display());
        println!("Version: {}\n", registry.version());
        for unit in registry.definitions() {
            let marker = if unit.custom { " (learned)" } else { "" };
            println!("{} / {}{marker}", unit.canonical, unit.plural_form());
            if !unit.variations.is_empty() {
                println!("  {}", unit.variations.join(", "));
            }
        }
        Ok(())
    }
}
