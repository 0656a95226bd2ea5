use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

// Section types live next to the code they configure
use pedidos_intent::{ClassifierConfig, EngineConfig};
use pedidos_parser::ParserConfig;

const CONFIG_DIR: &str = "pedidos";
const CONFIG_FILE: &str = "config.json";
const UNITS_FILE: &str = "units.json";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub units: UnitsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct UnitsConfig {
    /// Vocabulary file. Defaults to `~/pedidos/units.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_path: Option<PathBuf>,
}

impl UnitsConfig {
    pub fn resolve_registry_path(&self) -> anyhow::Result<PathBuf> {
        match &self.registry_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::config_dir()?.join(UNITS_FILE)),
        }
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'pedidos init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    /// Load the config file, or the defaults when there is none.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            return Self::load_from(&config_path);
        }
        info!(
            "No config at {}, using defaults",
            config_path.display()
        );
        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))?;
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "classifier": {
    "always_new_order": [],
    "new_order_triggers": ["nuevo pedido", "pedido nuevo", "otro pedido", "nueva orden"],
    "manual_keyword": "manual"
  },
  "parser": {
    "weight_unit": "kilo",
    "count_unit": "unidad"
  },
  "engine": {
    "max_message_chars": 4000
  },
  "units": {}
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Add the senders that always place new orders to classifier.always_new_order");
        println!("   2. Run 'pedidos parse -m \"3 kilos de tomates\"' to try the parser");
        println!("   3. Run 'pedidos batch --input messages.jsonl --learn' to process a delivery");
        println!();
        println!("🔧 Configuration options:");
        println!("   - parser.weight_unit: unit for fractions without a unit (medio de ...)");
        println!("   - parser.count_unit: unit for counted products (5 pepinos)");
        println!(
            "   - units.registry_path: vocabulary file (default ~/{CONFIG_DIR}/{UNITS_FILE})"
        );
        println!();
        Ok(())
    }
}
