//! JSON file holding the unit vocabulary.

use std::path::{Path, PathBuf};

use pedidos_parser::UnitRegistry;
use tracing::info;

/// Reads and writes the vocabulary file.
///
/// A missing file means the built-in vocabulary. The file is only written
/// after learned units have been merged.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> anyhow::Result<UnitRegistry> {
        if !tokio::fs::try_exists(&self.path).await? {
            info!(
                "No vocabulary at {}, using built-in units",
                self.path.display()
            );
            return Ok(UnitRegistry::new());
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        let registry: UnitRegistry = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid vocabulary {}: {e}", self.path.display()))?;
        info!(
            units = registry.len(),
            "Loaded vocabulary from {}",
            self.path.display()
        );
        Ok(registry)
    }

    pub async fn save(&self, registry: &UnitRegistry) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(registry)?;
        tokio::fs::write(&self.path, content).await?;
        info!(
            units = registry.len(),
            "Saved vocabulary to {}",
            self.path.display()
        );
        Ok(())
    }
}
