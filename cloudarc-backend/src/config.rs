use serde::Deserialize;
use std::path::Path;

/// External client executable used when none is configured.
pub const DEFAULT_PROGRAM: &str = "drivecli";

/// Backend configuration. Only how the external tool is invoked lives
/// here; whatever the tool itself needs (credentials, endpoints) stays in
/// the tool's own environment.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_program")]
    pub program: String,
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

impl BackendConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: BackendConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.program.trim().is_empty() {
            anyhow::bail!("program must not be empty");
        }
        Ok(())
    }
}
