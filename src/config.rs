//! Scorekeeper configuration: an optional TOML file discovered at startup.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level `scorekeeper.toml` structure. Every field is optional;
/// defaults apply when the file or a field is absent.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScorekeeperConfig {
    /// Write the match to the autosave path after every commit and undo.
    #[serde(default)]
    pub autosave: bool,
    /// Where autosaves land.
    pub autosave_path: Option<PathBuf>,
}

impl ScorekeeperConfig {
    /// Effective autosave target, with the built-in default applied.
    pub fn effective_autosave_path(&self) -> PathBuf {
        self.autosave_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("buraco_autosave.json"))
    }
}

/// Load configuration from a TOML file at the given path.
pub fn load_config(path: &Path) -> Result<ScorekeeperConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Try to load configuration from well-known paths, returning the defaults
/// if none is found.
pub fn load_default_config() -> ScorekeeperConfig {
    let candidates = ["scorekeeper.toml", "/etc/buraco/scorekeeper.toml"];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_config(p) {
                Ok(config) => {
                    tracing::info!(path = %p.display(), "loaded scorekeeper config");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load scorekeeper config");
                }
            }
        }
    }
    tracing::info!("no scorekeeper.toml found, using built-in defaults");
    ScorekeeperConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ScorekeeperConfig = toml::from_str("").unwrap();
        assert!(!config.autosave);
        assert_eq!(
            config.effective_autosave_path(),
            PathBuf::from("buraco_autosave.json")
        );
    }

    #[test]
    fn test_full_config_parses() {
        let config: ScorekeeperConfig = toml::from_str(
            "autosave = true\nautosave_path = \"/tmp/match.json\"\n",
        )
        .unwrap();
        assert!(config.autosave);
        assert_eq!(
            config.effective_autosave_path(),
            PathBuf::from("/tmp/match.json")
        );
    }
}
