use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Value shipped in sample `.env` files. Treated the same as no key at all.
pub const PLACEHOLDER_API_KEY: &str = "your_openai_api_key_here";

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_model: String,
    pub api_base_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub image_max_dimension: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_model: "gpt-4o".to_string(),
            api_base_url: "https://api.openai.com/v1".to_string(),
            max_tokens: 1000,
            temperature: 0.3,
            image_max_dimension: 1280,
        }
    }
}

impl AppConfig {
    /// Directory used when no `--config-dir` is given.
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("symptom-triage")
    }

    pub fn load(config_dir: &Path) -> Self {
        let config_path = config_dir.join(CONFIG_FILE);
        let mut config = if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    log::warn!("Ignoring invalid {}: {}", config_path.display(), e);
                    Self::default()
                }),
                Err(e) => {
                    log::warn!("Could not read {}: {}", config_path.display(), e);
                    Self::default()
                }
            }
        } else {
            let c = Self::default();
            if let Err(e) = c.save(config_dir) {
                log::warn!("Could not write default config: {:#}", e);
            }
            c
        };

        config.apply_env(|name| std::env::var(name).ok());
        config
    }

    /// Environment wins over the file so keys never have to be written to disk.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("OPENAI_API_KEY") {
            self.openai_api_key = key;
        }
        if let Some(url) = non_empty("OPENAI_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(model) = non_empty("OPENAI_MODEL") {
            self.openai_model = model;
        }
    }

    pub fn save(&self, config_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(config_dir)
            .with_context(|| format!("Failed to create {}", config_dir.display()))?;
        let config_path = config_dir.join(CONFIG_FILE);
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        Ok(())
    }

    /// The API key if it is usable for live calls.
    pub fn credential(&self) -> Option<&str> {
        let key = self.openai_api_key.trim();
        if key.is_empty() || key == PLACEHOLDER_API_KEY {
            None
        } else {
            Some(key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_rejects_blank_and_placeholder() {
        let mut config = AppConfig::default();
        assert_eq!(config.credential(), None);

        config.openai_api_key = "   ".to_string();
        assert_eq!(config.credential(), None);

        config.openai_api_key = PLACEHOLDER_API_KEY.to_string();
        assert_eq!(config.credential(), None);

        config.openai_api_key = " sk-test ".to_string();
        assert_eq!(config.credential(), Some("sk-test"));
    }

    #[test]
    fn load_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path());

        assert_eq!(config.openai_model, "gpt-4o");
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn load_reads_saved_file() {
        let dir = tempfile::tempdir().unwrap();
        let saved = AppConfig {
            openai_model: "gpt-4o-mini".to_string(),
            max_tokens: 400,
            ..AppConfig::default()
        };
        saved.save(dir.path()).unwrap();

        let loaded = AppConfig::load(dir.path());
        assert_eq!(loaded.openai_model, "gpt-4o-mini");
        assert_eq!(loaded.max_tokens, 400);
    }

    #[test]
    fn load_falls_back_on_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();

        let loaded = AppConfig::load(dir.path());
        assert_eq!(loaded.max_tokens, AppConfig::default().max_tokens);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let config: AppConfig = serde_json::from_str(r#"{"max_tokens": 200}"#).unwrap();
        assert_eq!(config.max_tokens, 200);
        assert_eq!(config.image_max_dimension, 1280);
    }

    #[test]
    fn env_overrides_only_non_empty_values() {
        let mut config = AppConfig::default();
        config.apply_env(|name| match name {
            "OPENAI_API_KEY" => Some("sk-env".to_string()),
            "OPENAI_MODEL" => Some("".to_string()),
            _ => None,
        });

        assert_eq!(config.openai_api_key, "sk-env");
        assert_eq!(config.openai_model, "gpt-4o");
        assert_eq!(config.api_base_url, "https://api.openai.com/v1");
    }
}
