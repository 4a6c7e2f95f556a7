use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::{Deserialize, Serialize};

/// Environment variable pointing at the JSON config file.
pub const CONFIG_PATH_ENV: &str = "PELADA_CONFIG_PATH";

/// Deployment settings. Every field has a default, so an absent or partial
/// config file still yields a working bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Where the roster snapshot is stored.
    pub data_file: PathBuf,

    /// First header line of the rendered roster.
    pub header_title: String,

    /// Second header line, the weekly schedule.
    pub header_schedule: String,

    /// Permanent players seeded into the main roster on cycle restart.
    pub seed_participants: Vec<String>,

    /// How long a `/pg` announcement waits for its method follow-up.
    pub pending_payment_ttl_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("listas-bot.json"),
            header_title: "Lista Pelada".to_string(),
            header_schedule: "Quinta 21:40".to_string(),
            seed_participants: Vec::new(),
            pending_payment_ttl_secs: 120,
        }
    }
}

impl BotConfig {
    pub fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| format!("Failed to parse config JSON: {e}"))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file from '{}': {e}", path.display()))?;

        let config = Self::from_json(&content)
            .map_err(|e| format!("Invalid config in '{}': {e}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Config from the `PELADA_CONFIG_PATH` file, or defaults when the
    /// variable is unset or blank.
    pub fn from_env() -> Result<Self, String> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        Self::load(Path::new(path))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.seed_participants.iter().any(|name| name.trim().is_empty()) {
            return Err("seed_participants must not contain blank names".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();

        assert_eq!(config.data_file, PathBuf::from("listas-bot.json"));
        assert_eq!(config.header_title, "Lista Pelada");
        assert_eq!(config.pending_payment_ttl_secs, 120);
        assert!(config.seed_participants.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = BotConfig::from_json(
            r#"{"header_title": "Pelada do Zé", "seed_participants": ["Zé", "Tião"]}"#,
        )
        .unwrap();

        assert_eq!(config.header_title, "Pelada do Zé");
        assert_eq!(config.seed_participants.len(), 2);
        assert_eq!(config.header_schedule, "Quinta 21:40");
    }

    #[test]
    fn test_blank_seed_name_rejected() {
        let config =
            BotConfig::from_json(r#"{"seed_participants": ["Zé", "  "]}"#).unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"data_file": "/var/lib/pelada/listas.json"}"#).unwrap();

        let config = BotConfig::load(&path).unwrap();
        assert_eq!(config.data_file, PathBuf::from("/var/lib/pelada/listas.json"));

        assert!(BotConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
