//! Configuration loading for Pharmyx.
//! Reads pharmyx.toml from the current directory or the path in PHARMYX_CONFIG.
//! A missing file is not an error: every setting has a default.

use serde::{Deserialize, Serialize};
use std::path::Path;

use pharmyx_ingestion::classify::MatchMode;
use pharmyx_ingestion::pipeline::DEFAULT_MAX_RESULTS;
use pharmyx_ingestion::sources::pubmed::PubMedConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pubmed: PubMedSection,
    #[serde(default)]
    pub classification: ClassificationSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubMedSection {
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
    #[serde(default = "default_tool")]
    pub tool: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PubMedSection {
    fn default() -> Self {
        Self {
            contact_email: default_contact_email(),
            tool: default_tool(),
            api_key: String::new(),
            max_results: default_max_results(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_contact_email() -> String { "your_email@example.com".to_string() }
fn default_tool()          -> String { "pharmyx".to_string() }
fn default_max_results()   -> usize  { DEFAULT_MAX_RESULTS }
fn default_timeout_secs()  -> u64    { 30 }

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationSection {
    #[serde(default)]
    pub match_mode: MatchMode,
}

mod tests;

impl Config {
    /// Load configuration from pharmyx.toml, then apply environment overrides.
    /// Checks PHARMYX_CONFIG env var first, then current directory.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("PHARMYX_CONFIG")
            .unwrap_or_else(|_| "pharmyx.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", path, e))?
        } else {
            tracing::debug!("No config file at {}, using defaults", path);
            Config::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// PHARMYX_CONTACT_EMAIL and PHARMYX_NCBI_API_KEY take precedence over the file.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(email) = lookup("PHARMYX_CONTACT_EMAIL").filter(|v| !v.is_empty()) {
            self.pubmed.contact_email = email;
        }
        if self.pubmed.api_key.is_empty() {
            if let Some(key) = lookup("PHARMYX_NCBI_API_KEY") {
                self.pubmed.api_key = key;
            }
        }
    }

    pub fn pubmed_config(&self) -> PubMedConfig {
        PubMedConfig {
            contact_email: self.pubmed.contact_email.clone(),
            tool: self.pubmed.tool.clone(),
            api_key: Some(self.pubmed.api_key.clone()).filter(|k| !k.is_empty()),
            timeout_secs: self.pubmed.timeout_secs,
        }
    }
}
