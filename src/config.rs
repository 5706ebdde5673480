use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{Result, RirekishoError};

// Default values for optional translation settings
fn default_temperature() -> f32 {
    0.1
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_placeholder_markers() -> Vec<String> {
    vec!["こちらに".to_string(), "記載してください".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub translate: TranslateConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Text generation backend
    pub provider: Provider,
    /// Backend endpoint URL; empty selects the provider default
    #[serde(default)]
    pub endpoint: String,
    /// Model used for every translation request
    pub model: String,
    /// Environment variable holding the API key (Gemini only)
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Sampling temperature, kept low for consistent output
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// HTTP timeout for a single request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Substrings that mark a "please fill this in" response.
    /// Any response containing one of these is discarded.
    #[serde(default = "default_placeholder_markers")]
    pub placeholder_markers: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    /// Google Gemini generateContent API
    Gemini,
    /// Local ollama server
    Ollama,
}

impl Provider {
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Provider::Gemini => "https://generativelanguage.googleapis.com",
            Provider::Ollama => "http://localhost:11434",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Font family used by the exported Word document
    pub font_family: String,
    /// Visa type shown when the record leaves it blank
    pub default_visa_type: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translate: TranslateConfig {
                provider: Provider::Gemini,
                endpoint: String::new(),
                model: "gemini-3-flash-preview".to_string(),
                api_key_env: default_api_key_env(),
                temperature: default_temperature(),
                timeout_secs: default_timeout_secs(),
                placeholder_markers: default_placeholder_markers(),
            },
            render: RenderConfig {
                font_family: "Noto Sans JP".to_string(),
                default_visa_type: "Working Holiday".to_string(),
            },
        }
    }
}

impl TranslateConfig {
    /// Endpoint with the provider default applied
    pub fn endpoint(&self) -> &str {
        if self.endpoint.trim().is_empty() {
            self.provider.default_endpoint()
        } else {
            self.endpoint.trim_end_matches('/')
        }
    }

    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RirekishoError::Config(format!("Failed to read config file: {}", e)))?;

        Ok(toml::from_str(&content)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RirekishoError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| RirekishoError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}
