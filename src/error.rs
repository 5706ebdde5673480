use thiserror::Error;

#[derive(Error, Debug)]
pub enum RirekishoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Collapses transport, quota and malformed-response failures of the
    /// text generation backend. Never escapes the translation layer.
    #[error("Translation unavailable: {0}")]
    Translation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No {kind} entry with id '{id}'")]
    EntryNotFound { kind: &'static str, id: String },

    #[error("Render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, RirekishoError>;
