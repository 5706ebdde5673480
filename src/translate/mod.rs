// Resume translation architecture
//
// - Generators: text generation backends (Gemini, ollama) behind one trait
// - Field: single-span translation with placeholder suppression
// - Transliterate: katakana readings for names
// - Batch: concurrent fan-out over every translatable field of a resume

pub mod batch;
pub mod field;
pub mod gemini;
pub mod ollama;
pub mod prompts;
pub mod transliterate;

use async_trait::async_trait;
use std::sync::Arc;

pub use batch::BatchOrchestrator;
pub use field::{FieldTranslator, PlaceholderFilter};
pub use transliterate::TransliterationAdvisor;

use crate::config::{Provider, TranslateConfig};
use crate::error::{Result, RirekishoError};

/// One request to a text generation backend
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub content: String,
    pub temperature: f32,
}

/// Request/response text completion backend.
///
/// Implementations report every transport, quota or parse failure as an
/// error; callers in this module decide how to degrade.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the request
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Check that the backend is reachable and the model exists
    async fn check_availability(&self) -> Result<()>;
}

/// Factory for creating text generation backends
pub struct GeneratorFactory;

impl GeneratorFactory {
    /// Create a generator for the configured provider
    pub fn create_generator(config: &TranslateConfig) -> Result<Arc<dyn TextGenerator>> {
        match config.provider {
            Provider::Gemini => {
                let api_key = config.api_key().ok_or_else(|| {
                    RirekishoError::Config(format!(
                        "Gemini API key not set. Export {} first",
                        config.api_key_env
                    ))
                })?;
                Ok(Arc::new(gemini::GeminiGenerator::new(config, api_key)?))
            }
            Provider::Ollama => Ok(Arc::new(ollama::OllamaGenerator::new(config)?)),
        }
    }
}

/// Translation components sharing one backend
pub struct TranslationService {
    pub orchestrator: BatchOrchestrator,
    pub advisor: TransliterationAdvisor,
}

impl TranslationService {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &TranslateConfig) -> Self {
        Self {
            orchestrator: BatchOrchestrator::new(FieldTranslator::new(generator.clone(), config)),
            advisor: TransliterationAdvisor::new(generator, config.temperature),
        }
    }

    pub fn from_config(config: &TranslateConfig) -> Result<Self> {
        let generator = GeneratorFactory::create_generator(config)?;
        Ok(Self::new(generator, config))
    }

    pub fn field_translator(&self) -> &FieldTranslator {
        self.orchestrator.translator()
    }
}
