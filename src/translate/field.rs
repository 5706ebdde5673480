use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::TranslateConfig;
use super::prompts::{field_prompt, RESUME_SYSTEM_INSTRUCTION};
use super::{GenerationRequest, TextGenerator};

/// Detects "please fill this in" stand-ins returned instead of real content.
/// The backend is told not to produce them; this check is what guarantees it.
#[derive(Debug, Clone)]
pub struct PlaceholderFilter {
    markers: Vec<String>,
}

impl PlaceholderFilter {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let markers = markers
            .into_iter()
            .map(Into::into)
            .filter(|marker: &String| !marker.is_empty())
            .collect();
        Self { markers }
    }

    pub fn is_placeholder(&self, text: &str) -> bool {
        self.markers.iter().any(|marker| text.contains(marker.as_str()))
    }
}

/// Translates one free-text span into resume Japanese.
///
/// Best effort: every failure comes back as an empty string so a broken
/// backend never blocks editing.
pub struct FieldTranslator {
    generator: Arc<dyn TextGenerator>,
    temperature: f32,
    placeholders: PlaceholderFilter,
}

impl FieldTranslator {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &TranslateConfig) -> Self {
        Self {
            generator,
            temperature: config.temperature,
            placeholders: PlaceholderFilter::new(config.placeholder_markers.iter().cloned()),
        }
    }

    /// Translate `text`; `category` only steers the wording of the request.
    pub async fn translate(&self, text: &str, category: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let request = GenerationRequest {
            system_instruction: RESUME_SYSTEM_INSTRUCTION.to_string(),
            content: field_prompt(category, text),
            temperature: self.temperature,
        };

        match self.generator.generate(&request).await {
            Ok(translation) => {
                if self.placeholders.is_placeholder(&translation) {
                    debug!("Discarding placeholder response for {}", category);
                    return String::new();
                }
                translation.trim().to_string()
            }
            Err(e) => {
                warn!("Translation of {} failed: {}", category, e);
                String::new()
            }
        }
    }
}
