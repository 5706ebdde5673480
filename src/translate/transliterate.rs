use std::sync::Arc;
use tracing::warn;

use crate::resume::PersonalInfo;
use super::prompts::{transliteration_prompt, TRANSLITERATION_SYSTEM_INSTRUCTION};
use super::{GenerationRequest, TextGenerator};

/// Suggests katakana readings (furigana) for Western names
pub struct TransliterationAdvisor {
    generator: Arc<dyn TextGenerator>,
    temperature: f32,
}

impl TransliterationAdvisor {
    pub fn new(generator: Arc<dyn TextGenerator>, temperature: f32) -> Self {
        Self {
            generator,
            temperature,
        }
    }

    /// Katakana reading of `full_name`, or empty when none could be produced
    pub async fn suggest_transliteration(&self, full_name: &str) -> String {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return String::new();
        }

        let request = GenerationRequest {
            system_instruction: TRANSLITERATION_SYSTEM_INSTRUCTION.to_string(),
            content: transliteration_prompt(full_name),
            temperature: self.temperature,
        };

        match self.generator.generate(&request).await {
            Ok(reading) => reading.trim().to_string(),
            Err(e) => {
                warn!("Katakana suggestion failed: {}", e);
                String::new()
            }
        }
    }
}

/// Surname first, as written on a rirekisho
pub fn full_name(personal: &PersonalInfo) -> String {
    format!("{} {}", personal.last_name.trim(), personal.first_name.trim())
        .trim()
        .to_string()
}
