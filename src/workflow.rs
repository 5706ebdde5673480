use chrono::{Local, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Result, RirekishoError};
use crate::render::{export_file_name, export_word, render_page, write_output};
use crate::state::ResumeState;
use crate::translate::transliterate::full_name;
use crate::translate::{GeneratorFactory, TextGenerator, TranslationService};

/// Outcome of one translation batch, reported once after fan-in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationSummary {
    /// Fields sent (or eligible) for translation
    pub attempted: usize,
    /// Fields that came back with text
    pub translated: usize,
    /// Fields written into the resume
    pub merged: usize,
}

pub struct Workflow {
    config: Config,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Workflow {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            generator: None,
        }
    }

    /// Use an already constructed backend instead of the configured one
    pub fn with_generator(config: Config, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            config,
            generator: Some(generator),
        }
    }

    fn generator(&self) -> Result<Arc<dyn TextGenerator>> {
        match &self.generator {
            Some(generator) => Ok(generator.clone()),
            None => GeneratorFactory::create_generator(&self.config.translate),
        }
    }

    fn translation(&self) -> Result<TranslationService> {
        Ok(TranslationService::new(self.generator()?, &self.config.translate))
    }

    /// Write a fresh resume document with the default education slots
    pub async fn init_resume<P: AsRef<Path>>(&self, output_path: P, force: bool) -> Result<()> {
        let output_path = output_path.as_ref();
        if output_path.exists() && !force {
            return Err(RirekishoError::Config(format!(
                "{} already exists (use --force to overwrite)",
                output_path.display()
            )));
        }

        ResumeState::default().save(output_path).await?;
        info!("Created new resume: {}", output_path.display());
        Ok(())
    }

    /// Translate every field of the resume and merge the results.
    ///
    /// The merged resume goes to `output_path` (the input when `None`); the raw
    /// partial update is written to `update_path` when given.
    pub async fn translate_resume<P: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Option<PathBuf>,
        update_path: Option<PathBuf>,
    ) -> Result<TranslationSummary> {
        let input_path = input_path.as_ref();
        info!("Translating resume: {}", input_path.display());

        let mut state = ResumeState::load(input_path).await?;
        let service = self.translation()?;

        let spinner = pending_spinner("Translating to Japanese...");
        let update = service.orchestrator.translate_all(state.resume()).await;
        spinner.finish_and_clear();

        if let Some(update_path) = &update_path {
            fs::write(update_path, serde_json::to_string_pretty(&update)?).await?;
            info!("Wrote partial update: {}", update_path.display());
        }

        let merged = state.apply(&update);
        let output_path = output_path.unwrap_or_else(|| input_path.to_path_buf());
        state.save(&output_path).await?;

        let summary = TranslationSummary {
            attempted: update.field_count(),
            translated: update.translated_field_count(),
            merged,
        };
        if summary.translated == 0 && summary.attempted > 0 {
            warn!("No field was translated. Check the API key or the backend connection");
        }
        Ok(summary)
    }

    /// Translate one span of text outside any resume
    pub async fn translate_text(&self, text: &str, category: &str) -> Result<String> {
        let service = self.translation()?;
        Ok(service.field_translator().translate(text, category).await)
    }

    /// Suggest furigana for the resume owner's name and store it.
    /// Returns the suggestion, empty when none was produced.
    pub async fn suggest_furigana<P: AsRef<Path>>(&self, input_path: P) -> Result<String> {
        let input_path = input_path.as_ref();
        let mut state = ResumeState::load(input_path).await?;

        let name = full_name(&state.resume().personal_info);
        if name.is_empty() {
            return Err(RirekishoError::Config(
                "Please enter your name first (personalInfo.lastName / firstName)".to_string(),
            ));
        }

        let service = self.translation()?;
        let suggestion = service.advisor.suggest_transliteration(&name).await;
        if state.set_furigana(&suggestion) {
            state.save(input_path).await?;
            info!("Stored furigana for {}", name);
        }
        Ok(suggestion)
    }

    /// Katakana reading for an arbitrary name
    pub async fn transliterate_name(&self, name: &str) -> Result<String> {
        let service = self.translation()?;
        Ok(service.advisor.suggest_transliteration(name).await)
    }

    /// Render a printable HTML page
    pub async fn render_resume<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        let state = ResumeState::load(input_path).await?;
        let page = render_page(state.resume(), &self.config.render, today());
        write_output(&page, output_path).await
    }

    /// Export a Word-compatible document. Returns the written path.
    pub async fn export_resume<P: AsRef<Path>>(
        &self,
        input_path: P,
        output: Option<PathBuf>,
    ) -> Result<PathBuf> {
        let input_path = input_path.as_ref();
        let state = ResumeState::load(input_path).await?;

        let output_path = match output {
            Some(path) if path.is_dir() => path.join(export_file_name(&state.resume().personal_info)),
            Some(path) => path,
            None => input_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
                .join(export_file_name(&state.resume().personal_info)),
        };

        let document = export_word(state.resume(), &self.config.render, today());
        write_output(&document, &output_path).await?;
        Ok(output_path)
    }

    /// Check that the configured backend answers
    pub async fn check_backend(&self) -> Result<()> {
        self.generator()?.check_availability().await
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn pending_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
