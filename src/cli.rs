use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::translate::prompts::category;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new resume document with the default education slots
    Init {
        /// Resume file to create
        #[arg(short, long, default_value = "resume.json")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Translate all free-text fields of a resume into Japanese
    Translate {
        /// Resume file
        #[arg(short, long)]
        input: PathBuf,

        /// Write the merged resume here instead of updating the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the raw partial update document
        #[arg(long)]
        update_out: Option<PathBuf>,
    },

    /// Translate a single piece of text
    TranslateField {
        /// Text to translate
        #[arg(short, long)]
        text: String,

        /// What the text is, e.g. "work experience tasks"
        #[arg(long, default_value = category::WORK_TASKS)]
        category: String,
    },

    /// Suggest a katakana reading (furigana) for a name
    Furigana {
        /// Resume file; the suggestion is stored in personalInfo.furigana
        #[arg(short, long, conflicts_with = "name")]
        input: Option<PathBuf>,

        /// Name to transliterate without touching any file
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Render a printable HTML rirekisho
    Render {
        /// Resume file
        #[arg(short, long)]
        input: PathBuf,

        /// Output HTML file
        #[arg(short, long, default_value = "rirekisho.html")]
        output: PathBuf,
    },

    /// Export a Word-compatible .doc file
    Export {
        /// Resume file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file or directory (defaults to {lastName}_{firstName}_Resume.doc next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the default configuration file
    Config {
        /// Configuration file to create
        #[arg(short, long, default_value = "rirekisho.toml")]
        output: PathBuf,
    },

    /// Check that the translation backend is reachable
    Check,
}
