//! Rirekisho - Japanese resume builder
//!
//! Entry point for the command line tool: translates resume fields with an
//! LLM backend, suggests furigana, and renders or exports the rirekisho layout.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_appender::{non_blocking, rolling};

use rirekisho::cli::{Args, Commands};
use rirekisho::config::Config;
use rirekisho::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    // Load configuration
    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            // Try to load rirekisho.toml from current directory first
            if std::path::Path::new("rirekisho.toml").exists() {
                info!("Found rirekisho.toml in current directory, loading...");
                Config::from_file("rirekisho.toml")?
            } else {
                Config::default()
            }
        }
    };

    let workflow = Workflow::new(config.clone());

    match args.command {
        Commands::Init { output, force } => {
            workflow.init_resume(&output, force).await?;
            println!("Created {}", output.display());
        }
        Commands::Translate { input, output, update_out } => {
            let summary = workflow.translate_resume(&input, output, update_out).await?;
            println!(
                "Translation complete: {}/{} fields translated, {} merged",
                summary.translated, summary.attempted, summary.merged
            );
        }
        Commands::TranslateField { text, category } => {
            let translation = workflow.translate_text(&text, &category).await?;
            println!("{}", translation);
        }
        Commands::Furigana { input, name } => {
            let suggestion = match (input, name) {
                (Some(input), _) => workflow.suggest_furigana(&input).await?,
                (None, Some(name)) => workflow.transliterate_name(&name).await?,
                (None, None) => anyhow::bail!("Pass either --input or --name"),
            };
            if suggestion.is_empty() {
                println!("No suggestion available");
            } else {
                println!("{}", suggestion);
            }
        }
        Commands::Render { input, output } => {
            workflow.render_resume(&input, &output).await?;
            println!("Open {} in a browser and print it", output.display());
        }
        Commands::Export { input, output } => {
            let written = workflow.export_resume(&input, output).await?;
            println!("Exported {}", written.display());
        }
        Commands::Config { output } => {
            config.save_to_file(&output)?;
            println!("Wrote {}", output.display());
        }
        Commands::Check => {
            workflow.check_backend().await?;
            println!(
                "{:?} backend is available (model {})",
                config.translate.provider, config.translate.model
            );
        }
    }

    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = std::env::current_dir()?.join(".rirekisho").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "rirekisho.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
