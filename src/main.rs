// src/main.rs
mod config;
mod utils;
mod sessionize;
mod extractors;
mod presenter;
mod storage;

use clap::Parser;
use std::path::PathBuf;
use config::{GridConfig, GridSettings};
use presenter::{RefreshOutcome, SpeakersGrid};
use sessionize::{FileSource, Recorded, SessionizeClient, SpeakerSource};
use storage::StorageManager;
use utils::AppError;

/// Command Line Interface for the conference speakers grid
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON settings file with `params` and `fields` (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Speaker listing URL (overrides SessionizeSpeakerUrl)
    #[arg(short, long)]
    url: Option<String>,

    /// Heading for the talk list appended to biographies (overrides SessionsListTitle)
    #[arg(long)]
    sessions_title: Option<String>,

    /// Grid headline (overrides Headline)
    #[arg(long)]
    headline: Option<String>,

    /// Number of grid columns on wide screens (overrides Columns)
    #[arg(long)]
    columns: Option<String>,

    /// Sort speakers by name (same as Alphabetize = "1")
    #[arg(short, long)]
    alphabetize: bool,

    /// Extra CSS classes for the grid (overrides Styles)
    #[arg(long)]
    styles: Option<String>,

    /// Render as in editing/preview mode: the heading is always shown
    #[arg(long)]
    preview: bool,

    /// Read the listing page from a saved file instead of fetching it
    #[arg(short, long)]
    input_file: Option<PathBuf>,

    /// Output directory for the rendered grid and records
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Debug mode - save the fetched page with speaker markers highlighted
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    /// Loads the settings file, if any, and applies command-line overrides.
    /// `--url` is applied later by re-keying the grid.
    fn settings(&self) -> Result<GridSettings, AppError> {
        let mut settings = match &self.config {
            Some(path) => config::load_settings(path)?,
            None => GridSettings::default(),
        };

        if let Some(title) = &self.sessions_title {
            settings.fields.sessions_list_title = title.clone();
        }
        if let Some(headline) = &self.headline {
            settings.fields.headline = headline.clone();
        }
        if let Some(columns) = &self.columns {
            settings.params.insert("Columns".to_string(), columns.clone());
        }
        if self.alphabetize {
            settings.params.insert("Alphabetize".to_string(), "1".to_string());
        }
        if let Some(styles) = &self.styles {
            settings.params.insert("Styles".to_string(), styles.clone());
        }

        Ok(settings)
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments and resolve configuration
    let args = Args::parse();
    tracing::info!("Starting with args: {:?}", args);

    let config = GridConfig::from_settings(args.settings()?);
    let has_url = args.url.as_deref().is_some_and(|u| !u.trim().is_empty())
        || !config.source_url.trim().is_empty();
    if !has_url && args.input_file.is_none() {
        return Err(AppError::Config(
            "No speaker listing URL given; pass --url, --input-file \
             or SessionizeSpeakerUrl in --config"
                .to_string(),
        ));
    }

    // 3. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 4. Build the grid over the chosen source and run one cycle
    match &args.input_file {
        Some(path) => run(&args, config, Recorded::new(FileSource::new(path)), &storage).await,
        None => run(&args, config, Recorded::new(SessionizeClient::new()?), &storage).await,
    }
}

async fn run<S: SpeakerSource>(
    args: &Args,
    config: GridConfig,
    source: Recorded<S>,
    storage: &StorageManager,
) -> Result<(), AppError> {
    let grid = SpeakersGrid::new(config, source);
    if let Some(url) = url_override(args.url.as_deref(), &grid.config().source_url) {
        tracing::info!("Command-line URL replaces configured source");
        grid.set_source_url(url).await;
    }
    tracing::info!("Loading speakers from: {}", grid.source_url().await);

    match grid.refresh().await {
        RefreshOutcome::Loaded { count } => tracing::info!("Loaded {} speakers", count),
        RefreshOutcome::Failed => tracing::warn!("No speakers loaded; rendering an empty grid"),
        other => tracing::debug!("Refresh finished: {:?}", other),
    }
    tracing::debug!("Grid phase after refresh: {:?}", grid.phase().await);

    if args.debug {
        match grid.source().last_body() {
            Some(body) => {
                let debug_dir = storage.base_dir().join("debug");
                std::fs::create_dir_all(&debug_dir)?;

                let raw_path = debug_dir.join("raw_speakers.html");
                std::fs::write(&raw_path, &body)?;
                tracing::info!("Saved raw page to: {}", raw_path.display());

                let annotated_path = debug_dir.join("speakers_annotated.html");
                if let Err(e) = utils::html_debug::create_debug_html(&body, &annotated_path) {
                    tracing::warn!("Failed to create debug HTML: {}", e);
                }
            }
            None => tracing::warn!("Debug mode: no page body was fetched"),
        }
    }

    // Render first: alphabetizing sorts the collection in place
    let html = grid.render(args.preview).await;
    let people = grid.people().await;

    storage.save_grid(&html)?;
    storage.save_records(&people)?;
    let source_url = grid.source_url().await;
    storage.save_metadata(&source_url, people.len(), grid.config().alphabetize)?;

    tracing::info!(
        "Processing finished: {} speakers written to {}",
        people.len(),
        storage.base_dir().display()
    );
    Ok(())
}

/// The `--url` value when it differs from the configured listing URL.
fn url_override<'a>(cli_url: Option<&'a str>, configured: &str) -> Option<&'a str> {
    cli_url.filter(|url| *url != configured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_override_only_when_different() {
        assert_eq!(url_override(None, "https://a.test"), None);
        assert_eq!(url_override(Some("https://a.test"), "https://a.test"), None);
        assert_eq!(url_override(Some("https://b.test"), "https://a.test"), Some("https://b.test"));
        assert_eq!(url_override(Some("https://b.test"), ""), Some("https://b.test"));
    }

    #[test]
    fn url_flag_is_not_folded_into_settings() {
        let args = Args::parse_from([
            "speakers_grid",
            "--url",
            "https://b.test",
            "--columns",
            "2",
            "-a",
        ]);
        let settings = args.settings().unwrap();
        assert_eq!(settings.fields.sessionize_speaker_url, "");
        assert_eq!(settings.params.get("Columns").map(String::as_str), Some("2"));
        assert_eq!(settings.params.get("Alphabetize").map(String::as_str), Some("1"));
    }

    #[tokio::test]
    async fn cli_url_rekeys_grid() {
        let config = GridConfig {
            source_url: "https://a.test".to_string(),
            ..GridConfig::default()
        };
        let grid = SpeakersGrid::new(config, FileSource::new("/nonexistent/speakers.html"));
        if let Some(url) = url_override(Some("https://b.test"), &grid.config().source_url) {
            grid.set_source_url(url).await;
        }
        assert_eq!(grid.source_url().await, "https://b.test");
    }
}
