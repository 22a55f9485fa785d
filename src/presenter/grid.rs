// src/presenter/grid.rs
use crate::config::GridConfig;
use crate::extractors::{extract_speakers, sort_by_name};
use crate::presenter::profile::{escape_html, HtmlProfileCard, ProfileProps, ProfileRenderer};
use crate::sessionize::client::SpeakerSource;
use crate::sessionize::models::SpeakerRecord;
use tokio::sync::Mutex;

/// Below this width the grid collapses to a single column.
const BREAKPOINT: &str = "48em";

/// Where the grid is in its fetch cycle. `key` is the source URL a phase belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Fetching { key: String, generation: u64 },
    Loaded { key: String },
    Failed { key: String },
}

/// Result of one `refresh` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The collection was replaced with `count` records.
    Loaded { count: usize },
    /// The current URL is already loaded or in flight.
    Skipped,
    /// A newer refresh was issued while this one was fetching; its result was dropped.
    Superseded,
    /// The fetch failed; the collection was left as it was.
    Failed,
}

struct GridState {
    people: Vec<SpeakerRecord>,
    source_url: String,
    generation: u64,
    phase: FetchPhase,
}

/// A titled grid of speaker profiles fed from a remote listing page.
///
/// Fetches are keyed by the source URL: calling `refresh` again for a URL that
/// is loaded or already in flight does nothing. Every issued fetch takes a new
/// generation number and only the latest generation may replace the collection.
pub struct SpeakersGrid<S, R = HtmlProfileCard> {
    config: GridConfig,
    source: S,
    renderer: R,
    state: Mutex<GridState>,
}

impl<S: SpeakerSource> SpeakersGrid<S, HtmlProfileCard> {
    pub fn new(config: GridConfig, source: S) -> Self {
        Self::with_renderer(config, source, HtmlProfileCard)
    }
}

impl<S: SpeakerSource, R: ProfileRenderer> SpeakersGrid<S, R> {
    pub fn with_renderer(config: GridConfig, source: S, renderer: R) -> Self {
        let state = GridState {
            people: Vec::new(),
            source_url: config.source_url.clone(),
            generation: 0,
            phase: FetchPhase::Idle,
        };
        Self { config, source, renderer, state: Mutex::new(state) }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Points the grid at a new listing URL. The next `refresh` fetches it.
    pub async fn set_source_url(&self, url: impl Into<String>) {
        let url = url.into();
        let mut state = self.state.lock().await;
        if state.source_url != url {
            tracing::debug!("Speaker source changed from {} to {}", state.source_url, url);
            state.source_url = url;
        }
    }

    pub async fn source_url(&self) -> String {
        self.state.lock().await.source_url.clone()
    }

    pub async fn phase(&self) -> FetchPhase {
        self.state.lock().await.phase.clone()
    }

    /// Snapshot of the current collection.
    pub async fn people(&self) -> Vec<SpeakerRecord> {
        self.state.lock().await.people.clone()
    }

    /// Fetches and extracts the current source URL unless it is already loaded
    /// or in flight. Failures are logged and never surface to the caller.
    pub async fn refresh(&self) -> RefreshOutcome {
        let (url, generation) = {
            let mut state = self.state.lock().await;
            let url = state.source_url.clone();
            match &state.phase {
                FetchPhase::Fetching { key, .. } | FetchPhase::Loaded { key } if *key == url => {
                    tracing::debug!("Speakers for {} already loaded or in flight", url);
                    return RefreshOutcome::Skipped;
                }
                _ => {}
            }
            state.generation += 1;
            let generation = state.generation;
            state.phase = FetchPhase::Fetching { key: url.clone(), generation };
            (url, generation)
        };

        tracing::info!("Fetching speakers from {} (generation {})", url, generation);

        // The lock is not held across the fetch
        let fetched = self
            .source
            .fetch_html(&url)
            .await
            .map(|body| extract_speakers(&self.config.sessions_list_title, &body));

        if let Err(e) = &fetched {
            tracing::error!("Error fetching speaker data from {}: {}", url, e);
        }

        let mut state = self.state.lock().await;
        if state.generation != generation {
            tracing::info!(
                "Dropping speakers from {} (generation {}, latest {})",
                url, generation, state.generation
            );
            return RefreshOutcome::Superseded;
        }

        match fetched {
            Ok(people) => {
                let count = people.len();
                tracing::info!("Loaded {} speakers from {}", count, url);
                state.people = people;
                state.phase = FetchPhase::Loaded { key: url };
                RefreshOutcome::Loaded { count }
            }
            Err(_) => {
                state.phase = FetchPhase::Failed { key: url };
                RefreshOutcome::Failed
            }
        }
    }

    /// Renders the heading and the profile grid.
    ///
    /// With alphabetize on, the collection is sorted in place on every pass.
    /// The heading shows in editing mode or when the headline is non-empty.
    pub async fn render(&self, editing: bool) -> String {
        let mut state = self.state.lock().await;
        if self.config.alphabetize {
            sort_by_name(&mut state.people);
        }

        let class = if self.config.styles.is_empty() {
            "speakers-grid".to_string()
        } else {
            format!("speakers-grid {}", escape_html(&self.config.styles))
        };

        let mut html = format!("<section class=\"{}\">", class);
        html.push_str(&format!(
            "<style>.speakers-grid__items{{display:grid;grid-template-columns:1fr}}\
             @media (min-width:{}){{.speakers-grid__items{{\
             grid-template-columns:repeat({},1fr)}}}}</style>",
            BREAKPOINT, self.config.columns
        ));

        if editing || !self.config.headline.is_empty() {
            html.push_str(&format!(
                "<h2 class=\"speakers-grid__headline\">{}</h2>",
                escape_html(&self.config.headline)
            ));
        }

        html.push_str(&format!(
            "<div class=\"speakers-grid__items\" data-columns=\"{}\">",
            self.config.columns
        ));
        for (idx, person) in state.people.iter().enumerate() {
            let props = ProfileProps { params: &self.config.params, fields: person };
            html.push_str(&self.renderer.render_profile(idx, &props));
        }
        html.push_str("</div></section>");

        tracing::debug!("Rendered {} speaker profiles", state.people.len());
        html
    }
}
