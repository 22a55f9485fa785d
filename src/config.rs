// src/config.rs
use crate::utils::AppError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_COLUMNS: u32 = 4;

/// Opaque key/value options handed through to the profile component.
pub type GridParams = HashMap<String, String>;

/// Settings file shape: free-form `params` plus the three content fields.
///
/// ```json
/// {
///   "params": { "Columns": "3", "Alphabetize": "1", "Styles": "bg-dark" },
///   "fields": {
///     "Headline": "Speakers",
///     "SessionsListTitle": "Sessions",
///     "SessionizeSpeakerUrl": "https://sessionize.com/api/v2/xxxx/view/Speakers"
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GridSettings {
    #[serde(default)]
    pub params: GridParams,
    #[serde(default)]
    pub fields: GridFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GridFields {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub sessions_list_title: String,
    #[serde(default)]
    pub sessionize_speaker_url: String,
}

/// Resolved presenter configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub headline: String,
    pub sessions_list_title: String,
    pub source_url: String,
    pub columns: u32,
    pub alphabetize: bool,
    pub styles: String,
    pub params: GridParams,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::from_settings(GridSettings::default())
    }
}

impl GridConfig {
    pub fn from_settings(settings: GridSettings) -> Self {
        let columns = settings
            .params
            .get("Columns")
            .map(|raw| parse_columns(raw))
            .unwrap_or(DEFAULT_COLUMNS);
        let alphabetize = settings.params.get("Alphabetize").map(String::as_str) == Some("1");
        let styles = settings.params.get("Styles").cloned().unwrap_or_default();

        Self {
            headline: settings.fields.headline,
            sessions_list_title: settings.fields.sessions_list_title,
            source_url: settings.fields.sessionize_speaker_url,
            columns,
            alphabetize,
            styles,
            params: settings.params,
        }
    }
}

fn parse_columns(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => {
            tracing::warn!("Ignoring invalid Columns value '{}', using {}", raw, DEFAULT_COLUMNS);
            DEFAULT_COLUMNS
        }
    }
}

/// Reads a JSON settings file.
pub fn load_settings(path: &Path) -> Result<GridSettings, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let settings = serde_json::from_str(&raw).map_err(|e| {
        AppError::Config(format!("Invalid settings file {}: {}", path.display(), e))
    })?;
    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}
