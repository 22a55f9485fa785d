// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::sessionize::models::SpeakerRecord;
use crate::utils::error::StorageError;

const GRID_FILE: &str = "speakers.html";
const RECORDS_FILE: &str = "speakers.json";
const METADATA_FILE: &str = "speakers_meta.json";

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Writes the rendered grid as a standalone HTML page
    pub fn save_grid(&self, grid_html: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(GRID_FILE);

        let page = format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>Speakers</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
            grid_html
        );
        fs::write(&file_path, page).map_err(StorageError::IoError)?;

        tracing::info!("Saved speakers grid to {}", file_path.display());
        Ok(file_path)
    }

    /// Writes the extracted records as pretty-printed JSON
    pub fn save_records(&self, records: &[SpeakerRecord]) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(RECORDS_FILE);

        let json = serde_json::to_string_pretty(records)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved {} speaker records to {}", records.len(), file_path.display());
        Ok(file_path)
    }

    /// Saves metadata about the run in JSON format
    pub fn save_metadata(
        &self,
        source_url: &str,
        speaker_count: usize,
        alphabetized: bool,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(METADATA_FILE);

        let metadata = serde_json::json!({
            "source_url": source_url,
            "speaker_count": speaker_count,
            "alphabetized": alphabetized,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}
