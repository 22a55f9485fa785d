// src/extractors/mod.rs
pub mod speakers;

// Re-export key extraction functions for convenience
pub use speakers::{extract_speakers, sort_by_name};
