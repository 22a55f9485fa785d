// src/presenter/mod.rs
pub mod grid;
pub mod profile;

// Re-export key types for convenience
#[allow(unused_imports)]
pub use grid::{FetchPhase, RefreshOutcome, SpeakersGrid};
#[allow(unused_imports)]
pub use profile::{HtmlProfileCard, ProfileProps, ProfileRenderer};
