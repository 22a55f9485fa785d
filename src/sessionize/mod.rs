// src/sessionize/mod.rs
pub mod client;
pub mod models;

pub use client::{FileSource, Recorded, SessionizeClient, SpeakerSource};
// Re-export key types for convenience
#[allow(unused_imports)]
pub use models::{ProfileImage, SocialLinks, SpeakerRecord};
