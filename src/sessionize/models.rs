// src/sessionize/models.rs
use serde::Serialize;
use std::cmp::Ordering;

/// Display size assumed for every speaker photo; the listing markup carries none.
pub const PROFILE_IMAGE_WIDTH: u32 = 400;
pub const PROFILE_IMAGE_HEIGHT: u32 = 400;

/// One speaker card, normalized from the listing page.
///
/// `company_name`, `social`, `id` and `canonical_url` belong to the shape the
/// profile component consumes but are never filled by the extractor: the
/// listing markup has nothing to populate them from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpeakerRecord {
    pub display_name: String,
    pub job_title: String,
    /// Biography text, optionally followed by a raw `<h4>`/`<ul>` talk list.
    pub biography_html: String,
    pub image: ProfileImage,
    pub company_name: String,
    pub social: SocialLinks,
    pub id: String,
    pub canonical_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileImage {
    pub src: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ProfileImage {
    fn default() -> Self {
        Self {
            src: String::new(),
            alt: String::new(),
            width: PROFILE_IMAGE_WIDTH,
            height: PROFILE_IMAGE_HEIGHT,
        }
    }
}

/// Reserved for later population; always `None` today.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SocialLinks {
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
}

impl SpeakerRecord {
    /// Case-sensitive ascending order on `display_name`, no tie-break.
    /// Compares Unicode code points, not UTF-16 code units.
    pub fn name_order(a: &SpeakerRecord, b: &SpeakerRecord) -> Ordering {
        a.display_name.cmp(&b.display_name)
    }
}
