// src/extractors/speakers.rs

// --- Imports ---
use crate::sessionize::models::{ProfileImage, SpeakerRecord};
use scraper::{ElementRef, Html, Selector};
use once_cell::sync::Lazy;

// --- CSS Selectors (Lazy Static) ---
// One match per speaker card on the listing page
static SPEAKER_CARD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".sz-speaker--full")
        .expect("Failed to compile SPEAKER_CARD_SELECTOR")
});

static PHOTO_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".sz-speaker__photo img")
        .expect("Failed to compile PHOTO_SELECTOR")
});

static NAME_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".sz-speaker__name")
        .expect("Failed to compile NAME_SELECTOR")
});

static TAGLINE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".sz-speaker__tagline")
        .expect("Failed to compile TAGLINE_SELECTOR")
});

static BIO_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".sz-speaker__bio")
        .expect("Failed to compile BIO_SELECTOR")
});

static SESSION_LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".sz-speaker__sessions li a")
        .expect("Failed to compile SESSION_LINK_SELECTOR")
});

/// Parses a speaker listing page and returns one record per full speaker card,
/// in document order.
///
/// Never fails: malformed markup yields fewer (or no) cards, and any missing
/// piece inside a card becomes an empty string. `section_title` heads the talk
/// list appended to a biography when the speaker has sessions.
pub fn extract_speakers(section_title: &str, html: &str) -> Vec<SpeakerRecord> {
    let document = Html::parse_document(html);

    let speakers: Vec<SpeakerRecord> = document
        .select(&SPEAKER_CARD_SELECTOR)
        .map(|card| extract_card(section_title, card))
        .collect();

    tracing::debug!("Extracted {} speaker cards", speakers.len());
    speakers
}

/// Sorts records by display name, ascending and case-sensitive.
pub fn sort_by_name(speakers: &mut [SpeakerRecord]) {
    speakers.sort_by(SpeakerRecord::name_order);
}

fn extract_card(section_title: &str, card: ElementRef) -> SpeakerRecord {
    let image = first_in(card, &PHOTO_SELECTOR)
        .map(|img| ProfileImage {
            src: img.value().attr("src").unwrap_or_default().to_string(),
            alt: img.value().attr("alt").unwrap_or_default().to_string(),
            ..ProfileImage::default()
        })
        .unwrap_or_default();

    let name = first_text(card, &NAME_SELECTOR).unwrap_or_default();
    let tagline = first_text(card, &TAGLINE_SELECTOR)
        .map(|t| t.trim().to_string())
        .unwrap_or_default();
    let mut bio = first_text(card, &BIO_SELECTOR).unwrap_or_default();

    let sessions: Vec<String> = card
        .select(&SESSION_LINK_SELECTOR)
        .map(|link| link.text().collect::<String>())
        .collect();

    if image.src.is_empty() {
        tracing::trace!("Speaker card '{}' has no photo", name);
    }

    if !sessions.is_empty() {
        tracing::trace!("Speaker '{}' has {} sessions", name, sessions.len());
        bio.push_str(&session_list_html(section_title, &sessions));
    }

    SpeakerRecord {
        display_name: name,
        job_title: tagline,
        biography_html: bio,
        image,
        ..SpeakerRecord::default()
    }
}

// Titles come straight from the listing markup and are not escaped
fn session_list_html(section_title: &str, sessions: &[String]) -> String {
    let mut html = format!("<h4>{}</h4><ul>", section_title);
    for title in sessions {
        html.push_str("<li>");
        html.push_str(title);
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}

fn first_in<'a>(card: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    card.select(selector).next()
}

fn first_text(card: ElementRef, selector: &Selector) -> Option<String> {
    first_in(card, selector).map(|el| el.text().collect::<String>())
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, tagline: &str, bio: &str, sessions: &[&str], photo: bool) -> String {
        let photo_html = if photo {
            format!(
                concat!(
                    r##"<div class="sz-speaker__photo"><a href="#">"##,
                    r#"<img src="https://cdn.example/{0}.jpg" alt="{0}" /></a></div>"#,
                ),
                name
            )
        } else {
            String::new()
        };
        let sessions_html = if sessions.is_empty() {
            String::new()
        } else {
            let items: String = sessions
                .iter()
                .map(|s| format!(r#"<li><a href="/s">{}</a></li>"#, s))
                .collect();
            format!(r#"<div class="sz-speaker__sessions"><ul>{}</ul></div>"#, items)
        };
        format!(
            r#"<li class="sz-speaker sz-speaker--full">{}<h3 class="sz-speaker__name">{}</h3>
            <h4 class="sz-speaker__tagline">
                {}
            </h4><div class="sz-speaker__bio">{}</div>{}</li>"#,
            photo_html, name, tagline, bio, sessions_html
        )
    }

    fn page(cards: &[String]) -> String {
        format!(
            r#"<div class="sz-root"><ul class="sz-speakers sz-speakers--list">{}</ul></div>"#,
            cards.concat()
        )
    }

    #[test]
    fn extracts_cards_in_document_order() {
        let html = page(&[
            card("Bob", "Engineer", "Bob bio", &[], true),
            card("Alice", "Architect", "Alice bio", &[], true),
            card("Carol", "Manager", "Carol bio", &[], true),
        ]);

        let speakers = extract_speakers("Talks", &html);

        let names: Vec<&str> = speakers.iter().map(|s| s.display_name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice", "Carol"]);
        assert_eq!(speakers[0].job_title, "Engineer");
        assert_eq!(speakers[0].image.src, "https://cdn.example/Bob.jpg");
        assert_eq!(speakers[0].image.alt, "Bob");
        assert_eq!(speakers[0].image.width, 400);
        assert_eq!(speakers[0].image.height, 400);
    }

    #[test]
    fn biography_unchanged_without_sessions() {
        let html = page(&[card("Bob", "Engineer", "Writes <b>compilers</b>.", &[], true)]);
        let speakers = extract_speakers("Talks", &html);
        // Text content only: inner markup of the bio is flattened
        assert_eq!(speakers[0].biography_html, "Writes compilers.");
    }

    #[test]
    fn sessions_appended_as_list() {
        let sessions = ["Intro to X", "Deep <i>Y</i>"];
        let html = page(&[card("Alice", "Architect", "Bio.", &sessions, true)]);
        let speakers = extract_speakers("Sessions", &html);
        assert_eq!(
            speakers[0].biography_html,
            "Bio.<h4>Sessions</h4><ul><li>Intro to X</li><li>Deep Y</li></ul>"
        );
    }

    #[test]
    fn missing_photo_does_not_abort_later_cards() {
        let html = page(&[
            card("NoPhoto", "Speaker", "bio", &[], false),
            card("WithPhoto", "Speaker", "bio", &[], true),
        ]);

        let speakers = extract_speakers("Talks", &html);

        assert_eq!(speakers.len(), 2);
        assert_eq!(speakers[0].image.src, "");
        assert_eq!(speakers[0].image.alt, "");
        assert_eq!(speakers[1].image.src, "https://cdn.example/WithPhoto.jpg");
    }

    #[test]
    fn missing_fields_become_empty() {
        let html = r#"<div class="sz-speaker--full"><span>nothing useful</span></div>"#;
        let speakers = extract_speakers("Talks", html);

        assert_eq!(speakers.len(), 1);
        let s = &speakers[0];
        assert_eq!(s.display_name, "");
        assert_eq!(s.job_title, "");
        assert_eq!(s.biography_html, "");
        assert_eq!(s.company_name, "");
        assert_eq!(s.id, "");
        assert_eq!(s.canonical_url, "");
        assert!(s.social.twitter.is_none() && s.social.linkedin.is_none());
    }

    #[test]
    fn image_without_attributes_yields_empty_strings() {
        let html =
            r#"<div class="sz-speaker--full"><div class="sz-speaker__photo"><img></div></div>"#;
        let speakers = extract_speakers("Talks", html);
        assert_eq!(speakers[0].image.src, "");
        assert_eq!(speakers[0].image.alt, "");
    }

    #[test]
    fn lookups_are_scoped_to_each_card() {
        // The second card has no name of its own and must not borrow the first one's
        let html = r#"
            <div class="sz-speaker--full"><h3 class="sz-speaker__name">First</h3></div>
            <div class="sz-speaker--full"><div class="sz-speaker__bio">Only a bio</div></div>
        "#;
        let speakers = extract_speakers("Talks", html);
        assert_eq!(speakers[0].display_name, "First");
        assert_eq!(speakers[1].display_name, "");
        assert_eq!(speakers[1].biography_html, "Only a bio");
    }

    #[test]
    fn first_name_match_only() {
        let html = r#"<div class="sz-speaker--full">
            <h3 class="sz-speaker__name">Primary</h3><h3 class="sz-speaker__name">Duplicate</h3>
        </div>"#;
        let speakers = extract_speakers("Talks", html);
        assert_eq!(speakers[0].display_name, "Primary");
    }

    #[test]
    fn empty_or_unmatched_input_yields_nothing() {
        assert!(extract_speakers("Talks", "").is_empty());
        let unrelated = "<html><body><p>No speakers yet</p></body></html>";
        assert!(extract_speakers("Talks", unrelated).is_empty());
        assert!(extract_speakers("Talks", "<div class=\"sz-speaker\"><<>/ unclosed").is_empty());
    }

    #[test]
    fn alphabetized_example() {
        let html = page(&[
            card("Bob", "Engineer", "Bob bio", &[], true),
            card("Alice", "Architect", "Alice bio", &["Intro to X"], true),
        ]);

        let mut speakers = extract_speakers("Talks", &html);
        sort_by_name(&mut speakers);

        assert_eq!(speakers[0].display_name, "Alice");
        assert!(speakers[0]
            .biography_html
            .ends_with("<h4>Talks</h4><ul><li>Intro to X</li></ul>"));
        assert_eq!(speakers[1].display_name, "Bob");
        assert_eq!(speakers[1].biography_html, "Bob bio");
        assert_eq!(speakers[1].job_title, "Engineer");
    }

    #[test]
    fn sorting_is_non_decreasing_and_case_sensitive() {
        let html = page(&[
            card("delta", "", "", &[], false),
            card("Charlie", "", "", &[], false),
            card("alpha", "", "", &[], false),
            card("Bravo", "", "", &[], false),
        ]);
        let mut speakers = extract_speakers("Talks", &html);
        sort_by_name(&mut speakers);

        let names: Vec<&str> = speakers.iter().map(|s| s.display_name.as_str()).collect();
        assert_eq!(names, vec!["Bravo", "Charlie", "alpha", "delta"]);
        assert!(speakers.windows(2).all(|w| w[0].display_name <= w[1].display_name));
    }
}
