// src/presenter/profile.rs
use crate::config::GridParams;
use crate::sessionize::models::SpeakerRecord;

/// What a profile component receives for one speaker: the grid's passthrough
/// params plus the record itself.
#[derive(Debug, Clone, Copy)]
pub struct ProfileProps<'a> {
    pub params: &'a GridParams,
    pub fields: &'a SpeakerRecord,
}

/// Renders a single speaker profile. `key` is the record's position in the grid.
pub trait ProfileRenderer {
    fn render_profile(&self, key: usize, props: &ProfileProps<'_>) -> String;
}

/// Plain HTML card used when no other renderer is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlProfileCard;

impl ProfileRenderer for HtmlProfileCard {
    fn render_profile(&self, key: usize, props: &ProfileProps<'_>) -> String {
        let person = props.fields;
        let mut html = format!("<article class=\"profile\" data-key=\"{}\">", key);

        if !person.image.src.is_empty() {
            html.push_str(&format!(
                "<img class=\"profile__image\" src=\"{}\" alt=\"{}\" width=\"{}\" height=\"{}\">",
                escape_html(&person.image.src),
                escape_html(&person.image.alt),
                person.image.width,
                person.image.height,
            ));
        }

        html.push_str(&format!(
            "<h3 class=\"profile__name\">{}</h3>",
            escape_html(&person.display_name)
        ));

        if !person.job_title.is_empty() {
            html.push_str(&format!(
                "<p class=\"profile__role\">{}</p>",
                escape_html(&person.job_title)
            ));
        }
        if !person.company_name.is_empty() {
            html.push_str(&format!(
                "<p class=\"profile__company\">{}</p>",
                escape_html(&person.company_name)
            ));
        }

        // Biography is already markup
        html.push_str(&format!("<div class=\"profile__bio\">{}</div>", person.biography_html));
        html.push_str("</article>");
        html
    }
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
