// src/utils/html_debug.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::utils::error::AppError;

/// Class markers the speaker extractor relies on, paired with a highlight type.
pub const SPEAKER_MARKERS: [(&str, &str); 6] = [
    ("sz-speaker--full", "card"),
    ("sz-speaker__photo", "photo"),
    ("sz-speaker__name", "name"),
    ("sz-speaker__tagline", "tagline"),
    ("sz-speaker__bio", "bio"),
    ("sz-speaker__sessions", "sessions"),
];

/// Saves a HTML page to a file with debug highlights
pub fn save_debug_html(
    html: &str,
    filename: &Path,
    highlights: &[(usize, usize, &str)],
) -> Result<(), AppError> {
    let mut file = File::create(filename)?;

    // Highlighted spans are shown as escaped source so the markup stays readable
    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");
    debug_html.push_str("body { font-family: monospace; white-space: pre-wrap; }\n");
    debug_html.push_str(".highlight-card { background-color: #FFFF00; }\n");
    debug_html.push_str(".highlight-photo { background-color: #FFA500; }\n");
    debug_html.push_str(".highlight-name { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-tagline { background-color: #E6E6FA; }\n");
    debug_html.push_str(".highlight-bio { background-color: #F5DEB3; }\n");
    debug_html.push_str(".highlight-sessions { background-color: #ADD8E6; }\n");
    debug_html.push_str(".highlight-custom { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n");

    let mut last_pos = 0;
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0);

    for (start, end, highlight_type) in sorted_highlights {
        // Overlapping matches would split the same attribute twice
        if start < last_pos || end > html.len() {
            continue;
        }
        debug_html.push_str(&escape_source(&html[last_pos..start]));

        let css_class = match highlight_type {
            "card" => "highlight-card",
            "photo" => "highlight-photo",
            "name" => "highlight-name",
            "tagline" => "highlight-tagline",
            "bio" => "highlight-bio",
            "sessions" => "highlight-sessions",
            _ => "highlight-custom",
        };

        debug_html.push_str(&format!("<span class=\"{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class, start, end, highlight_type));
        debug_html.push_str(&escape_source(&html[start..end]));
        debug_html.push_str("</span>");

        last_pos = end;
    }

    if last_pos < html.len() {
        debug_html.push_str(&escape_source(&html[last_pos..]));
    }

    debug_html.push_str("\n</body>\n</html>");
    file.write_all(debug_html.as_bytes())?;

    tracing::info!("Saved debug HTML to {}", filename.display());
    Ok(())
}

/// Writes an annotated copy of a fetched speaker page with every class marker
/// from `SPEAKER_MARKERS` highlighted. Returns the number of highlights.
pub fn create_debug_html(html: &str, filename: &Path) -> Result<usize, AppError> {
    use regex::Regex;

    let mut highlights = Vec::new();

    for (marker, highlight_type) in SPEAKER_MARKERS {
        let pattern = format!(r#"class\s*=\s*["'][^"']*\b{}\b[^"']*["']"#, regex::escape(marker));
        let re = Regex::new(&pattern).map_err(|e| {
            AppError::Config(format!("Invalid marker pattern '{}': {}", pattern, e))
        })?;

        for mat in re.find_iter(html) {
            highlights.push((mat.start(), mat.end(), highlight_type));
        }
    }

    let count = highlights.len();
    tracing::debug!("Found {} speaker markers in fetched page", count);
    save_debug_html(html, filename, &highlights)?;
    Ok(count)
}

fn escape_source(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
