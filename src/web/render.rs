//! Server-side HTML for the search pages.

use std::fmt::Write;

use crate::core::fingering::{Fingering, FretFilter};
use crate::core::instrument::{InstrumentProfile, InstrumentRegistry};
use crate::matching::engine::SearchResults;

const LAYOUT: &str = include_str!("templates/layout.html");

/// Escape text for use in HTML element content and quoted attributes
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> String {
    LAYOUT
        .replace("{{title}}", &escape_html(title))
        .replace("{{body}}", body)
}

/// Landing page listing every registered instrument
#[must_use]
pub fn render_index(registry: &InstrumentRegistry) -> String {
    let mut body = String::from("  <p>Pick an instrument:</p>\n  <ul>\n");
    for profile in registry.profiles() {
        let name = escape_html(&profile.name);
        let _ = writeln!(
            body,
            "    <li><a href=\"/{name}/\">{name}</a> <span class=\"muted\">({} strings, {} chord types)</span></li>",
            profile.strings.len(),
            profile.modifiers.len()
        );
    }
    body.push_str("  </ul>\n");
    page("Chord Search", &body)
}

/// Search page for one instrument, with results when a query was given
#[must_use]
pub fn render_search(
    profile: &InstrumentProfile,
    base_url: &str,
    query: &str,
    results: Option<&SearchResults>,
) -> String {
    let mut body = String::new();
    let instrument = escape_html(&profile.name);

    let _ = writeln!(body, "  <h2>{instrument}</h2>");
    let _ = writeln!(
        body,
        "  <form onsubmit=\"location.href='/{instrument}/'+encodeURIComponent(this.q.value||'all');return false;\">\n    <input type=\"text\" name=\"q\" value=\"{}\" placeholder=\"e.g. b2g2D2\">\n    <button type=\"submit\">Search</button>\n  </form>",
        escape_html(query)
    );
    let _ = writeln!(
        body,
        "  <p class=\"muted\">Strings: {}. Unset strings count as open.</p>",
        escape_html(&profile.strings.join(" "))
    );

    if let Some(results) = results {
        render_filter(&mut body, &results.filter);
        render_results(&mut body, profile, base_url, results);
    }

    page(&format!("{} chords", profile.name), &body)
}

fn render_filter(body: &mut String, filter: &FretFilter) {
    if filter.is_empty() {
        body.push_str("  <p>Showing all chords.</p>\n");
        return;
    }
    let frets: Vec<String> = filter
        .iter()
        .map(|(string, fret)| format!("{string}{fret}"))
        .collect();
    let _ = writeln!(
        body,
        "  <p>Matching <code>{}</code></p>",
        escape_html(&frets.join(" "))
    );
}

fn render_results(
    body: &mut String,
    profile: &InstrumentProfile,
    base_url: &str,
    results: &SearchResults,
) {
    if results.chords.is_empty() {
        body.push_str("  <p>No chords found.</p>\n");
        return;
    }

    body.push_str("  <table>\n    <tr><th>Chord</th>");
    for string in &profile.strings {
        let _ = write!(body, "<th class=\"fret\">{}</th>", escape_html(string));
    }
    body.push_str("<th>Distance</th></tr>\n");

    body.push_str("    <tr class=\"target\"><td>query</td>");
    render_frets(body, profile, &results.target);
    body.push_str("<td></td></tr>\n");

    for ranked in &results.chords {
        let fingering = &ranked.fingering;
        let _ = write!(
            body,
            "    <tr><td><a href=\"{}\">{}</a> <a class=\"muted\" href=\"{}\">json</a></td>",
            escape_html(&fingering.url_html(base_url)),
            escape_html(&fingering.name()),
            escape_html(&fingering.url_json(base_url))
        );
        render_frets(body, profile, fingering);
        let _ = writeln!(body, "<td>{}</td></tr>", ranked.rank.distance);
    }
    body.push_str("  </table>\n");
}

fn render_frets(body: &mut String, profile: &InstrumentProfile, fingering: &Fingering) {
    for string in &profile.strings {
        let _ = write!(
            body,
            "<td class=\"fret\">{}</td>",
            escape_html(fingering.fret(string))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::ChordCatalog;
    use crate::core::fingering::ChordRecord;
    use crate::matching::engine::SearchEngine;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("A major"), "A major");
    }

    #[test]
    fn test_render_index_lists_instruments() {
        let html = render_index(InstrumentRegistry::builtin());
        assert!(html.contains("<a href=\"/guitar/\">guitar</a>"));
        assert!(html.contains("6 strings, 22 chord types"));
    }

    #[test]
    fn test_render_empty_search_page() {
        let registry = InstrumentRegistry::builtin();
        let profile = registry.lookup("guitar").unwrap();
        let html = render_search(profile, "http://localhost:8080", "", None);
        assert!(html.contains("<title>guitar chords</title>"));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_render_results() {
        let registry = InstrumentRegistry::builtin();
        let mut catalog = ChordCatalog::new();
        catalog.add_record(
            "guitar",
            ChordRecord::new("A", "major").with_frets([("D", "2"), ("g", "2"), ("b", "2")]),
        );
        let results = SearchEngine::new(registry, &catalog)
            .find_chords("guitar", "b2")
            .unwrap();
        let profile = registry.lookup("guitar").unwrap();

        let html = render_search(profile, "http://localhost:8080", "b2", Some(&results));
        assert!(html.contains("Matching <code>b2</code>"));
        assert!(html.contains("href=\"http://localhost:8080/guitar/e0b2g2D2A0E0--A_major\""));
        assert!(html.contains(">A major</a>"));
        assert!(html.contains("<td>4</td>"));
    }

    #[test]
    fn test_render_escapes_query() {
        let registry = InstrumentRegistry::builtin();
        let profile = registry.lookup("guitar").unwrap();
        let html = render_search(profile, "", "\"><script>", None);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_render_no_results() {
        let registry = InstrumentRegistry::builtin();
        let catalog = ChordCatalog::new();
        let results = SearchEngine::new(registry, &catalog)
            .find_chords("guitar", "all")
            .unwrap();
        let profile = registry.lookup("guitar").unwrap();
        let html = render_search(profile, "", "all", Some(&results));
        assert!(html.contains("Showing all chords."));
        assert!(html.contains("No chords found."));
    }
}
