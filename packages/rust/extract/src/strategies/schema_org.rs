//! Structured-data extraction: schema.org `Person` objects.
//!
//! Real pages embed `"@type": "Person"` blocks in JSON-LD that is frequently
//! malformed or truncated, so this is a tolerant regex scan over a window of
//! text around each occurrence rather than a JSON parse.

use std::sync::LazyLock;

use regex::Regex;

use crate::validate::{is_valid_name, is_valid_title};
use crate::{Candidate, ExtractionStrategy};

/// How far past `"@type": "Person"` the field scan reaches.
const FIELD_WINDOW: usize = 600;

static PERSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""@type"\s*:\s*"Person""#).expect("person regex"));

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""name"\s*:\s*"([^"]+)""#).expect("name regex"));

static JOB_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""jobTitle"\s*:\s*"([^"]+)""#).expect("jobTitle regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""email"\s*:\s*"(?:mailto:)?([^"]+@[^"]+)""#).expect("email regex")
});

pub struct SchemaOrgStrategy;

impl ExtractionStrategy for SchemaOrgStrategy {
    fn extract(&self, html: &str) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for marker in PERSON_RE.find_iter(html) {
            // Fields may precede the @type key in hand-written JSON-LD, so
            // the window reaches a little way back as well.
            let start = marker.start().saturating_sub(FIELD_WINDOW / 2);
            let end = (marker.end() + FIELD_WINDOW).min(html.len());
            let window = clamp_to_char_boundaries(html, start, end);

            let Some(name) = NAME_RE
                .captures(window)
                .map(|c| c[1].trim().to_string())
                .filter(|n| is_valid_name(n))
            else {
                continue;
            };

            let Some(title) = JOB_TITLE_RE
                .captures(window)
                .map(|c| c[1].trim().to_string())
                .filter(|t| is_valid_title(t))
            else {
                continue;
            };

            let email = EMAIL_RE.captures(window).map(|c| c[1].trim().to_string());

            candidates.push(Candidate { name, title, email });
        }

        candidates
    }

    fn name(&self) -> &'static str {
        "schema-org"
    }
}

/// Snap a byte range onto UTF-8 character boundaries.
fn clamp_to_char_boundaries(text: &str, mut start: usize, mut end: usize) -> &str {
    while start > 0 && !text.is_char_boundary(start) {
        start -= 1;
    }
    while end < text.len() && !text.is_char_boundary(end) {
        end += 1;
    }
    &text[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_person_from_json_ld() {
        let html = r#"
            <script type="application/ld+json">
            {"@context": "https://schema.org", "@type": "Person",
             "name": "Elena Rossi", "jobTitle": "Chief Financial Officer",
             "email": "mailto:elena@acme.com"}
            </script>
        "#;
        let people = SchemaOrgStrategy.extract(html);
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].name, "Elena Rossi");
        assert_eq!(people[0].title, "Chief Financial Officer");
        assert_eq!(people[0].email.as_deref(), Some("elena@acme.com"));
    }

    #[test]
    fn tolerates_broken_json() {
        // Unbalanced braces and a trailing comma — a JSON parser would bail.
        let html = r#"
            {"@type": "Person", "name": "Tom Weber", "jobTitle": "Director of Sales",,
        "#;
        let people = SchemaOrgStrategy.extract(html);
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].name, "Tom Weber");
    }

    #[test]
    fn fields_before_the_type_key_are_found() {
        let html = r#"{"name": "Ana Silva", "jobTitle": "Head of Marketing", "@type": "Person"}"#;
        let people = SchemaOrgStrategy.extract(html);
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].name, "Ana Silva");
    }

    #[test]
    fn skips_person_without_usable_fields() {
        let html = r#"{"@type": "Person", "name": "x"}"#;
        assert!(SchemaOrgStrategy.extract(html).is_empty());
    }
}
