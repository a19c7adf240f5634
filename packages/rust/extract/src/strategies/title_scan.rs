//! Executive-title scan: fixed title vocabulary with a name search in the
//! surrounding text window.
//!
//! Catches layouts the other families miss, like a heading with the title
//! and the name in a sibling block several tags away.

use std::sync::LazyLock;

use regex::Regex;

use crate::text::strip_tags;
use crate::validate::is_valid_name;
use crate::{Candidate, ExtractionStrategy};

/// How many characters around a title occurrence are searched for a name.
const NAME_WINDOW: usize = 80;

/// Title vocabulary, longest-first so "Chief Executive Officer" wins over
/// "President" inside the same window.
static TITLE_VOCAB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(Chief Executive Officer|Chief Technology Officer|Chief Financial Officer|Chief Operating Officer|Chief Marketing Officer|Vice President|Co-Founder|Head of [A-Za-z]+|Managing Director|President|Founder|Director|CEO|CTO|CFO|COO|CMO|VP|Lead)\b",
    )
    .expect("title vocab regex")
});

/// Two to three capitalized words, tolerant of initials and hyphens.
static NAME_SHAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[A-Z][a-z]+(?:\s+[A-Z]\.)?\s+[A-Z][a-z]+(?:['-][A-Z][a-z]+)*",
    )
    .expect("name shape regex")
});

pub struct TitleScanStrategy;

impl ExtractionStrategy for TitleScanStrategy {
    fn extract(&self, html: &str) -> Vec<Candidate> {
        let text = strip_tags(html);
        let mut candidates = Vec::new();

        for m in TITLE_VOCAB_RE.find_iter(&text) {
            let title = text[m.range()].to_string();

            let before_start = clamp_start(&text, m.start().saturating_sub(NAME_WINDOW));
            let after_end = clamp_end(&text, (m.end() + NAME_WINDOW).min(text.len()));
            let before = &text[before_start..m.start()];
            let after = &text[m.end()..after_end];

            // Prefer the name preceding the title ("Jane Doe\nCEO"), then
            // the one following it ("CEO\nJane Doe").
            let name = NAME_SHAPE_RE
                .find_iter(before)
                .last()
                .or_else(|| NAME_SHAPE_RE.find(after))
                .map(|n| n.as_str().trim().to_string())
                .filter(|n| is_valid_name(n));

            if let Some(name) = name {
                candidates.push(Candidate::new(name, title));
            }
        }

        candidates
    }

    fn name(&self) -> &'static str {
        "title-scan"
    }
}

fn clamp_start(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn clamp_end(text: &str, mut idx: usize) -> usize {
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}
