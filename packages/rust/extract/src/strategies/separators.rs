//! Inline separator extraction: free-text `Name - Title` style segments.
//!
//! Each text segment is tried against the separator patterns in priority
//! order; the first split yielding BOTH a valid name and a valid title is
//! accepted for that segment.

use std::sync::LazyLock;

use regex::Regex;

use crate::text::strip_tags;
use crate::validate::{is_valid_name, is_valid_title};
use crate::{Candidate, ExtractionStrategy};

static PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.{4,50}?)\s*\((.{3,100})\)$").expect("paren regex"));

/// Leading titles recognized for the `Title: Name` and `Title Name` forms.
const LEADING_TITLES: &[&str] = &[
    "Chief Executive Officer",
    "Chief Technology Officer",
    "Chief Financial Officer",
    "Chief Operating Officer",
    "Chief Marketing Officer",
    "Vice President",
    "Co-Founder",
    "President",
    "Founder",
    "Director",
    "CEO",
    "CTO",
    "CFO",
    "COO",
    "CMO",
];

pub struct SeparatorStrategy;

impl ExtractionStrategy for SeparatorStrategy {
    fn extract(&self, html: &str) -> Vec<Candidate> {
        let text = strip_tags(html);
        let mut candidates = Vec::new();

        for segment in text.lines() {
            let segment = segment.trim();
            if segment.len() < 8 || segment.len() > 160 {
                continue;
            }
            if let Some(candidate) = try_segment(segment) {
                candidates.push(candidate);
            }
        }

        candidates
    }

    fn name(&self) -> &'static str {
        "separators"
    }
}

/// Try the separator patterns in priority order; first full match wins.
fn try_segment(segment: &str) -> Option<Candidate> {
    // "Name - Title", "Name, Title", "Name | Title"
    for sep in [" - ", " – ", ", ", " | "] {
        if let Some((left, right)) = segment.split_once(sep) {
            if let Some(c) = accept(left, right) {
                return Some(c);
            }
        }
    }

    // "Name (Title)"
    if let Some(caps) = PAREN_RE.captures(segment) {
        if let Some(c) = accept(&caps[1], &caps[2]) {
            return Some(c);
        }
    }

    // "Title: Name"
    if let Some((left, right)) = segment.split_once(": ") {
        if let Some(c) = accept(right, left) {
            return Some(c);
        }
    }

    // "Title Name" with a known leading title, e.g. "CEO John Smith"
    for title in LEADING_TITLES {
        if let Some(rest) = segment.strip_prefix(title) {
            let rest = rest.trim_start_matches([' ', ':', '-']);
            if let Some(c) = accept(rest, title) {
                return Some(c);
            }
        }
    }

    None
}

fn accept(name: &str, title: &str) -> Option<Candidate> {
    let name = name.trim();
    let title = title.trim();
    (is_valid_name(name) && is_valid_title(title)).then(|| Candidate::new(name, title))
}
