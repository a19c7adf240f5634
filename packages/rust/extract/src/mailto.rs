//! `mailto:` harvesting and name association.
//!
//! A separate pass collects every address on the page and wires each to an
//! extracted name by substring match on first/last name fragments within the
//! email local-part. Addresses found this way take precedence over predicted
//! emails downstream.

use std::sync::LazyLock;

use regex::Regex;

use crate::Candidate;

// Regex rather than a DOM walk so truncated anchors still yield addresses.
static MAILTO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"mailto:([A-Za-z0-9._%+'\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,})"#)
        .expect("mailto regex")
});

/// Collect all distinct `mailto:` addresses on a page, in document order.
pub fn harvest_mailto(html: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for caps in MAILTO_RE.captures_iter(html) {
        let addr = caps[1].to_lowercase();
        if !seen.contains(&addr) {
            seen.push(addr);
        }
    }
    seen
}

/// Attach harvested addresses to candidates whose first or last name
/// fragment appears in the local-part. Existing inline emails are kept.
pub fn associate_emails(candidates: &mut [Candidate], emails: &[String]) {
    for candidate in candidates.iter_mut() {
        if candidate.email.is_some() {
            continue;
        }

        let fragments: Vec<String> = candidate
            .name
            .to_lowercase()
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphabetic()).to_string())
            .filter(|t| t.len() > 2)
            .collect();

        candidate.email = emails
            .iter()
            .find(|email| {
                let local = email.split('@').next().unwrap_or_default();
                fragments.iter().any(|fragment| local.contains(fragment))
            })
            .cloned();
    }
}
