//! Cross-source record deduplication.
//!
//! The same person routinely arrives from several sources under slightly
//! different spellings ("John Smith" vs "J. Smith") and title wordings
//! ("CEO" vs "Chief Executive Officer"). Records are folded together when
//! either the names match exactly or a pair of similarity scores clears
//! the thresholds below.

use leadscout_shared::{Department, PersonRecord};

const NAME_THRESHOLD: f64 = 0.8;
const POSITION_THRESHOLD: f64 = 0.3;

/// Initial-vs-full-word matches ("J." vs "John") earn a fixed bonus on top
/// of the token-match fraction.
const INITIAL_BONUS: f64 = 0.3;

/// Local parts that mark an address as predicted rather than observed.
const PLACEHOLDER_LOCALS: &[&str] = &["predicted", "unknown", "contact", "info", "hello", "office"];

/// Titles in the same coarse group score 0.8 without sharing a single word.
/// Acronyms are matched as whole tokens ("coo" must not hit inside
/// "coordinator"); phrases are matched as substrings.
const COARSE_TITLE_GROUPS: &[(&[&str], &[&str])] = &[
    (&["ceo"], &["chief executive", "president"]),
    (&["cto"], &["chief technology", "chief technical"]),
    (&["cfo"], &["chief financial"]),
    (&["coo"], &["chief operating"]),
];

// ---------------------------------------------------------------------------
// Dedup pass
// ---------------------------------------------------------------------------

/// Fold the unioned adapter output down to one record per distinct person.
/// Scans accepted records for each incoming one; order of first appearance
/// is preserved.
pub fn dedup(records: Vec<PersonRecord>) -> Vec<PersonRecord> {
    let mut accepted: Vec<PersonRecord> = Vec::with_capacity(records.len());

    for incoming in records {
        let existing = accepted.iter_mut().find(|candidate| {
            same_person(candidate, &incoming)
        });
        match existing {
            Some(slot) => merge(slot, incoming),
            None => accepted.push(incoming),
        }
    }

    tracing::debug!(distinct = accepted.len(), "dedup complete");
    accepted
}

fn same_person(a: &PersonRecord, b: &PersonRecord) -> bool {
    let name_a = a.name.trim().to_lowercase();
    let name_b = b.name.trim().to_lowercase();
    if name_a == name_b {
        return true;
    }
    name_similarity(&a.name, &b.name) > NAME_THRESHOLD
        && position_similarity(&a.position, &b.position) > POSITION_THRESHOLD
}

// ---------------------------------------------------------------------------
// Similarity scores
// ---------------------------------------------------------------------------

/// Token-level name similarity in [0, 1].
///
/// Exact match scores 1.0. Otherwise the score is the fraction of tokens
/// (against the longer token list) with a prefix match on the other side,
/// plus a bonus when one side is an initial of the other, capped at 1.0.
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a == b {
        return 1.0;
    }

    let tokens_a: Vec<&str> = a.split_whitespace().map(|t| t.trim_end_matches('.')).collect();
    let tokens_b: Vec<&str> = b.split_whitespace().map(|t| t.trim_end_matches('.')).collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let mut matched = 0usize;
    let mut initial_match = false;
    for ta in &tokens_a {
        if let Some(tb) = tokens_b.iter().find(|tb| ta.starts_with(**tb) || tb.starts_with(*ta)) {
            matched += 1;
            if (ta.len() == 1) != (tb.len() == 1) {
                initial_match = true;
            }
        }
    }

    let fraction = matched as f64 / tokens_a.len().max(tokens_b.len()) as f64;
    let bonus = if initial_match { INITIAL_BONUS } else { 0.0 };
    (fraction + bonus).min(1.0)
}

/// Position similarity in [0, 1]: exact 1.0, same coarse title group 0.8,
/// else proportional to shared significant words capped at 0.6.
pub fn position_similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    fn title_tokens(title: &str) -> Vec<&str> {
        title
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect()
    }
    let tokens_a = title_tokens(&a);
    let tokens_b = title_tokens(&b);
    if COARSE_TITLE_GROUPS.iter().any(|(acronyms, phrases)| {
        let hit = |title: &str, tokens: &[&str]| {
            acronyms.iter().any(|acr| tokens.contains(acr))
                || phrases.iter().any(|phrase| title.contains(phrase))
        };
        hit(&a, &tokens_a) && hit(&b, &tokens_b)
    }) {
        return 0.8;
    }

    let words_b: Vec<&str> = b.split_whitespace().filter(|w| w.len() > 2).collect();
    let shared = a
        .split_whitespace()
        .filter(|w| w.len() > 2)
        .filter(|w| words_b.contains(w))
        .count();
    (shared as f64 * 0.2).min(0.6)
}

// ---------------------------------------------------------------------------
// Merge rule
// ---------------------------------------------------------------------------

/// Fold `incoming` into `slot`: longer name and position win, observed
/// emails beat placeholder ones, any profile link is kept, and the
/// department stays specific when one side carries the Operations default.
fn merge(slot: &mut PersonRecord, incoming: PersonRecord) {
    if incoming.name.len() > slot.name.len() {
        slot.name = incoming.name;
    }
    if incoming.position.len() > slot.position.len() {
        slot.position = incoming.position;
    }

    slot.email = match (slot.email.take(), incoming.email) {
        (Some(current), Some(candidate)) => {
            if looks_placeholder(&current) && !looks_placeholder(&candidate) {
                Some(candidate)
            } else {
                Some(current)
            }
        }
        (Some(current), None) => Some(current),
        (None, candidate) => candidate,
    };

    if slot.profile_link.is_none() {
        slot.profile_link = incoming.profile_link;
    }
    if slot.department == Department::Operations && incoming.department != Department::Operations {
        slot.department = incoming.department;
    }
    for source in incoming.sources {
        slot.add_source(source);
    }
}

/// An address counts as predicted when its local part is a generic
/// placeholder or its domain is the degenerate synthesis result.
fn looks_placeholder(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return true;
    };
    PLACEHOLDER_LOCALS.contains(&local.to_lowercase().as_str()) || domain == "example.com"
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadscout_shared::SourceKind;

    fn record(name: &str, position: &str, source: SourceKind) -> PersonRecord {
        PersonRecord::observed(name, position, source)
    }

    #[test]
    fn identical_names_merge_to_one_record() {
        let out = dedup(vec![
            record("Maria Gonzalez", "CEO", SourceKind::ProfessionalNetwork),
            record("  maria gonzalez ", "Chief Executive Officer", SourceKind::WebsiteScrape),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].position, "Chief Executive Officer");
        assert_eq!(
            out[0].sources,
            vec![SourceKind::ProfessionalNetwork, SourceKind::WebsiteScrape]
        );
    }

    #[test]
    fn initial_form_merges_when_positions_agree() {
        let out = dedup(vec![
            record("John Smith", "CEO", SourceKind::ProfessionalNetwork),
            record("J. Smith", "Chief Executive Officer", SourceKind::StartupDatabase),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "John Smith");
    }

    #[test]
    fn initial_form_with_unrelated_positions_stays_separate() {
        let out = dedup(vec![
            record("John Smith", "CEO", SourceKind::ProfessionalNetwork),
            record("J. Smith", "Warehouse Associate", SourceKind::WebsiteScrape),
        ]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn name_similarity_initial_scenario() {
        assert!(name_similarity("John Smith", "J. Smith") >= 0.8);
    }

    #[test]
    fn name_similarity_unrelated_names_score_low() {
        assert!(name_similarity("John Smith", "Maria Gonzalez") < 0.3);
    }

    #[test]
    fn position_similarity_groups_and_shared_words() {
        assert_eq!(position_similarity("CEO", "Chief Executive Officer"), 0.8);
        assert_eq!(position_similarity("VP of Engineering", "VP of Engineering"), 1.0);
        let shared = position_similarity("Head of Engineering", "Engineering Manager");
        assert!(shared > 0.0 && shared <= 0.6);
        assert_eq!(position_similarity("CEO", "Barista"), 0.0);
    }

    #[test]
    fn acronym_groups_require_whole_tokens() {
        assert!(position_similarity("Director of Marketing", "CTO") < 0.8);
        assert!(position_similarity("Event Coordinator", "COO") < 0.8);
        assert_eq!(position_similarity("CTO & Co-founder", "Chief Technology Officer"), 0.8);
    }

    #[test]
    fn similar_names_with_group_mismatched_titles_stay_separate() {
        let out = dedup(vec![
            record("John Smith", "CTO", SourceKind::ProfessionalNetwork),
            record("J. Smith", "Director of Marketing", SourceKind::WebsiteScrape),
        ]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn merge_prefers_observed_email_over_placeholder() {
        let mut a = record("Jane Doe", "CEO", SourceKind::EmailDirectory);
        a.email = Some("predicted@x.com".into());
        let mut b = record("Jane Doe", "CEO", SourceKind::WebsiteScrape);
        b.email = Some("j.doe@x.com".into());

        let out = dedup(vec![a, b]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].email.as_deref(), Some("j.doe@x.com"));
    }

    #[test]
    fn merge_keeps_profile_link_and_specific_department() {
        let a = record("Sam Lee", "Team Member", SourceKind::WebsiteScrape);
        let mut b = record("Sam Lee", "CTO", SourceKind::ProfessionalNetwork);
        b.profile_link = Some("https://pn.example/sam".into());

        let out = dedup(vec![a, b]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].department, Department::Technology);
        assert_eq!(out[0].profile_link.as_deref(), Some("https://pn.example/sam"));
    }
}
