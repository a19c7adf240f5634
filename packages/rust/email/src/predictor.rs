//! Corporate email address prediction.
//!
//! Given a raw display name and the resolved company domain, generates an
//! ordered list of plausible address patterns. The list is deterministic:
//! the same cleaned name and domain always yield the same candidates in the
//! same order.

use leadscout_shared::CompanyDomain;

/// Honorific prefixes stripped before tokenizing.
const HONORIFICS: &[&str] = &["mr", "mrs", "ms", "miss", "dr", "prof", "rev", "sir", "hon"];

/// Literal last-name stand-in for single-token names.
const SINGLE_NAME_LAST: &str = "user";

/// First and last name tokens extracted from a cleaned display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub first: String,
    pub last: String,
}

/// Strip honorifics and non-name characters, collapse whitespace, lowercase.
pub fn clean_name(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .map(|c| {
            if c.is_alphabetic() || c.is_whitespace() || matches!(c, '-' | '\'') {
                c
            } else {
                ' '
            }
        })
        .collect();

    filtered
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|token| !HONORIFICS.contains(&token.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a raw name into first/last tokens.
///
/// Zero tokens is a failure (`None`); one token becomes the first name with
/// a literal "user" last name; with two or more, middle tokens are ignored.
pub fn name_parts(raw: &str) -> Option<NameParts> {
    let cleaned = clean_name(raw);
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    match tokens.as_slice() {
        [] => None,
        [only] => Some(NameParts {
            first: (*only).to_string(),
            last: SINGLE_NAME_LAST.to_string(),
        }),
        [first, .., last] => Some(NameParts {
            first: (*first).to_string(),
            last: (*last).to_string(),
        }),
    }
}

/// Generate address candidates in fixed priority order. The first entry is
/// the default/primary candidate. Empty when the name has no usable tokens.
pub fn candidates(raw_name: &str, domain: &CompanyDomain) -> Vec<String> {
    let Some(parts) = name_parts(raw_name) else {
        return Vec::new();
    };

    let NameParts { first, last } = parts;
    let d = domain.as_str();
    let initial = first.chars().next().map(String::from).unwrap_or_default();

    vec![
        format!("{first}.{last}@{d}"),
        format!("{first}{last}@{d}"),
        format!("{initial}.{last}@{d}"),
        format!("{first}@{d}"),
        format!("{last}@{d}"),
        format!("{initial}{last}@{d}"),
    ]
}

/// Last-resort address for names that clean down to nothing: keep whatever
/// alphanumerics the raw string has, or a generic local-part.
pub fn fallback_address(raw_name: &str, domain: &CompanyDomain) -> String {
    let local: String = raw_name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();
    let local = if local.is_empty() { "contact".to_string() } else { local };
    format!("{local}@{}", domain.as_str())
}
