//! Name and title validation shared by all extraction strategies.

/// Non-name words that frequently appear capitalized on team pages.
const NAME_STOPWORDS: &[&str] = &[
    "our", "team", "about", "us", "the", "contact", "meet", "privacy", "policy", "terms",
    "more", "learn", "read", "join", "careers", "home", "get", "started",
];

/// Known placeholder titles seen in templates and unfinished pages.
const TITLE_PLACEHOLDERS: &[&str] = &[
    "lorem ipsum",
    "placeholder",
    "job title",
    "your title",
    "title here",
    "position here",
    "sample",
];

/// A plausible display name: 4–50 characters, two or more words, each
/// capitalized, with only name-safe characters.
pub fn is_valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    if trimmed.len() < 4 || trimmed.len() > 50 {
        return false;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.len() < 2 || tokens.len() > 5 {
        return false;
    }

    for token in &tokens {
        let mut chars = token.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        if !first.is_uppercase() {
            return false;
        }
        if !token
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '.' | '\'' | '-'))
        {
            return false;
        }
        if NAME_STOPWORDS.contains(&token.trim_end_matches('.').to_lowercase().as_str()) {
            return false;
        }
    }

    true
}

/// A plausible job title: 3–100 characters, contains a letter, and is not a
/// known template placeholder.
pub fn is_valid_title(title: &str) -> bool {
    let trimmed = title.trim();
    if trimmed.len() < 3 || trimmed.len() > 100 {
        return false;
    }
    if !trimmed.chars().any(|c| c.is_alphabetic()) {
        return false;
    }

    let lower = trimmed.to_lowercase();
    !TITLE_PLACEHOLDERS.iter().any(|p| lower.contains(p))
}
