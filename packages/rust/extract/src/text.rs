//! Plain-text view of an HTML blob for the regex-based strategies.

use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<script\b[^>]*>.*?</script>|<style\b[^>]*>.*?</style>|<noscript\b[^>]*>.*?</noscript>",
    )
    .expect("script/style regex")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));

static BLANK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("blank regex"));

/// Reduce HTML to line-oriented plain text.
///
/// Script/style bodies are dropped, every remaining tag becomes a line
/// break (so text from sibling elements never fuses into one segment),
/// and the handful of entities that show up in names survive decoding.
/// Works on truncated input because unclosed tags simply never match.
pub fn strip_tags(html: &str) -> String {
    let without_scripts = SCRIPT_STYLE_RE.replace_all(html, "\n");
    let without_tags = TAG_RE.replace_all(&without_scripts, "\n");

    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&quot;", "\"")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-");

    let trimmed: String = decoded
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");

    BLANK_RE.replace_all(&trimmed, "\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_to_lines() {
        let html = "<div><h3>Jane Doe</h3><p>CTO</p></div>";
        let text = strip_tags(html);
        assert_eq!(text, "Jane Doe\nCTO");
    }

    #[test]
    fn drops_script_and_style_bodies() {
        let html = "<script>var team = 'Bob Smith - CEO';</script><p>Ann Lee - CFO</p>";
        let text = strip_tags(html);
        assert!(!text.contains("Bob Smith"));
        assert!(text.contains("Ann Lee - CFO"));
    }

    #[test]
    fn decodes_common_entities() {
        let html = "<span>Sarah O&#39;Connor &amp; Partners</span>";
        assert_eq!(strip_tags(html), "Sarah O'Connor & Partners");
    }

    #[test]
    fn tolerates_truncated_markup() {
        let text = strip_tags("<div class=\"team\"><h3>Bob");
        assert!(text.contains("Bob"));
    }
}
