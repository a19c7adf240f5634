//! Container-based extraction: team/member/person markup.
//!
//! Looks for elements whose class attribute mentions team-like words, takes
//! the first heading inside as the name, a title-like text segment as the
//! position, and an adjacent `mailto:` link when present.

use scraper::{ElementRef, Html, Selector};

use crate::validate::{is_valid_name, is_valid_title};
use crate::{Candidate, ExtractionStrategy};

/// Class-substring selectors tried for person containers.
const CONTAINER_SELECTOR: &str = concat!(
    "[class*=\"team\"], [class*=\"member\"], [class*=\"person\"], ",
    "[class*=\"staff\"], [class*=\"employee\"], [class*=\"founder\"]"
);

/// Where the name usually lives inside a container.
const NAME_SELECTOR: &str = "h1, h2, h3, h4, h5, h6, strong, b";

/// Where the title usually lives inside a container.
const TITLE_SELECTOR: &str =
    "[class*=\"title\"], [class*=\"role\"], [class*=\"position\"], p, span, em";

pub struct ContainerStrategy;

impl ExtractionStrategy for ContainerStrategy {
    fn extract(&self, html: &str) -> Vec<Candidate> {
        // parse_document is lenient; truncated input yields a partial tree.
        let doc = Html::parse_document(html);

        let container_sel = Selector::parse(CONTAINER_SELECTOR).expect("container selector");
        let name_sel = Selector::parse(NAME_SELECTOR).expect("name selector");
        let title_sel = Selector::parse(TITLE_SELECTOR).expect("title selector");
        let mailto_sel = Selector::parse("a[href^=\"mailto:\"]").expect("mailto selector");

        let mut candidates = Vec::new();

        for container in doc.select(&container_sel) {
            let Some(name) = first_valid_text(&container, &name_sel, is_valid_name) else {
                continue;
            };

            let title = container
                .select(&title_sel)
                .map(|el| element_text(&el))
                .find(|text| *text != name && is_valid_title(text))
                .unwrap_or_default();
            if title.is_empty() {
                continue;
            }

            let email = container
                .select(&mailto_sel)
                .filter_map(|el| el.value().attr("href"))
                .filter_map(|href| href.strip_prefix("mailto:"))
                .map(|addr| addr.split('?').next().unwrap_or(addr).to_string())
                .next();

            candidates.push(Candidate {
                name,
                title,
                email,
            });
        }

        candidates
    }

    fn name(&self) -> &'static str {
        "container"
    }
}

fn first_valid_text(
    container: &ElementRef<'_>,
    selector: &Selector,
    valid: fn(&str) -> bool,
) -> Option<String> {
    container
        .select(selector)
        .map(|el| element_text(&el))
        .find(|text| valid(text))
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
