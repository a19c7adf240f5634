//! Heuristic extraction of people from team/about page HTML.
//!
//! This crate provides:
//! - [`ExtractionStrategy`] — a common capability implemented by several
//!   independent pattern families (container markup, schema.org objects,
//!   inline separator text, executive-title scanning)
//! - [`StrategyChain`] — runs the strategies in order and unions the results
//! - A `mailto:` harvesting pass that associates page emails with extracted
//!   names, taking precedence over anything predicted later
//!
//! Every strategy tolerates arbitrarily malformed or truncated HTML; absence
//! of a match yields an empty list, never an error.

mod mailto;
mod strategies;
mod text;
mod validate;

use std::collections::HashMap;

use tracing::debug;

pub use mailto::{associate_emails, harvest_mailto};
pub use strategies::container::ContainerStrategy;
pub use strategies::schema_org::SchemaOrgStrategy;
pub use strategies::separators::SeparatorStrategy;
pub use strategies::title_scan::TitleScanStrategy;
pub use text::strip_tags;
pub use validate::{is_valid_name, is_valid_title};

// ---------------------------------------------------------------------------
// Candidate
// ---------------------------------------------------------------------------

/// One `(name, title, email?)` tuple pulled out of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub title: String,
    pub email: Option<String>,
}

impl Candidate {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            email: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Strategy trait
// ---------------------------------------------------------------------------

/// One independent pattern family for pulling people out of HTML.
///
/// Strategies are tried in a fixed order; their outputs are unioned and
/// deduplicated within a single chain run (cross-provider deduplication
/// happens later, in the pipeline's merge step).
pub trait ExtractionStrategy: Send + Sync {
    /// Extract candidate people from raw HTML. Must not panic on malformed
    /// input; no matches is an empty vec.
    fn extract(&self, html: &str) -> Vec<Candidate>;

    /// Human-readable strategy name for tracing.
    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// StrategyChain
// ---------------------------------------------------------------------------

/// Holds the built-in strategies in priority order.
pub struct StrategyChain {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl StrategyChain {
    /// Create a chain with all built-in strategies (most structured first).
    pub fn new() -> Self {
        Self {
            strategies: vec![
                Box::new(ContainerStrategy),
                Box::new(SchemaOrgStrategy),
                Box::new(SeparatorStrategy),
                Box::new(TitleScanStrategy),
            ],
        }
    }

    /// Run every strategy over the HTML, union the candidates, and attach
    /// any `mailto:` addresses found on the page.
    pub fn extract(&self, html: &str) -> Vec<Candidate> {
        let mut by_name: HashMap<String, Candidate> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for strategy in &self.strategies {
            let found = strategy.extract(html);
            if !found.is_empty() {
                debug!(strategy = strategy.name(), count = found.len(), "strategy matched");
            }
            for candidate in found {
                let key = candidate.name.trim().to_lowercase();
                match by_name.get_mut(&key) {
                    Some(existing) => merge_candidate(existing, candidate),
                    None => {
                        order.push(key.clone());
                        by_name.insert(key, candidate);
                    }
                }
            }
        }

        let mut candidates: Vec<Candidate> = order
            .into_iter()
            .filter_map(|key| by_name.remove(&key))
            .collect();

        // Page emails beat whatever the strategies found inline.
        let emails = harvest_mailto(html);
        associate_emails(&mut candidates, &emails);

        candidates
    }
}

impl Default for StrategyChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Within-run merge: keep the more descriptive title, fill a missing email.
fn merge_candidate(existing: &mut Candidate, incoming: Candidate) {
    if incoming.title.len() > existing.title.len() {
        existing.title = incoming.title;
    }
    if existing.email.is_none() {
        existing.email = incoming.email;
    }
}
