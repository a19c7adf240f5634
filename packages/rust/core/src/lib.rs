//! Key-person discovery pipeline.
//!
//! Stages, in order:
//! 1. source fan-out ([`leadscout_providers::SourceOrchestrator`])
//! 2. cross-source deduplication ([`dedup`])
//! 3. email enrichment ([`enrich`])
//! 4. ranking and truncation ([`prioritize`])
//! 5. synthetic roster when everything else came back empty ([`fallback`])
//!
//! [`Pipeline::discover_key_people`] is the only entry point the
//! application layer needs.

pub mod dedup;
pub mod enrich;
pub mod fallback;
pub mod pipeline;
pub mod prioritize;

pub use pipeline::Pipeline;
