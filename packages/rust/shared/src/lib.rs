//! Shared types, error model, and configuration for LeadScout.
//!
//! This crate is the foundation depended on by all other LeadScout crates.
//! It provides:
//! - [`LeadScoutError`] — the unified error type
//! - Domain types ([`PersonRecord`], [`Department`], [`SourceFlags`], [`Discovery`])
//! - [`CompanyDomain`] — per-invocation domain resolution
//! - Configuration ([`AppConfig`], [`PipelineConfig`], config loading)

pub mod config;
pub mod domain;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, PipelineConfig, ProviderEndpoint, ProvidersConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use domain::CompanyDomain;
pub use error::{LeadScoutError, Result};
pub use types::{Department, Discovery, PersonRecord, SourceFlags, SourceKind};
