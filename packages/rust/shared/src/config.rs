//! Application configuration for LeadScout.
//!
//! User config lives at `~/.leadscout/leadscout.toml`.
//! CLI flags override config file values, which override defaults.
//! Provider API keys are referenced by environment-variable name only and
//! never stored in the file; a missing key silently disables that provider
//! rather than failing the pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LeadScoutError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "leadscout.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".leadscout";

// ---------------------------------------------------------------------------
// Config structs (matching leadscout.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// External data provider settings.
    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Maximum number of people returned per discovery.
    #[serde(default = "default_max_people")]
    pub max_people: usize,

    /// Timeout for structured-API provider calls, in seconds.
    #[serde(default = "default_api_timeout")]
    pub api_timeout_secs: u64,

    /// Timeout for the two-step startup-database flow, in seconds.
    #[serde(default = "default_startup_db_timeout")]
    pub startup_db_timeout_secs: u64,

    /// Per-page timeout for website scraping, in seconds.
    #[serde(default = "default_scrape_timeout")]
    pub scrape_timeout_secs: u64,

    /// Maximum candidate team/about pages probed per website.
    #[serde(default = "default_max_scrape_pages")]
    pub max_scrape_pages: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            max_people: default_max_people(),
            api_timeout_secs: default_api_timeout(),
            startup_db_timeout_secs: default_startup_db_timeout(),
            scrape_timeout_secs: default_scrape_timeout(),
            max_scrape_pages: default_max_scrape_pages(),
        }
    }
}

fn default_max_people() -> usize {
    5
}
fn default_api_timeout() -> u64 {
    10
}
fn default_startup_db_timeout() -> u64 {
    15
}
fn default_scrape_timeout() -> u64 {
    8
}
fn default_max_scrape_pages() -> usize {
    6
}

/// `[providers]` section — one entry per external collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Professional-network profile search.
    #[serde(default = "default_professional_network")]
    pub professional_network: ProviderEndpoint,

    /// Startup/company database (org lookup + people search).
    #[serde(default = "default_startup_database")]
    pub startup_database: ProviderEndpoint,

    /// Email-intelligence service (domain search + address verification).
    #[serde(default = "default_email_intelligence")]
    pub email_intelligence: ProviderEndpoint,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            professional_network: default_professional_network(),
            startup_database: default_startup_database(),
            email_intelligence: default_email_intelligence(),
        }
    }
}

/// Base URL plus the name of the env var holding the API key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderEndpoint {
    pub base_url: String,
    pub api_key_env: String,
}

fn default_professional_network() -> ProviderEndpoint {
    ProviderEndpoint {
        base_url: "https://linkedin-data-api.p.rapidapi.com".into(),
        api_key_env: "LEADSCOUT_RAPIDAPI_KEY".into(),
    }
}

fn default_startup_database() -> ProviderEndpoint {
    ProviderEndpoint {
        base_url: "https://api.crunchbase.com/api/v4".into(),
        api_key_env: "LEADSCOUT_CRUNCHBASE_KEY".into(),
    }
}

fn default_email_intelligence() -> ProviderEndpoint {
    ProviderEndpoint {
        base_url: "https://api.hunter.io/v2".into(),
        api_key_env: "LEADSCOUT_HUNTER_KEY".into(),
    }
}

// ---------------------------------------------------------------------------
// Pipeline config (runtime, merged from config + environment)
// ---------------------------------------------------------------------------

/// Runtime pipeline configuration with API keys resolved from the
/// environment. A `None` key disables the corresponding adapter.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub max_people: usize,
    pub api_timeout_secs: u64,
    pub startup_db_timeout_secs: u64,
    pub scrape_timeout_secs: u64,
    pub max_scrape_pages: usize,
    pub professional_network_url: String,
    pub professional_network_key: Option<String>,
    pub startup_database_url: String,
    pub startup_database_key: Option<String>,
    pub email_intelligence_url: String,
    pub email_intelligence_key: Option<String>,
}

impl PipelineConfig {
    /// Build runtime config from the app config, resolving keys from the
    /// environment.
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            max_people: config.defaults.max_people,
            api_timeout_secs: config.defaults.api_timeout_secs,
            startup_db_timeout_secs: config.defaults.startup_db_timeout_secs,
            scrape_timeout_secs: config.defaults.scrape_timeout_secs,
            max_scrape_pages: config.defaults.max_scrape_pages,
            professional_network_url: config.providers.professional_network.base_url.clone(),
            professional_network_key: env_key(&config.providers.professional_network.api_key_env),
            startup_database_url: config.providers.startup_database.base_url.clone(),
            startup_database_key: env_key(&config.providers.startup_database.api_key_env),
            email_intelligence_url: config.providers.email_intelligence.base_url.clone(),
            email_intelligence_key: env_key(&config.providers.email_intelligence.api_key_env),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_app(&AppConfig::default())
    }
}

fn env_key(var_name: &str) -> Option<String> {
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Some(val),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.leadscout/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| LeadScoutError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.leadscout/leadscout.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| LeadScoutError::config(format!("cannot read {}: {e}", path.display())))?;

    toml::from_str(&content).map_err(|e| {
        LeadScoutError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)
        .map_err(|e| LeadScoutError::config(format!("cannot create {}: {e}", dir.display())))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| LeadScoutError::config(e.to_string()))?;

    std::fs::write(&path, content)
        .map_err(|e| LeadScoutError::config(format!("cannot write {}: {e}", path.display())))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
