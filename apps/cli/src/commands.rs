//! CLI command definitions, routing, and tracing setup.

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use leadscout_core::Pipeline;
use leadscout_email::EmailVerifier;
use leadscout_shared::{AppConfig, Discovery, PipelineConfig, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// LeadScout — find the key people at any company.
#[derive(Parser)]
#[command(
    name = "leadscout",
    version,
    about = "Discover key people at a company, with predicted and verified email addresses.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Discover the key people at a company.
    Discover {
        /// Company name to research.
        company: String,

        /// Company website, used for domain resolution and scraping.
        #[arg(short, long)]
        website: Option<String>,

        /// Print the result as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Verify a single email address.
    VerifyEmail {
        /// Address to verify.
        email: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "leadscout=info",
        1 => "leadscout=debug",
        _ => "leadscout=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Discover {
            company,
            website,
            json,
        } => cmd_discover(&company, website.as_deref(), json).await,
        Command::VerifyEmail { email } => cmd_verify_email(&email).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_discover(company: &str, website: Option<&str>, json: bool) -> Result<()> {
    let company = company.trim();
    if company.is_empty() {
        return Err(eyre!("company name must not be empty"));
    }

    let config = load_config()?;
    let pipeline_config = PipelineConfig::from_app(&config);
    let pipeline = Pipeline::from_config(pipeline_config);

    info!(company, website = website.unwrap_or("-"), "starting discovery");

    let spinner = (!json).then(make_spinner);
    if let Some(s) = &spinner {
        s.set_message(format!("Discovering key people at {company}..."));
    }

    let result = pipeline.discover_key_people(company, website).await;

    if let Some(s) = &spinner {
        s.finish_and_clear();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_discovery(company, &result);
    }
    Ok(())
}

fn print_discovery(company: &str, result: &Discovery) {
    println!();
    if result.sources_used.all_false() {
        println!("  No live sources responded for {company}; showing a synthetic roster.");
    } else {
        println!("  Key people at {company}:");
    }
    println!();
    for (i, person) in result.people.iter().enumerate() {
        println!("  {}. {} — {}", i + 1, person.name, person.position);
        if let Some(email) = &person.email {
            println!("     {email}");
        }
        if let Some(link) = &person.profile_link {
            println!("     {link}");
        }
    }
    println!();
    println!(
        "  Sources: professional network {}, startup database {}, website {}, email directory {}",
        mark(result.sources_used.professional_network),
        mark(result.sources_used.startup_database),
        mark(result.sources_used.website_scrape),
        mark(result.sources_used.email_directory),
    );
    println!();
}

fn mark(used: bool) -> &'static str {
    if used { "✓" } else { "✗" }
}

async fn cmd_verify_email(email: &str) -> Result<()> {
    let config = load_config()?;
    let pipeline_config = PipelineConfig::from_app(&config);
    let verifier = EmailVerifier::new(
        &pipeline_config.email_intelligence_url,
        pipeline_config.email_intelligence_key.clone(),
        pipeline_config.api_timeout_secs,
    );

    let verification = verifier.verify(email).await;
    println!("{}", serde_json::to_string_pretty(&verification)?);
    Ok(())
}

fn make_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
