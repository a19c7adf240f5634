//! Core domain types for the key-person discovery pipeline.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Department
// ---------------------------------------------------------------------------

/// Coarse organizational-function classification derived from a free-text
/// title. Every surviving record carries one; `Operations` is the default
/// when nothing in the title matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Executive,
    Technology,
    Finance,
    Sales,
    Marketing,
    Operations,
}

/// Acronym tokens matched against whitespace-delimited title words, so that
/// "CEO" hits but "ocean" does not.
const EXECUTIVE_ACRONYMS: &[&str] = &["ceo"];
const TECHNOLOGY_ACRONYMS: &[&str] = &["cto", "cio", "vp-engineering"];
const FINANCE_ACRONYMS: &[&str] = &["cfo"];
const MARKETING_ACRONYMS: &[&str] = &["cmo"];
const SALES_ACRONYMS: &[&str] = &["cro"];

const EXECUTIVE_PHRASES: &[&str] = &[
    "chief executive",
    "president",
    "founder",
    "co-founder",
    "cofounder",
    "chairman",
    "chairwoman",
    "owner",
    "managing director",
];
const TECHNOLOGY_PHRASES: &[&str] = &[
    "chief technology",
    "chief technical",
    "chief information",
    "engineering",
    "engineer",
    "technology",
    "technical",
    "developer",
    "software",
];
const FINANCE_PHRASES: &[&str] = &[
    "chief financial",
    "finance",
    "financial",
    "accounting",
    "controller",
    "treasurer",
];
const SALES_PHRASES: &[&str] = &["sales", "business development", "revenue"];
const MARKETING_PHRASES: &[&str] = &[
    "chief marketing",
    "marketing",
    "growth",
    "brand",
    "communications",
];

impl Department {
    /// Classify a free-text title into a department.
    ///
    /// Case- and whitespace-insensitive. Checked in priority order so that
    /// "Chief Executive Officer" lands in `Executive` before the generic
    /// word scan runs; anything unrecognized (including an empty title)
    /// falls through to `Operations`.
    pub fn from_title(title: &str) -> Self {
        let normalized = title.trim().to_lowercase();
        if normalized.is_empty() {
            return Self::Operations;
        }
        let tokens: Vec<&str> = normalized
            .split(|c: char| !c.is_alphanumeric() && c != '-')
            .filter(|t| !t.is_empty())
            .collect();

        let hit = |acronyms: &[&str], phrases: &[&str]| {
            acronyms.iter().any(|a| tokens.contains(a))
                || phrases.iter().any(|p| normalized.contains(p))
        };

        if hit(EXECUTIVE_ACRONYMS, EXECUTIVE_PHRASES) {
            Self::Executive
        } else if hit(TECHNOLOGY_ACRONYMS, TECHNOLOGY_PHRASES) {
            Self::Technology
        } else if hit(FINANCE_ACRONYMS, FINANCE_PHRASES) {
            Self::Finance
        } else if hit(SALES_ACRONYMS, SALES_PHRASES) {
            Self::Sales
        } else if hit(MARKETING_ACRONYMS, MARKETING_PHRASES) {
            Self::Marketing
        } else {
            Self::Operations
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Executive => "Executive",
            Self::Technology => "Technology",
            Self::Finance => "Finance",
            Self::Sales => "Sales",
            Self::Marketing => "Marketing",
            Self::Operations => "Operations",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// SourceKind / SourceFlags
// ---------------------------------------------------------------------------

/// The external data providers a record can be observed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    ProfessionalNetwork,
    StartupDatabase,
    WebsiteScrape,
    EmailDirectory,
}

impl SourceKind {
    /// Human-readable provider name for tracing.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProfessionalNetwork => "professional_network",
            Self::StartupDatabase => "startup_database",
            Self::WebsiteScrape => "website_scrape",
            Self::EmailDirectory => "email_directory",
        }
    }
}

/// Per-provider flags indicating whether that provider contributed at least
/// one record surviving into the final result. Observability only — nothing
/// downstream branches on these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFlags {
    pub professional_network: bool,
    pub startup_database: bool,
    pub website_scrape: bool,
    pub email_directory: bool,
}

impl SourceFlags {
    /// Compute flags from the records that survived the pipeline.
    pub fn from_records(records: &[PersonRecord]) -> Self {
        let mut flags = Self::default();
        for record in records {
            for source in &record.sources {
                match source {
                    SourceKind::ProfessionalNetwork => flags.professional_network = true,
                    SourceKind::StartupDatabase => flags.startup_database = true,
                    SourceKind::WebsiteScrape => flags.website_scrape = true,
                    SourceKind::EmailDirectory => flags.email_directory = true,
                }
            }
        }
        flags
    }

    /// True when no provider contributed anything (fallback roster case).
    pub fn all_false(&self) -> bool {
        !(self.professional_network
            || self.startup_database
            || self.website_scrape
            || self.email_directory)
    }
}

// ---------------------------------------------------------------------------
// PersonRecord
// ---------------------------------------------------------------------------

/// One observed or merged identity.
///
/// `name` and `position` are non-empty for any record that survives
/// filtering; `department` is always set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Display form, "First Last".
    pub name: String,
    /// Free-text title as observed.
    pub position: String,
    /// Provider-supplied or predicted corporate address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Professional-network profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_link: Option<String>,
    /// Derived from `position`; defaults to `Operations`.
    pub department: Department,
    /// Providers that observed this identity. Merging unions the sets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceKind>,
}

impl PersonRecord {
    /// Build a record from an observed name/title pair, deriving the
    /// department from the title.
    pub fn observed(name: impl Into<String>, position: impl Into<String>, source: SourceKind) -> Self {
        let position = position.into();
        let department = Department::from_title(&position);
        Self {
            name: name.into(),
            position,
            email: None,
            profile_link: None,
            department,
            sources: vec![source],
        }
    }

    /// Record the observing provider if not already present.
    pub fn add_source(&mut self, source: SourceKind) {
        if !self.sources.contains(&source) {
            self.sources.push(source);
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// The public result of one `discover_key_people` invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discovery {
    /// Top identities, ranked by department priority then seniority. Bounded
    /// to `max_people` (5 by default); never empty thanks to the fallback
    /// roster.
    pub people: Vec<PersonRecord>,
    /// Which providers contributed to `people`.
    pub sources_used: SourceFlags,
}
