//! Record ranking.
//!
//! Department priority dominates; the keyword seniority score only breaks
//! ties within one department. An Executive-department "Manager" therefore
//! outranks a Technology-department "CEO".

use std::cmp::Reverse;

use leadscout_shared::{Department, PersonRecord};

/// Lower ranks sort first.
fn department_rank(department: Department) -> u8 {
    match department {
        Department::Executive => 0,
        Department::Technology => 1,
        Department::Finance => 2,
        Department::Operations => 3,
        Department::Marketing => 4,
        Department::Sales => 5,
    }
}

/// Keyword seniority heuristic over the free-text title, 1–10.
pub fn seniority_score(title: &str) -> u8 {
    let normalized = title.trim().to_lowercase();
    let tokens: Vec<&str> = normalized
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|t| !t.is_empty())
        .collect();
    let has = |token: &str| tokens.contains(&token);

    let vice = normalized.contains("vice president");
    if has("ceo") || (has("president") && !vice) || normalized.contains("chief executive") {
        10
    } else if normalized.contains("founder") {
        9
    } else if has("cto") || has("cfo") || has("coo") {
        8
    } else if has("chief") {
        7
    } else if has("vp") || vice {
        6
    } else if has("director") {
        5
    } else if normalized.contains("head of") || has("lead") {
        4
    } else if has("manager") {
        3
    } else if has("senior") {
        2
    } else {
        1
    }
}

/// Sort by department priority, then seniority descending, and truncate.
/// The sort is stable, so records tied on both keys keep arrival order.
pub fn prioritize(mut records: Vec<PersonRecord>, max_people: usize) -> Vec<PersonRecord> {
    records.sort_by_key(|r| (department_rank(r.department), Reverse(seniority_score(&r.position))));
    records.truncate(max_people);
    records
}
