//! Built-in extraction strategies, in chain priority order.

pub mod container;
pub mod schema_org;
pub mod separators;
pub mod title_scan;
