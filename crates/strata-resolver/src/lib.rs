//! Override resolution engine: the override graph between modules, and the
//! detection of resources claimed by modules that have no defined order.

pub mod conflict;
pub mod error;
pub mod graph;
pub mod mapping;
