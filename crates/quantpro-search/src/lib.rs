//! quantpro-search
//!
//! Domain routing and record ranking on top of `quantpro-rank`. The catalog
//! maps each knowledge-base domain to its dataset and fields, `detect` picks a
//! domain from free text, and the service ties loading, ranking and
//! projection together.
pub mod catalog;
pub mod detect;
pub mod service;

pub use catalog::{DomainCatalog, DomainSchema};
pub use service::{search, DomainSearchService, SearchOutcome};
