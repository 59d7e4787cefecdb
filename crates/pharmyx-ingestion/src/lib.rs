//! pharmyx-ingestion — PubMed retrieval and affiliation classification.
//! - Keyword search and MEDLINE record fetch (PubMed E-utilities)
//! - MEDLINE text parsing into tag/value records
//! - Company / non-academic affiliation classification
//! - Report assembly and CSV/console sinks

pub mod sources;
pub mod medline;
pub mod models;
pub mod classify;
pub mod report;
pub mod pipeline;
