//! Bespoke CSV reader/writer for the SiteCycle interchange format.

pub mod tokenizer;
pub mod writer;

pub use tokenizer::tokenize;
pub use writer::{escape_field, write_document};

/// Mandatory first row of every import/export document.
pub const HEADER: [&str; 4] = ["date", "location", "duration_hours", "note"];
