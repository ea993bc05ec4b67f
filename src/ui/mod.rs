//! Terminal output for the CLI: capabilities, theme tokens, report
//! rendering, NDJSON helpers and error formatting.

pub mod ci;
pub mod context;
pub mod error;
pub mod json;
pub mod report;
pub mod terminal;
pub mod theme;
