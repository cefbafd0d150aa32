//! Command line front end for the deconfliction engine.
//!
//! Loads mission documents from JSON, runs the conflict check, and renders
//! the report as human-readable text.

pub mod loader;
pub mod report;

pub use loader::{load_missions, parse_missions, LoadError};
