//! Analysis Orchestrator
//!
//! Turns one upload (a document or a shared link) into a stored analysis.

pub mod analyzer;

pub use analyzer::{Analyzer, AnalyzerConfig, DRIVE_EXTRACTION_FAILED, EMPTY_EXTRACTION};
