//! Roast and review generation.
//!
//! Lightweight statistics over the resume text drive a sampled selection of
//! fixed templates. Generation never fails: any fault is replaced by the
//! fallback pair.

pub mod error;
pub mod generator;
pub mod sampler;
pub mod stats;
pub mod templates;

pub use error::CommentaryError;
pub use generator::{Commentary, CommentaryGenerator, FALLBACK_REVIEW, FALLBACK_ROAST};
pub use sampler::{RandomSampler, ScriptedSampler, SeededSampler, TemplateSampler};
pub use stats::{sample_size, TextStats, BUZZWORDS};
