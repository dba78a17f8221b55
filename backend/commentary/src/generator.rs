//! Roast and review generation.
//!
//! Both texts are built from the same statistics: a sample of distinct
//! templates is drawn from each list and joined with blank lines. Any failure
//! while composing, including a panicking sampler, yields the fixed fallback
//! pair instead of an error.

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::CommentaryError;
use crate::sampler::{RandomSampler, SeededSampler, TemplateSampler};
use crate::stats::{sample_size, TextStats};
use crate::templates::{review_templates, roast_templates};

pub const FALLBACK_ROAST: &str = "I tried to roast your resume, but my AI brain is too fried right now. Maybe your resume is just too hot to handle!";
pub const FALLBACK_REVIEW: &str = "I wanted to give you a proper review, but something went wrong. Your resume is probably breaking new ground that AI can't comprehend yet!";

const SEGMENT_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commentary {
    pub roast: String,
    pub review: String,
}

impl Commentary {
    pub fn fallback() -> Self {
        Self {
            roast: FALLBACK_ROAST.to_string(),
            review: FALLBACK_REVIEW.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct CommentaryGenerator {
    sampler: Arc<dyn TemplateSampler>,
}

impl Default for CommentaryGenerator {
    fn default() -> Self {
        Self::new(Arc::new(RandomSampler))
    }
}

impl CommentaryGenerator {
    pub fn new(sampler: Arc<dyn TemplateSampler>) -> Self {
        Self { sampler }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Arc::new(SeededSampler::new(seed)))
    }

    /// Never fails; problems are logged and replaced by [`Commentary::fallback`].
    pub fn generate(&self, text: &str) -> Commentary {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.try_generate(text)))
            .unwrap_or(Err(CommentaryError::Panicked));
        match result {
            Ok(commentary) => commentary,
            Err(e) => {
                warn!(error = %e, "Commentary generation failed, using fallback");
                Commentary::fallback()
            }
        }
    }

    pub fn try_generate(&self, text: &str) -> Result<Commentary, CommentaryError> {
        let stats = TextStats::compute(text);
        let amount = sample_size(stats.line_count);
        debug!(
            words = stats.word_count,
            lines = stats.line_count,
            buzzwords = stats.buzzword_count,
            amount,
            "Generating commentary"
        );

        let roast = self.compose(&roast_templates(&stats), amount)?;
        let review = self.compose(&review_templates(&stats), amount)?;
        Ok(Commentary { roast, review })
    }

    fn compose(&self, templates: &[String], amount: usize) -> Result<String, CommentaryError> {
        let picks = self.sampler.sample(templates.len(), amount);
        if picks.len() != amount {
            return Err(CommentaryError::SampleSize {
                expected: amount,
                got: picks.len(),
            });
        }

        let mut seen = HashSet::with_capacity(picks.len());
        let mut segments = Vec::with_capacity(picks.len());
        for index in picks {
            let template = templates.get(index).ok_or(CommentaryError::OutOfRange {
                index,
                population: templates.len(),
            })?;
            if !seen.insert(index) {
                return Err(CommentaryError::Duplicate(index));
            }
            segments.push(template.as_str());
        }
        Ok(segments.join(SEGMENT_SEPARATOR))
    }
}
