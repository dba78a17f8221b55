//! Resume text statistics.

/// Clichéd resume phrases, matched case-insensitively anywhere in the text.
pub const BUZZWORDS: &[&str] = &[
    "self-starter",
    "team player",
    "detail-oriented",
    "results-driven",
    "hard-working",
    "go-getter",
    "synergy",
    "think outside the box",
    "proactive",
    "dynamic",
    "motivated",
    "passionate",
    "fast learner",
    "strategic thinker",
    "best of breed",
    "go-to person",
    "value add",
    "problem solver",
    "track record",
    "excellent communication",
];

const MIN_SAMPLE: usize = 3;
const MAX_SAMPLE: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Whitespace-delimited tokens.
    pub word_count: usize,
    /// Lines that are non-empty after trimming.
    pub line_count: usize,
    /// Distinct buzzwords present in the text.
    pub buzzword_count: usize,
}

impl TextStats {
    pub fn compute(text: &str) -> Self {
        let lower = text.to_lowercase();
        Self {
            word_count: text.split_whitespace().count(),
            line_count: text.lines().filter(|line| !line.trim().is_empty()).count(),
            buzzword_count: BUZZWORDS.iter().filter(|b| lower.contains(*b)).count(),
        }
    }
}

/// Templates drawn per commentary: one per ten lines, clamped to 3..=5.
pub fn sample_size(line_count: usize) -> usize {
    (line_count / 10).clamp(MIN_SAMPLE, MAX_SAMPLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_words_and_non_blank_lines() {
        let stats = TextStats::compute("Jane Doe\n\n   \nSenior Engineer at Acme\n");
        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.line_count, 2);
    }

    #[test]
    fn test_buzzwords_match_case_insensitively_once_each() {
        let text = "Results-Driven TEAM PLAYER. A true team player and self-starter.";
        assert_eq!(TextStats::compute(text).buzzword_count, 3);
    }

    #[test]
    fn test_buzzwords_match_inside_words() {
        // Substring semantics: "dynamically" contains "dynamic".
        assert_eq!(TextStats::compute("worked dynamically").buzzword_count, 1);
    }

    #[test]
    fn test_empty_text_has_zero_stats() {
        assert_eq!(TextStats::compute(""), TextStats::default());
    }

    #[test]
    fn test_sample_size_is_clamped() {
        assert_eq!(sample_size(0), 3);
        assert_eq!(sample_size(5), 3);
        assert_eq!(sample_size(39), 3);
        assert_eq!(sample_size(40), 4);
        assert_eq!(sample_size(50), 5);
        assert_eq!(sample_size(10_000), 5);
    }

    #[test]
    fn test_vocabulary_is_lowercase() {
        assert_eq!(BUZZWORDS.len(), 20);
        assert!(BUZZWORDS.iter().all(|b| b.to_lowercase() == *b));
    }
}
