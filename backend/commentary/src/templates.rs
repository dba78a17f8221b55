//! Roast and review template lists. Order is fixed; samplers pick by index.

use crate::stats::TextStats;

pub const ROAST_TEMPLATE_COUNT: usize = 9;
pub const REVIEW_TEMPLATE_COUNT: usize = 9;

pub fn roast_templates(stats: &TextStats) -> Vec<String> {
    vec![
        format!(
            "Found {} buzzwords on this resume. Bingo card complete; the recruiter is already asleep.",
            stats.buzzword_count
        ),
        format!(
            "{} words and somehow none of them explain what you actually did.",
            stats.word_count
        ),
        format!(
            "{} lines of text. I've read terms of service with more personality.",
            stats.line_count
        ),
        format!(
            "With {} buzzwords packed into {} words, the synergy density here is a health hazard.",
            stats.buzzword_count, stats.word_count
        ),
        "'Team player' is what people write when the team did all the work.".to_string(),
        "The formatting says 'I discovered fonts yesterday and used all of them.'".to_string(),
        "Your skills section reads like a job ad pasted in and hoped nobody would notice."
            .to_string(),
        "Responsible for 'various tasks'. Bold of you to assume anyone will ask which ones."
            .to_string(),
        "This resume has the energy of a LinkedIn post that opens with 'I'm humbled to announce'."
            .to_string(),
    ]
}

pub fn review_templates(_stats: &TextStats) -> Vec<String> {
    [
        "Lead each experience bullet with a strong action verb and a measurable outcome such as numbers, percentages or time saved.",
        "Tailor the summary to the role you are applying for; a generic objective statement wastes the most valuable space on the page.",
        "Replace buzzwords with evidence: instead of calling yourself detail-oriented, describe a result that proves it.",
        "Keep the layout consistent: one font family, uniform date formats and aligned section headings.",
        "Order sections by relevance. Recent, relevant experience belongs above education unless you are a new graduate.",
        "Group technical skills by category and drop anything you could not discuss confidently in an interview.",
        "Aim for one page per decade of experience and trim older roles to a single line if they no longer support your story.",
        "Link to a portfolio, repository or published work so reviewers can verify your claims.",
        "Proofread for tense: current role in present tense, previous roles in past tense.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
