use super::catalog::QuestionCatalog;
use super::domain::{Answer, AnswerOption, MoodSummary, Question, ResultMood};

/// Upper bound (inclusive) of the `DoingOkay` band.
pub const DOING_OKAY_MAX: u8 = 25;
/// Upper bound (inclusive) of the `FeelingLow` band.
pub const FEELING_LOW_MAX: u8 = 50;
/// Upper bound (inclusive) of the `NeedsExtraCare` band; anything above is
/// `NeedsSupport`.
pub const NEEDS_EXTRA_CARE_MAX: u8 = 75;

/// Fraction of a question's points awarded per answer. The sensitive table is
/// deliberately gentler at `Mostly` so a borderline response to the safety
/// check is not over-flagged.
const fn answer_ratio(option: AnswerOption, is_sensitive: bool) -> f32 {
    if is_sensitive {
        match option {
            AnswerOption::Yes => 0.0,
            AnswerOption::Mostly => 0.25,
            AnswerOption::NotReally => 0.75,
            AnswerOption::No => 1.0,
        }
    } else {
        match option {
            AnswerOption::Yes => 0.0,
            AnswerOption::Mostly => 0.5,
            AnswerOption::NotReally => 0.75,
            AnswerOption::No => 1.0,
        }
    }
}

/// Points contributed by one answer: `round(points * ratio)`. Higher means a
/// worse state, so `Yes` always contributes zero.
pub fn score_for_answer(option: AnswerOption, question: &Question) -> u8 {
    let ratio = answer_ratio(option, question.is_sensitive);
    (question.points as f32 * ratio).round() as u8
}

/// Order-independent sum of recorded answer scores. Empty input is zero.
pub fn total_score(answers: &[Answer]) -> u16 {
    answers.iter().map(|answer| answer.score as u16).sum()
}

/// Total mapped onto 0-100 against the live catalog's maximum. A degenerate
/// catalog with zero attainable points normalizes to zero rather than failing.
pub fn normalized_score(total: u16, catalog: &QuestionCatalog) -> u8 {
    let max_score = catalog.max_score();
    if max_score == 0 {
        return 0;
    }

    let scaled = (100.0 * total as f32 / max_score as f32).round() as u16;
    scaled.min(100) as u8
}

/// Threshold lookup over the band constants. Bands are closed on the upper
/// end: a score of exactly 25, 50, or 75 stays in the lower band.
pub fn mood_from_score(normalized: u8) -> ResultMood {
    if normalized <= DOING_OKAY_MAX {
        ResultMood::DoingOkay
    } else if normalized <= FEELING_LOW_MAX {
        ResultMood::FeelingLow
    } else if normalized <= NEEDS_EXTRA_CARE_MAX {
        ResultMood::NeedsExtraCare
    } else {
        ResultMood::NeedsSupport
    }
}

pub fn mood_summary(normalized: u8) -> MoodSummary {
    summary_for(mood_from_score(normalized))
}

/// Static display table keyed by mood band.
pub const fn summary_for(mood: ResultMood) -> MoodSummary {
    match mood {
        ResultMood::DoingOkay => MoodSummary {
            mood: ResultMood::DoingOkay,
            label: "Doing Okay",
            emoji: "\u{1F60A}",
            color: "hsl(145, 60%, 50%)",
            message: "You're doing well! Keep nurturing your mental wellness with healthy habits.",
        },
        ResultMood::FeelingLow => MoodSummary {
            mood: ResultMood::FeelingLow,
            label: "Feeling Low",
            emoji: "\u{1F614}",
            color: "hsl(45, 90%, 60%)",
            message: "It's okay to have low moments. Be gentle with yourself and try some calming activities.",
        },
        ResultMood::NeedsExtraCare => MoodSummary {
            mood: ResultMood::NeedsExtraCare,
            label: "Needs Extra Care",
            emoji: "\u{1FAC2}",
            color: "hsl(25, 90%, 55%)",
            message: "You deserve extra care right now. Consider reaching out to someone you trust.",
        },
        ResultMood::NeedsSupport => MoodSummary {
            mood: ResultMood::NeedsSupport,
            label: "Needs Support",
            emoji: "\u{1F499}",
            color: "hsl(0, 70%, 55%)",
            message: "You're not alone. Please consider talking to someone who can help. Your wellbeing matters.",
        },
    }
}
