use serde::Serialize;

use super::domain::{MoodLevel, MoodOption, Question, QuestionCategory};

/// Fixed, ordered question set for a deployment. The standard catalog keeps its
/// point weights summing to 100 so the raw total reads as a percentage, but the
/// scoring engine always recomputes the maximum from the live catalog rather
/// than trusting that sum.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The production question set carried by the original check-in: eleven
    /// positively-phrased questions across five categories, 100 points total,
    /// with the safety check flagged sensitive.
    pub fn standard() -> Self {
        Self::new(vec![
            Question {
                id: "emotional-1",
                text: "Do you feel calm and at ease?",
                category: QuestionCategory::Emotional,
                points: 7,
                is_sensitive: false,
            },
            Question {
                id: "emotional-2",
                text: "Do you feel emotionally stable and balanced?",
                category: QuestionCategory::Emotional,
                points: 7,
                is_sensitive: false,
            },
            Question {
                id: "emotional-3",
                text: "Are you able to manage your thoughts effectively?",
                category: QuestionCategory::Emotional,
                points: 7,
                is_sensitive: false,
            },
            Question {
                id: "stress-1",
                text: "Are you able to manage stress and pressure effectively?",
                category: QuestionCategory::Stress,
                points: 8,
                is_sensitive: false,
            },
            Question {
                id: "stress-2",
                text: "Are you able to stay relaxed in stressful situations?",
                category: QuestionCategory::Stress,
                points: 8,
                is_sensitive: false,
            },
            Question {
                id: "stress-3",
                text: "Are you able to concentrate without feeling mentally drained?",
                category: QuestionCategory::Stress,
                points: 8,
                is_sensitive: false,
            },
            Question {
                id: "stress-4",
                text: "Do you find it easy to maintain concentration?",
                category: QuestionCategory::Stress,
                points: 8,
                is_sensitive: false,
            },
            Question {
                id: "support-1",
                text: "Do you feel supported or connected to someone you trust?",
                category: QuestionCategory::Support,
                points: 7,
                is_sensitive: false,
            },
            Question {
                id: "support-2",
                text: "Do you feel understood or heard by someone?",
                category: QuestionCategory::Support,
                points: 7,
                is_sensitive: false,
            },
            Question {
                id: "safety-1",
                text: "Do you feel mentally safe and comfortable with your thoughts?",
                category: QuestionCategory::Safety,
                points: 20,
                is_sensitive: true,
            },
            Question {
                id: "outlook-1",
                text: "Do you feel able to handle challenges or tasks without feeling drained?",
                category: QuestionCategory::Outlook,
                points: 13,
                is_sensitive: false,
            },
        ])
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Maximum attainable total, recomputed from the live catalog.
    pub fn max_score(&self) -> u16 {
        self.questions
            .iter()
            .map(|question| question.points as u16)
            .sum()
    }
}

/// Landing-screen mood choices. Informational only; the selection never feeds
/// the scoring engine.
pub const fn mood_options() -> [MoodOption; 6] {
    [
        MoodOption {
            id: MoodLevel::Great,
            emoji: "\u{1F604}",
            label: "Great",
            color: "wellness-green",
        },
        MoodOption {
            id: MoodLevel::Good,
            emoji: "\u{1F60A}",
            label: "Good",
            color: "wellness-teal",
        },
        MoodOption {
            id: MoodLevel::Okay,
            emoji: "\u{1F610}",
            label: "Okay",
            color: "wellness-yellow",
        },
        MoodOption {
            id: MoodLevel::Low,
            emoji: "\u{1F615}",
            label: "Low",
            color: "wellness-yellow",
        },
        MoodOption {
            id: MoodLevel::VeryLow,
            emoji: "\u{1F614}",
            label: "Very Low",
            color: "wellness-orange",
        },
        MoodOption {
            id: MoodLevel::Struggling,
            emoji: "\u{1F622}",
            label: "Struggling",
            color: "wellness-red",
        },
    ]
}

pub const MOTIVATIONAL_QUOTES: [&str; 5] = [
    "Every moment is a fresh beginning. Take a deep breath and start again.",
    "You are stronger than you think, braver than you believe.",
    "It's okay to not be okay. What matters is you're checking in with yourself.",
    "Small steps every day lead to big changes over time.",
    "Your mental health matters. Taking this step shows incredible self-awareness.",
];

/// Deterministic per-session pick for the welcome screen.
pub fn motivational_quote(seed: u64) -> &'static str {
    MOTIVATIONAL_QUOTES[(seed % MOTIVATIONAL_QUOTES.len() as u64) as usize]
}

/// Copy shown on the blocking safety interstitial.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SafetyNotice {
    pub title: &'static str,
    pub message: &'static str,
    pub helplines: &'static [Helpline],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Helpline {
    pub number: &'static str,
    pub label: &'static str,
}

pub const SAFETY_NOTICE: SafetyNotice = SafetyNotice {
    title: "You're Not Alone",
    message: "It takes courage to acknowledge difficult feelings. Whatever you're going through, \
              there are people who care and want to help. You matter.",
    helplines: &[
        Helpline {
            number: "1166",
            label: "Mental Health Helpline (Nepal)",
        },
        Helpline {
            number: "100",
            label: "Police Emergency",
        },
        Helpline {
            number: "102",
            label: "Ambulance Service",
        },
    ],
};
