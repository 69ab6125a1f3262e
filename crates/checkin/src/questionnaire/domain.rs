use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Informational self-assessment picked on the landing screen. Never feeds the
/// scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodLevel {
    Great,
    Good,
    Okay,
    Low,
    VeryLow,
    Struggling,
}

impl MoodLevel {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Great,
            Self::Good,
            Self::Okay,
            Self::Low,
            Self::VeryLow,
            Self::Struggling,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Great => "Great",
            Self::Good => "Good",
            Self::Okay => "Okay",
            Self::Low => "Low",
            Self::VeryLow => "Very Low",
            Self::Struggling => "Struggling",
        }
    }
}

/// Display metadata for a selectable mood on the landing screen.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MoodOption {
    pub id: MoodLevel,
    pub emoji: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

/// Ordinal agreement scale, most positive first. Every question is phrased
/// positively, so `Yes` is always the best-case response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOption {
    Yes,
    Mostly,
    NotReally,
    No,
}

impl AnswerOption {
    pub const fn ordered() -> [Self; 4] {
        [Self::Yes, Self::Mostly, Self::NotReally, Self::No]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::Mostly => "Mostly",
            Self::NotReally => "Not Really",
            Self::No => "No",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Emotional,
    Stress,
    Support,
    Safety,
    Outlook,
}

impl QuestionCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Emotional => "Emotional State",
            Self::Stress => "Stress & Pressure",
            Self::Support => "Support & Connection",
            Self::Safety => "Safety Check",
            Self::Outlook => "Outlook & Energy",
        }
    }
}

/// One entry of the fixed questionnaire catalog.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub category: QuestionCategory,
    pub points: u8,
    pub is_sensitive: bool,
}

/// Recorded response to a single question. The score is fixed at record time
/// and never exceeds the question's point weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub question_id: &'static str,
    pub answer: AnswerOption,
    pub score: u8,
}

/// Discrete wellness band derived from the normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultMood {
    DoingOkay,
    FeelingLow,
    NeedsExtraCare,
    NeedsSupport,
}

impl ResultMood {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::DoingOkay,
            Self::FeelingLow,
            Self::NeedsExtraCare,
            Self::NeedsSupport,
        ]
    }

    /// Wire identifier, matching the serde representation.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::DoingOkay => "doing_okay",
            Self::FeelingLow => "feeling_low",
            Self::NeedsExtraCare => "needs_extra_care",
            Self::NeedsSupport => "needs_support",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|mood| mood.slug() == value)
    }
}

/// Static display copy attached to a result mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodSummary {
    pub mood: ResultMood,
    pub label: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
    pub message: &'static str,
}

/// Completed questionnaire outcome. Built exactly once per run and immutable
/// afterwards; a retake starts a fresh run instead of touching this value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionnaireResult {
    pub total_score: u16,
    pub normalized_score: u8,
    pub mood: ResultMood,
    pub answers: Vec<Answer>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Breathing,
    Movement,
    Reflection,
    Connection,
    Rest,
    Hydration,
}

impl RecommendationCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Breathing => "Breathing",
            Self::Movement => "Movement",
            Self::Reflection => "Reflection",
            Self::Connection => "Connection",
            Self::Rest => "Rest",
            Self::Hydration => "Hydration",
        }
    }
}

/// Static activity suggestion surfaced after a completed check-in.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Recommendation {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: RecommendationCategory,
    pub is_premium: bool,
    pub for_moods: &'static [ResultMood],
}

impl Recommendation {
    pub fn supports(&self, mood: ResultMood) -> bool {
        self.for_moods.contains(&mood)
    }
}

/// Opaque identity handle supplied by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who is driving the current session, read once per completion event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    SignedIn(UserId),
}

impl Viewer {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Viewer::Anonymous)
    }

    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Viewer::Anonymous => None,
            Viewer::SignedIn(user) => Some(user),
        }
    }
}
