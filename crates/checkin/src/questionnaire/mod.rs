//! Wellness check-in core: the fixed question catalog, the scoring engine
//! turning answers into a normalized 0-100 score and mood band, the session
//! state machine sequencing the flow (including the safety interstitial), and
//! mood-filtered activity recommendations.
//!
//! Everything here is synchronous and deterministic. The only external
//! effects are the persistence and unlock collaborators behind the traits in
//! [`repository`], both called fire-and-forget.

pub mod catalog;
pub mod domain;
pub mod recommendations;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;
pub mod views;

#[cfg(test)]
mod tests;

pub use catalog::{
    mood_options, Helpline, QuestionCatalog, SafetyNotice, MOTIVATIONAL_QUOTES, SAFETY_NOTICE,
};
pub use domain::{
    Answer, AnswerOption, MoodLevel, MoodOption, MoodSummary, Question, QuestionCategory,
    QuestionnaireResult, Recommendation, RecommendationCategory, ResultMood, UserId, Viewer,
};
pub use recommendations::{
    find_recommendation, recommendations_for, RecommendationSet, RECOMMENDATION_CATALOG,
};
pub use repository::{
    CheckinSnapshot, RepositoryError, ResultRepository, UnlockError, UnlockPublisher,
    UnlockRequest,
};
pub use router::checkin_router;
pub use scoring::{
    mood_from_score, mood_summary, normalized_score, score_for_answer, summary_for, total_score,
    DOING_OKAY_MAX, FEELING_LOW_MAX, NEEDS_EXTRA_CARE_MAX,
};
pub use service::{CheckinService, CheckinServiceError, SessionEvent, SessionId};
pub use session::{FlowState, QuestionnaireSession, SessionError, StepOutcome};
pub use views::{QuestionView, ResultView, SessionView};
