use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{QuestionnaireResult, ResultMood, UserId};

/// Compact stored view of a completed check-in, enough for a returning-user
/// summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckinSnapshot {
    pub completed_at: DateTime<Utc>,
    pub normalized_score: u8,
    pub mood: ResultMood,
}

impl CheckinSnapshot {
    pub fn from_result(result: &QuestionnaireResult) -> Self {
        Self {
            completed_at: result.completed_at,
            normalized_score: result.normalized_score,
            mood: result.mood,
        }
    }
}

/// Storage abstraction so the session flow can be exercised without a real
/// backend. Saves are fire-and-forget from the flow's point of view: a
/// failure is logged and swallowed, never surfaced to the user.
pub trait ResultRepository: Send + Sync {
    fn save(&self, user: &UserId, result: &QuestionnaireResult) -> Result<(), RepositoryError>;
    fn fetch_last(&self, user: &UserId) -> Result<Option<CheckinSnapshot>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Intent signal for the external gating/paywall collaborator. Publishing it
/// unlocks nothing on this side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnlockRequest {
    pub recommendation_id: String,
    pub user: Option<UserId>,
}

/// Outbound hook for premium-unlock intents.
pub trait UnlockPublisher: Send + Sync {
    fn publish(&self, request: UnlockRequest) -> Result<(), UnlockError>;
}

#[derive(Debug, thiserror::Error)]
pub enum UnlockError {
    #[error("unlock transport unavailable: {0}")]
    Transport(String),
}
