use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::questionnaire::catalog::QuestionCatalog;
use crate::questionnaire::domain::{
    AnswerOption, MoodLevel, QuestionnaireResult, UserId, Viewer,
};
use crate::questionnaire::repository::{
    CheckinSnapshot, RepositoryError, ResultRepository, UnlockError, UnlockPublisher,
    UnlockRequest,
};
use crate::questionnaire::service::CheckinService;
use crate::questionnaire::session::{FlowState, QuestionnaireSession, StepOutcome};

/// Session already advanced into the questionnaire state.
pub(super) fn active_session(viewer: Viewer) -> QuestionnaireSession {
    let mut session = QuestionnaireSession::new(QuestionCatalog::standard(), viewer);
    session.select_mood(MoodLevel::Okay).expect("mood select");
    session.begin().expect("begin questionnaire");
    session
}

/// Answer every remaining question with `option`, dismissing the safety
/// interstitial whenever it fires, and return the completion outcome.
pub(super) fn answer_remaining(
    session: &mut QuestionnaireSession,
    option: AnswerOption,
) -> StepOutcome {
    loop {
        let outcome = session.answer(option).expect("answer accepted");
        match outcome {
            StepOutcome::NextQuestion => continue,
            StepOutcome::SafetyAlert => {
                let resumed = session.dismiss_safety_alert().expect("dismiss accepted");
                match resumed {
                    StepOutcome::NextQuestion => continue,
                    other => return other,
                }
            }
            completed => return completed,
        }
    }
}

/// Answer every question with `option` except the sensitive one, which gets
/// `sensitive_option`.
pub(super) fn answer_remaining_with_sensitive(
    session: &mut QuestionnaireSession,
    option: AnswerOption,
    sensitive_option: AnswerOption,
) -> StepOutcome {
    loop {
        let is_sensitive = session
            .current_question()
            .expect("question under cursor")
            .is_sensitive;
        let pick = if is_sensitive { sensitive_option } else { option };

        let outcome = session.answer(pick).expect("answer accepted");
        match outcome {
            StepOutcome::NextQuestion => continue,
            StepOutcome::SafetyAlert => {
                let resumed = session.dismiss_safety_alert().expect("dismiss accepted");
                match resumed {
                    StepOutcome::NextQuestion => continue,
                    other => return other,
                }
            }
            completed => return completed,
        }
    }
}

pub(super) fn assert_in_state(session: &QuestionnaireSession, expected: FlowState) {
    assert_eq!(session.state(), expected, "unexpected flow state");
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    saved: Mutex<HashMap<UserId, Vec<QuestionnaireResult>>>,
}

impl MemoryRepository {
    pub(super) fn saved_for(&self, user: &UserId) -> Vec<QuestionnaireResult> {
        self.saved
            .lock()
            .expect("repository mutex poisoned")
            .get(user)
            .cloned()
            .unwrap_or_default()
    }
}

impl ResultRepository for MemoryRepository {
    fn save(&self, user: &UserId, result: &QuestionnaireResult) -> Result<(), RepositoryError> {
        self.saved
            .lock()
            .expect("repository mutex poisoned")
            .entry(user.clone())
            .or_default()
            .push(result.clone());
        Ok(())
    }

    fn fetch_last(&self, user: &UserId) -> Result<Option<CheckinSnapshot>, RepositoryError> {
        Ok(self
            .saved
            .lock()
            .expect("repository mutex poisoned")
            .get(user)
            .and_then(|results| results.last())
            .map(CheckinSnapshot::from_result))
    }
}

/// Repository that always fails, for exercising the fire-and-forget contract.
pub(super) struct UnavailableRepository;

impl ResultRepository for UnavailableRepository {
    fn save(&self, _user: &UserId, _result: &QuestionnaireResult) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }

    fn fetch_last(&self, _user: &UserId) -> Result<Option<CheckinSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryUnlocks {
    requests: Mutex<Vec<UnlockRequest>>,
}

impl MemoryUnlocks {
    pub(super) fn requests(&self) -> Vec<UnlockRequest> {
        self.requests.lock().expect("unlock mutex poisoned").clone()
    }
}

impl UnlockPublisher for MemoryUnlocks {
    fn publish(&self, request: UnlockRequest) -> Result<(), UnlockError> {
        self.requests
            .lock()
            .expect("unlock mutex poisoned")
            .push(request);
        Ok(())
    }
}

pub(super) fn build_service() -> (
    Arc<CheckinService<MemoryRepository, MemoryUnlocks>>,
    Arc<MemoryRepository>,
    Arc<MemoryUnlocks>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let unlocks = Arc::new(MemoryUnlocks::default());
    let service = Arc::new(CheckinService::new(repository.clone(), unlocks.clone()));
    (service, repository, unlocks)
}
