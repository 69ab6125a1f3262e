use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::catalog::{motivational_quote, QuestionCatalog};
use super::domain::{AnswerOption, MoodLevel, QuestionnaireResult, UserId, Viewer};
use super::recommendations::find_recommendation;
use super::repository::{
    CheckinSnapshot, RepositoryError, ResultRepository, UnlockPublisher, UnlockRequest,
};
use super::session::{QuestionnaireSession, SessionError, StepOutcome};
use super::views::SessionView;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> (SessionId, u64) {
    let seq = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    (SessionId(format!("checkin-{seq:06}")), seq)
}

/// User intents accepted from the presentation collaborator. These are the
/// only inbound events the engine responds to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum SessionEvent {
    SelectMood { mood: MoodLevel },
    Begin,
    Answer { answer: AnswerOption },
    Previous,
    DismissSafetyAlert,
    SignIn { user_id: String },
    ContinueAnonymously,
    ViewRecommendations,
    BackToResults,
    SelectPremium { recommendation_id: String },
    Retake,
}

struct SessionEntry {
    session: QuestionnaireSession,
    quote: &'static str,
}

/// Owns the live sessions and sequences each one through the questionnaire
/// flow, calling out to the persistence and gating collaborators. Every
/// collaborator call is fire-and-forget: the user-visible transition never
/// waits on, or fails because of, external I/O.
pub struct CheckinService<R, U> {
    sessions: Mutex<HashMap<SessionId, SessionEntry>>,
    repository: Arc<R>,
    unlocks: Arc<U>,
}

impl<R, U> CheckinService<R, U>
where
    R: ResultRepository + 'static,
    U: UnlockPublisher + 'static,
{
    pub fn new(repository: Arc<R>, unlocks: Arc<U>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            repository,
            unlocks,
        }
    }

    /// Open a fresh session on the standard catalog. The viewer identity is
    /// captured here and read again once per completion event.
    pub fn start(&self, viewer: Viewer) -> SessionView {
        self.start_with_catalog(viewer, QuestionCatalog::standard())
    }

    pub fn start_with_catalog(&self, viewer: Viewer, catalog: QuestionCatalog) -> SessionView {
        let (session_id, seq) = next_session_id();
        let entry = SessionEntry {
            session: QuestionnaireSession::new(catalog, viewer),
            quote: motivational_quote(seq),
        };

        let view = SessionView::render(session_id.0.clone(), &entry.session, entry.quote);

        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        sessions.insert(session_id, entry);
        view
    }

    pub fn view(&self, session_id: &SessionId) -> Result<SessionView, CheckinServiceError> {
        let sessions = self.sessions.lock().expect("session mutex poisoned");
        let entry = sessions
            .get(session_id)
            .ok_or_else(|| CheckinServiceError::SessionNotFound(session_id.0.clone()))?;
        Ok(SessionView::render(
            session_id.0.clone(),
            &entry.session,
            entry.quote,
        ))
    }

    /// Apply one user intent and return the refreshed session snapshot.
    pub fn apply(
        &self,
        session_id: &SessionId,
        event: SessionEvent,
    ) -> Result<SessionView, CheckinServiceError> {
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        let entry = sessions
            .get_mut(session_id)
            .ok_or_else(|| CheckinServiceError::SessionNotFound(session_id.0.clone()))?;
        let session = &mut entry.session;

        match event {
            SessionEvent::SelectMood { mood } => session.select_mood(mood)?,
            SessionEvent::Begin => session.begin()?,
            SessionEvent::Answer { answer } => {
                let outcome = session.answer(answer)?;
                self.handle_completion(session, outcome);
            }
            SessionEvent::Previous => session.previous()?,
            SessionEvent::DismissSafetyAlert => {
                let outcome = session.dismiss_safety_alert()?;
                self.handle_completion(session, outcome);
            }
            SessionEvent::SignIn { user_id } => {
                let user = UserId(user_id);
                let result = session.sign_in(user.clone())?.clone();
                self.persist(&user, &result);
            }
            SessionEvent::ContinueAnonymously => session.continue_anonymously()?,
            SessionEvent::ViewRecommendations => session.view_recommendations()?,
            SessionEvent::BackToResults => session.back_to_results()?,
            SessionEvent::SelectPremium { recommendation_id } => {
                self.request_unlock(session, recommendation_id)?;
            }
            SessionEvent::Retake => session.retake()?,
        }

        Ok(SessionView::render(
            session_id.0.clone(),
            session,
            entry.quote,
        ))
    }

    /// Returning-user summary, read straight through to the repository.
    pub fn last_checkin(
        &self,
        user: &UserId,
    ) -> Result<Option<CheckinSnapshot>, CheckinServiceError> {
        Ok(self.repository.fetch_last(user)?)
    }

    /// A run that completed while signed in is persisted immediately; an
    /// anonymous completion waits for the login prompt decision.
    fn handle_completion(&self, session: &QuestionnaireSession, outcome: StepOutcome) {
        if let StepOutcome::Completed {
            result,
            needs_login: false,
        } = outcome
        {
            if let Some(user) = session.viewer().user_id() {
                self.persist(user, &result);
            }
        }
    }

    fn persist(&self, user: &UserId, result: &QuestionnaireResult) {
        if let Err(error) = self.repository.save(user, result) {
            warn!(user = %user, %error, "check-in result not persisted; continuing");
        }
    }

    /// Signal premium intent to the gating collaborator. Unlocks nothing on
    /// this side and leaves the session untouched.
    fn request_unlock(
        &self,
        session: &QuestionnaireSession,
        recommendation_id: String,
    ) -> Result<(), CheckinServiceError> {
        let recommendation = find_recommendation(&recommendation_id)
            .ok_or(CheckinServiceError::UnknownRecommendation(recommendation_id))?;

        if !recommendation.is_premium {
            return Ok(());
        }

        let request = UnlockRequest {
            recommendation_id: recommendation.id.to_string(),
            user: session.viewer().user_id().cloned(),
        };
        if let Err(error) = self.unlocks.publish(request) {
            warn!(recommendation = recommendation.id, %error, "unlock request not delivered");
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckinServiceError {
    #[error("session {0} not found")]
    SessionNotFound(String),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("unknown recommendation: {0}")]
    UnknownRecommendation(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
