use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use checkin::questionnaire::{
    CheckinSnapshot, QuestionnaireResult, RepositoryError, ResultRepository, UnlockError,
    UnlockPublisher, UnlockRequest, UserId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local result store. Stands in for the real persistence
/// collaborator until one is wired up.
#[derive(Default, Clone)]
pub(crate) struct InMemoryResultRepository {
    records: Arc<Mutex<HashMap<UserId, Vec<QuestionnaireResult>>>>,
}

impl ResultRepository for InMemoryResultRepository {
    fn save(&self, user: &UserId, result: &QuestionnaireResult) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.entry(user.clone()).or_default().push(result.clone());
        Ok(())
    }

    fn fetch_last(&self, user: &UserId) -> Result<Option<CheckinSnapshot>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .get(user)
            .and_then(|results| results.last())
            .map(CheckinSnapshot::from_result))
    }
}

/// Logs premium-unlock intents; the actual paywall lives elsewhere.
#[derive(Default, Clone)]
pub(crate) struct LoggingUnlockPublisher;

impl UnlockPublisher for LoggingUnlockPublisher {
    fn publish(&self, request: UnlockRequest) -> Result<(), UnlockError> {
        info!(
            recommendation = %request.recommendation_id,
            user = request.user.as_ref().map(|user| user.0.as_str()),
            "premium unlock requested"
        );
        Ok(())
    }
}
