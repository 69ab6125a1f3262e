use std::sync::Arc;

use super::common::*;
use crate::questionnaire::domain::{AnswerOption, MoodLevel, ResultMood, UserId, Viewer};
use crate::questionnaire::service::{
    CheckinService, CheckinServiceError, SessionEvent, SessionId,
};
use crate::questionnaire::session::FlowState;
use crate::questionnaire::views::SessionView;

/// Drive a freshly started session through the whole questionnaire over the
/// service API, answering everything with `option`.
fn complete_via_events<R, U>(
    service: &CheckinService<R, U>,
    session_id: &SessionId,
    option: AnswerOption,
) -> SessionView
where
    R: crate::questionnaire::repository::ResultRepository + 'static,
    U: crate::questionnaire::repository::UnlockPublisher + 'static,
{
    service
        .apply(session_id, SessionEvent::SelectMood { mood: MoodLevel::Okay })
        .expect("select mood");
    service
        .apply(session_id, SessionEvent::Begin)
        .expect("begin");

    loop {
        let view = service
            .apply(session_id, SessionEvent::Answer { answer: option })
            .expect("answer");
        match view.state {
            FlowState::Questionnaire => continue,
            FlowState::SafetyAlert => {
                let view = service
                    .apply(session_id, SessionEvent::DismissSafetyAlert)
                    .expect("dismiss");
                if view.state == FlowState::Questionnaire {
                    continue;
                }
                return view;
            }
            _ => return view,
        }
    }
}

#[test]
fn signed_in_completion_persists_immediately() {
    let (service, repository, _) = build_service();
    let user = UserId("user-1".to_string());
    let started = service.start(Viewer::SignedIn(user.clone()));
    let session_id = SessionId(started.session_id);

    let view = complete_via_events(&service, &session_id, AnswerOption::No);

    assert_eq!(view.state, FlowState::Results);
    let result = view.result.expect("result rendered");
    assert_eq!(result.normalized_score, 100);
    assert_eq!(result.mood, ResultMood::NeedsSupport.slug());

    let saved = repository.saved_for(&user);
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].normalized_score, 100);
}

#[test]
fn anonymous_completion_prompts_for_login_before_persisting() {
    let (service, repository, _) = build_service();
    let started = service.start(Viewer::Anonymous);
    let session_id = SessionId(started.session_id);

    let view = complete_via_events(&service, &session_id, AnswerOption::No);
    assert_eq!(view.state, FlowState::LoginPrompt);

    let user = UserId("late".to_string());
    assert!(repository.saved_for(&user).is_empty());

    let view = service
        .apply(
            &session_id,
            SessionEvent::SignIn {
                user_id: "late".to_string(),
            },
        )
        .expect("sign in");
    assert_eq!(view.state, FlowState::Results);
    assert_eq!(repository.saved_for(&user).len(), 1);
}

#[test]
fn continuing_anonymously_never_persists() {
    let (service, repository, _) = build_service();
    let started = service.start(Viewer::Anonymous);
    let session_id = SessionId(started.session_id);

    complete_via_events(&service, &session_id, AnswerOption::Yes);
    let view = service
        .apply(&session_id, SessionEvent::ContinueAnonymously)
        .expect("continue");

    assert_eq!(view.state, FlowState::Results);
    assert!(repository
        .saved_for(&UserId("anyone".to_string()))
        .is_empty());
}

#[test]
fn persistence_failure_never_blocks_the_flow() {
    let repository = Arc::new(UnavailableRepository);
    let unlocks = Arc::new(MemoryUnlocks::default());
    let service = CheckinService::new(repository, unlocks);

    let started = service.start(Viewer::SignedIn(UserId("user-2".to_string())));
    let session_id = SessionId(started.session_id);

    let view = complete_via_events(&service, &session_id, AnswerOption::No);
    assert_eq!(view.state, FlowState::Results);
    assert!(view.result.is_some());
}

#[test]
fn premium_selection_publishes_intent_without_unlocking() {
    let (service, _, unlocks) = build_service();
    let started = service.start(Viewer::SignedIn(UserId("user-3".to_string())));
    let session_id = SessionId(started.session_id);

    complete_via_events(&service, &session_id, AnswerOption::No);
    service
        .apply(&session_id, SessionEvent::ViewRecommendations)
        .expect("recommendations");

    let view = service
        .apply(
            &session_id,
            SessionEvent::SelectPremium {
                recommendation_id: "rest-2".to_string(),
            },
        )
        .expect("premium select");

    // State unchanged, intent delivered.
    assert_eq!(view.state, FlowState::Recommendations);
    let requests = unlocks.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].recommendation_id, "rest-2");
    assert_eq!(
        requests[0].user,
        Some(UserId("user-3".to_string()))
    );
}

#[test]
fn selecting_a_free_recommendation_is_a_no_op() {
    let (service, _, unlocks) = build_service();
    let started = service.start(Viewer::Anonymous);
    let session_id = SessionId(started.session_id);

    let view = service
        .apply(
            &session_id,
            SessionEvent::SelectPremium {
                recommendation_id: "breathing-1".to_string(),
            },
        )
        .expect("free select");

    assert_eq!(view.state, FlowState::Landing);
    assert!(unlocks.requests().is_empty());
}

#[test]
fn unknown_recommendation_is_rejected() {
    let (service, _, _) = build_service();
    let started = service.start(Viewer::Anonymous);
    let session_id = SessionId(started.session_id);

    let error = service
        .apply(
            &session_id,
            SessionEvent::SelectPremium {
                recommendation_id: "missing-1".to_string(),
            },
        )
        .expect_err("unknown id rejected");
    assert!(matches!(
        error,
        CheckinServiceError::UnknownRecommendation(id) if id == "missing-1"
    ));
}

#[test]
fn last_checkin_surfaces_the_stored_snapshot() {
    let (service, _, _) = build_service();
    let user = UserId("user-4".to_string());
    let started = service.start(Viewer::SignedIn(user.clone()));
    let session_id = SessionId(started.session_id);

    complete_via_events(&service, &session_id, AnswerOption::No);

    let snapshot = service
        .last_checkin(&user)
        .expect("repository read")
        .expect("snapshot present");
    assert_eq!(snapshot.normalized_score, 100);
    assert_eq!(snapshot.mood, ResultMood::NeedsSupport);

    let absent = service
        .last_checkin(&UserId("stranger".to_string()))
        .expect("repository read");
    assert!(absent.is_none());
}

#[test]
fn unknown_session_is_not_found() {
    let (service, _, _) = build_service();
    let error = service
        .view(&SessionId("checkin-999999".to_string()))
        .expect_err("missing session");
    assert!(matches!(error, CheckinServiceError::SessionNotFound(_)));
}

#[test]
fn invalid_event_surfaces_the_session_error() {
    let (service, _, _) = build_service();
    let started = service.start(Viewer::Anonymous);
    let session_id = SessionId(started.session_id);

    let error = service
        .apply(&session_id, SessionEvent::Begin)
        .expect_err("begin before mood select");
    assert!(matches!(error, CheckinServiceError::Session(_)));
}
