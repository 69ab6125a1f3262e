use chrono::Utc;
use serde::Serialize;
use std::fmt;

use super::catalog::QuestionCatalog;
use super::domain::{
    Answer, AnswerOption, MoodLevel, Question, QuestionnaireResult, UserId, Viewer,
};
use super::scoring;

/// Presentation states a check-in run moves through. The safety alert is a
/// blocking interstitial: dismissing it is the only way forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    Landing,
    Welcome,
    Questionnaire,
    SafetyAlert,
    LoginPrompt,
    Results,
    Recommendations,
}

impl FlowState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Welcome => "welcome",
            Self::Questionnaire => "questionnaire",
            Self::SafetyAlert => "safety_alert",
            Self::LoginPrompt => "login_prompt",
            Self::Results => "results",
            Self::Recommendations => "recommendations",
        }
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What an answer (or alert dismissal) did to the run.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Cursor advanced to the next question.
    NextQuestion,
    /// The sensitive question drew a concerning response; the answer is
    /// recorded and the flow is suspended on the interstitial.
    SafetyAlert,
    /// Final question answered; the result is built and the flow moved to
    /// either the login prompt (anonymous) or results (signed in).
    Completed {
        result: QuestionnaireResult,
        needs_login: bool,
    },
}

/// Event arrived in a state that does not accept it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("{event} is not valid while the session is in the {state} state")]
    InvalidTransition {
        state: FlowState,
        event: &'static str,
    },
    #[error("cannot navigate before the first question")]
    AtFirstQuestion,
}

/// One questionnaire run over a non-empty catalog. Owns its cursor and
/// working answer set exclusively; nothing is shared across sessions. All
/// transitions are synchronous; the presentation delay the UI adds between
/// answers is cosmetic and never gates correctness.
#[derive(Debug)]
pub struct QuestionnaireSession {
    catalog: QuestionCatalog,
    viewer: Viewer,
    state: FlowState,
    selected_mood: Option<MoodLevel>,
    cursor: usize,
    answers: Vec<Answer>,
    result: Option<QuestionnaireResult>,
}

impl QuestionnaireSession {
    pub fn new(catalog: QuestionCatalog, viewer: Viewer) -> Self {
        Self {
            catalog,
            viewer,
            state: FlowState::Landing,
            selected_mood: None,
            cursor: 0,
            answers: Vec::new(),
            result: None,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn selected_mood(&self) -> Option<MoodLevel> {
        self.selected_mood
    }

    pub fn result(&self) -> Option<&QuestionnaireResult> {
        self.result.as_ref()
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Question under the cursor while the questionnaire (or its interstitial)
    /// is active.
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            FlowState::Questionnaire | FlowState::SafetyAlert => {
                self.catalog.question(self.cursor)
            }
            _ => None,
        }
    }

    /// Zero-based cursor position, paired with the catalog length for
    /// progress display.
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor, self.catalog.len())
    }

    /// Landing mood pick. Informational only; scoring never reads it.
    pub fn select_mood(&mut self, mood: MoodLevel) -> Result<(), SessionError> {
        self.expect_state(FlowState::Landing, "select_mood")?;
        self.selected_mood = Some(mood);
        self.state = FlowState::Welcome;
        Ok(())
    }

    pub fn begin(&mut self) -> Result<(), SessionError> {
        self.expect_state(FlowState::Welcome, "begin")?;
        self.cursor = 0;
        self.state = FlowState::Questionnaire;
        Ok(())
    }

    /// Record an answer for the question under the cursor. Re-answering a
    /// question replaces its previous answer in place, never appends. A
    /// concerning response to the sensitive question suspends the advance on
    /// the safety interstitial; the answer is recorded first.
    pub fn answer(&mut self, option: AnswerOption) -> Result<StepOutcome, SessionError> {
        self.expect_state(FlowState::Questionnaire, "answer")?;

        let question = *self
            .catalog
            .question(self.cursor)
            .expect("cursor stays within catalog bounds");

        self.record(&question, option);

        if question.is_sensitive
            && matches!(option, AnswerOption::Yes | AnswerOption::Mostly)
        {
            self.state = FlowState::SafetyAlert;
            return Ok(StepOutcome::SafetyAlert);
        }

        Ok(self.advance_or_complete())
    }

    /// Acknowledge the safety interstitial and resume exactly where the run
    /// was suspended: forward, with the recorded answer retained.
    pub fn dismiss_safety_alert(&mut self) -> Result<StepOutcome, SessionError> {
        self.expect_state(FlowState::SafetyAlert, "dismiss_safety_alert")?;
        self.state = FlowState::Questionnaire;
        Ok(self.advance_or_complete())
    }

    /// Step back one question. Recorded answers stay untouched; re-answering
    /// overwrites them.
    pub fn previous(&mut self) -> Result<(), SessionError> {
        self.expect_state(FlowState::Questionnaire, "previous")?;
        if self.cursor == 0 {
            return Err(SessionError::AtFirstQuestion);
        }
        self.cursor -= 1;
        Ok(())
    }

    /// Attach an identity at the login prompt and proceed to results. The
    /// caller persists the returned result.
    pub fn sign_in(&mut self, user: UserId) -> Result<&QuestionnaireResult, SessionError> {
        self.expect_state(FlowState::LoginPrompt, "sign_in")?;
        self.viewer = Viewer::SignedIn(user);
        self.state = FlowState::Results;
        Ok(self
            .result
            .as_ref()
            .expect("login prompt implies a computed result"))
    }

    pub fn continue_anonymously(&mut self) -> Result<(), SessionError> {
        self.expect_state(FlowState::LoginPrompt, "continue_anonymously")?;
        self.state = FlowState::Results;
        Ok(())
    }

    pub fn view_recommendations(&mut self) -> Result<(), SessionError> {
        self.expect_state(FlowState::Results, "view_recommendations")?;
        self.state = FlowState::Recommendations;
        Ok(())
    }

    pub fn back_to_results(&mut self) -> Result<(), SessionError> {
        self.expect_state(FlowState::Recommendations, "back_to_results")?;
        self.state = FlowState::Results;
        Ok(())
    }

    /// Discard the delivered result and start over from the landing screen.
    /// The viewer identity survives the reset.
    pub fn retake(&mut self) -> Result<(), SessionError> {
        match self.state {
            FlowState::Results | FlowState::Recommendations => {
                self.selected_mood = None;
                self.cursor = 0;
                self.answers.clear();
                self.result = None;
                self.state = FlowState::Landing;
                Ok(())
            }
            state => Err(SessionError::InvalidTransition {
                state,
                event: "retake",
            }),
        }
    }

    fn expect_state(&self, expected: FlowState, event: &'static str) -> Result<(), SessionError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                state: self.state,
                event,
            })
        }
    }

    fn record(&mut self, question: &Question, option: AnswerOption) {
        let answer = Answer {
            question_id: question.id,
            answer: option,
            score: scoring::score_for_answer(option, question),
        };

        match self
            .answers
            .iter_mut()
            .find(|existing| existing.question_id == question.id)
        {
            Some(existing) => *existing = answer,
            None => self.answers.push(answer),
        }
    }

    fn advance_or_complete(&mut self) -> StepOutcome {
        if self.cursor + 1 < self.catalog.len() {
            self.cursor += 1;
            return StepOutcome::NextQuestion;
        }

        let total = scoring::total_score(&self.answers);
        let normalized = scoring::normalized_score(total, &self.catalog);
        let result = QuestionnaireResult {
            total_score: total,
            normalized_score: normalized,
            mood: scoring::mood_from_score(normalized),
            answers: self.answers.clone(),
            completed_at: Utc::now(),
        };

        let needs_login = self.viewer.is_anonymous();
        self.state = if needs_login {
            FlowState::LoginPrompt
        } else {
            FlowState::Results
        };
        self.result = Some(result.clone());

        StepOutcome::Completed { result, needs_login }
    }
}
