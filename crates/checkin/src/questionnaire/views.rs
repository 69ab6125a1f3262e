use serde::Serialize;

use super::catalog::{mood_options, SafetyNotice, SAFETY_NOTICE};
use super::domain::{MoodLevel, MoodOption, QuestionnaireResult};
use super::recommendations::{recommendations_for, RecommendationSet};
use super::scoring::summary_for;
use super::session::{FlowState, QuestionnaireSession};

/// Question payload for the presentation collaborator. The index is 1-based
/// for progress display.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: &'static str,
    pub text: &'static str,
    pub category: &'static str,
    pub index: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultView {
    pub total_score: u16,
    pub normalized_score: u8,
    pub mood: &'static str,
    pub label: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
    pub message: &'static str,
}

impl ResultView {
    pub fn from_result(result: &QuestionnaireResult) -> Self {
        let summary = summary_for(result.mood);
        Self {
            total_score: result.total_score,
            normalized_score: result.normalized_score,
            mood: result.mood.slug(),
            label: summary.label,
            emoji: summary.emoji,
            color: summary.color,
            message: summary.message,
        }
    }
}

/// Snapshot of a session rendered for one response. Only the fields relevant
/// to the current state are populated.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub state: FlowState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_mood: Option<MoodLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood_options: Option<[MoodOption; 6]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_notice: Option<SafetyNotice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<RecommendationSet>,
}

impl SessionView {
    pub fn render(session_id: String, session: &QuestionnaireSession, quote: &'static str) -> Self {
        let state = session.state();

        let question = session.current_question().map(|question| {
            let (cursor, total) = session.progress();
            QuestionView {
                id: question.id,
                text: question.text,
                category: question.category.label(),
                index: cursor + 1,
                total,
            }
        });

        let result = match state {
            FlowState::Results | FlowState::Recommendations => {
                session.result().map(ResultView::from_result)
            }
            _ => None,
        };

        let recommendations = match (state, session.result()) {
            (FlowState::Recommendations, Some(result)) => Some(recommendations_for(result.mood)),
            _ => None,
        };

        Self {
            session_id,
            state,
            selected_mood: session.selected_mood(),
            mood_options: (state == FlowState::Landing).then(mood_options),
            quote: (state == FlowState::Welcome).then_some(quote),
            question,
            safety_notice: (state == FlowState::SafetyAlert).then_some(SAFETY_NOTICE),
            result,
            recommendations,
        }
    }
}
