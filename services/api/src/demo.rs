use crate::infra::{InMemoryResultRepository, LoggingUnlockPublisher};
use checkin::error::AppError;
use checkin::questionnaire::{
    AnswerOption, CheckinService, FlowState, MoodLevel, SessionEvent, SessionId, UserId, Viewer,
};
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Run the demo as a signed-in user instead of anonymously.
    #[arg(long)]
    pub(crate) user_id: Option<String>,
    /// Answer given to every non-sensitive question (yes, mostly, not_really, no).
    #[arg(long, default_value = "mostly", value_parser = parse_answer)]
    pub(crate) answer: AnswerOption,
    /// Answer given to the sensitive safety question.
    #[arg(long, default_value = "yes", value_parser = parse_answer)]
    pub(crate) safety_answer: AnswerOption,
}

fn parse_answer(raw: &str) -> Result<AnswerOption, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" => Ok(AnswerOption::Yes),
        "mostly" => Ok(AnswerOption::Mostly),
        "not_really" | "notreally" => Ok(AnswerOption::NotReally),
        "no" => Ok(AnswerOption::No),
        other => Err(format!(
            "unknown answer '{other}'; expected yes, mostly, not_really, or no"
        )),
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryResultRepository::default());
    let service = CheckinService::new(repository, Arc::new(LoggingUnlockPublisher));

    let viewer = match &args.user_id {
        Some(user_id) => Viewer::SignedIn(UserId(user_id.clone())),
        None => Viewer::Anonymous,
    };

    println!("== Wellness check-in demo ==");
    let started = service.start(viewer);
    let session_id = SessionId(started.session_id);

    let view = service
        .apply(&session_id, SessionEvent::SelectMood { mood: MoodLevel::Okay })
        .expect("fresh session accepts a mood");
    if let Some(quote) = view.quote {
        println!("welcome: \"{quote}\"");
    }
    service
        .apply(&session_id, SessionEvent::Begin)
        .expect("welcome accepts begin");

    loop {
        let view = service.view(&session_id).expect("session exists");
        let Some(question) = view.question else { break };

        let is_safety = question.id.starts_with("safety");
        let pick = if is_safety { args.safety_answer } else { args.answer };
        println!(
            "[{}/{}] ({}) {} -> {}",
            question.index,
            question.total,
            question.category,
            question.text,
            pick.label()
        );

        let applied = service
            .apply(&session_id, SessionEvent::Answer { answer: pick })
            .expect("questionnaire accepts answers");

        if applied.state == FlowState::SafetyAlert {
            let notice = applied.safety_notice.expect("interstitial copy");
            println!("  !! {} — {}", notice.title, notice.message);
            for helpline in notice.helplines {
                println!("     {} - {}", helpline.number, helpline.label);
            }
            service
                .apply(&session_id, SessionEvent::DismissSafetyAlert)
                .expect("interstitial dismisses forward");
        }

        if matches!(applied.state, FlowState::LoginPrompt | FlowState::Results) {
            break;
        }
    }

    let view = service.view(&session_id).expect("session exists");
    let view = if view.state == FlowState::LoginPrompt {
        println!("-- anonymous run: skipping login prompt --");
        service
            .apply(&session_id, SessionEvent::ContinueAnonymously)
            .expect("prompt accepts continue")
    } else {
        view
    };

    let result = view.result.expect("completed run has a result");
    println!();
    println!(
        "result: {} {} — {}/100 (raw {})",
        result.emoji, result.label, result.normalized_score, result.total_score
    );
    println!("        {}", result.message);

    let view = service
        .apply(&session_id, SessionEvent::ViewRecommendations)
        .expect("results accept recommendations");
    if let Some(set) = view.recommendations {
        println!();
        println!("try next:");
        for recommendation in &set.free {
            println!(
                "  {} {} — {}",
                recommendation.icon, recommendation.title, recommendation.description
            );
        }
        for recommendation in &set.premium {
            println!(
                "  {} {} (premium) — {}",
                recommendation.icon, recommendation.title, recommendation.description
            );
        }
    }

    Ok(())
}
