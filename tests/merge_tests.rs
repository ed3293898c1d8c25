//! Integration tests for the signal merge engine and phase derivation

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use resume_copilot::scoring::Section;
use resume_copilot::session::{
    derive_phase, merge_signals, ExperienceInsight, ExperienceUpdate, FeedbackDecision,
    FollowUpAnswer, FollowUpQuestion, JdInsights, NeedFlags, QuestionType, ResumeContext,
    ResumeSuggestion, RuntimePhase, RuntimeState, Signals, SuggestionFeedback, SuggestionStatus,
};

fn draft_suggestion(id: &str, experience_id: &str) -> ResumeSuggestion {
    ResumeSuggestion {
        id: id.to_string(),
        section: Section::Experience,
        experience_id: Some(experience_id.to_string()),
        title: "Lead with the payments scale".to_string(),
        before: "Worked on payments".to_string(),
        after: "Scaled a payments pipeline to $2M/day".to_string(),
        rationale: "JD emphasizes payments ownership".to_string(),
        alignment: vec!["payments".to_string()],
        status: SuggestionStatus::Pending,
    }
}

#[test]
fn test_full_interview_flow_phases() {
    let mut runtime = RuntimeState::default();
    let ctx = ResumeContext::default();
    assert_eq!(derive_phase(&ctx, &runtime), RuntimePhase::Init);

    // Turn 1: role and readiness arrive along with the JD
    let signals = Signals {
        target_role: Some("Senior Backend Engineer".to_string()),
        target_company: Some("Acme".to_string()),
        resume_ready: Some(true),
        jd_text: Some("own our payments platform".to_string()),
        ..Default::default()
    };
    let outcome = merge_signals(&ctx, &signals, 1);
    runtime.turn = 1;
    assert_eq!(derive_phase(&outcome.context, &runtime), RuntimePhase::ParseJd);

    // Turn 2: JD parsed externally, first experience mentioned
    let signals = Signals {
        jd_insights: Some(JdInsights {
            job_title: Some("Senior Backend Engineer".to_string()),
            must_have_skills: vec!["Rust".to_string(), "Kubernetes".to_string()],
            ..Default::default()
        }),
        experiences: vec![ExperienceUpdate {
            label: Some("Payments pipeline".to_string()),
            company: Some("Acme Corp".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };
    let outcome = merge_signals(&outcome.context, &signals, 2);
    runtime.turn = 2;
    assert_eq!(outcome.context.follow_up_questions.len(), 3);
    assert_eq!(derive_phase(&outcome.context, &runtime), RuntimePhase::Interview);

    // Turns 3-5: the user answers each follow-up
    let mut context = outcome.context;
    let answers = [
        (QuestionType::Quantify, FollowUpAnswer {
            metrics: vec!["processed $2M/day".to_string()],
            ..Default::default()
        }),
        (QuestionType::TechDepth, FollowUpAnswer {
            tech_highlights: vec!["exactly-once retries over Kafka".to_string()],
            ..Default::default()
        }),
        (QuestionType::Impact, FollowUpAnswer {
            business_impact: vec!["unblocked the enterprise tier launch".to_string()],
            ..Default::default()
        }),
    ];
    let mut turn = 3;
    let mut pending_synthesis = false;
    for (question_type, mut answer) in answers {
        let question_id = context
            .follow_up_questions
            .iter()
            .find(|q| q.question_type == question_type && !q.resolved)
            .map(|q| q.id.clone())
            .expect("expected an open question for the dimension");
        answer.follow_up_id = Some(question_id.clone());

        let signals = Signals {
            follow_up_answers: vec![answer],
            ..Default::default()
        };
        let outcome = merge_signals(&context, &signals, turn);
        assert_eq!(outcome.resolved_question_ids, vec![question_id]);
        context = outcome.context;
        pending_synthesis = outcome.pending_synthesis;
        turn += 1;
    }

    // All three needs satisfied in the same pass that answered the last one
    assert!(pending_synthesis);
    let exp = &context.experiences[0];
    assert!(exp.needs.all_met());

    runtime.pending_synthesis = true;
    runtime.turn = turn;
    assert_eq!(derive_phase(&context, &runtime), RuntimePhase::Synthesize);

    // External synthesis node drafts a suggestion
    let experience_id = context.experiences[0].id.clone();
    context.suggestions.push(draft_suggestion("sug-1", &experience_id));
    runtime.pending_synthesis = false;
    runtime.awaiting_approval = true;
    assert_eq!(derive_phase(&context, &runtime), RuntimePhase::AwaitApproval);

    // User approves
    let signals = Signals {
        suggestion_feedback: vec![SuggestionFeedback {
            suggestion_id: "sug-1".to_string(),
            decision: FeedbackDecision::Approve,
            reason: None,
        }],
        ..Default::default()
    };
    let outcome = merge_signals(&context, &signals, turn);
    assert_eq!(outcome.context.suggestions[0].status, SuggestionStatus::Applied);
    assert_eq!(derive_phase(&outcome.context, &runtime), RuntimePhase::Validate);

    runtime.awaiting_approval = false;
    assert_eq!(derive_phase(&outcome.context, &runtime), RuntimePhase::Complete);
}

#[test]
fn test_merge_is_append_only_for_lists() {
    let mut context = ResumeContext::default();
    let mut exp = ExperienceInsight::new("exp-1", "Search infra");
    exp.metrics = vec!["indexed 2B docs".to_string(), "99.99% uptime".to_string()];
    exp.tech_highlights = vec!["custom LSM tree".to_string()];
    context.experiences.push(exp);
    context.focus_strengths = vec!["distributed systems".to_string()];

    let signals = Signals {
        focus_strengths: vec!["mentoring".to_string(), "distributed systems".to_string()],
        experiences: vec![ExperienceUpdate {
            id: Some("exp-1".to_string()),
            metrics: vec!["99.99% uptime".to_string(), "sub-ms lookups".to_string()],
            tech_highlights: vec!["".to_string()],
            ..Default::default()
        }],
        ..Default::default()
    };
    let outcome = merge_signals(&context, &signals, 2);

    let before = &context.experiences[0];
    let after = &outcome.context.experiences[0];
    assert!(after.metrics.len() >= before.metrics.len());
    assert!(after.tech_highlights.len() >= before.tech_highlights.len());
    for metric in &before.metrics {
        assert!(after.metrics.contains(metric));
    }
    for strength in &context.focus_strengths {
        assert!(outcome.context.focus_strengths.contains(strength));
    }
}

#[test]
fn test_merge_does_not_mutate_the_input_snapshot() {
    let mut context = ResumeContext::default();
    context.experiences.push(ExperienceInsight::new("exp-1", "Search infra"));
    let snapshot = context.clone();

    let signals = Signals {
        experiences: vec![ExperienceUpdate {
            id: Some("exp-1".to_string()),
            metrics: vec!["indexed 2B docs".to_string()],
            ..Default::default()
        }],
        ..Default::default()
    };
    let _ = merge_signals(&context, &signals, 1);

    assert_eq!(context, snapshot);
}

fn random_context(rng: &mut StdRng) -> ResumeContext {
    let mut context = ResumeContext::default();
    if rng.gen_bool(0.7) {
        context.target_role = Some("Backend Engineer".to_string());
    }
    if rng.gen_bool(0.7) {
        context.resume_ready = Some(rng.gen_bool(0.5));
    }
    if rng.gen_bool(0.5) {
        context.jd_text = Some("payments platform jd".to_string());
    }
    if rng.gen_bool(0.5) {
        context.jd_insights = Some(JdInsights::default());
    }

    for i in 0..rng.gen_range(0..3) {
        let mut exp = ExperienceInsight::new(format!("exp-{}", i + 1), format!("Role {}", i + 1));
        exp.needs = NeedFlags {
            quantify: rng.gen_bool(0.5),
            tech_depth: rng.gen_bool(0.5),
            impact: rng.gen_bool(0.5),
        };
        context.experiences.push(exp);
    }

    for i in 0..rng.gen_range(0..3) {
        context.follow_up_questions.push(FollowUpQuestion {
            id: format!("q-{}", i + 1),
            question_type: QuestionType::Quantify,
            question: "numbers?".to_string(),
            asked_turn: 1,
            experience_id: Some("exp-1".to_string()),
            resolved: rng.gen_bool(0.5),
        });
    }

    for i in 0..rng.gen_range(0..2) {
        let mut suggestion = draft_suggestion(&format!("sug-{}", i + 1), "exp-1");
        suggestion.status = match rng.gen_range(0..3) {
            0 => SuggestionStatus::Pending,
            1 => SuggestionStatus::Applied,
            _ => SuggestionStatus::Rejected,
        };
        context.suggestions.push(suggestion);
    }

    context
}

#[test]
fn test_phase_derivation_is_total_and_interview_takes_precedence() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..50 {
        let context = random_context(&mut rng);
        let runtime = RuntimeState {
            turn: rng.gen_range(0..20),
            last_processed_message: rng.gen_range(0..20),
            pending_synthesis: rng.gen_bool(0.5),
            awaiting_approval: rng.gen_bool(0.5),
        };

        let phase = derive_phase(&context, &runtime);
        // Same inputs, same phase
        assert_eq!(phase, derive_phase(&context, &runtime));

        let has_open_question = context.follow_up_questions.iter().any(|q| !q.resolved);
        if has_open_question {
            assert_eq!(phase, RuntimePhase::Interview);
        } else {
            assert_ne!(phase, RuntimePhase::Interview);
        }
    }
}

#[test]
fn test_signals_validation_boundary() {
    // A well-formed extractor payload round-trips through the strict parser
    let value = serde_json::json!({
        "targetRole": "Senior Backend Engineer",
        "experiences": [{
            "label": "Payments pipeline",
            "metrics": ["processed $2M/day"]
        }],
        "followUpAnswers": [{
            "experienceLabel": "Payments pipeline",
            "techHighlights": ["exactly-once retries"]
        }]
    });
    let signals = Signals::from_value(value).unwrap();
    let outcome = merge_signals(&ResumeContext::default(), &signals, 1);
    let exp = &outcome.context.experiences[0];
    assert!(!exp.needs.tech_depth);
    assert!(exp.needs.impact);

    // Shape drift is rejected, not coerced
    let drifted = serde_json::json!({
        "experiences": [{ "labell": "typo" }]
    });
    assert!(Signals::from_value(drifted).is_err());
}
