//! End-to-end fallback and recovery scenario across two providers.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Allow for tests"
)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use fitcoach_client::{recover, with_fallback};
use fitcoach_core::{Capability, Error, Plan, Result};

/// A minimal plan document matching the schema shape.
const PLAN_JSON: &str = r#"{
    "workout_plan": {
        "daily_routine": [{
            "day": "Monday",
            "focus": "Full Body",
            "exercises": [
                {"name": "Squat", "sets": "3", "reps": "10", "rest": "90s"}
            ]
        }]
    },
    "diet_plan": {
        "meal_plan": [{
            "day": "Monday",
            "meals": {
                "breakfast": {"name": "Oatmeal", "calories": 350},
                "lunch": {"name": "Chicken Salad", "calories": 520},
                "dinner": {"name": "Grilled Fish", "calories": 480},
                "snacks": {"name": "Almonds", "calories": 180}
            }
        }]
    },
    "ai_tips": {
        "lifestyle_tips": ["Sleep 8 hours"],
        "motivation": "Keep going"
    }
}"#;

/// Simulates one plan attempt: HTTP classification first, then
/// structured-output recovery on the raw text, mirroring the real
/// call site where recovery runs inside each attempt.
fn attempt_plan(call_index: u32) -> Result<Plan> {
    let raw_text = match call_index {
        // Provider 1 does not serve the capability at all.
        1 => return Err(Error::NotFound("model retired".to_owned())),
        // Provider 2 returns prose with no JSON on its first two tries.
        2 | 3 => "I could not produce JSON this time, sorry!",
        // Third try returns the plan wrapped in a labeled fence.
        _ => {
            return recover(&format!("```json\n{PLAN_JSON}\n```"));
        }
    };
    recover(raw_text)
}

#[tokio::test(start_paused = true)]
async fn test_plan_recovers_after_provider_skip_and_retries() {
    let calls = AtomicU32::new(0);
    let providers = vec!["gemini-old".to_owned(), "gemini-new".to_owned()];

    let plan = with_fallback(
        Capability::Plan,
        &providers,
        3,
        Duration::from_millis(1000),
        |_model| {
            let index = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move { attempt_plan(index) }
        },
    )
    .await
    .expect("Plan should recover on the second provider's third attempt");

    assert_eq!(
        calls.load(Ordering::SeqCst),
        4,
        "One 404 call plus three retried attempts means four calls total"
    );
    assert_eq!(plan.workout_plan.daily_routine[0].day, "Monday");
    assert_eq!(plan.ai_tips.motivation, "Keep going");
}

#[tokio::test(start_paused = true)]
async fn test_unrecoverable_output_everywhere_reports_recovery_exhaustion() {
    let providers = vec!["gemini-a".to_owned()];

    let result: Result<Plan> = with_fallback(
        Capability::Plan,
        &providers,
        2,
        Duration::from_millis(1000),
        |_model| async { recover("definitely not a plan") },
    )
    .await;

    match result {
        Err(Error::Exhausted { capability, source }) => {
            assert_eq!(capability, Capability::Plan);
            assert!(
                matches!(*source, Error::Recovery(_)),
                "Exhaustion caused by recovery must stay distinguishable"
            );
        }
        other => panic!("Expected exhaustion, got {:?}", other.map(|_| ())),
    }
}
