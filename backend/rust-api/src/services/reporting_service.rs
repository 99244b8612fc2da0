use chrono::{DateTime, Utc};

use crate::models::reporting::{SessionSummary, StepSummary};
use crate::models::{Hunt, HuntSession};

/// Builds the end-of-hunt summary. Works at any point of the session; a
/// running step is measured up to `now`.
pub fn summarize(session: &HuntSession, hunt: &Hunt, now: DateTime<Utc>) -> SessionSummary {
    let end = session.finished_at.unwrap_or(now);
    let elapsed_seconds = session
        .started_at
        .map(|start| (end - start).num_seconds().max(0))
        .unwrap_or(0);

    let steps = hunt
        .steps
        .iter()
        .zip(session.steps.iter())
        .map(|(step, progress)| {
            let step_end = progress.completed_at.unwrap_or(end);
            let elapsed = progress
                .activated_at
                .map(|start| (step_end - start).num_seconds().max(0))
                .unwrap_or(0);

            StepSummary {
                step_id: step.id,
                location: step.location.clone(),
                completed: session.completed_steps.contains(&step.id),
                points_awarded: progress.points_awarded,
                attempts: progress.attempts,
                hints_revealed: progress.hints_revealed,
                elapsed_seconds: elapsed,
                over_time_limit: elapsed > i64::from(step.enigma.time_limit_minutes) * 60,
            }
        })
        .collect();

    let max_score = hunt.max_score();
    SessionSummary {
        session_id: session.id.clone(),
        hunt_id: session.hunt_id.clone(),
        state: session.state,
        total_score: session.score,
        max_score,
        score_percent: score_percent(session.score, max_score),
        completed_count: session.completed_steps.len(),
        total_steps: hunt.steps.len(),
        elapsed_seconds,
        steps,
    }
}

/// Share of the maximum score, rounded down; 0 for an empty hunt.
fn score_percent(score: u32, max_score: u32) -> u32 {
    if max_score == 0 {
        return 0;
    }
    let percent = u64::from(score) * 100 / u64::from(max_score);
    u32::try_from(percent).unwrap_or(u32::MAX)
}
