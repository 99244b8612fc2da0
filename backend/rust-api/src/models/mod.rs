use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub mod answer;
pub mod hint;
pub mod hunt;
pub mod reporting;
pub mod reservation;
pub mod timer;

pub use hunt::{
    AnswerRule, Coordinates, Difficulty, Enigma, Hunt, HuntDetailView, HuntSummaryView,
    MediaHints, MiniGame, Step, StepView,
};

/// One user's attempt at a hunt. Mutated only by the progression engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuntSession {
    pub id: String,
    pub hunt_id: String,
    pub reservation_id: Option<String>,
    pub state: SessionState,
    pub current_step_index: usize,
    pub completed_steps: BTreeSet<u32>,
    pub score: u32,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub steps: Vec<StepProgress>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    StepActive { index: usize },
    Completed,
    Abandoned,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Abandoned)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::NotStarted => write!(f, "not_started"),
            SessionState::StepActive { index } => write!(f, "step_active({})", index),
            SessionState::Completed => write!(f, "completed"),
            SessionState::Abandoned => write!(f, "abandoned"),
        }
    }
}

/// Per-step bookkeeping, one entry per step of the hunt in catalog order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepProgress {
    pub step_id: u32,
    pub attempts: u32,
    pub hints_revealed: usize,
    pub activated_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub points_awarded: u32,
    pub qr_verified: bool,
}

impl StepProgress {
    pub fn new(step_id: u32) -> Self {
        Self {
            step_id,
            attempts: 0,
            hints_revealed: 0,
            activated_at: None,
            completed_at: None,
            points_awarded: 0,
            qr_verified: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub hunt_id: String,
    pub reservation_id: String,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub hunt: HuntSummaryView,
    pub state: SessionState,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    #[serde(flatten)]
    pub session: HuntSession,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_step: Option<StepView>,
}
