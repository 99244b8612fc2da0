use serde::{Deserialize, Serialize};

use super::SessionState;

/// Summary screen data for one session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSummary {
    pub session_id: String,
    pub hunt_id: String,
    pub state: SessionState,
    pub total_score: u32,
    pub max_score: u32,
    pub score_percent: u32,
    pub completed_count: usize,
    pub total_steps: usize,
    pub elapsed_seconds: i64,
    pub steps: Vec<StepSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepSummary {
    pub step_id: u32,
    pub location: String,
    pub completed: bool,
    pub points_awarded: u32,
    pub attempts: u32,
    pub hints_revealed: usize,
    pub elapsed_seconds: i64,
    /// Informational; the step stays playable past its limit.
    pub over_time_limit: bool,
}
