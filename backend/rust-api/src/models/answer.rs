use serde::{Deserialize, Serialize};

use super::SessionState;
use crate::error::HuntError;

/// Body of `POST /sessions/{id}/answers`. Exactly one of `answer`/`choice`.
#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    /// Defaults to the active step; set it to replay an already solved one.
    pub step_id: Option<u32>,
    pub answer: Option<String>,
    pub choice: Option<usize>,
}

impl SubmitAnswerRequest {
    pub fn into_submission(self) -> Result<Submission, HuntError> {
        match (self.answer, self.choice) {
            (Some(text), None) => Ok(Submission::Text(text)),
            (None, Some(index)) => Ok(Submission::Choice(index)),
            (Some(_), Some(_)) => Err(HuntError::Validation(
                "provide either `answer` or `choice`, not both".to_string(),
            )),
            (None, None) => Err(HuntError::Validation(
                "one of `answer` or `choice` is required".to_string(),
            )),
        }
    }
}

/// Raw input coming from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Text(String),
    Choice(usize),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResult {
    pub correct: bool,
    pub points_awarded: u32,
}

impl ValidationResult {
    pub const INCORRECT: ValidationResult = ValidationResult {
        correct: false,
        points_awarded: 0,
    };
}

/// What the engine reports back after a submission was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub step_id: u32,
    pub result: ValidationResult,
    /// True when the step was already completed and nothing changed.
    pub replayed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitAnswerResponse {
    pub step_id: u32,
    pub correct: bool,
    pub points_awarded: u32,
    pub replayed: bool,
    pub total_score: u32,
    pub current_step_index: usize,
    pub state: SessionState,
    pub feedback: Option<String>,
}
