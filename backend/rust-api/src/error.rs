use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Every failure the hunt engine and its HTTP layer can report.
///
/// All variants are recoverable: callers get a typed result and the
/// process keeps running whatever the input looked like.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HuntError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Hunt is not active yet (unlocks at {unlocks_at})")]
    NotYetActive { unlocks_at: String },

    #[error("No more hints for step {step_id}")]
    NoMoreHints { step_id: u32 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Operation not allowed while session is {state}")]
    InvalidState { state: String },

    #[error("Step {step_id} is not the active step")]
    StepNotActive { step_id: u32 },

    #[error("Reservation {id} is cancelled")]
    ReservationCancelled { id: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl HuntError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        HuntError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            HuntError::NotFound { .. } => StatusCode::NOT_FOUND,
            HuntError::NotYetActive { .. } => StatusCode::CONFLICT,
            HuntError::NoMoreHints { .. } => StatusCode::CONFLICT,
            HuntError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            HuntError::InvalidState { .. } => StatusCode::CONFLICT,
            HuntError::StepNotActive { .. } => StatusCode::CONFLICT,
            HuntError::ReservationCancelled { .. } => StatusCode::CONFLICT,
            HuntError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<validator::ValidationErrors> for HuntError {
    fn from(errors: validator::ValidationErrors) -> Self {
        HuntError::Validation(errors.to_string())
    }
}

impl From<HuntError> for (StatusCode, String) {
    fn from(err: HuntError) -> Self {
        (err.status_code(), err.to_string())
    }
}

impl IntoResponse for HuntError {
    fn into_response(self) -> Response {
        let (status, message): (StatusCode, String) = self.into();
        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = HuntError::not_found("Hunt", "nope");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Hunt not found: nope");
    }

    #[test]
    fn gating_errors_map_to_conflict() {
        let err = HuntError::NotYetActive {
            unlocks_at: "2024-03-20 09:00".to_string(),
        };
        let (status, message): (StatusCode, String) = err.into();
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(message.contains("2024-03-20 09:00"));

        assert_eq!(
            HuntError::NoMoreHints { step_id: 3 }.status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn blank_input_is_unprocessable() {
        let err = HuntError::InvalidInput("empty answer".to_string());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
