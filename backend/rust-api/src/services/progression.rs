//! Session state machine: activation, answers, hints, QR checks, abandon.
//!
//! Every transition takes the current instant as a parameter and either
//! applies completely or leaves the session untouched.

use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::error::HuntError;
use crate::models::answer::{AnswerOutcome, Submission, ValidationResult};
use crate::models::hint::{HintReveal, QrVerification};
use crate::models::reservation::{Reservation, ReservationStatus};
use crate::models::{Hunt, HuntSession, SessionState, Step, StepProgress};

use super::answer_service::check_answer;
use super::normalizer::prepare;
use super::scheduler;

impl HuntSession {
    pub fn new(
        id: String,
        hunt: &Hunt,
        reservation_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            hunt_id: hunt.id.clone(),
            reservation_id,
            state: SessionState::NotStarted,
            current_step_index: 0,
            completed_steps: Default::default(),
            score: 0,
            created_at: now,
            started_at: None,
            finished_at: None,
            steps: hunt.steps.iter().map(|s| StepProgress::new(s.id)).collect(),
        }
    }

    /// Step currently being played, if any.
    pub fn current_step<'h>(&self, hunt: &'h Hunt) -> Option<&'h Step> {
        match self.state {
            SessionState::StepActive { index } => hunt.steps.get(index),
            _ => None,
        }
    }

    /// Starts the hunt once the reservation window has opened.
    ///
    /// `now` carries the venue offset; the unlock comparison uses its local
    /// wall time. Activating an already running session is a no-op.
    pub fn activate(
        &mut self,
        hunt: &Hunt,
        reservation: &Reservation,
        now: DateTime<FixedOffset>,
    ) -> Result<(), HuntError> {
        match self.state {
            SessionState::StepActive { .. } => return Ok(()),
            SessionState::Completed | SessionState::Abandoned => {
                return Err(HuntError::InvalidState {
                    state: self.state.to_string(),
                })
            }
            SessionState::NotStarted => {}
        }

        if reservation.status == ReservationStatus::Cancelled {
            return Err(HuntError::ReservationCancelled {
                id: reservation.id.clone(),
            });
        }

        if !scheduler::is_unlocked(reservation, now.naive_local()) {
            return Err(HuntError::NotYetActive {
                unlocks_at: reservation
                    .scheduled_start()
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
            });
        }

        if hunt.steps.is_empty() || self.steps.len() != hunt.steps.len() {
            return Err(HuntError::InvalidState {
                state: "bound to a hunt without playable steps".to_string(),
            });
        }

        let now = now.with_timezone(&Utc);
        self.state = SessionState::StepActive { index: 0 };
        self.current_step_index = 0;
        self.started_at = Some(now);
        self.steps[0].activated_at = Some(now);

        tracing::info!(
            "Session {} activated on hunt {} (reservation {})",
            self.id,
            self.hunt_id,
            reservation.id
        );
        Ok(())
    }

    /// Applies one submission.
    ///
    /// `step_id` defaults to the active step. Naming an already completed
    /// step replays its recorded result without touching the score.
    pub fn submit_answer(
        &mut self,
        hunt: &Hunt,
        step_id: Option<u32>,
        submission: Submission,
        now: DateTime<Utc>,
    ) -> Result<AnswerOutcome, HuntError> {
        let answer = prepare(submission)?;

        if matches!(
            self.state,
            SessionState::NotStarted | SessionState::Abandoned
        ) {
            return Err(HuntError::InvalidState {
                state: self.state.to_string(),
            });
        }

        if let Some(id) = step_id {
            let position = hunt
                .position_of(id)
                .ok_or_else(|| HuntError::not_found("Step", id.to_string()))?;

            if self.completed_steps.contains(&id) {
                return Ok(AnswerOutcome {
                    step_id: id,
                    result: ValidationResult {
                        correct: true,
                        points_awarded: self.steps[position].points_awarded,
                    },
                    replayed: true,
                });
            }

            if self.state != (SessionState::StepActive { index: position }) {
                return Err(HuntError::StepNotActive { step_id: id });
            }
        }

        let index = self.active_index()?;
        let step = &hunt.steps[index];
        let result = check_answer(hunt, step.id, &answer);

        let progress = &mut self.steps[index];
        progress.attempts += 1;

        if result.correct {
            progress.completed_at = Some(now);
            progress.points_awarded = result.points_awarded;
            self.score = self.score.saturating_add(result.points_awarded);
            self.completed_steps.insert(step.id);

            let next = index + 1;
            if next < hunt.steps.len() {
                self.state = SessionState::StepActive { index: next };
                self.current_step_index = next;
                self.steps[next].activated_at = Some(now);
            } else {
                self.state = SessionState::Completed;
                self.finished_at = Some(now);
                tracing::info!(
                    "Session {} completed hunt {} with score {}",
                    self.id,
                    self.hunt_id,
                    self.score
                );
            }
        }

        Ok(AnswerOutcome {
            step_id: step.id,
            result,
            replayed: false,
        })
    }

    /// Reveals the next hint of the active step, in catalog order.
    pub fn request_hint(&mut self, hunt: &Hunt) -> Result<HintReveal, HuntError> {
        let index = self.active_index()?;
        let step = &hunt.steps[index];
        let hints = &step.enigma.hints;
        let progress = &mut self.steps[index];

        let revealed = progress.hints_revealed;
        let Some(hint) = hints.get(revealed) else {
            return Err(HuntError::NoMoreHints { step_id: step.id });
        };
        progress.hints_revealed += 1;

        Ok(HintReveal {
            step_id: step.id,
            hint: hint.clone(),
            hint_number: revealed + 1,
            hints_remaining: hints.len() - revealed - 1,
        })
    }

    /// Checks a scanned token against the active step's QR code.
    ///
    /// Comparison ignores case and surrounding whitespace. Verification is
    /// recorded but never required to answer.
    pub fn verify_qr(&mut self, hunt: &Hunt, token: &str) -> Result<QrVerification, HuntError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(HuntError::InvalidInput("QR token is empty".to_string()));
        }

        let index = self.active_index()?;
        let step = &hunt.steps[index];
        let expected = step
            .enigma
            .qr_code
            .as_deref()
            .ok_or_else(|| HuntError::not_found("QR code", format!("step {}", step.id)))?;

        let verified = expected.trim().to_lowercase() == token.to_lowercase();
        if verified {
            self.steps[index].qr_verified = true;
        }

        Ok(QrVerification {
            step_id: step.id,
            verified,
        })
    }

    pub fn abandon(&mut self, now: DateTime<Utc>) -> Result<(), HuntError> {
        if self.state.is_terminal() {
            return Err(HuntError::InvalidState {
                state: self.state.to_string(),
            });
        }
        self.state = SessionState::Abandoned;
        self.finished_at = Some(now);
        tracing::info!("Session {} abandoned", self.id);
        Ok(())
    }

    /// A finished session is kept for `retention` after it ended, then dropped.
    pub fn is_expired(&self, now: DateTime<Utc>, retention: Duration) -> bool {
        self.state.is_terminal()
            && self
                .finished_at
                .is_some_and(|finished| now - finished >= retention)
    }

    fn active_index(&self) -> Result<usize, HuntError> {
        match self.state {
            SessionState::StepActive { index } if index < self.steps.len() => Ok(index),
            other => Err(HuntError::InvalidState {
                state: other.to_string(),
            }),
        }
    }
}
