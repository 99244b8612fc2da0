use chrono::{Duration, FixedOffset};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::HuntError;
use crate::metrics::{
    ACTIVATIONS_TOTAL, ANSWERS_SUBMITTED_TOTAL, HINTS_REQUESTED_TOTAL, HUNT_SESSIONS_ACTIVE,
    HUNT_SESSIONS_TOTAL,
};
use crate::models::answer::{SubmitAnswerRequest, SubmitAnswerResponse};
use crate::models::hint::{HintReveal, QrVerification};
use crate::models::reporting::SessionSummary;
use crate::models::{
    CreateSessionRequest, CreateSessionResponse, Hunt, HuntSession, HuntSummaryView,
    SessionState, SessionView, StepView,
};

use super::catalog::HuntCatalog;
use super::clock::Clock;
use super::reporting_service::summarize;
use super::{AppState, ReservationStore, SessionStore};

/// Session lifecycle over the in-memory store.
///
/// Each call samples the clock once, takes the store's write lock for the
/// whole transition and releases it before returning.
pub struct SessionService {
    sessions: SessionStore,
    reservations: ReservationStore,
    catalog: Arc<HuntCatalog>,
    clock: Arc<dyn Clock>,
    venue_offset: FixedOffset,
    retention: Duration,
}

impl SessionService {
    pub fn new(state: &AppState) -> Self {
        Self {
            sessions: state.sessions.clone(),
            reservations: state.reservations.clone(),
            catalog: state.catalog.clone(),
            clock: state.clock.clone(),
            venue_offset: state.venue_offset(),
            retention: Duration::minutes(i64::from(state.config.session_retention_minutes)),
        }
    }

    pub async fn create_session(
        &self,
        req: CreateSessionRequest,
    ) -> Result<CreateSessionResponse, HuntError> {
        let hunt = self.catalog.get(req.hunt_id.trim())?;

        let reservation_id = req.reservation_id.trim().to_string();
        if !self.reservations.read().await.contains_key(&reservation_id) {
            return Err(HuntError::not_found("Reservation", reservation_id));
        }

        let session_id = Uuid::new_v4().to_string();
        let session = HuntSession::new(
            session_id.clone(),
            hunt,
            Some(reservation_id.clone()),
            self.clock.now(),
        );
        let state = session.state;

        let mut sessions = self.sessions.write().await;
        self.purge_locked(&mut sessions);
        sessions.insert(session_id.clone(), session);
        drop(sessions);

        HUNT_SESSIONS_TOTAL.with_label_values(&["created"]).inc();
        tracing::info!(
            "Session created: id={}, hunt={}, reservation={}",
            session_id,
            hunt.id,
            reservation_id
        );

        Ok(CreateSessionResponse {
            session_id,
            hunt: HuntSummaryView::from(hunt),
            state,
        })
    }

    /// Drops completed and abandoned sessions past the retention window.
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        self.purge_locked(&mut sessions)
    }

    fn purge_locked(&self, sessions: &mut HashMap<String, HuntSession>) -> usize {
        let now = self.clock.now();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now, self.retention));

        let purged = before - sessions.len();
        if purged > 0 {
            HUNT_SESSIONS_TOTAL
                .with_label_values(&["purged"])
                .inc_by(purged as u64);
            tracing::info!("Purged {} finished session(s)", purged);
        }
        purged
    }

    pub async fn get_session(&self, session_id: &str) -> Result<SessionView, HuntError> {
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(session_id)
            .ok_or_else(|| HuntError::not_found("Session", session_id))?;
        let hunt = self.catalog.get(&session.hunt_id)?;
        Ok(view(session, hunt))
    }

    pub async fn activate(&self, session_id: &str) -> Result<SessionView, HuntError> {
        let now = self.clock.now().with_timezone(&self.venue_offset);

        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| HuntError::not_found("Session", session_id))?;
        let hunt = self.catalog.get(&session.hunt_id)?;

        let reservation_id = session
            .reservation_id
            .clone()
            .ok_or_else(|| HuntError::not_found("Reservation", "none"))?;
        let reservation = self
            .reservations
            .read()
            .await
            .get(&reservation_id)
            .cloned()
            .ok_or_else(|| HuntError::not_found("Reservation", reservation_id.as_str()))?;

        let was_started = session.state != SessionState::NotStarted;
        match session.activate(hunt, &reservation, now) {
            Ok(()) => {
                if !was_started {
                    ACTIVATIONS_TOTAL.with_label_values(&["activated"]).inc();
                    HUNT_SESSIONS_ACTIVE.inc();
                }
                Ok(view(session, hunt))
            }
            Err(err) => {
                let outcome = match err {
                    HuntError::NotYetActive { .. } => "not_yet_active",
                    _ => "rejected",
                };
                ACTIVATIONS_TOTAL.with_label_values(&[outcome]).inc();
                tracing::warn!("Activation refused for session {}: {}", session_id, err);
                Err(err)
            }
        }
    }

    pub async fn submit_answer(
        &self,
        session_id: &str,
        req: SubmitAnswerRequest,
    ) -> Result<SubmitAnswerResponse, HuntError> {
        let now = self.clock.now();
        let step_id = req.step_id;
        let submission = req.into_submission()?;

        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| HuntError::not_found("Session", session_id))?;
        let hunt = self.catalog.get(&session.hunt_id)?;

        let outcome = session
            .submit_answer(hunt, step_id, submission, now)
            .inspect_err(|err| {
                tracing::warn!("Answer rejected for session {}: {}", session_id, err)
            })?;

        if !outcome.replayed {
            let rule = hunt
                .step(outcome.step_id)
                .map(|s| s.enigma.answer.kind())
                .unwrap_or("unknown");
            let correct = if outcome.result.correct { "true" } else { "false" };
            ANSWERS_SUBMITTED_TOTAL
                .with_label_values(&[correct, rule])
                .inc();
            tracing::debug!(
                "Answer checked: session={}, step={}, correct={}",
                session_id,
                outcome.step_id,
                outcome.result.correct
            );

            if session.state == SessionState::Completed {
                HUNT_SESSIONS_TOTAL.with_label_values(&["completed"]).inc();
                HUNT_SESSIONS_ACTIVE.dec();
            }
        }

        let feedback = match (outcome.replayed, outcome.result.correct, session.state) {
            (true, _, _) => "Étape déjà validée".to_string(),
            (false, true, SessionState::Completed) => format!(
                "Félicitations ! Chasse terminée avec {} points",
                session.score
            ),
            (false, true, _) => format!(
                "Bonne réponse ! +{} points",
                outcome.result.points_awarded
            ),
            (false, false, _) => "Ce n'est pas la bonne réponse, réessayez".to_string(),
        };

        Ok(SubmitAnswerResponse {
            step_id: outcome.step_id,
            correct: outcome.result.correct,
            points_awarded: outcome.result.points_awarded,
            replayed: outcome.replayed,
            total_score: session.score,
            current_step_index: session.current_step_index,
            state: session.state,
            feedback: Some(feedback),
        })
    }

    pub async fn request_hint(&self, session_id: &str) -> Result<HintReveal, HuntError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| HuntError::not_found("Session", session_id))?;
        let hunt = self.catalog.get(&session.hunt_id)?;

        match session.request_hint(hunt) {
            Ok(reveal) => {
                HINTS_REQUESTED_TOTAL.with_label_values(&["revealed"]).inc();
                tracing::info!(
                    "Hint {} revealed: session={}, step={}",
                    reveal.hint_number,
                    session_id,
                    reveal.step_id
                );
                Ok(reveal)
            }
            Err(err) => {
                let outcome = match err {
                    HuntError::NoMoreHints { .. } => "exhausted",
                    _ => "rejected",
                };
                HINTS_REQUESTED_TOTAL.with_label_values(&[outcome]).inc();
                Err(err)
            }
        }
    }

    pub async fn verify_qr(
        &self,
        session_id: &str,
        token: &str,
    ) -> Result<QrVerification, HuntError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| HuntError::not_found("Session", session_id))?;
        let hunt = self.catalog.get(&session.hunt_id)?;

        let result = session.verify_qr(hunt, token)?;
        tracing::info!(
            "QR checked: session={}, step={}, verified={}",
            session_id,
            result.step_id,
            result.verified
        );
        Ok(result)
    }

    pub async fn abandon(&self, session_id: &str) -> Result<SessionView, HuntError> {
        let now = self.clock.now();
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| HuntError::not_found("Session", session_id))?;
        let hunt = self.catalog.get(&session.hunt_id)?;

        let was_playing = matches!(session.state, SessionState::StepActive { .. });
        session.abandon(now)?;

        HUNT_SESSIONS_TOTAL.with_label_values(&["abandoned"]).inc();
        if was_playing {
            HUNT_SESSIONS_ACTIVE.dec();
        }
        Ok(view(session, hunt))
    }

    pub async fn summary(&self, session_id: &str) -> Result<SessionSummary, HuntError> {
        let now = self.clock.now();
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(session_id)
            .ok_or_else(|| HuntError::not_found("Session", session_id))?;
        let hunt = self.catalog.get(&session.hunt_id)?;
        Ok(summarize(session, hunt, now))
    }
}

fn view(session: &HuntSession, hunt: &Hunt) -> SessionView {
    SessionView {
        session: session.clone(),
        current_step: session.current_step(hunt).map(StepView::from),
    }
}
