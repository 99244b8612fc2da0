use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
};
use futures::stream::{self, Stream};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::{
    metrics::{GaugeGuard, COUNTDOWN_STREAMS_ACTIVE},
    models::reservation::Reservation,
    models::timer::{CountdownEvent, CountdownTick, Unlocked},
    services::{reservation_service::ReservationService, scheduler, AppState},
};

/// Countdown until a reservation unlocks.
/// GET /api/v1/reservations/{id}/countdown
pub async fn countdown_stream(
    State(state): State<Arc<AppState>>,
    Path(reservation_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let reservation = ReservationService::new(&state)
        .get(&reservation_id)
        .await?;

    let tick_interval = state.config.countdown_tick_ms;
    tracing::info!(
        "Client connected to countdown stream: reservation={}, tick_interval={}ms",
        reservation_id,
        tick_interval
    );

    let stream = create_countdown_stream(state, reservation, tick_interval);
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// Emits one tick per interval, then a single `unlocked` event and ends.
/// The clock is sampled once per emitted event.
fn create_countdown_stream(
    state: Arc<AppState>,
    reservation: Reservation,
    tick_interval_ms: u64,
) -> impl Stream<Item = Result<Event, Infallible>> {
    let guard = GaugeGuard::inc(&COUNTDOWN_STREAMS_ACTIVE);

    stream::unfold(
        (state, reservation, guard, false, false),
        move |(state, reservation, guard, waited, done)| async move {
            if done {
                return None;
            }
            if waited {
                sleep(Duration::from_millis(tick_interval_ms)).await;
            }

            let now = state.venue_now().naive_local();
            let status = scheduler::activation_status(&reservation, now);

            let (payload, finished) = if status.is_active {
                tracing::info!("Countdown finished: reservation={}", reservation.id);
                (
                    CountdownEvent::Unlocked(Unlocked {
                        reservation_id: reservation.id.clone(),
                        scheduled_end: status.scheduled_end,
                        message: "La chasse au trésor est déverrouillée".to_string(),
                    }),
                    true,
                )
            } else {
                (
                    CountdownEvent::CountdownTick(CountdownTick {
                        reservation_id: reservation.id.clone(),
                        seconds_until_start: status.seconds_until_start,
                        time_left: status.time_left,
                        local_time: now,
                    }),
                    false,
                )
            };

            let event = Event::default()
                .event(payload.event_name())
                .data(payload.to_sse_data());

            Some((Ok(event), (state, reservation, guard, true, finished)))
        },
    )
}
