use chrono::{Duration, NaiveDateTime};

use crate::models::reservation::{ActivationStatus, Reservation};
use crate::utils::time::format_countdown;

/// A reservation unlocks at its venue-local start, inclusive.
pub fn is_unlocked(reservation: &Reservation, now: NaiveDateTime) -> bool {
    now >= reservation.scheduled_start()
}

/// End of the booked window. Shown to the user; nothing is enforced at it.
/// Clamps to the latest representable instant instead of overflowing.
pub fn scheduled_end(reservation: &Reservation) -> NaiveDateTime {
    reservation
        .scheduled_start()
        .checked_add_signed(Duration::hours(i64::from(reservation.duration_hours)))
        .unwrap_or(NaiveDateTime::MAX)
}

pub fn activation_status(reservation: &Reservation, now: NaiveDateTime) -> ActivationStatus {
    let start = reservation.scheduled_start();
    let seconds_until_start = (start - now).num_seconds().max(0);

    ActivationStatus {
        is_active: is_unlocked(reservation, now),
        scheduled_start: start,
        scheduled_end: scheduled_end(reservation),
        seconds_until_start,
        time_left: format_countdown(seconds_until_start),
    }
}
