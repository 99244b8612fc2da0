use chrono::FixedOffset;
use std::sync::Arc;
use validator::Validate;

use crate::error::HuntError;
use crate::metrics::RESERVATIONS_CREATED_TOTAL;
use crate::models::reservation::{
    ActivityType, CreateReservationRequest, Reservation, ReservationDetail, ReservationStatus,
};
use crate::utils::time::to_venue_local;

use super::clock::Clock;
use super::scheduler::activation_status;
use super::teams::dispatch_teams;
use super::{AppState, ReservationStore};

/// Booking records handed over by the booking flow.
pub struct ReservationService {
    reservations: ReservationStore,
    clock: Arc<dyn Clock>,
    venue_offset: FixedOffset,
    duration_hours: u32,
    team_size: usize,
}

impl ReservationService {
    pub fn new(state: &AppState) -> Self {
        Self {
            reservations: state.reservations.clone(),
            clock: state.clock.clone(),
            venue_offset: state.venue_offset(),
            duration_hours: state.config.hunt_duration_hours,
            team_size: state.config.team_size,
        }
    }

    /// Case-insensitive match on customer name, booking reference or email.
    /// A blank term returns everything.
    pub async fn search(&self, term: Option<&str>) -> Vec<Reservation> {
        let term = term.map(|t| t.trim().to_lowercase()).unwrap_or_default();
        self.reservations
            .read()
            .await
            .values()
            .filter(|r| {
                term.is_empty()
                    || r.customer_name.to_lowercase().contains(&term)
                    || r.id.to_lowercase().contains(&term)
                    || r.email.to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    }

    pub async fn get(&self, reservation_id: &str) -> Result<Reservation, HuntError> {
        self.reservations
            .read()
            .await
            .get(reservation_id)
            .cloned()
            .ok_or_else(|| HuntError::not_found("Reservation", reservation_id))
    }

    /// Reservation plus its unlock status at the current venue time.
    pub async fn detail(&self, reservation_id: &str) -> Result<ReservationDetail, HuntError> {
        let reservation = self.get(reservation_id).await?;
        let now = to_venue_local(self.clock.now(), self.venue_offset);
        let activation = activation_status(&reservation, now);
        Ok(ReservationDetail {
            reservation,
            activation,
        })
    }

    pub async fn create(&self, req: CreateReservationRequest) -> Result<Reservation, HuntError> {
        req.validate()?;

        let now = self.clock.now();
        let today = to_venue_local(now, self.venue_offset).date();
        if req.date < today {
            return Err(HuntError::Validation(format!(
                "date {} is in the past",
                req.date
            )));
        }

        let party_size = match req.activity_type {
            ActivityType::Individual => 1,
            ActivityType::Group => req.group_size,
        };
        let teams = match req.activity_type {
            ActivityType::Group if !req.participants.is_empty() => {
                dispatch_teams(&req.participants, party_size, self.team_size)
            }
            _ => Vec::new(),
        };

        let mut reservations = self.reservations.write().await;

        let mut millis = now.timestamp_millis();
        let mut id = format!("MAR{}", millis);
        while reservations.contains_key(&id) {
            millis += 1;
            id = format!("MAR{}", millis);
        }

        let reservation = Reservation {
            id: id.clone(),
            customer_name: format!("{} {}", req.first_name.trim(), req.last_name.trim()),
            email: req.email.trim().to_string(),
            phone: req.phone.trim().to_string(),
            date: req.date,
            start_time: req.start_time,
            duration_hours: self.duration_hours,
            party_size,
            activity_type: req.activity_type,
            status: ReservationStatus::Confirmed,
            total_price: req.activity_type.total_price(party_size),
            teams,
            special_requests: req
                .special_requests
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        };
        reservations.insert(id.clone(), reservation.clone());

        let activity = match reservation.activity_type {
            ActivityType::Individual => "individual",
            ActivityType::Group => "group",
        };
        RESERVATIONS_CREATED_TOTAL
            .with_label_values(&[activity])
            .inc();
        tracing::info!(
            "Reservation created: id={}, type={}, party={}, price={} MAD",
            id,
            activity,
            party_size,
            reservation.total_price
        );

        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::reservation::TeamMember;
    use crate::services::clock::FixedClock;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

    fn state() -> AppState {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap(),
        ));
        AppState::with_clock(Config::default(), clock).unwrap()
    }

    fn group_request(size: u32, participants: Vec<TeamMember>) -> CreateReservationRequest {
        CreateReservationRequest {
            first_name: " Ahmed".to_string(),
            last_name: "Benali ".to_string(),
            email: "ahmed.benali@email.com".to_string(),
            phone: "+212 600000000".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 28).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            activity_type: ActivityType::Group,
            group_size: size,
            participants,
            special_requests: Some("  ".to_string()),
        }
    }

    #[tokio::test]
    async fn search_matches_name_id_and_email() {
        let state = state();
        let service = ReservationService::new(&state);

        assert_eq!(service.search(None).await.len(), 3);
        assert_eq!(service.search(Some("marie")).await.len(), 1);
        assert_eq!(service.search(Some("MAR1703847236")).await[0].customer_name, "Hassan Alaoui");
        assert_eq!(service.search(Some("ALAOUI@")).await.len(), 1);
        assert!(service.search(Some("nobody")).await.is_empty());
    }

    #[tokio::test]
    async fn create_prices_and_dispatches_teams() {
        let state = state();
        let service = ReservationService::new(&state);
        let participants = (1..=4)
            .map(|i| TeamMember {
                name: format!("P{}", i),
                email: format!("p{}@email.com", i),
            })
            .collect();

        let created = service.create(group_request(4, participants)).await.unwrap();
        assert!(created.id.starts_with("MAR"));
        assert_eq!(created.customer_name, "Ahmed Benali");
        assert_eq!(created.total_price, 1120);
        assert_eq!(created.teams.len(), 2);
        assert_eq!(created.status, ReservationStatus::Confirmed);
        assert!(created.special_requests.is_none());
        assert_eq!(service.get(&created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn same_millisecond_bookings_get_distinct_ids() {
        let state = state();
        let service = ReservationService::new(&state);
        let a = service.create(group_request(2, Vec::new())).await.unwrap();
        let b = service.create(group_request(2, Vec::new())).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn past_dates_are_rejected() {
        let state = state();
        let service = ReservationService::new(&state);
        let mut req = group_request(2, Vec::new());
        req.date = NaiveDate::from_ymd_opt(2024, 3, 19).unwrap();
        assert!(matches!(
            service.create(req).await,
            Err(HuntError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn detail_reports_countdown() {
        let state = state();
        let service = ReservationService::new(&state);
        // Venue time is 2024-03-20 13:00; start is 2024-03-25 09:00.
        let detail = service.detail("MAR1703847234").await.unwrap();
        assert!(!detail.activation.is_active);
        assert_eq!(detail.activation.time_left, "4j 20h");
    }
}
