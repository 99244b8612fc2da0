use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::time::hhmm;

/// Start slots offered by the booking form.
pub const AVAILABLE_TIME_SLOTS: [&str; 12] = [
    "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "14:00", "14:30", "15:00", "15:30",
    "16:00", "16:30",
];

pub const MAX_GROUP_SIZE: u32 = 8;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Individual,
    Group,
}

impl ActivityType {
    /// Price in MAD: flat for individuals, per participant for groups.
    pub fn unit_price(&self) -> u32 {
        match self {
            ActivityType::Individual => 450,
            ActivityType::Group => 280,
        }
    }

    pub fn total_price(&self, party_size: u32) -> u32 {
        match self {
            ActivityType::Individual => self.unit_price(),
            ActivityType::Group => self.unit_price() * party_size,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
    Pending,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMember {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub members: Vec<TeamMember>,
    pub route_id: String,
}

fn default_duration_hours() -> u32 {
    5
}

/// Booking record handed over by the booking flow. Read, never mutated, by
/// the activation logic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reservation {
    pub id: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(default = "default_duration_hours")]
    pub duration_hours: u32,
    pub party_size: u32,
    pub activity_type: ActivityType,
    pub status: ReservationStatus,
    pub total_price: u32,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

impl Reservation {
    /// Venue-local start of the activity.
    pub fn scheduled_start(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }
}

fn default_group_size() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_party"))]
pub struct CreateReservationRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "First name must be between 1 and 100 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Last name must be between 1 and 100 characters"
    ))]
    pub last_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 30, message = "Phone number looks invalid"))]
    pub phone: String,

    pub date: NaiveDate,

    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,

    pub activity_type: ActivityType,

    #[serde(default = "default_group_size")]
    #[validate(range(min = 1, max = 8, message = "Group size must be between 1 and 8"))]
    pub group_size: u32,

    /// Group bookings only; dispatched into teams in this order.
    #[serde(default)]
    pub participants: Vec<TeamMember>,

    #[serde(default)]
    pub special_requests: Option<String>,
}

fn validate_party(req: &CreateReservationRequest) -> Result<(), ValidationError> {
    match req.activity_type {
        ActivityType::Individual if req.group_size != 1 => {
            return Err(ValidationError::new("individual_party_size")
                .with_message("Individual bookings are for exactly one person".into()));
        }
        ActivityType::Group if req.group_size < 2 => {
            return Err(ValidationError::new("group_party_size")
                .with_message("Group bookings need at least two participants".into()));
        }
        _ => {}
    }

    if req.participants.len() > req.group_size as usize {
        return Err(ValidationError::new("too_many_participants")
            .with_message("More participants than the declared group size".into()));
    }

    let slot = req.start_time.format("%H:%M").to_string();
    if !AVAILABLE_TIME_SLOTS.contains(&slot.as_str()) {
        return Err(ValidationError::new("start_time_slot")
            .with_message("Start time is not an available slot".into()));
    }

    Ok(())
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReservationQuery {
    /// Case-insensitive match on customer name, booking reference or email.
    pub search: Option<String>,
}

/// Unlock status of a reservation at a given instant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivationStatus {
    pub is_active: bool,
    pub scheduled_start: NaiveDateTime,
    /// Display only: sessions are never terminated at this time.
    pub scheduled_end: NaiveDateTime,
    pub seconds_until_start: i64,
    pub time_left: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReservationDetail {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub activation: ActivationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(activity_type: ActivityType, group_size: u32) -> CreateReservationRequest {
        CreateReservationRequest {
            first_name: "Marie".to_string(),
            last_name: "Dubois".to_string(),
            email: "marie.dubois@email.com".to_string(),
            phone: "+33 612345678".to_string(),
            date: NaiveDate::from_ymd_opt(2030, 3, 26).unwrap(),
            start_time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            activity_type,
            group_size,
            participants: Vec::new(),
            special_requests: None,
        }
    }

    #[test]
    fn group_price_is_per_participant() {
        assert_eq!(ActivityType::Group.total_price(6), 1680);
        assert_eq!(ActivityType::Individual.total_price(1), 450);
    }

    #[test]
    fn valid_requests_pass() {
        assert!(request(ActivityType::Individual, 1).validate().is_ok());
        assert!(request(ActivityType::Group, 4).validate().is_ok());
    }

    #[test]
    fn party_size_must_match_activity_type() {
        assert!(request(ActivityType::Individual, 3).validate().is_err());
        assert!(request(ActivityType::Group, 1).validate().is_err());
        assert!(request(ActivityType::Group, 9).validate().is_err());
    }

    #[test]
    fn start_time_must_be_a_bookable_slot() {
        let mut req = request(ActivityType::Individual, 1);
        req.start_time = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn start_time_round_trips_as_hh_mm() {
        let json = serde_json::json!({
            "id": "MAR1",
            "customer_name": "Marie Dubois",
            "email": "marie@email.com",
            "phone": "+33 6",
            "date": "2024-03-26",
            "start_time": "14:30",
            "party_size": 1,
            "activity_type": "individual",
            "status": "pending",
            "total_price": 450
        });
        let reservation: Reservation = serde_json::from_value(json).unwrap();
        assert_eq!(reservation.duration_hours, 5);
        assert_eq!(
            reservation.scheduled_start(),
            NaiveDate::from_ymd_opt(2024, 3, 26)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap()
        );
        let back = serde_json::to_value(&reservation).unwrap();
        assert_eq!(back["start_time"], "14:30");
    }
}
