use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CountdownEvent {
    CountdownTick(CountdownTick),
    Unlocked(Unlocked),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CountdownTick {
    pub reservation_id: String,
    pub seconds_until_start: i64,
    pub time_left: String,
    pub local_time: NaiveDateTime,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Unlocked {
    pub reservation_id: String,
    pub scheduled_end: NaiveDateTime,
    pub message: String,
}

impl CountdownEvent {
    pub fn to_sse_data(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            CountdownEvent::CountdownTick(_) => "countdown-tick",
            CountdownEvent::Unlocked(_) => "unlocked",
        }
    }
}
