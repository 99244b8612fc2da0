use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};

/// Fixed offset of the venue; falls back to UTC for out-of-range values.
pub fn venue_offset(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or_else(|| {
        tracing::warn!("Invalid venue offset {} min, using UTC", minutes);
        Utc.fix()
    })
}

/// Wall-clock instant expressed as the venue's local date and time.
pub fn to_venue_local(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDateTime {
    now.with_timezone(&offset).naive_local()
}

/// Countdown label shown before activation, e.g. `2j 3h 15min`.
///
/// Zero units are omitted; an elapsed countdown renders as an empty string.
pub fn format_countdown(seconds: i64) -> String {
    if seconds <= 0 {
        return String::new();
    }

    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}j", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}min", minutes));
    }
    parts.join(" ")
}

/// `HH:MM` (de)serialization for booking start times.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}
