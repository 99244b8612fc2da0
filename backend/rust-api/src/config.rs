use serde::Deserialize;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_addr: String,
    /// JSON hunt catalog; the builtin Marrakech catalog is used when unset.
    pub catalog_path: Option<String>,
    pub venue_utc_offset_minutes: i32,
    pub hunt_duration_hours: u32,
    pub team_size: usize,
    pub seed_mock_reservations: bool,
    /// `user:password` expected on `/metrics`.
    pub metrics_auth: String,
    pub countdown_tick_ms: u64,
    /// How long completed or abandoned sessions stay readable.
    pub session_retention_minutes: u32,
    pub session_sweep_interval_secs: u64,
}

/// Longest bookable window.
pub const MAX_HUNT_DURATION_HOURS: u32 = 24;
/// One week.
pub const MAX_SESSION_RETENTION_MINUTES: u32 = 7 * 24 * 60;

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8081".to_string(),
            catalog_path: None,
            venue_utc_offset_minutes: 60,
            hunt_duration_hours: 5,
            team_size: 3,
            seed_mock_reservations: true,
            metrics_auth: "admin:changeme".to_string(),
            countdown_tick_ms: 1000,
            session_retention_minutes: 120,
            session_sweep_interval_secs: 300,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Root .env first, local .env as fallback
        let skip_root_env = env::var("SKIP_ROOT_ENV").is_ok();
        if skip_root_env {
            dotenvy::dotenv().ok();
        } else if dotenvy::from_path("../../.env").is_err() {
            dotenvy::dotenv().ok();
        }

        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // config/*.toml, then APP__SECTION__KEY overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let defaults = Config::default();
        let lookup = |key: &str, var: &str| -> Option<String> {
            settings.get_string(key).ok().or_else(|| env::var(var).ok())
        };

        let bind_addr = lookup("server.bind_addr", "BIND_ADDR").unwrap_or(defaults.bind_addr);

        let catalog_path = lookup("catalog.path", "CATALOG_PATH").filter(|p| !p.trim().is_empty());

        let venue_utc_offset_minutes = parse_or(
            lookup("venue.utc_offset_minutes", "VENUE_UTC_OFFSET_MINUTES"),
            defaults.venue_utc_offset_minutes,
        )?;

        let hunt_duration_hours = parse_or(
            lookup("venue.hunt_duration_hours", "HUNT_DURATION_HOURS"),
            defaults.hunt_duration_hours,
        )?;
        if !(1..=MAX_HUNT_DURATION_HOURS).contains(&hunt_duration_hours) {
            return Err(config::ConfigError::Message(format!(
                "HUNT_DURATION_HOURS must be between 1 and {}",
                MAX_HUNT_DURATION_HOURS
            )));
        }

        let team_size = parse_or(lookup("booking.team_size", "TEAM_SIZE"), defaults.team_size)?;
        if team_size == 0 {
            return Err(config::ConfigError::Message(
                "TEAM_SIZE must be at least 1".to_string(),
            ));
        }

        let seed_mock_reservations = parse_or(
            lookup("booking.seed_mock_reservations", "SEED_MOCK_RESERVATIONS"),
            defaults.seed_mock_reservations,
        )?;

        let metrics_auth = lookup("metrics.auth", "METRICS_AUTH").unwrap_or_else(|| {
            if env == "prod" {
                tracing::warn!("METRICS_AUTH not set in production, using default credentials");
            }
            defaults.metrics_auth
        });

        let countdown_tick_ms = parse_or(
            lookup("sse.countdown_tick_ms", "COUNTDOWN_TICK_MS"),
            defaults.countdown_tick_ms,
        )?
        .max(50);

        let session_retention_minutes = parse_or(
            lookup("sessions.retention_minutes", "SESSION_RETENTION_MINUTES"),
            defaults.session_retention_minutes,
        )?;
        if session_retention_minutes > MAX_SESSION_RETENTION_MINUTES {
            return Err(config::ConfigError::Message(format!(
                "SESSION_RETENTION_MINUTES must be at most {}",
                MAX_SESSION_RETENTION_MINUTES
            )));
        }

        let session_sweep_interval_secs = parse_or(
            lookup("sessions.sweep_interval_secs", "SESSION_SWEEP_INTERVAL_SECS"),
            defaults.session_sweep_interval_secs,
        )?
        .max(1);

        Ok(Config {
            bind_addr,
            catalog_path,
            venue_utc_offset_minutes,
            hunt_duration_hours,
            team_size,
            seed_mock_reservations,
            metrics_auth,
            countdown_tick_ms,
            session_retention_minutes,
            session_sweep_interval_secs,
        })
    }
}

fn parse_or<T>(raw: Option<String>, default: T) -> Result<T, config::ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| config::ConfigError::Message(format!("'{}': {}", value, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_venue() {
        let config = Config::default();
        assert_eq!(config.venue_utc_offset_minutes, 60);
        assert_eq!(config.hunt_duration_hours, 5);
        assert_eq!(config.team_size, 3);
        assert!(config.catalog_path.is_none());
        assert_eq!(config.session_retention_minutes, 120);
    }

    #[test]
    fn parse_or_falls_back_and_reports_garbage() {
        assert_eq!(parse_or::<i32>(None, 60).unwrap(), 60);
        assert_eq!(parse_or::<i32>(Some(" 120 ".into()), 60).unwrap(), 120);
        assert!(parse_or::<u32>(Some("soon".into()), 5).is_err());
        assert!(!parse_or::<bool>(Some("false".into()), true).unwrap());
    }
}
