use std::{sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{debug, info};

use super::{session_service::SessionService, AppState};

/// Background loop removing finished sessions once their retention lapses.
pub struct SessionSweeper {
    state: Arc<AppState>,
}

impl SessionSweeper {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn run(&self) {
        let interval = Duration::from_secs(self.state.config.session_sweep_interval_secs);
        info!(
            "Starting session sweeper (interval {}s, retention {} min)",
            interval.as_secs(),
            self.state.config.session_retention_minutes
        );

        loop {
            sleep(interval).await;
            let purged = self.run_once().await;
            debug!("Session sweep removed {} session(s)", purged);
        }
    }

    pub async fn run_once(&self) -> usize {
        SessionService::new(&self.state).purge_expired().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::CreateSessionRequest;
    use crate::services::clock::FixedClock;
    use crate::services::seeds::MEDINA_HUNT_ID;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn sweep_uses_configured_retention() {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 3, 25, 9, 0, 0).unwrap(),
        ));
        let config = Config {
            session_retention_minutes: 0,
            ..Config::default()
        };
        let state = Arc::new(AppState::with_clock(config, clock.clone()).unwrap());
        let service = SessionService::new(&state);

        let created = service
            .create_session(CreateSessionRequest {
                hunt_id: MEDINA_HUNT_ID.to_string(),
                reservation_id: "MAR1703847234".to_string(),
            })
            .await
            .unwrap();
        service.abandon(&created.session_id).await.unwrap();

        let sweeper = SessionSweeper::new(state.clone());
        assert_eq!(sweeper.run_once().await, 1);
        assert!(state.sessions.read().await.is_empty());
    }
}
