use chrono::{DateTime, FixedOffset};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::models::reservation::Reservation;
use crate::models::HuntSession;
use crate::utils::time::venue_offset;

use self::catalog::HuntCatalog;
use self::clock::{Clock, SystemClock};

pub type SessionStore = Arc<RwLock<HashMap<String, HuntSession>>>;
pub type ReservationStore = Arc<RwLock<BTreeMap<String, Reservation>>>;

pub struct AppState {
    pub config: Config,
    pub catalog: Arc<HuntCatalog>,
    pub sessions: SessionStore,
    pub reservations: ReservationStore,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                tracing::info!("Loading hunt catalog from {}", path);
                HuntCatalog::from_json_file(path)?
            }
            None => HuntCatalog::builtin()?,
        };
        tracing::info!("Hunt catalog ready with {} hunt(s)", catalog.len());

        let reservations: BTreeMap<String, Reservation> = if config.seed_mock_reservations {
            seeds::mock_reservations()
                .into_iter()
                .map(|r| (r.id.clone(), r))
                .collect()
        } else {
            BTreeMap::new()
        };
        tracing::info!("Reservation book seeded with {} entries", reservations.len());

        Ok(Self {
            config,
            catalog: Arc::new(catalog),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            reservations: Arc::new(RwLock::new(reservations)),
            clock,
        })
    }

    pub fn venue_offset(&self) -> FixedOffset {
        venue_offset(self.config.venue_utc_offset_minutes)
    }

    /// One sample of the clock, expressed at the venue.
    pub fn venue_now(&self) -> DateTime<FixedOffset> {
        self.clock.now().with_timezone(&self.venue_offset())
    }
}

pub mod answer_service;
pub mod catalog;
pub mod clock;
pub mod normalizer;
pub mod progression;
pub mod reporting_service;
pub mod reservation_service;
pub mod scheduler;
pub mod seeds;
pub mod session_service;
pub mod session_sweeper;
pub mod teams;
