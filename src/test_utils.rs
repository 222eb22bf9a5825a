//! In-memory provider used by unit tests of the gateway and the cache.

use crate::domain::model::{Driver, LapTiming, Race, SessionKey};
use crate::domain::ports::MotorsportDataProvider;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct FakeProvider {
    pub schedules: HashMap<i32, Vec<Race>>,
    pub drivers: HashMap<SessionKey, Vec<Driver>>,
    pub laps: HashMap<(SessionKey, String), Vec<LapTiming>>,
    /// Artificial latency per call, to make concurrent misses overlap.
    pub delay: Option<Duration>,
    /// Every call fails with an upstream error while set.
    pub fail_with: Option<String>,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A 2021 season with a single round, two drivers and a few laps each.
    pub fn season_2021() -> Self {
        let mut provider = Self::new();
        let bahrain = SessionKey::new(2021, 1);

        provider.schedules.insert(
            2021,
            vec![
                race(1, "Bahrain Grand Prix", 2021, 3, 28),
                race(2, "Emilia Romagna Grand Prix", 2021, 4, 18),
            ],
        );
        provider.drivers.insert(
            bahrain,
            vec![
                driver("VER", "Max Verstappen", "Red Bull"),
                driver("HAM", "Lewis Hamilton", "Mercedes"),
            ],
        );
        provider.laps.insert(
            (bahrain, "HAM".to_string()),
            vec![
                timing(1, Some(99.458)),
                timing(2, Some(96.010)),
                timing(3, None),
                timing(4, Some(95.120)),
            ],
        );
        provider.laps.insert(
            (bahrain, "VER".to_string()),
            vec![timing(1, Some(98.112)), timing(2, Some(95.871))],
        );
        provider
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.fail_with {
            Some(message) => Err(GatewayError::upstream(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MotorsportDataProvider for FakeProvider {
    async fn event_schedule(&self, year: i32) -> Result<Vec<Race>> {
        self.enter().await?;
        self.schedules
            .get(&year)
            .cloned()
            .ok_or_else(|| GatewayError::not_found(format!("no schedule for season {}", year)))
    }

    async fn session_drivers(&self, session: SessionKey) -> Result<Vec<Driver>> {
        self.enter().await?;
        self.drivers
            .get(&session)
            .cloned()
            .ok_or_else(|| GatewayError::not_found(format!("no race found for {}", session)))
    }

    async fn driver_laps(&self, session: SessionKey, code: &str) -> Result<Vec<LapTiming>> {
        self.enter().await?;
        self.laps
            .get(&(session, code.to_ascii_uppercase()))
            .cloned()
            .ok_or_else(|| {
                GatewayError::not_found(format!("driver {} did not take part in {}", code, session))
            })
    }

    fn name(&self) -> &str {
        "fake"
    }
}

pub fn race(round: u32, name: &str, year: i32, month: u32, day: u32) -> Race {
    Race {
        round,
        name: name.to_string(),
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
    }
}

pub fn driver(code: &str, name: &str, team: &str) -> Driver {
    Driver {
        code: code.to_string(),
        name: name.to_string(),
        team: team.to_string(),
    }
}

pub fn timing(lap: u32, time: Option<f64>) -> LapTiming {
    LapTiming { lap, time }
}
