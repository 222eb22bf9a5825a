use crate::core::{Driver, DriverLaps, LapComparison, LapRecord, LapTiming, Race, SessionKey};
use crate::domain::ports::MotorsportDataProvider;
use crate::utils::error::{GatewayError, Result};
use crate::utils::validation::{validate_driver_code, validate_round};
use std::ops::Range;
use std::sync::Arc;

/// Read-only operations behind the HTTP routes. Each call is independent of
/// every other call; all shared state lives in the provider.
pub struct Gateway {
    provider: Arc<dyn MotorsportDataProvider>,
    seasons: Range<i32>,
}

impl Gateway {
    /// `seasons` is half-open: `2018..2024` serves 2018 through 2023.
    pub fn new(provider: Arc<dyn MotorsportDataProvider>, seasons: Range<i32>) -> Self {
        Self { provider, seasons }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn list_supported_years(&self) -> Result<Vec<i32>> {
        if self.seasons.is_empty() {
            let err = GatewayError::internal(format!(
                "supported season range {}..{} is empty",
                self.seasons.start, self.seasons.end
            ));
            tracing::error!(operation = "list_supported_years", "Error fetching years: {}", err);
            return Err(err);
        }
        Ok(self.seasons.clone().collect())
    }

    pub async fn list_races(&self, year: i32) -> Result<Vec<Race>> {
        tracing::debug!(operation = "list_races", year, "Fetching event schedule");

        let races = self
            .provider
            .event_schedule(year)
            .await
            .inspect_err(|e| {
                tracing::error!(operation = "list_races", year, "Error fetching races for year {}: {}", year, e)
            })?;

        tracing::debug!(operation = "list_races", year, count = races.len(), "Schedule loaded");
        Ok(races)
    }

    pub async fn list_drivers(&self, year: i32, round: u32) -> Result<Vec<Driver>> {
        let session = SessionKey::new(year, round);

        let drivers = async {
            validate_round(round)?;
            self.provider.session_drivers(session).await
        }
        .await
        .inspect_err(|e| {
            tracing::error!(
                operation = "list_drivers",
                year,
                round,
                "Error fetching drivers for year {} round {}: {}",
                year,
                round,
                e
            )
        })?;

        tracing::debug!(operation = "list_drivers", %session, count = drivers.len(), "Drivers loaded");
        Ok(drivers)
    }

    /// Both drivers are fetched concurrently; a failure on either side fails
    /// the whole comparison.
    pub async fn compare_lap_times(
        &self,
        year: i32,
        round: u32,
        driver1: &str,
        driver2: &str,
    ) -> Result<LapComparison> {
        let session = SessionKey::new(year, round);

        let result = async {
            validate_round(round)?;
            validate_driver_code("driver1", driver1)?;
            validate_driver_code("driver2", driver2)?;

            let (laps1, laps2) = self
                .provider
                .paired_driver_laps(session, driver1, driver2)
                .await?;

            Ok::<_, GatewayError>(LapComparison {
                driver1: DriverLaps {
                    code: driver1.to_string(),
                    times: timed_laps(laps1),
                },
                driver2: DriverLaps {
                    code: driver2.to_string(),
                    times: timed_laps(laps2),
                },
            })
        }
        .await;

        match &result {
            Ok(comparison) => tracing::debug!(
                operation = "compare_lap_times",
                %session,
                driver1,
                driver2,
                laps1 = comparison.driver1.times.len(),
                laps2 = comparison.driver2.times.len(),
                "Lap times loaded"
            ),
            Err(e) => tracing::error!(
                operation = "compare_lap_times",
                %session,
                driver1,
                driver2,
                "Error fetching lap times: {}",
                e
            ),
        }
        result
    }
}

/// Keeps laps with a positive, finite time, ordered by lap number with one
/// record per lap.
pub fn timed_laps(timings: Vec<LapTiming>) -> Vec<LapRecord> {
    let mut records: Vec<LapRecord> = timings
        .into_iter()
        .filter(|t| t.lap >= 1)
        .filter_map(|t| match t.time {
            Some(time) if time.is_finite() && time > 0.0 => Some(LapRecord { lap: t.lap, time }),
            _ => None,
        })
        .collect();

    records.sort_by_key(|r| r.lap);
    records.dedup_by_key(|r| r.lap);
    records
}
