use crate::domain::model::{Driver, LapTiming, Race, SessionKey};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of schedule, entry list and timing data. The gateway treats the
/// answers as authoritative.
#[async_trait]
pub trait MotorsportDataProvider: Send + Sync {
    /// Events of a season, in round order.
    async fn event_schedule(&self, year: i32) -> Result<Vec<Race>>;

    /// Drivers classified in the race session.
    async fn session_drivers(&self, session: SessionKey) -> Result<Vec<Driver>>;

    /// Lap timings of one driver in the race session, identified by driver code.
    async fn driver_laps(&self, session: SessionKey, code: &str) -> Result<Vec<LapTiming>>;

    /// Lap timings of two drivers in the same session. Providers that can
    /// share lookups between the two drivers override this.
    async fn paired_driver_laps(
        &self,
        session: SessionKey,
        code1: &str,
        code2: &str,
    ) -> Result<(Vec<LapTiming>, Vec<LapTiming>)> {
        tokio::try_join!(
            self.driver_laps(session, code1),
            self.driver_laps(session, code2),
        )
    }

    fn name(&self) -> &str;
}
