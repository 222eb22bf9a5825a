pub mod cache;
pub mod gateway;

pub use crate::domain::model::{
    Driver, DriverLaps, LapComparison, LapRecord, LapTiming, Race, SessionKey,
};
pub use crate::domain::ports::MotorsportDataProvider;
pub use crate::utils::error::Result;
