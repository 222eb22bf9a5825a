use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One event of a season schedule. `date` serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub round: u32,
    pub name: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub code: String,
    pub name: String,
    pub team: String,
}

/// A completed lap with a recorded time, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LapRecord {
    pub lap: u32,
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverLaps {
    pub code: String,
    pub times: Vec<LapRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapComparison {
    pub driver1: DriverLaps,
    pub driver2: DriverLaps,
}

/// Identifies the race session of a given round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub year: i32,
    pub round: u32,
}

impl SessionKey {
    pub fn new(year: i32, round: u32) -> Self {
        Self { year, round }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} round {}", self.year, self.round)
    }
}

/// Raw per-lap timing as the provider reports it; `time` is absent for
/// laps without a recorded time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LapTiming {
    pub lap: u32,
    pub time: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_race_date_serializes_as_iso_date() {
        let race = Race {
            round: 1,
            name: "Bahrain Grand Prix".to_string(),
            date: NaiveDate::from_ymd_opt(2021, 3, 28).unwrap(),
        };

        let json = serde_json::to_value(&race).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"round": 1, "name": "Bahrain Grand Prix", "date": "2021-03-28"})
        );
    }

    #[test]
    fn test_session_key_display() {
        assert_eq!(SessionKey::new(2021, 1).to_string(), "2021 round 1");
    }
}
