//! Provider backed by the Ergast-compatible F1 REST API (served today by Jolpica).
//!
//! Every resource lives under `{base}/{path}.json` and answers with an
//! `MRData` envelope whose numeric fields are encoded as strings. Lap data is
//! paginated by timing rows, so laps are fetched page by page until `total`
//! is reached.

use crate::config::toml_config::ProviderConfig;
use crate::core::{Driver, LapTiming, Race, SessionKey};
use crate::domain::ports::MotorsportDataProvider;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// Upper bound on lap pages per driver. Running out of pages before `total`
/// is reached is an error, never a truncated lap list.
const MAX_LAP_PAGES: u32 = 20;
const BODY_SNIPPET_LEN: usize = 200;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(rename = "MRData")]
    mr_data: MrData<T>,
}

#[derive(Debug, Deserialize)]
struct MrData<T> {
    #[serde(deserialize_with = "number_from_string")]
    limit: u32,
    #[serde(deserialize_with = "number_from_string")]
    offset: u32,
    #[serde(deserialize_with = "number_from_string")]
    total: u32,
    #[serde(rename = "RaceTable")]
    race_table: RaceTable<T>,
}

#[derive(Debug, Deserialize)]
struct RaceTable<T> {
    #[serde(rename = "Races", default = "Vec::new")]
    races: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleRace {
    #[serde(deserialize_with = "number_from_string")]
    round: u32,
    race_name: String,
    date: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct ResultsRace {
    #[serde(rename = "Results", default)]
    results: Vec<RaceResult>,
}

#[derive(Debug, Deserialize)]
struct RaceResult {
    #[serde(rename = "Driver")]
    driver: ErgastDriver,
    #[serde(rename = "Constructor")]
    constructor: Constructor,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErgastDriver {
    driver_id: String,
    code: Option<String>,
    given_name: String,
    family_name: String,
}

impl ErgastDriver {
    /// Seasons before 2014 sometimes lack the three-letter code.
    fn code(&self) -> String {
        self.code
            .clone()
            .unwrap_or_else(|| self.driver_id.to_ascii_uppercase())
    }
}

#[derive(Debug, Deserialize)]
struct Constructor {
    name: String,
}

#[derive(Debug, Deserialize)]
struct LapsRace {
    #[serde(rename = "Laps", default)]
    laps: Vec<ErgastLap>,
}

#[derive(Debug, Deserialize)]
struct ErgastLap {
    #[serde(deserialize_with = "number_from_string")]
    number: u32,
    #[serde(rename = "Timings", default)]
    timings: Vec<Timing>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Timing {
    driver_id: String,
    time: Option<String>,
}

fn number_from_string<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber<T> {
        String(String),
        Number(T),
    }

    match StringOrNumber::<T>::deserialize(deserializer)? {
        StringOrNumber::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
        StringOrNumber::Number(n) => Ok(n),
    }
}

/// Parses `"1:32.123"`, `"92.123"` or `"1:02:03.456"` into seconds.
pub fn parse_lap_time(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() > 3 {
        return None;
    }

    let (last, leading) = parts.split_last()?;
    let mut whole = 0.0;
    for part in leading {
        whole = whole * 60.0 + f64::from(part.parse::<u32>().ok()?);
    }

    let tail: f64 = last.parse().ok()?;
    if !leading.is_empty() && !(0.0..60.0).contains(&tail) {
        return None;
    }

    let total = whole * 60.0 + tail;
    total.is_finite().then_some(total)
}

pub struct ErgastProvider {
    client: Client,
    base_url: String,
    page_size: u32,
}

impl ErgastProvider {
    pub fn new(client: Client, base_url: &str, page_size: u32) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size,
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self::new(client, &config.base_url, config.page_size))
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str, offset: u32) -> Result<MrData<T>> {
        let url = format!("{}/{}.json", self.base_url, path);
        tracing::debug!("Making API request to: {} (offset {})", url, offset);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", self.page_size), ("offset", offset)])
            .send()
            .await
            .map_err(|e| request_error(&url, e))?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.text().await.map_err(|e| request_error(&url, e))?;
        if !status.is_success() {
            let snippet: String = body.chars().take(BODY_SNIPPET_LEN).collect();
            return Err(GatewayError::upstream(format!(
                "{} returned HTTP {}: {}",
                url,
                status,
                snippet.trim()
            )));
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            GatewayError::upstream(format!("malformed response from {}: {}", url, e))
        })?;
        Ok(envelope.mr_data)
    }

    async fn session_results(&self, session: SessionKey) -> Result<Vec<RaceResult>> {
        let path = format!("{}/{}/results", session.year, session.round);
        let data = self.fetch::<ResultsRace>(&path, 0).await?;

        data.race_table
            .races
            .into_iter()
            .next()
            .map(|race| race.results)
            .filter(|results| !results.is_empty())
            .ok_or_else(|| GatewayError::not_found(format!("no race results found for {}", session)))
    }

    async fn laps_by_driver_id(
        &self,
        session: SessionKey,
        code: &str,
        driver_id: &str,
    ) -> Result<Vec<LapTiming>> {
        let path = format!("{}/{}/drivers/{}/laps", session.year, session.round, driver_id);
        let mut timings = Vec::new();
        let mut offset = 0;
        let mut pages = 0;

        loop {
            let page = self.fetch::<LapsRace>(&path, offset).await?;
            pages += 1;

            for race in page.race_table.races {
                for lap in race.laps {
                    timings.extend(
                        lap.timings
                            .iter()
                            .filter(|timing| timing.driver_id == driver_id)
                            .map(|timing| LapTiming {
                                lap: lap.number,
                                time: timing.time.as_deref().and_then(parse_lap_time),
                            }),
                    );
                }
            }

            offset = page.offset + page.limit;
            if offset >= page.total {
                break;
            }
            if page.limit == 0 || pages >= MAX_LAP_PAGES {
                return Err(GatewayError::upstream(format!(
                    "lap data for {} in {} stopped at row {} of {} after {} pages",
                    code, session, offset, page.total, pages
                )));
            }
        }

        tracing::debug!(%session, driver = code, %driver_id, laps = timings.len(), pages, "Lap timings fetched");
        Ok(timings)
    }
}

fn request_error(url: &str, e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout {
            message: format!("{} did not answer in time", url),
        }
    } else {
        GatewayError::Http(e)
    }
}

/// Maps a driver code (case-insensitive) to the provider's driver id.
fn resolve_driver_id(results: &[RaceResult], session: SessionKey, code: &str) -> Result<String> {
    results
        .iter()
        .find(|result| result.driver.code().eq_ignore_ascii_case(code))
        .map(|result| result.driver.driver_id.clone())
        .ok_or_else(|| {
            GatewayError::not_found(format!("driver {} did not take part in {}", code, session))
        })
}

#[async_trait]
impl MotorsportDataProvider for ErgastProvider {
    async fn event_schedule(&self, year: i32) -> Result<Vec<Race>> {
        let data = self.fetch::<ScheduleRace>(&year.to_string(), 0).await?;

        if data.race_table.races.is_empty() {
            return Err(GatewayError::not_found(format!(
                "no events found for season {}",
                year
            )));
        }

        Ok(data
            .race_table
            .races
            .into_iter()
            .map(|race| Race {
                round: race.round,
                name: race.race_name,
                date: race.date,
            })
            .collect())
    }

    async fn session_drivers(&self, session: SessionKey) -> Result<Vec<Driver>> {
        let results = self.session_results(session).await?;

        Ok(results
            .into_iter()
            .map(|result| Driver {
                code: result.driver.code(),
                name: format!("{} {}", result.driver.given_name, result.driver.family_name),
                team: result.constructor.name,
            })
            .collect())
    }

    async fn driver_laps(&self, session: SessionKey, code: &str) -> Result<Vec<LapTiming>> {
        let results = self.session_results(session).await?;
        let driver_id = resolve_driver_id(&results, session, code)?;
        self.laps_by_driver_id(session, code, &driver_id).await
    }

    /// One results request resolves both drivers.
    async fn paired_driver_laps(
        &self,
        session: SessionKey,
        code1: &str,
        code2: &str,
    ) -> Result<(Vec<LapTiming>, Vec<LapTiming>)> {
        let results = self.session_results(session).await?;
        let id1 = resolve_driver_id(&results, session, code1)?;
        let id2 = resolve_driver_id(&results, session, code2)?;

        tokio::try_join!(
            self.laps_by_driver_id(session, code1, &id1),
            self.laps_by_driver_id(session, code2, &id2),
        )
    }

    fn name(&self) -> &str {
        "ergast"
    }
}
