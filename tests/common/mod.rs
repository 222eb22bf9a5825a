#![allow(dead_code)]

use serde_json::{json, Value};

pub const BASE_PATH: &str = "/ergast/f1";

fn envelope(limit: u32, offset: u32, total: u32, races: Value) -> Value {
    json!({
        "MRData": {
            "xmlns": "",
            "series": "f1",
            "limit": limit.to_string(),
            "offset": offset.to_string(),
            "total": total.to_string(),
            "RaceTable": {
                "season": "2021",
                "Races": races
            }
        }
    })
}

pub fn schedule_2021() -> Value {
    envelope(
        100,
        0,
        3,
        json!([
            {"season": "2021", "round": "1", "raceName": "Bahrain Grand Prix", "date": "2021-03-28", "time": "15:00:00Z"},
            {"season": "2021", "round": "2", "raceName": "Emilia Romagna Grand Prix", "date": "2021-04-18", "time": "13:00:00Z"},
            {"season": "2021", "round": "3", "raceName": "Portuguese Grand Prix", "date": "2021-05-02", "time": "14:00:00Z"}
        ]),
    )
}

pub fn empty_races() -> Value {
    envelope(100, 0, 0, json!([]))
}

pub fn results_2021_1() -> Value {
    envelope(
        100,
        0,
        3,
        json!([{
            "season": "2021",
            "round": "1",
            "raceName": "Bahrain Grand Prix",
            "Results": [
                {
                    "number": "44", "position": "1",
                    "Driver": {"driverId": "hamilton", "permanentNumber": "44", "code": "HAM", "givenName": "Lewis", "familyName": "Hamilton"},
                    "Constructor": {"constructorId": "mercedes", "name": "Mercedes"}
                },
                {
                    "number": "33", "position": "2",
                    "Driver": {"driverId": "max_verstappen", "permanentNumber": "33", "code": "VER", "givenName": "Max", "familyName": "Verstappen"},
                    "Constructor": {"constructorId": "red_bull", "name": "Red Bull"}
                },
                {
                    "number": "11", "position": "18",
                    "Driver": {"driverId": "perez", "permanentNumber": "11", "code": "PER", "givenName": "Sergio", "familyName": "Pérez"},
                    "Constructor": {"constructorId": "red_bull", "name": "Red Bull"}
                }
            ]
        }]),
    )
}

/// One page of laps for a single driver; `laps` are `(lap number, time)` pairs.
pub fn laps_page(driver_id: &str, limit: u32, offset: u32, total: u32, laps: &[(u32, Option<&str>)]) -> Value {
    let laps: Vec<Value> = laps
        .iter()
        .map(|(number, time)| {
            let timing = match time {
                Some(time) => json!({"driverId": driver_id, "position": "1", "time": time}),
                None => json!({"driverId": driver_id, "position": "1"}),
            };
            json!({"number": number.to_string(), "Timings": [timing]})
        })
        .collect();

    envelope(
        limit,
        offset,
        total,
        json!([{"season": "2021", "round": "1", "raceName": "Bahrain Grand Prix", "Laps": laps}]),
    )
}
