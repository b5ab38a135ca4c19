//! Joined result rows returned by the queries.
//!
//! Reference-table columns picked up by a left join are always `Option`:
//! a result whose driver or constructor is unknown still appears, with the
//! joined fields left empty.

use chrono::NaiveDate;
use serde::Serialize;

/// Race entry for the season selector
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceSummary {
    pub race_id: i64,
    pub name: Option<String>,
    pub round: Option<i64>,
    pub date: Option<NaiveDate>,
}

impl RaceSummary {
    /// Selector label, e.g. "3 - Bahrain Grand Prix"
    pub fn label(&self) -> String {
        let round = self
            .round
            .map(|r| r.to_string())
            .unwrap_or_else(|| "?".to_string());
        let name = self.name.as_deref().unwrap_or("Unknown race");
        format!("{round} - {name}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverStandingRow {
    pub race_id: i64,
    pub driver_id: i64,
    pub points: Option<f64>,
    pub wins: Option<i64>,
    pub position: Option<i64>,
    pub code: Option<String>,
    pub forename: Option<String>,
    pub surname: Option<String>,
    pub nationality: Option<String>,
    pub driver_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorStandingRow {
    pub race_id: i64,
    pub constructor_id: i64,
    pub points: Option<f64>,
    pub wins: Option<i64>,
    pub position: Option<i64>,
    pub name: Option<String>,
    pub nationality: Option<String>,
}

impl ConstructorStandingRow {
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.constructor_id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceResultRow {
    pub race_id: i64,
    pub driver_id: i64,
    pub constructor_id: Option<i64>,
    pub grid: Option<i64>,
    pub position_order: Option<i64>,
    pub points: Option<f64>,
    pub laps: Option<i64>,
    pub time: Option<String>,
    pub status_id: Option<i64>,
    pub status_text: Option<String>,
    pub code: Option<String>,
    pub forename: Option<String>,
    pub surname: Option<String>,
    pub constructor_name: Option<String>,
    pub driver_label: String,
}

impl RaceResultRow {
    /// Status text, or the raw status id when the lookup has no match
    pub fn status_display(&self) -> String {
        match (&self.status_text, self.status_id) {
            (Some(text), _) => text.clone(),
            (None, Some(id)) => id.to_string(),
            (None, None) => String::new(),
        }
    }

    /// Driver selector label, e.g. "HAM (McLaren)"
    pub fn driver_option_label(&self) -> String {
        match &self.constructor_name {
            Some(team) => format!("{} ({team})", self.driver_label),
            None => self.driver_label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status_text: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitStopCount {
    pub driver_id: i64,
    pub driver_label: String,
    pub pit_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintResultRow {
    pub race_id: i64,
    pub driver_id: i64,
    pub constructor_id: Option<i64>,
    pub grid: Option<i64>,
    pub position: Option<i64>,
    pub position_order: Option<i64>,
    pub points: Option<f64>,
    pub laps: Option<i64>,
    pub status_id: Option<i64>,
    pub code: Option<String>,
    pub forename: Option<String>,
    pub surname: Option<String>,
    pub constructor_name: Option<String>,
    pub driver_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualifyingRow {
    pub race_id: i64,
    pub driver_id: i64,
    pub position: Option<i64>,
    pub q1: Option<String>,
    pub q2: Option<String>,
    pub q3: Option<String>,
    pub constructor_name: Option<String>,
    pub driver_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRaceCount {
    pub year: i64,
    pub race_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRaceCount {
    pub country: String,
    pub race_count: usize,
}

/// Circuit with coordinates and the number of races it has hosted
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitLocation {
    pub circuit_id: i64,
    pub circuit_name: String,
    pub location: String,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
    pub race_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_race_summary_label() {
        let race = RaceSummary {
            race_id: 1,
            name: Some("Bahrain Grand Prix".to_string()),
            round: Some(3),
            date: None,
        };
        assert_eq!(race.label(), "3 - Bahrain Grand Prix");
    }
}
