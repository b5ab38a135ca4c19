//! Typed records for the Ergast reference tables.
//!
//! Each struct mirrors the header of one CSV file. Columns that the queries
//! never touch are not declared; the CSV reader skips them. Every optional
//! column goes through [`nullable_text`] or [`coerce`] so that the `\N`
//! marker, empty cells and unparsable numbers all become `None`.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Literal marker used by the Ergast CSV export for missing values
pub const MISSING_MARKER: &str = "\\N";

/// Returns `None` for the missing-value marker or a blank cell.
pub fn normalize(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == MISSING_MARKER {
        None
    } else {
        Some(raw)
    }
}

/// Deserialize a text column, mapping the missing marker to `None`
fn nullable_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(normalize).map(str::to_owned))
}

/// Deserialize a typed column; values that fail to parse become `None`
fn coerce<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(normalize)
        .and_then(|s| s.trim().parse().ok()))
}

/// One championship round
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Race {
    pub race_id: i64,
    #[serde(default, deserialize_with = "coerce")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "coerce")]
    pub round: Option<i64>,
    #[serde(default, deserialize_with = "coerce")]
    pub circuit_id: Option<i64>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "coerce")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    pub circuit_id: i64,
    #[serde(default, deserialize_with = "nullable_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "coerce")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "coerce")]
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub driver_id: i64,
    #[serde(default, deserialize_with = "nullable_text")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub forename: Option<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub surname: Option<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub nationality: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    pub constructor_id: i64,
    #[serde(default, deserialize_with = "nullable_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub nationality: Option<String>,
}

/// Classified result of one driver in one race
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceResult {
    pub race_id: i64,
    pub driver_id: i64,
    #[serde(default, deserialize_with = "coerce")]
    pub constructor_id: Option<i64>,
    #[serde(default, deserialize_with = "coerce")]
    pub grid: Option<i64>,
    #[serde(default, deserialize_with = "coerce")]
    pub position_order: Option<i64>,
    #[serde(default, deserialize_with = "coerce")]
    pub points: Option<f64>,
    #[serde(default, deserialize_with = "coerce")]
    pub laps: Option<i64>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "coerce")]
    pub status_id: Option<i64>,
}

/// Cumulative driver championship snapshot as of one race
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverStanding {
    pub race_id: i64,
    pub driver_id: i64,
    #[serde(default, deserialize_with = "coerce")]
    pub points: Option<f64>,
    #[serde(default, deserialize_with = "coerce")]
    pub position: Option<i64>,
    #[serde(default, deserialize_with = "coerce")]
    pub wins: Option<i64>,
}

/// Cumulative constructor championship snapshot as of one race
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorStanding {
    pub race_id: i64,
    pub constructor_id: i64,
    #[serde(default, deserialize_with = "coerce")]
    pub points: Option<f64>,
    #[serde(default, deserialize_with = "coerce")]
    pub position: Option<i64>,
    #[serde(default, deserialize_with = "coerce")]
    pub wins: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorResult {
    pub race_id: i64,
    pub constructor_id: i64,
    #[serde(default, deserialize_with = "coerce")]
    pub points: Option<f64>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LapTime {
    pub race_id: i64,
    pub driver_id: i64,
    #[serde(default, deserialize_with = "coerce")]
    pub lap: Option<i64>,
    #[serde(default, deserialize_with = "coerce")]
    pub position: Option<i64>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "coerce")]
    pub milliseconds: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitStop {
    pub race_id: i64,
    pub driver_id: i64,
    #[serde(default, deserialize_with = "coerce")]
    pub stop: Option<i64>,
    #[serde(default, deserialize_with = "coerce")]
    pub lap: Option<i64>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "coerce")]
    pub milliseconds: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qualifying {
    pub race_id: i64,
    pub driver_id: i64,
    #[serde(default, deserialize_with = "coerce")]
    pub constructor_id: Option<i64>,
    #[serde(default, deserialize_with = "coerce")]
    pub position: Option<i64>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub q1: Option<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub q2: Option<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub q3: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub year: i64,
    #[serde(default, deserialize_with = "nullable_text")]
    pub url: Option<String>,
}

/// Race outcome lookup ("Finished", "Engine", "+1 Lap", ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub status_id: i64,
    #[serde(default, deserialize_with = "nullable_text")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintResult {
    pub race_id: i64,
    pub driver_id: i64,
    #[serde(default, deserialize_with = "coerce")]
    pub constructor_id: Option<i64>,
    #[serde(default, deserialize_with = "coerce")]
    pub grid: Option<i64>,
    #[serde(default, deserialize_with = "coerce")]
    pub position: Option<i64>,
    #[serde(default, deserialize_with = "coerce")]
    pub position_order: Option<i64>,
    #[serde(default, deserialize_with = "coerce")]
    pub points: Option<f64>,
    #[serde(default, deserialize_with = "coerce")]
    pub laps: Option<i64>,
    #[serde(default, deserialize_with = "coerce")]
    pub status_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_marker_and_blank() {
        assert_eq!(normalize("\\N"), None);
        assert_eq!(normalize(" \\N "), None);
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("HAM"), Some("HAM"));
        // Only the exact marker is missing, not strings that contain it
        assert_eq!(normalize("A\\N"), Some("A\\N"));
    }
}
