//! View queries over the loaded tables.
//!
//! Every query is a pure read of the [`DataStore`]. Unknown seasons, races or
//! drivers produce an empty `Vec` rather than an error, and the presentation
//! layer treats emptiness as "nothing to show".

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::debug;

use super::labels::driver_label;
use super::models::{Driver, LapTime, PitStop};
use super::rows::{
    CircuitLocation, ConstructorStandingRow, CountryRaceCount, DriverStandingRow, PitStopCount,
    QualifyingRow, RaceResultRow, RaceSummary, SeasonRaceCount, SprintResultRow, StatusCount,
};
use super::store::DataStore;

/// Ascending order with absent values sorted last
fn asc_nulls_last<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Descending order with absent values sorted last
fn desc_nulls_last<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Championship order: points, then wins, both descending
fn championship_order(
    a_points: Option<f64>,
    a_wins: Option<i64>,
    b_points: Option<f64>,
    b_wins: Option<i64>,
) -> Ordering {
    desc_nulls_last(a_points, b_points).then_with(|| desc_nulls_last(a_wins, b_wins))
}

/// Keep, per entity, the snapshot with the highest race id.
///
/// Standings rows are cumulative, so the last race of the season already
/// holds the season totals. On equal race ids the first row read is kept.
/// Output is ordered by entity id.
fn final_snapshots<'a, T>(
    rows: impl Iterator<Item = &'a T>,
    entity: impl Fn(&T) -> i64,
    race: impl Fn(&T) -> i64,
) -> Vec<&'a T>
where
    T: 'a,
{
    let mut latest: BTreeMap<i64, &'a T> = BTreeMap::new();
    for row in rows {
        latest
            .entry(entity(row))
            .and_modify(|current| {
                if race(row) > race(*current) {
                    *current = row;
                }
            })
            .or_insert(row);
    }
    latest.into_values().collect()
}

/// Label for a driver id, whether or not the driver is in the reference table
fn label_for(driver_id: i64, driver: Option<&Driver>) -> String {
    driver_label(
        driver_id,
        driver.and_then(|d| d.code.as_deref()),
        driver.and_then(|d| d.forename.as_deref()),
        driver.and_then(|d| d.surname.as_deref()),
    )
}

impl DataStore {
    /// Distinct season years that have at least one race, ascending
    pub fn years(&self) -> Vec<i64> {
        self.tables()
            .races
            .iter()
            .filter_map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn race_ids_for_year(&self, year: i64) -> HashSet<i64> {
        self.tables()
            .races
            .iter()
            .filter(|r| r.year == Some(year))
            .map(|r| r.race_id)
            .collect()
    }

    /// Races of a season ordered by round
    pub fn races_for_year(&self, year: i64) -> Vec<RaceSummary> {
        let mut races: Vec<RaceSummary> = self
            .tables()
            .races
            .iter()
            .filter(|r| r.year == Some(year))
            .map(|r| RaceSummary {
                race_id: r.race_id,
                name: r.name.clone(),
                round: r.round,
                date: r.date,
            })
            .collect();
        races.sort_by(|a, b| asc_nulls_last(a.round, b.round));
        races
    }

    /// Final drivers' championship table for a season
    pub fn driver_standings(&self, year: i64) -> Vec<DriverStandingRow> {
        let race_ids = self.race_ids_for_year(year);
        if race_ids.is_empty() {
            return Vec::new();
        }

        let finals = final_snapshots(
            self.tables()
                .driver_standings
                .iter()
                .filter(|s| race_ids.contains(&s.race_id)),
            |s| s.driver_id,
            |s| s.race_id,
        );

        let mut rows: Vec<DriverStandingRow> = finals
            .into_iter()
            .map(|s| {
                let driver = self.driver(s.driver_id);
                DriverStandingRow {
                    race_id: s.race_id,
                    driver_id: s.driver_id,
                    points: s.points,
                    wins: s.wins,
                    position: s.position,
                    code: driver.and_then(|d| d.code.clone()),
                    forename: driver.and_then(|d| d.forename.clone()),
                    surname: driver.and_then(|d| d.surname.clone()),
                    nationality: driver.and_then(|d| d.nationality.clone()),
                    driver_label: label_for(s.driver_id, driver),
                }
            })
            .collect();

        rows.sort_by(|a, b| championship_order(a.points, a.wins, b.points, b.wins));
        debug!(year, rows = rows.len(), "Driver standings");
        rows
    }

    /// Final constructors' championship table for a season
    pub fn constructor_standings(&self, year: i64) -> Vec<ConstructorStandingRow> {
        let race_ids = self.race_ids_for_year(year);
        if race_ids.is_empty() {
            return Vec::new();
        }

        let finals = final_snapshots(
            self.tables()
                .constructor_standings
                .iter()
                .filter(|s| race_ids.contains(&s.race_id)),
            |s| s.constructor_id,
            |s| s.race_id,
        );

        let mut rows: Vec<ConstructorStandingRow> = finals
            .into_iter()
            .map(|s| {
                let constructor = self.constructor(s.constructor_id);
                ConstructorStandingRow {
                    race_id: s.race_id,
                    constructor_id: s.constructor_id,
                    points: s.points,
                    wins: s.wins,
                    position: s.position,
                    name: constructor.and_then(|c| c.name.clone()),
                    nationality: constructor.and_then(|c| c.nationality.clone()),
                }
            })
            .collect();

        rows.sort_by(|a, b| championship_order(a.points, a.wins, b.points, b.wins));
        debug!(year, rows = rows.len(), "Constructor standings");
        rows
    }

    /// Full results of one race with driver, constructor and status text.
    ///
    /// Rows keep the order of the results table.
    pub fn race_results(&self, race_id: i64) -> Vec<RaceResultRow> {
        let rows: Vec<RaceResultRow> = self
            .tables()
            .results
            .iter()
            .filter(|r| r.race_id == race_id)
            .map(|r| {
                let driver = self.driver(r.driver_id);
                let constructor = r.constructor_id.and_then(|id| self.constructor(id));
                RaceResultRow {
                    race_id: r.race_id,
                    driver_id: r.driver_id,
                    constructor_id: r.constructor_id,
                    grid: r.grid,
                    position_order: r.position_order,
                    points: r.points,
                    laps: r.laps,
                    time: r.time.clone(),
                    status_id: r.status_id,
                    status_text: r
                        .status_id
                        .and_then(|id| self.status_text(id))
                        .map(str::to_owned),
                    code: driver.and_then(|d| d.code.clone()),
                    forename: driver.and_then(|d| d.forename.clone()),
                    surname: driver.and_then(|d| d.surname.clone()),
                    constructor_name: constructor.and_then(|c| c.name.clone()),
                    driver_label: label_for(r.driver_id, driver),
                }
            })
            .collect();

        debug!(race_id, rows = rows.len(), "Race results");
        rows
    }

    /// Number of drivers per outcome status in a race, most frequent first
    pub fn status_counts(&self, race_id: i64) -> Vec<StatusCount> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for row in self.race_results(race_id) {
            if let Some(status) = row.status_text {
                *counts.entry(status).or_default() += 1;
            }
        }

        let mut rows: Vec<StatusCount> = counts
            .into_iter()
            .map(|(status_text, count)| StatusCount { status_text, count })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }

    /// Lap times of one driver in one race, by lap number
    pub fn lap_times_for_driver(&self, race_id: i64, driver_id: i64) -> Vec<LapTime> {
        let mut laps: Vec<LapTime> = self
            .tables()
            .lap_times
            .iter()
            .filter(|l| l.race_id == race_id && l.driver_id == driver_id)
            .cloned()
            .collect();
        laps.sort_by(|a, b| asc_nulls_last(a.lap, b.lap));
        debug!(race_id, driver_id, laps = laps.len(), "Lap times");
        laps
    }

    /// Every pit stop made during a race
    pub fn pit_stops_for_race(&self, race_id: i64) -> Vec<PitStop> {
        self.tables()
            .pit_stops
            .iter()
            .filter(|p| p.race_id == race_id)
            .cloned()
            .collect()
    }

    /// Pit stops per driver in a race, most stops first
    pub fn pit_stop_counts(&self, race_id: i64) -> Vec<PitStopCount> {
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for stop in self.pit_stops_for_race(race_id) {
            *counts.entry(stop.driver_id).or_default() += 1;
        }

        let mut rows: Vec<PitStopCount> = counts
            .into_iter()
            .map(|(driver_id, pit_count)| PitStopCount {
                driver_id,
                driver_label: label_for(driver_id, self.driver(driver_id)),
                pit_count,
            })
            .collect();
        rows.sort_by(|a, b| b.pit_count.cmp(&a.pit_count));
        rows
    }

    /// Sprint classification attached to a race, if it had one
    pub fn sprint_results(&self, race_id: i64) -> Vec<SprintResultRow> {
        let mut rows: Vec<SprintResultRow> = self
            .tables()
            .sprint_results
            .iter()
            .filter(|s| s.race_id == race_id)
            .map(|s| {
                let driver = self.driver(s.driver_id);
                let constructor = s.constructor_id.and_then(|id| self.constructor(id));
                SprintResultRow {
                    race_id: s.race_id,
                    driver_id: s.driver_id,
                    constructor_id: s.constructor_id,
                    grid: s.grid,
                    position: s.position,
                    position_order: s.position_order,
                    points: s.points,
                    laps: s.laps,
                    status_id: s.status_id,
                    code: driver.and_then(|d| d.code.clone()),
                    forename: driver.and_then(|d| d.forename.clone()),
                    surname: driver.and_then(|d| d.surname.clone()),
                    constructor_name: constructor.and_then(|c| c.name.clone()),
                    driver_label: label_for(s.driver_id, driver),
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            asc_nulls_last(
                a.position_order.or(a.position),
                b.position_order.or(b.position),
            )
        });
        rows
    }

    /// Qualifying classification of a race, pole first
    pub fn qualifying_for_race(&self, race_id: i64) -> Vec<QualifyingRow> {
        let mut rows: Vec<QualifyingRow> = self
            .tables()
            .qualifying
            .iter()
            .filter(|q| q.race_id == race_id)
            .map(|q| QualifyingRow {
                race_id: q.race_id,
                driver_id: q.driver_id,
                position: q.position,
                q1: q.q1.clone(),
                q2: q.q2.clone(),
                q3: q.q3.clone(),
                constructor_name: q
                    .constructor_id
                    .and_then(|id| self.constructor(id))
                    .and_then(|c| c.name.clone()),
                driver_label: label_for(q.driver_id, self.driver(q.driver_id)),
            })
            .collect();
        rows.sort_by(|a, b| asc_nulls_last(a.position, b.position));
        rows
    }

    /// Number of races in every season, oldest first
    pub fn races_per_season(&self) -> Vec<SeasonRaceCount> {
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for year in self.tables().races.iter().filter_map(|r| r.year) {
            *counts.entry(year).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(year, race_count)| SeasonRaceCount { year, race_count })
            .collect()
    }

    /// Number of races held in each country, optionally for one season
    pub fn race_counts_by_country(&self, year: Option<i64>) -> Vec<CountryRaceCount> {
        if self.tables().circuits.is_empty() {
            return Vec::new();
        }

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for race in self
            .tables()
            .races
            .iter()
            .filter(|r| year.is_none() || r.year == year)
        {
            let country = race
                .circuit_id
                .and_then(|id| self.circuit(id))
                .and_then(|c| c.country.as_deref());
            if let Some(country) = country {
                *counts.entry(country).or_default() += 1;
            }
        }

        let mut rows: Vec<CountryRaceCount> = counts
            .into_iter()
            .map(|(country, race_count)| CountryRaceCount {
                country: country.to_string(),
                race_count,
            })
            .collect();
        rows.sort_by(|a, b| b.race_count.cmp(&a.race_count));
        rows
    }

    /// Circuits with coordinates and the number of races each has hosted.
    ///
    /// Circuits missing a name, location, country or either coordinate are
    /// left out, even if they hosted races.
    pub fn circuit_locations(&self) -> Vec<CircuitLocation> {
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for circuit_id in self.tables().races.iter().filter_map(|r| r.circuit_id) {
            *counts.entry(circuit_id).or_default() += 1;
        }

        counts
            .into_iter()
            .filter_map(|(circuit_id, race_count)| {
                let circuit = self.circuit(circuit_id)?;
                Some(CircuitLocation {
                    circuit_id,
                    circuit_name: circuit.name.clone()?,
                    location: circuit.location.clone()?,
                    country: circuit.country.clone()?,
                    lat: circuit.lat?,
                    lng: circuit.lng?,
                    race_count,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::Tables;
    use crate::data::models::{
        Circuit, Constructor, ConstructorStanding, DriverStanding, Qualifying, Race, RaceResult,
        SprintResult, Status,
    };

    fn race(race_id: i64, year: Option<i64>, round: i64, circuit_id: i64) -> Race {
        Race {
            race_id,
            year,
            round: Some(round),
            circuit_id: Some(circuit_id),
            name: Some(format!("Race {race_id}")),
            date: None,
        }
    }

    fn driver(driver_id: i64, code: Option<&str>, forename: &str, surname: &str) -> Driver {
        Driver {
            driver_id,
            code: code.map(str::to_string),
            forename: Some(forename.to_string()),
            surname: Some(surname.to_string()),
            nationality: None,
        }
    }

    fn circuit(circuit_id: i64, country: &str, lat: Option<f64>, lng: Option<f64>) -> Circuit {
        Circuit {
            circuit_id,
            name: Some(format!("Circuit {circuit_id}")),
            location: Some(format!("Town {circuit_id}")),
            country: Some(country.to_string()),
            lat,
            lng,
        }
    }

    fn result(race_id: i64, driver_id: i64, position_order: i64, status_id: i64) -> RaceResult {
        RaceResult {
            race_id,
            driver_id,
            constructor_id: Some(1),
            grid: Some(position_order),
            position_order: Some(position_order),
            points: Some(0.0),
            laps: Some(58),
            time: None,
            status_id: Some(status_id),
        }
    }

    fn driver_standing(race_id: i64, driver_id: i64, points: f64, wins: i64) -> DriverStanding {
        DriverStanding {
            race_id,
            driver_id,
            points: Some(points),
            position: None,
            wins: Some(wins),
        }
    }

    fn lap(race_id: i64, driver_id: i64, lap: i64, milliseconds: i64) -> LapTime {
        LapTime {
            race_id,
            driver_id,
            lap: Some(lap),
            position: None,
            time: None,
            milliseconds: Some(milliseconds),
        }
    }

    fn pit(race_id: i64, driver_id: i64, stop: i64) -> PitStop {
        PitStop {
            race_id,
            driver_id,
            stop: Some(stop),
            lap: None,
            duration: None,
            milliseconds: Some(22_000),
        }
    }

    fn sprint(driver_id: i64, position: Option<i64>, position_order: Option<i64>) -> SprintResult {
        SprintResult {
            race_id: 1,
            driver_id,
            constructor_id: Some(2),
            grid: None,
            position,
            position_order,
            points: Some(1.0),
            laps: Some(17),
            status_id: Some(1),
        }
    }

    fn fixture() -> DataStore {
        let tables = Tables {
            races: vec![
                race(1, Some(2020), 2, 1),
                race(2, Some(2020), 1, 2),
                race(3, Some(2021), 1, 1),
                race(4, Some(2021), 2, 3),
                race(5, None, 1, 1),
            ],
            circuits: vec![
                circuit(1, "Australia", Some(-37.8), Some(144.9)),
                circuit(2, "Bahrain", Some(26.0), Some(50.5)),
                circuit(3, "Nowhere", None, Some(10.0)),
            ],
            drivers: vec![
                driver(1, Some("HAM"), "Lewis", "Hamilton"),
                driver(2, None, "Nico", "Rosberg"),
            ],
            constructors: vec![
                Constructor {
                    constructor_id: 1,
                    name: Some("Mercedes".to_string()),
                    nationality: Some("German".to_string()),
                },
                Constructor {
                    constructor_id: 2,
                    name: Some("Ferrari".to_string()),
                    nationality: Some("Italian".to_string()),
                },
            ],
            status: vec![
                Status {
                    status_id: 1,
                    status: Some("Finished".to_string()),
                },
                Status {
                    status_id: 2,
                    status: Some("Accident".to_string()),
                },
            ],
            results: vec![
                result(1, 1, 1, 1),
                result(1, 2, 2, 2),
                result(1, 44, 3, 99),
                result(1, 3, 4, 1),
                result(2, 1, 1, 1),
            ],
            driver_standings: vec![
                driver_standing(1, 1, 25.0, 1),
                driver_standing(1, 2, 18.0, 0),
                driver_standing(2, 1, 100.0, 3),
                driver_standing(2, 2, 100.0, 5),
                driver_standing(3, 1, 100.0, 4),
            ],
            constructor_standings: vec![
                ConstructorStanding {
                    race_id: 1,
                    constructor_id: 1,
                    points: Some(50.0),
                    position: Some(2),
                    wins: Some(1),
                },
                ConstructorStanding {
                    race_id: 1,
                    constructor_id: 2,
                    points: Some(60.0),
                    position: Some(1),
                    wins: Some(0),
                },
            ],
            lap_times: vec![
                lap(1, 1, 3, 92_713),
                lap(1, 1, 1, 98_109),
                lap(1, 1, 2, 93_006),
                lap(1, 2, 1, 99_000),
            ],
            pit_stops: vec![pit(1, 1, 1), pit(1, 2, 1), pit(1, 1, 2), pit(2, 1, 1)],
            sprint_results: vec![
                sprint(1, Some(2), Some(2)),
                sprint(3, Some(3), None),
                sprint(2, Some(1), Some(1)),
            ],
            qualifying: vec![
                Qualifying {
                    race_id: 1,
                    driver_id: 1,
                    constructor_id: Some(1),
                    position: Some(2),
                    q1: Some("1:26.572".to_string()),
                    q2: None,
                    q3: None,
                },
                Qualifying {
                    race_id: 1,
                    driver_id: 2,
                    constructor_id: Some(1),
                    position: Some(1),
                    q1: Some("1:26.103".to_string()),
                    q2: None,
                    q3: None,
                },
            ],
            ..Tables::default()
        };
        DataStore::from_tables(tables)
    }

    #[test]
    fn test_years_are_distinct_and_sorted() {
        assert_eq!(fixture().years(), vec![2020, 2021]);
    }

    #[test]
    fn test_races_for_year_sorted_by_round() {
        let races = fixture().races_for_year(2020);
        let ids: Vec<i64> = races.iter().map(|r| r.race_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_unknown_year_is_empty_everywhere() {
        let store = fixture();
        assert!(store.races_for_year(1900).is_empty());
        assert!(store.driver_standings(1900).is_empty());
        assert!(store.constructor_standings(1900).is_empty());
        assert!(store.race_counts_by_country(Some(1900)).is_empty());
    }

    #[test]
    fn test_driver_standings_tie_broken_by_wins() {
        let standings = fixture().driver_standings(2020);

        assert_eq!(standings.len(), 2);
        // Race 2 has the higher id; both drivers sit on 100 points there
        assert!(standings.iter().all(|s| s.race_id == 2));
        assert!(standings.iter().all(|s| s.points == Some(100.0)));
        assert_eq!(standings[0].driver_id, 2);
        assert_eq!(standings[0].wins, Some(5));
        assert_eq!(standings[0].driver_label, "N. Rosberg");
        assert_eq!(standings[1].driver_id, 1);
        assert_eq!(standings[1].wins, Some(3));
        assert_eq!(standings[1].driver_label, "HAM");
    }

    #[test]
    fn test_driver_standings_use_latest_snapshot_not_sum() {
        let tables = Tables {
            races: vec![race(10, Some(2022), 1, 1), race(12, Some(2022), 2, 1)],
            driver_standings: vec![
                driver_standing(12, 7, 75.0, 2),
                driver_standing(10, 7, 50.0, 1),
            ],
            ..Tables::default()
        };
        let standings = DataStore::from_tables(tables).driver_standings(2022);

        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].points, Some(75.0));
        assert_eq!(standings[0].race_id, 12);
        // Unknown driver falls back to the raw id
        assert_eq!(standings[0].driver_label, "7");
    }

    #[test]
    fn test_latest_snapshot_beats_higher_points() {
        let tables = Tables {
            races: vec![race(10, Some(2022), 1, 1), race(12, Some(2022), 2, 1)],
            driver_standings: vec![
                driver_standing(10, 7, 80.0, 1),
                driver_standing(12, 7, 75.0, 1),
            ],
            ..Tables::default()
        };
        let standings = DataStore::from_tables(tables).driver_standings(2022);
        assert_eq!(standings[0].points, Some(75.0));
    }

    #[test]
    fn test_standings_without_rows_are_empty() {
        let tables = Tables {
            races: vec![race(10, Some(2022), 1, 1)],
            ..Tables::default()
        };
        assert!(DataStore::from_tables(tables).driver_standings(2022).is_empty());
    }

    #[test]
    fn test_constructor_standings_sorted_by_points() {
        let standings = fixture().constructor_standings(2020);
        let names: Vec<String> = standings.iter().map(|s| s.label()).collect();
        assert_eq!(names, vec!["Ferrari", "Mercedes"]);
    }

    #[test]
    fn test_race_results_join_labels_and_status() {
        let results = fixture().race_results(1);
        assert_eq!(results.len(), 4);

        assert_eq!(results[0].driver_label, "HAM");
        assert_eq!(results[0].constructor_name.as_deref(), Some("Mercedes"));
        assert_eq!(results[0].status_text.as_deref(), Some("Finished"));

        assert_eq!(results[1].status_text.as_deref(), Some("Accident"));

        // Unmatched status id stays absent, display falls back to the id
        assert_eq!(results[2].status_text, None);
        assert_eq!(results[2].status_display(), "99");
        assert_eq!(results[2].driver_label, "44");
    }

    #[test]
    fn test_race_results_unknown_race_is_empty() {
        assert!(fixture().race_results(999).is_empty());
    }

    #[test]
    fn test_queries_are_idempotent() {
        let store = fixture();
        assert_eq!(store.race_results(1), store.race_results(1));
        assert_eq!(store.driver_standings(2020), store.driver_standings(2020));
        assert_eq!(store.circuit_locations(), store.circuit_locations());
    }

    #[test]
    fn test_status_counts_most_frequent_first() {
        let counts = fixture().status_counts(1);
        assert_eq!(
            counts,
            vec![
                StatusCount {
                    status_text: "Finished".to_string(),
                    count: 2
                },
                StatusCount {
                    status_text: "Accident".to_string(),
                    count: 1
                },
            ]
        );
        assert!(fixture().status_counts(999).is_empty());
    }

    #[test]
    fn test_status_counts_empty_without_status_table() {
        let tables = Tables {
            results: vec![result(1, 1, 1, 1)],
            ..Tables::default()
        };
        assert!(DataStore::from_tables(tables).status_counts(1).is_empty());
    }

    #[test]
    fn test_lap_times_sorted_by_lap() {
        let laps = fixture().lap_times_for_driver(1, 1);
        let numbers: Vec<Option<i64>> = laps.iter().map(|l| l.lap).collect();
        assert_eq!(numbers, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(laps[0].milliseconds, Some(98_109));

        assert!(fixture().lap_times_for_driver(1, 99).is_empty());
    }

    #[test]
    fn test_pit_stops_filtered_by_race() {
        let store = fixture();
        assert_eq!(store.pit_stops_for_race(1).len(), 3);
        assert!(store.pit_stops_for_race(3).is_empty());

        let counts = store.pit_stop_counts(1);
        assert_eq!(counts[0].driver_label, "HAM");
        assert_eq!(counts[0].pit_count, 2);
        assert_eq!(counts[1].driver_label, "N. Rosberg");
        assert_eq!(counts[1].pit_count, 1);
    }

    #[test]
    fn test_sprint_results_ordered_by_position_order() {
        let sprint = fixture().sprint_results(1);
        let ids: Vec<i64> = sprint.iter().map(|s| s.driver_id).collect();
        // Driver 3 has no positionOrder and falls back to position 3
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(sprint[0].constructor_name.as_deref(), Some("Ferrari"));

        assert!(fixture().sprint_results(2).is_empty());
    }

    #[test]
    fn test_qualifying_pole_first() {
        let quali = fixture().qualifying_for_race(1);
        assert_eq!(quali[0].driver_label, "N. Rosberg");
        assert_eq!(quali[1].driver_label, "HAM");
    }

    #[test]
    fn test_races_per_season_skips_missing_years() {
        let seasons = fixture().races_per_season();
        assert_eq!(
            seasons,
            vec![
                SeasonRaceCount {
                    year: 2020,
                    race_count: 2
                },
                SeasonRaceCount {
                    year: 2021,
                    race_count: 2
                },
            ]
        );
    }

    #[test]
    fn test_race_counts_by_country() {
        let store = fixture();

        let all = store.race_counts_by_country(None);
        assert_eq!(all[0].country, "Australia");
        assert_eq!(all[0].race_count, 3);

        let season = store.race_counts_by_country(Some(2021));
        let countries: Vec<&str> = season.iter().map(|c| c.country.as_str()).collect();
        assert_eq!(countries, vec!["Australia", "Nowhere"]);
    }

    #[test]
    fn test_race_counts_by_country_needs_circuits() {
        let tables = Tables {
            races: vec![race(1, Some(2020), 1, 1)],
            ..Tables::default()
        };
        assert!(DataStore::from_tables(tables)
            .race_counts_by_country(None)
            .is_empty());
    }

    #[test]
    fn test_circuit_locations_drop_missing_coordinates() {
        let locations = fixture().circuit_locations();

        let ids: Vec<i64> = locations.iter().map(|c| c.circuit_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(locations[0].race_count, 3);
        assert_eq!(locations[0].circuit_name, "Circuit 1");
        assert!(!locations.iter().any(|c| c.country == "Nowhere"));
    }
}
