//! Dashboard views and the filter selection they depend on.

use clap::ValueEnum;
use serde::Serialize;

use crate::data::{
    CircuitLocation, ConstructorStandingRow, CountryRaceCount, DataStore, DriverStandingRow,
    LapTime, PitStop, PitStopCount, QualifyingRow, RaceResultRow, SeasonRaceCount,
    SprintResultRow, StatusCount,
};

/// Which filters a view reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Season,
    Race,
    RaceAndDriver,
    All,
}

/// A dashboard view, each backed by one query
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    DriverStandings,
    ConstructorStandings,
    RaceResults,
    StatusCounts,
    LapTimes,
    PitStops,
    PitStopCounts,
    Sprint,
    Qualifying,
    RacesPerSeason,
    RacesByCountry,
    Circuits,
}

impl View {
    /// Views reachable from the dashboard tab bar, in order
    pub const TABS: [View; 11] = [
        View::DriverStandings,
        View::ConstructorStandings,
        View::RaceResults,
        View::StatusCounts,
        View::LapTimes,
        View::PitStopCounts,
        View::Sprint,
        View::Qualifying,
        View::RacesPerSeason,
        View::RacesByCountry,
        View::Circuits,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::DriverStandings => "Drivers' Championship",
            View::ConstructorStandings => "Constructors' Championship",
            View::RaceResults => "Race Results",
            View::StatusCounts => "Race Status",
            View::LapTimes => "Lap Times",
            View::PitStops => "Pit Stops",
            View::PitStopCounts => "Pit Stops per Driver",
            View::Sprint => "Sprint Points",
            View::Qualifying => "Qualifying",
            View::RacesPerSeason => "Races per Season",
            View::RacesByCountry => "Races by Country",
            View::Circuits => "Circuit Map",
        }
    }

    /// Short name for the tab bar
    pub fn tab_label(self) -> &'static str {
        match self {
            View::DriverStandings => "Drivers",
            View::ConstructorStandings => "Teams",
            View::RaceResults => "Results",
            View::StatusCounts => "Status",
            View::LapTimes => "Laps",
            View::PitStops | View::PitStopCounts => "Pits",
            View::Sprint => "Sprint",
            View::Qualifying => "Quali",
            View::RacesPerSeason => "Seasons",
            View::RacesByCountry => "Countries",
            View::Circuits => "Circuits",
        }
    }

    pub fn scope(self) -> Scope {
        match self {
            View::DriverStandings | View::ConstructorStandings | View::RacesByCountry => {
                Scope::Season
            }
            View::RaceResults
            | View::StatusCounts
            | View::PitStops
            | View::PitStopCounts
            | View::Sprint
            | View::Qualifying => Scope::Race,
            View::LapTimes => Scope::RaceAndDriver,
            View::RacesPerSeason | View::Circuits => Scope::All,
        }
    }

    fn tab_index(self) -> usize {
        Self::TABS.iter().position(|v| *v == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::TABS[(self.tab_index() + 1) % Self::TABS.len()]
    }

    pub fn prev(self) -> Self {
        let idx = self.tab_index();
        Self::TABS[idx.checked_sub(1).unwrap_or(Self::TABS.len() - 1)]
    }
}

/// Current values of the season, race and driver filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub year: Option<i64>,
    pub race_id: Option<i64>,
    pub driver_id: Option<i64>,
}

/// Rows produced for one view
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ViewData {
    DriverStandings(Vec<DriverStandingRow>),
    ConstructorStandings(Vec<ConstructorStandingRow>),
    RaceResults(Vec<RaceResultRow>),
    StatusCounts(Vec<StatusCount>),
    LapTimes(Vec<LapTime>),
    PitStops(Vec<PitStop>),
    PitStopCounts(Vec<PitStopCount>),
    Sprint(Vec<SprintResultRow>),
    Qualifying(Vec<QualifyingRow>),
    RacesPerSeason(Vec<SeasonRaceCount>),
    RacesByCountry(Vec<CountryRaceCount>),
    Circuits(Vec<CircuitLocation>),
}

impl ViewData {
    /// Run the query behind `view` for the current selection.
    ///
    /// A missing filter value yields an empty result, never an error.
    pub fn compute(store: &DataStore, view: View, selection: &Selection) -> Self {
        let Selection {
            year,
            race_id,
            driver_id,
        } = *selection;

        match view {
            View::DriverStandings => ViewData::DriverStandings(
                year.map(|y| store.driver_standings(y)).unwrap_or_default(),
            ),
            View::ConstructorStandings => ViewData::ConstructorStandings(
                year.map(|y| store.constructor_standings(y))
                    .unwrap_or_default(),
            ),
            View::RaceResults => ViewData::RaceResults(
                race_id.map(|r| store.race_results(r)).unwrap_or_default(),
            ),
            View::StatusCounts => ViewData::StatusCounts(
                race_id.map(|r| store.status_counts(r)).unwrap_or_default(),
            ),
            View::LapTimes => ViewData::LapTimes(match (race_id, driver_id) {
                (Some(r), Some(d)) => store.lap_times_for_driver(r, d),
                _ => Vec::new(),
            }),
            View::PitStops => ViewData::PitStops(
                race_id.map(|r| store.pit_stops_for_race(r)).unwrap_or_default(),
            ),
            View::PitStopCounts => ViewData::PitStopCounts(
                race_id.map(|r| store.pit_stop_counts(r)).unwrap_or_default(),
            ),
            View::Sprint => ViewData::Sprint(
                race_id.map(|r| store.sprint_results(r)).unwrap_or_default(),
            ),
            View::Qualifying => ViewData::Qualifying(
                race_id.map(|r| store.qualifying_for_race(r)).unwrap_or_default(),
            ),
            View::RacesPerSeason => ViewData::RacesPerSeason(store.races_per_season()),
            // No season selected means all seasons
            View::RacesByCountry => ViewData::RacesByCountry(store.race_counts_by_country(year)),
            View::Circuits => ViewData::Circuits(store.circuit_locations()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ViewData::DriverStandings(rows) => rows.len(),
            ViewData::ConstructorStandings(rows) => rows.len(),
            ViewData::RaceResults(rows) => rows.len(),
            ViewData::StatusCounts(rows) => rows.len(),
            ViewData::LapTimes(rows) => rows.len(),
            ViewData::PitStops(rows) => rows.len(),
            ViewData::PitStopCounts(rows) => rows.len(),
            ViewData::Sprint(rows) => rows.len(),
            ViewData::Qualifying(rows) => rows.len(),
            ViewData::RacesPerSeason(rows) => rows.len(),
            ViewData::RacesByCountry(rows) => rows.len(),
            ViewData::Circuits(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle_wraps() {
        assert_eq!(View::DriverStandings.prev(), View::Circuits);
        assert_eq!(View::Circuits.next(), View::DriverStandings);
        assert_eq!(View::RaceResults.next(), View::StatusCounts);
    }

    #[test]
    fn test_headless_only_view_maps_into_tabs() {
        // Raw pit stops are not a tab; cycling from it starts over
        assert_eq!(View::PitStops.next(), View::ConstructorStandings);
    }

    #[test]
    fn test_missing_selection_yields_empty_data() {
        let store = DataStore::default();
        let selection = Selection::default();
        for view in View::TABS {
            let data = ViewData::compute(&store, view, &selection);
            assert!(data.is_empty(), "{view:?} should be empty");
        }
    }

    #[test]
    fn test_empty_data_serializes_as_empty_array() {
        let data = ViewData::RaceResults(Vec::new());
        assert_eq!(serde_json::to_string(&data).unwrap(), "[]");
    }
}
