// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{GenerationLog, ScheduleStore, SeasonConfig};
use matchday_domain::{Field, MatchDay, ScheduleConfig, Team, Timeslot};
use std::collections::{BTreeMap, BTreeSet};
use time::{Date, Month, Time};

/// An in-memory store with failure injection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub seasons: BTreeMap<i64, (i64, String)>,
    pub schedules: BTreeMap<i64, Vec<MatchDay>>,
    pub active_seasons: BTreeSet<i64>,
    pub logs: Vec<GenerationLog>,
    pub fail_replace: bool,
    pub fail_log: bool,
}

impl ScheduleStore for MemoryStore {
    type Error = String;

    fn replace_season_schedule(
        &mut self,
        season: &SeasonConfig,
        match_days: &[MatchDay],
    ) -> Result<(), Self::Error> {
        if self.fail_replace {
            return Err(String::from("database is locked"));
        }
        self.seasons.insert(
            season.season_id,
            (season.organization_id, season.name.clone()),
        );
        self.schedules.insert(season.season_id, match_days.to_vec());
        self.active_seasons.insert(season.season_id);
        Ok(())
    }

    fn record_generation_log(&mut self, log: &GenerationLog) -> Result<(), Self::Error> {
        if self.fail_log {
            return Err(String::from("disk full"));
        }
        self.logs.push(log.clone());
        Ok(())
    }
}

pub fn create_test_date(month: Month, day: u8) -> Date {
    Date::from_calendar_date(2026, month, day).unwrap()
}

pub fn create_test_teams(count: i64) -> Vec<Team> {
    (1..=count)
        .map(|id| Team::new(id, &format!("Team {id}"), true))
        .collect()
}

pub fn create_test_schedule(fields: i64, max_games_per_date: usize) -> ScheduleConfig {
    let fields: Vec<Field> = (1..=fields)
        .map(|id| Field::new(id, &format!("Field {id}"), true))
        .collect();
    let timeslots: Vec<Timeslot> = vec![
        Timeslot::new(
            1,
            "Morning",
            Time::from_hms(9, 0, 0).unwrap(),
            Time::from_hms(10, 30, 0).unwrap(),
            true,
            1,
        ),
        Timeslot::new(
            2,
            "Midday",
            Time::from_hms(11, 0, 0).unwrap(),
            Time::from_hms(12, 30, 0).unwrap(),
            true,
            2,
        ),
    ];
    // Saturdays 2026-03-07 to 2026-05-30
    ScheduleConfig::new(
        create_test_date(Month::March, 7),
        create_test_date(Month::May, 30),
        max_games_per_date,
        fields,
        timeslots,
    )
}

/// A six-team season on two fields and two timeslots.
pub fn create_test_season_config() -> SeasonConfig {
    SeasonConfig::new(
        42,
        7,
        "Spring League",
        create_test_teams(6),
        create_test_schedule(2, 4),
    )
}
