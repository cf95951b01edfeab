// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use diesel::prelude::*;
use matchday::{GenerationOutcome, SeasonConfig, generate_season};
use matchday_domain::{Field, ScheduleConfig, Team, Timeslot};
use time::{Date, Month, Time};

pub const TEST_SEASON_ID: i64 = 42;
pub const TEST_ORGANIZATION_ID: i64 = 7;

pub fn create_test_date(month: Month, day: u8) -> Date {
    Date::from_calendar_date(2026, month, day).unwrap()
}

pub fn create_test_teams(count: i64) -> Vec<Team> {
    (1..=count)
        .map(|id| Team::new(id, &format!("Team {id}"), true))
        .collect()
}

/// Saturdays from 2026-03-07 to 2026-05-30 on two fields and two timeslots.
pub fn create_test_schedule() -> ScheduleConfig {
    let fields: Vec<Field> = vec![
        Field::new(1, "North Pitch", true),
        Field::new(2, "South Pitch", true),
    ];
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
    ScheduleConfig::new(
        create_test_date(Month::March, 7),
        create_test_date(Month::May, 30),
        4,
        fields,
        timeslots,
    )
}

pub fn create_test_season_config(teams: i64) -> SeasonConfig {
    SeasonConfig::new(
        TEST_SEASON_ID,
        TEST_ORGANIZATION_ID,
        "Spring League",
        create_test_teams(teams),
        create_test_schedule(),
    )
}

pub fn create_test_outcome(teams: i64) -> GenerationOutcome {
    generate_season(&create_test_season_config(teams)).unwrap()
}

/// An in-memory database with the test season registered.
pub fn create_test_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .save_season(TEST_SEASON_ID, TEST_ORGANIZATION_ID, "Spring League")
        .unwrap();
    persistence
}

pub fn count_fixture_rows(persistence: &mut Persistence) -> i64 {
    crate::diesel_schema::scheduled_fixtures::table
        .count()
        .get_result(&mut persistence.conn)
        .unwrap()
}
