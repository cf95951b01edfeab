// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use matchday_persistence::Persistence;

use crate::{FieldInput, GenerateScheduleRequest, TeamInput, TimeslotInput};

pub const TEST_SEASON_ID: i64 = 42;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn create_test_teams(count: i64) -> Vec<TeamInput> {
    (1..=count)
        .map(|id| TeamInput {
            team_id: id,
            name: format!("Team {id}"),
            active: true,
        })
        .collect()
}

/// Six teams, Saturdays from 2026-03-07 to 2026-05-30, two fields, two
/// timeslots, four games per date.
pub fn create_test_request() -> GenerateScheduleRequest {
    GenerateScheduleRequest {
        season_id: TEST_SEASON_ID,
        organization_id: 7,
        name: String::from("Spring League"),
        start_date: String::from("2026-03-07"),
        end_date: String::from("2026-05-30"),
        legs: 1,
        max_games_per_date: 4,
        alternate_home_away: true,
        match_weekday: None,
        fields: vec![
            FieldInput {
                field_id: 1,
                name: String::from("North Pitch"),
                active: true,
            },
            FieldInput {
                field_id: 2,
                name: String::from("South Pitch"),
                active: true,
            },
        ],
        timeslots: vec![
            TimeslotInput {
                timeslot_id: 1,
                name: String::from("Morning"),
                start_time: String::from("09:00"),
                end_time: String::from("10:30"),
                default_active: true,
                sort_order: 1,
            },
            TimeslotInput {
                timeslot_id: 2,
                name: String::from("Midday"),
                start_time: String::from("11:00"),
                end_time: String::from("12:30"),
                default_active: true,
                sort_order: 2,
            },
        ],
        special_dates: Vec::new(),
        flex_cadence: None,
        overflow_timeslot_id: None,
        flex_policy: None,
        teams: create_test_teams(6),
    }
}
