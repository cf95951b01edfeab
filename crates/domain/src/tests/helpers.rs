// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Field, ScheduleConfig, Team, Timeslot, TraceEvent};
use std::collections::BTreeMap;
use time::{Date, Month, Time};

/// Returns a date in the 2026 test season.
pub fn create_test_date(month: Month, day: u8) -> Date {
    Date::from_calendar_date(2026, month, day).unwrap()
}

/// Creates `count` active teams with ids `1..=count`.
pub fn create_test_teams(count: i64) -> Vec<Team> {
    (1..=count)
        .map(|id| Team::new(id, &format!("Team {id}"), true))
        .collect()
}

/// Creates `count` active fields with ids `1..=count`.
pub fn create_test_fields(count: i64) -> Vec<Field> {
    (1..=count)
        .map(|id| Field::new(id, &format!("Field {id}"), true))
        .collect()
}

/// Creates `count` default-active two-hour timeslots starting at 09:00.
pub fn create_test_timeslots(count: i64) -> Vec<Timeslot> {
    (1..=count)
        .map(|id| {
            let hour: u8 = u8::try_from(7 + 2 * id).unwrap();
            Timeslot::new(
                id,
                &format!("Slot {id}"),
                Time::from_hms(hour, 0, 0).unwrap(),
                Time::from_hms(hour + 1, 30, 0).unwrap(),
                true,
                u32::try_from(id).unwrap(),
            )
        })
        .collect()
}

/// Creates a Saturday season from 2026-03-07 to 2026-05-30 (13 Saturdays).
pub fn create_test_schedule_config(
    fields: i64,
    timeslots: i64,
    max_games_per_date: usize,
) -> ScheduleConfig {
    ScheduleConfig::new(
        create_test_date(Month::March, 7),
        create_test_date(Month::May, 30),
        max_games_per_date,
        create_test_fields(fields),
        create_test_timeslots(timeslots),
    )
}

/// Returns the longest run of games without a rest event, per team.
pub fn longest_game_streaks(trace: &[TraceEvent]) -> BTreeMap<i64, u32> {
    let mut current: BTreeMap<i64, u32> = BTreeMap::new();
    let mut longest: BTreeMap<i64, u32> = BTreeMap::new();
    for event in trace {
        match event {
            TraceEvent::Played { team_id, .. } => {
                let streak: &mut u32 = current.entry(*team_id).or_insert(0);
                *streak += 1;
                let best: &mut u32 = longest.entry(*team_id).or_insert(0);
                *best = (*best).max(*streak);
            }
            TraceEvent::Rested { team_id, .. } => {
                current.insert(*team_id, 0);
            }
        }
    }
    longest
}
