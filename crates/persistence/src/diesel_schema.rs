// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    generation_logs (log_id) {
        log_id -> BigInt,
        season_id -> BigInt,
        organization_id -> BigInt,
        success -> Integer,
        message -> Text,
        details_json -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    match_days (match_day_id) {
        match_day_id -> BigInt,
        season_id -> BigInt,
        number -> Integer,
        match_date -> Text,
        leg -> Integer,
        day_type -> Text,
        capacity -> Integer,
        beyond_season_end -> Integer,
    }
}

diesel::table! {
    scheduled_fixtures (fixture_id) {
        fixture_id -> BigInt,
        match_day_id -> BigInt,
        home_team_id -> BigInt,
        away_team_id -> BigInt,
        leg -> Integer,
        round -> Integer,
        field_id -> BigInt,
        timeslot_id -> BigInt,
        scheduled_time -> Text,
        match_number -> Integer,
        is_overflow -> Integer,
    }
}

diesel::table! {
    seasons (season_id) {
        season_id -> BigInt,
        organization_id -> BigInt,
        name -> Text,
        is_active -> Integer,
        created_at -> Text,
        activated_at -> Nullable<Text>,
    }
}

diesel::joinable!(match_days -> seasons (season_id));
diesel::joinable!(scheduled_fixtures -> match_days (match_day_id));

diesel::allow_tables_to_appear_in_same_query!(
    generation_logs,
    match_days,
    scheduled_fixtures,
    seasons,
);
