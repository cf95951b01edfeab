// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `schedule`: Season registration, schedule replacement and generation logs
//!
//! Everything uses Diesel DSL except `last_insert_rowid()`, which comes
//! from the `backend` module.

pub mod schedule;

pub use schedule::{
    clear_season_schedule, insert_fixtures, insert_match_days, mark_season_active,
    record_generation_log, replace_season_schedule, upsert_season,
};
