// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar constraints consumed by the match-day scheduler.

use crate::types::{Field, SpecialDate, SpecialDateKind, Timeslot};
use serde::{Deserialize, Serialize};
use time::{Date, Weekday};

/// Consecutive games a team may play before it must rest.
pub const DEFAULT_REST_THRESHOLD: u32 = 5;

/// How the scheduler treats flex dates during placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FlexDatePolicy {
    /// Skip a flex date when the following date is regular and has room.
    #[default]
    PreferRegularOverFlex,
    /// Treat flex dates like any other date.
    Chronological,
}

/// Calendar constraints for one season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// First day of the season (inclusive).
    pub start_date: Date,
    /// Last day of the season (inclusive).
    pub end_date: Date,
    /// The recurring weekday games are played on.
    pub match_weekday: Weekday,
    /// Upper bound on games per date.
    pub max_games_per_date: usize,
    /// Fields in their display order.
    pub fields: Vec<Field>,
    /// All configured timeslots, including a designated overflow slot.
    pub timeslots: Vec<Timeslot>,
    /// Holidays, flex and maintenance dates.
    pub special_dates: Vec<SpecialDate>,
    /// Every `n`-th playable date is a flex date. `None` or `0` disables.
    pub flex_cadence: Option<u32>,
    /// Timeslot absorbing games beyond the regular field × timeslot grid.
    pub overflow_timeslot_id: Option<i64>,
    /// Flex date placement policy.
    pub flex_policy: FlexDatePolicy,
    /// Consecutive games before a mandatory rest.
    pub rest_threshold: u32,
}

impl ScheduleConfig {
    /// Creates a configuration with Saturday match-days, no special dates,
    /// no flex cadence and the default rest threshold.
    ///
    /// # Arguments
    ///
    /// * `start_date` - First day of the season
    /// * `end_date` - Last day of the season
    /// * `max_games_per_date` - Upper bound on games per date
    /// * `fields` - Playing fields in display order
    /// * `timeslots` - Timeslots
    #[must_use]
    pub const fn new(
        start_date: Date,
        end_date: Date,
        max_games_per_date: usize,
        fields: Vec<Field>,
        timeslots: Vec<Timeslot>,
    ) -> Self {
        Self {
            start_date,
            end_date,
            match_weekday: Weekday::Saturday,
            max_games_per_date,
            fields,
            timeslots,
            special_dates: Vec::new(),
            flex_cadence: None,
            overflow_timeslot_id: None,
            flex_policy: FlexDatePolicy::PreferRegularOverFlex,
            rest_threshold: DEFAULT_REST_THRESHOLD,
        }
    }

    /// Returns the active fields in configured order.
    #[must_use]
    pub fn active_fields(&self) -> Vec<&Field> {
        self.fields.iter().filter(|field| field.active).collect()
    }

    /// Returns the default-active timeslots ordered by `sort_order`.
    ///
    /// The overflow timeslot is never part of the regular grid.
    #[must_use]
    pub fn active_timeslots(&self) -> Vec<&Timeslot> {
        let mut slots: Vec<&Timeslot> = self
            .timeslots
            .iter()
            .filter(|slot| slot.default_active)
            .filter(|slot| Some(slot.timeslot_id) != self.overflow_timeslot_id)
            .collect();
        slots.sort_by_key(|slot| (slot.sort_order, slot.timeslot_id));
        slots
    }

    /// Returns the designated overflow timeslot, if configured and present.
    #[must_use]
    pub fn overflow_timeslot(&self) -> Option<&Timeslot> {
        let overflow_id: i64 = self.overflow_timeslot_id?;
        self.timeslots
            .iter()
            .find(|slot| slot.timeslot_id == overflow_id)
    }

    /// Number of games the regular field × timeslot grid holds.
    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.active_fields().len() * self.active_timeslots().len()
    }

    /// Number of games a single date may hold.
    ///
    /// An overflow timeslot adds one extra row of fields to the grid.
    #[must_use]
    pub fn date_capacity(&self) -> usize {
        let fields: usize = self.active_fields().len();
        let rows: usize =
            self.active_timeslots().len() + usize::from(self.overflow_timeslot().is_some());
        self.max_games_per_date.min(fields * rows)
    }

    /// Returns the special tag of a date, if any.
    ///
    /// When a date is tagged more than once, an excluding tag wins.
    #[must_use]
    pub fn special_kind(&self, date: Date) -> Option<SpecialDateKind> {
        let mut kind: Option<SpecialDateKind> = None;
        for special in self.special_dates.iter().filter(|s| s.date == date) {
            if special.kind.excludes_date() {
                return Some(special.kind);
            }
            kind = Some(special.kind);
        }
        kind
    }
}
