// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Candidate match-day enumeration.
//!
//! Walks the configured recurring weekday from the season start to the
//! season end and tags every date with its type and capacity.
//!
//! ## Rules
//!
//! - Holiday and maintenance dates are removed entirely
//! - Explicitly tagged flex dates are flex
//! - Every `n`-th remaining date is flex when a cadence is configured
//! - Every date gets the same capacity, from [`ScheduleConfig::date_capacity`]

use crate::config::ScheduleConfig;
use crate::error::DomainError;
use crate::types::{MatchDayType, SpecialDateKind};
use time::{Date, Duration};

/// A date the scheduler may place games on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateDate {
    /// The calendar date.
    pub date: Date,
    /// Regular or flex.
    pub day_type: MatchDayType,
    /// Maximum number of games on this date.
    pub capacity: usize,
    /// Whether the date lies past the configured season end.
    pub beyond_season_end: bool,
}

/// Enumerates candidate dates between the season start and end.
///
/// # Errors
///
/// Returns an error if date arithmetic overflows.
pub fn candidate_dates(config: &ScheduleConfig) -> Result<Vec<CandidateDate>, DomainError> {
    let mut dates: Vec<CandidateDate> = Vec::new();
    let mut current: Date = first_match_weekday(config.start_date, config)?;
    let capacity: usize = config.date_capacity();
    let cadence: u32 = config.flex_cadence.unwrap_or(0);
    let mut playable: u32 = 0;

    while current <= config.end_date {
        let special: Option<SpecialDateKind> = config.special_kind(current);
        if !special.is_some_and(|kind| kind.excludes_date()) {
            playable += 1;
            let on_cadence: bool = cadence > 0 && playable % cadence == 0;
            let day_type: MatchDayType =
                if special == Some(SpecialDateKind::Flex) || on_cadence {
                    MatchDayType::Flex
                } else {
                    MatchDayType::Regular
                };
            dates.push(CandidateDate {
                date: current,
                day_type,
                capacity,
                beyond_season_end: false,
            });
        }
        current = next_week(current)?;
    }

    Ok(dates)
}

/// Returns the next playable recurring date after `previous`.
///
/// Used to extend the calendar past the season end. When no date has been
/// enumerated yet, the search starts the day after the season end.
/// Extension dates are regular unless explicitly tagged flex.
///
/// # Errors
///
/// Returns an error if date arithmetic overflows.
pub fn extension_date(
    previous: Option<Date>,
    config: &ScheduleConfig,
) -> Result<CandidateDate, DomainError> {
    let mut current: Date = match previous {
        Some(date) => next_week(date)?,
        None => {
            let after_end: Date =
                config
                    .end_date
                    .next_day()
                    .ok_or_else(|| DomainError::DateArithmeticOverflow {
                        operation: format!("advancing past season end {}", config.end_date),
                    })?;
            first_match_weekday(after_end, config)?
        }
    };
    loop {
        match config.special_kind(current) {
            Some(kind) if kind.excludes_date() => current = next_week(current)?,
            special => {
                let day_type: MatchDayType = if special == Some(SpecialDateKind::Flex) {
                    MatchDayType::Flex
                } else {
                    MatchDayType::Regular
                };
                return Ok(CandidateDate {
                    date: current,
                    day_type,
                    capacity: config.date_capacity(),
                    beyond_season_end: true,
                });
            }
        }
    }
}

/// Returns the first configured weekday on or after `start`.
fn first_match_weekday(start: Date, config: &ScheduleConfig) -> Result<Date, DomainError> {
    let offset: i64 = i64::from(
        (config.match_weekday.number_days_from_monday() + 7
            - start.weekday().number_days_from_monday())
            % 7,
    );
    start
        .checked_add(Duration::days(offset))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("finding the first {} on or after {start}", config.match_weekday),
        })
}

/// Advances a date by one week.
fn next_week(date: Date) -> Result<Date, DomainError> {
    date.checked_add(Duration::weeks(1))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("advancing one week past {date}"),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::{Month, Weekday};

    #[test]
    fn test_first_match_weekday_same_day() {
        let config: ScheduleConfig = crate::tests::helpers::create_test_schedule_config(1, 1, 1);
        // 2026-03-07 is a Saturday
        let start: Date = Date::from_calendar_date(2026, Month::March, 7).unwrap();
        assert_eq!(first_match_weekday(start, &config).unwrap(), start);
    }

    #[test]
    fn test_first_match_weekday_later_in_week() {
        let mut config: ScheduleConfig =
            crate::tests::helpers::create_test_schedule_config(1, 1, 1);
        config.match_weekday = Weekday::Sunday;
        // Monday 2026-03-02 -> Sunday 2026-03-08
        let start: Date = Date::from_calendar_date(2026, Month::March, 2).unwrap();
        assert_eq!(
            first_match_weekday(start, &config).unwrap(),
            Date::from_calendar_date(2026, Month::March, 8).unwrap()
        );
    }

    #[test]
    fn test_extension_date_skips_holiday() {
        let mut config: ScheduleConfig =
            crate::tests::helpers::create_test_schedule_config(1, 1, 1);
        let holiday: Date = Date::from_calendar_date(2026, Month::June, 6).unwrap();
        config.special_dates.push(crate::SpecialDate::new(
            holiday,
            SpecialDateKind::Holiday,
            None,
        ));
        let after: Date = Date::from_calendar_date(2026, Month::May, 30).unwrap();
        let next: CandidateDate = extension_date(Some(after), &config).unwrap();
        assert_eq!(
            next.date,
            Date::from_calendar_date(2026, Month::June, 13).unwrap()
        );
        assert!(next.beyond_season_end);
    }

    #[test]
    fn test_extension_date_without_previous_starts_after_season_end() {
        let config: ScheduleConfig = crate::tests::helpers::create_test_schedule_config(1, 1, 1);
        // Season ends Saturday 2026-05-30
        let next: CandidateDate = extension_date(None, &config).unwrap();
        assert_eq!(
            next.date,
            Date::from_calendar_date(2026, Month::June, 6).unwrap()
        );
    }
}
