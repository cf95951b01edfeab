// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    TEST_SEASON_ID, create_test_persistence, create_test_season_config, create_test_teams,
};
use crate::{GenerationLogRecord, Persistence, PersistenceError, SeasonRecord};
use matchday::{CoreError, GenerationLog, GenerationOutcome, ScheduleStore, SeasonConfig, run};
use matchday_domain::MatchDay;

#[test]
fn test_record_and_list_generation_log() {
    let mut persistence: Persistence = create_test_persistence();
    let config: SeasonConfig = create_test_season_config(6);
    let outcome: GenerationOutcome = matchday::generate_season(&config).unwrap();
    let log: GenerationLog = GenerationLog::success(&config, &outcome);

    persistence.record_generation_log(&log).unwrap();

    let records: Vec<GenerationLogRecord> =
        persistence.list_generation_logs(TEST_SEASON_ID).unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].success);
    assert_eq!(records[0].message, log.message);
    assert_eq!(records[0].details, log);
    assert!(!records[0].created_at.is_empty());
}

#[test]
fn test_run_stores_schedule_and_success_log() {
    let mut persistence: Persistence = create_test_persistence();
    let config: SeasonConfig = create_test_season_config(6);

    let outcome: GenerationOutcome = run(&mut persistence, &config).unwrap();

    let stored: Vec<MatchDay> = persistence.list_match_days(TEST_SEASON_ID).unwrap();
    assert_eq!(stored, outcome.match_days);

    let records: Vec<GenerationLogRecord> =
        persistence.list_generation_logs(TEST_SEASON_ID).unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].success);
    assert_eq!(records[0].details.fixtures, 15);
    assert_eq!(records[0].details.match_days, 5);
    assert!(records[0].details.statistics.is_some());
}

#[test]
fn test_run_with_invalid_config_logs_failure() {
    let mut persistence: Persistence = create_test_persistence();
    let mut config: SeasonConfig = create_test_season_config(6);
    config.teams = create_test_teams(1);

    let result: Result<GenerationOutcome, CoreError> = run(&mut persistence, &config);

    assert!(matches!(result, Err(CoreError::InvalidConfiguration(_))));
    assert!(persistence.list_match_days(TEST_SEASON_ID).unwrap().is_empty());

    let records: Vec<GenerationLogRecord> =
        persistence.list_generation_logs(TEST_SEASON_ID).unwrap();
    assert_eq!(records.len(), 1);
    assert!(!records[0].success);
    assert!(!records[0].details.errors.is_empty());
    assert!(records[0].details.statistics.is_none());
}

#[test]
fn test_run_registers_season_with_its_schedule() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let config: SeasonConfig = create_test_season_config(6);

    let outcome: GenerationOutcome = run(&mut persistence, &config).unwrap();

    let season: SeasonRecord = persistence.get_season(TEST_SEASON_ID).unwrap();
    assert_eq!(season.name, "Spring League");
    assert!(season.is_active);
    assert_eq!(
        persistence.list_match_days(TEST_SEASON_ID).unwrap(),
        outcome.match_days
    );
}

#[test]
fn test_failed_run_leaves_unknown_season_unregistered() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut config: SeasonConfig = create_test_season_config(6);
    config.teams = create_test_teams(1);

    let result: Result<GenerationOutcome, CoreError> = run(&mut persistence, &config);

    assert!(result.is_err());
    assert_eq!(
        persistence.get_season(TEST_SEASON_ID),
        Err(PersistenceError::SeasonNotFound(TEST_SEASON_ID))
    );
    // Logs are not tied to a registered season
    let records: Vec<GenerationLogRecord> =
        persistence.list_generation_logs(TEST_SEASON_ID).unwrap();
    assert_eq!(records.len(), 1);
    assert!(!records[0].success);
}

#[test]
fn test_generation_logs_listed_newest_first() {
    let mut persistence: Persistence = create_test_persistence();
    let mut config: SeasonConfig = create_test_season_config(6);
    run(&mut persistence, &config).unwrap();

    config.teams = create_test_teams(1);
    let _ = run(&mut persistence, &config);

    let records: Vec<GenerationLogRecord> =
        persistence.list_generation_logs(TEST_SEASON_ID).unwrap();
    assert_eq!(records.len(), 2);
    assert!(!records[0].success);
    assert!(records[1].success);
    assert!(records[0].log_id > records[1].log_id);

    // The failed run leaves the earlier schedule in place
    assert_eq!(persistence.list_match_days(TEST_SEASON_ID).unwrap().len(), 5);
}
