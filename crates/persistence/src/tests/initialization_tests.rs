// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{TEST_ORGANIZATION_ID, TEST_SEASON_ID};
use crate::{Persistence, PersistenceError, SeasonRecord};
use std::path::PathBuf;

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_enabled() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = Persistence::new_in_memory().unwrap();
    let mut db2: Persistence = Persistence::new_in_memory().unwrap();

    db1.save_season(TEST_SEASON_ID, TEST_ORGANIZATION_ID, "Spring League")
        .unwrap();

    assert!(db1.get_season(TEST_SEASON_ID).is_ok());
    assert_eq!(
        db2.get_season(TEST_SEASON_ID),
        Err(PersistenceError::SeasonNotFound(TEST_SEASON_ID))
    );
}

#[test]
fn test_file_database_survives_reopen() {
    let path: PathBuf = std::env::temp_dir().join(format!(
        "matchday_persistence_test_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        persistence
            .save_season(TEST_SEASON_ID, TEST_ORGANIZATION_ID, "Spring League")
            .unwrap();
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    let season: SeasonRecord = reopened.get_season(TEST_SEASON_ID).unwrap();
    assert_eq!(season.name, "Spring League");
    drop(reopened);

    for suffix in ["", "-wal", "-shm"] {
        let mut file: std::ffi::OsString = path.clone().into_os_string();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}
