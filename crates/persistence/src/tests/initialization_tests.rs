// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_test_persistence;
use crate::{CatalogKind, Persistence, PersistenceError};

#[test]
fn test_in_memory_databases_are_isolated() {
    let first: Persistence = create_test_persistence();
    let second: Persistence = create_test_persistence();

    first
        .create_catalog_entry(CatalogKind::Departments, "Finance", None)
        .unwrap();

    assert_eq!(first.list_catalog(CatalogKind::Departments).unwrap().len(), 1);
    assert!(second.list_catalog(CatalogKind::Departments).unwrap().is_empty());
}

#[test]
fn test_foreign_keys_are_enforced() {
    let persistence: Persistence = create_test_persistence();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_seed_data_is_present() {
    let persistence: Persistence = create_test_persistence();

    let roles: Vec<String> = persistence
        .list_catalog(CatalogKind::Roles)
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert!(roles.contains(&String::from("Senior Supervisor")));
    assert!(roles.contains(&String::from("Regular Employee")));

    let leave_types = persistence.list_leave_types().unwrap();
    let annual = leave_types.iter().find(|t| t.name == "Annual").unwrap();
    assert_eq!(annual.default_days, 20);
    assert_eq!(leave_types.len(), 3);
}

#[test]
fn test_new_store_is_empty() {
    let persistence: Persistence = create_test_persistence();
    assert!(persistence.is_empty().unwrap());
}

#[test]
fn test_file_database_can_be_backed_up() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("hrdesk.db");
    let backup_path = dir.path().join("hrdesk-backup.db");

    let persistence: Persistence = Persistence::new_with_file(&db_path).unwrap();
    persistence
        .create_catalog_entry(CatalogKind::Departments, "Operations", None)
        .unwrap();
    persistence.backup_to(&backup_path).unwrap();

    let restored: Persistence = Persistence::new_with_file(&backup_path).unwrap();
    let departments = restored.list_catalog(CatalogKind::Departments).unwrap();
    assert_eq!(departments.len(), 1);
    assert_eq!(departments[0].name, "Operations");
}

#[test]
fn test_in_memory_database_cannot_be_backed_up() {
    let persistence: Persistence = create_test_persistence();
    let dir = tempfile::tempdir().unwrap();

    let result = persistence.backup_to(&dir.path().join("backup.db"));
    assert!(matches!(result, Err(PersistenceError::BackupFailed(_))));
}
