use chrono::NaiveDate;
use daylist_core::db::migrations::latest_version;
use daylist_core::db::{open_db, open_db_in_memory};
use daylist_core::{
    NewTask, RepoError, SqliteTaskRepository, Task, TaskRepository, TaskValidationError,
};
use rusqlite::Connection;

#[test]
fn add_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let created = repo.add_task(&NewTask::new("buy milk")).unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.name, "buy milk");
    assert!(!created.is_done);
    assert_eq!(created.deadline, None);

    let loaded = repo.get_task(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn ids_start_at_one_and_increase() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let first = repo.add_task(&NewTask::new("first")).unwrap();
    let second = repo.add_task(&NewTask::new("second")).unwrap();
    let third = repo.add_task(&NewTask::new("third")).unwrap();

    assert_eq!(first.id, 1);
    assert!(second.id > first.id);
    assert!(third.id > second.id);
}

#[test]
fn add_appends_to_the_end_of_the_list() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    repo.add_task(&NewTask::new("a")).unwrap();
    repo.add_task(&NewTask::new("b")).unwrap();
    repo.add_task(&NewTask::new("c")).unwrap();

    let names: Vec<String> = repo
        .list_tasks()
        .unwrap()
        .into_iter()
        .map(|task| task.name)
        .collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn add_with_deadline_stores_the_date() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let date = NaiveDate::from_ymd_opt(2030, 6, 15).unwrap();
    let created = repo
        .add_task(&NewTask::with_deadline("dentist", date))
        .unwrap();
    assert_eq!(created.deadline, Some(date));

    let loaded = repo.get_task(created.id).unwrap().unwrap();
    assert_eq!(loaded.deadline, Some(date));
}

#[test]
fn add_rejects_blank_name_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let err = repo.add_task(&NewTask::new("   ")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(TaskValidationError::BlankName)
    ));
    assert!(repo.list_tasks().unwrap().is_empty());
}

#[test]
fn update_replaces_only_the_matching_task() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let target = repo.add_task(&NewTask::new("target")).unwrap();
    let bystander = repo.add_task(&NewTask::new("bystander")).unwrap();

    let changed = Task {
        id: target.id,
        name: "target renamed".to_string(),
        is_done: true,
        deadline: Some(NaiveDate::from_ymd_opt(2031, 1, 2).unwrap()),
    };
    repo.update_task(&changed).unwrap();

    let loaded = repo.get_task(target.id).unwrap().unwrap();
    assert_eq!(loaded, changed);

    let untouched = repo.get_task(bystander.id).unwrap().unwrap();
    assert_eq!(untouched, bystander);
}

#[test]
fn update_does_not_change_list_position() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    repo.add_task(&NewTask::new("a")).unwrap();
    let middle = repo.add_task(&NewTask::new("b")).unwrap();
    repo.add_task(&NewTask::new("c")).unwrap();

    let changed = Task {
        id: middle.id,
        name: "b done".to_string(),
        is_done: true,
        deadline: None,
    };
    repo.update_task(&changed).unwrap();

    let names: Vec<String> = repo
        .list_tasks()
        .unwrap()
        .into_iter()
        .map(|task| task.name)
        .collect();
    assert_eq!(names, ["a", "b done", "c"]);
}

#[test]
fn update_missing_id_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let ghost = Task {
        id: 99,
        name: "ghost".to_string(),
        is_done: false,
        deadline: None,
    };
    let err = repo.update_task(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(99)));
    assert!(repo.list_tasks().unwrap().is_empty());
}

#[test]
fn update_rejects_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let created = repo.add_task(&NewTask::new("keep me")).unwrap();
    let blanked = Task {
        id: created.id,
        name: "  ".to_string(),
        is_done: false,
        deadline: None,
    };

    let err = repo.update_task(&blanked).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(TaskValidationError::BlankName)
    ));

    let loaded = repo.get_task(created.id).unwrap().unwrap();
    assert_eq!(loaded.name, "keep me");
}

#[test]
fn remove_deletes_the_row_for_good() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let doomed = repo.add_task(&NewTask::new("doomed")).unwrap();
    let kept = repo.add_task(&NewTask::new("kept")).unwrap();

    repo.remove_task(doomed.id).unwrap();

    assert_eq!(repo.get_task(doomed.id).unwrap(), None);
    let remaining = repo.list_tasks().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept.id);
}

#[test]
fn remove_missing_id_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let err = repo.remove_task(42).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
}

#[test]
fn removed_id_is_never_reassigned() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let first = repo.add_task(&NewTask::new("first")).unwrap();
    repo.remove_task(first.id).unwrap();

    let second = repo.add_task(&NewTask::new("second")).unwrap();
    assert!(second.id > first.id);
}

#[test]
fn list_is_stable_without_mutation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    repo.add_task(&NewTask::new("a")).unwrap();
    repo.add_task(&NewTask::new("b")).unwrap();
    repo.add_task(&NewTask::new("c")).unwrap();

    let first_read = repo.list_tasks().unwrap();
    let second_read = repo.list_tasks().unwrap();
    assert_eq!(first_read, second_read);
}

#[test]
fn get_missing_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    assert_eq!(repo.get_task(7).unwrap(), None);
}

#[test]
fn tasks_survive_reopening_a_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daylist.db");

    let stored = {
        let conn = open_db(&path).unwrap();
        let repo = SqliteTaskRepository::try_new(&conn).unwrap();
        let created = repo.add_task(&NewTask::new("persisted")).unwrap();
        let toggled = Task {
            is_done: true,
            ..created
        };
        repo.update_task(&toggled).unwrap();
        toggled
    };

    let conn = open_db(&path).unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let loaded = repo.get_task(stored.id).unwrap().unwrap();
    assert_eq!(loaded, stored);
}

#[test]
fn read_rejects_corrupt_is_done_value() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO tasks (name, is_done, position) VALUES ('broken', 7, 0);",
        [],
    )
    .unwrap();

    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let err = repo.list_tasks().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn read_rejects_corrupt_deadline_value() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO tasks (name, deadline, position) VALUES ('broken', 'tomorrow', 0);",
        [],
    )
    .unwrap();

    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let err = repo.list_tasks().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteTaskRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_tasks_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteTaskRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("tasks"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_tasks_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            is_done INTEGER NOT NULL DEFAULT 0,
            position INTEGER NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteTaskRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "tasks",
            column: "deadline"
        })
    ));
}
