use chrono::NaiveDate;
use classroom_core::db::migrations::latest_version;
use classroom_core::db::{open_db, open_db_in_memory, DbError};
use classroom_core::{
    ClassDraft, ClassStore, Clock, FixedClock, KeyValueStorage, LoadSource, SequentialIds,
    SqliteStorage, StorageError, TaskPatch, TaskStatus, TaskStore,
};
use std::rc::Rc;

fn clock() -> Rc<dyn Clock> {
    Rc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()))
}

#[test]
fn migrations_create_kv_store_and_set_user_version() {
    let conn = open_db_in_memory().unwrap();

    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());

    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_store'
            );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    {
        let conn = open_db(&path).unwrap();
        conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version() + 1))
            .unwrap();
    }

    let err = SqliteStorage::open(&path).err().unwrap();
    assert!(matches!(
        err,
        StorageError::Db(DbError::UnsupportedSchemaVersion { .. })
    ));
}

#[test]
fn set_get_remove_items() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    assert!(storage.get_item("tasks").unwrap().is_none());

    storage.set_item("tasks", "[]").unwrap();
    storage.set_item("tasks", "[1,2]").unwrap();
    assert_eq!(storage.get_item("tasks").unwrap().as_deref(), Some("[1,2]"));

    let rows: i64 = storage
        .connection()
        .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);

    storage.remove_item("tasks").unwrap();
    storage.remove_item("tasks").unwrap();
    assert!(storage.get_item("tasks").unwrap().is_none());
}

#[test]
fn stores_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("classroom.sqlite3");

    let created_id = {
        let storage = SqliteStorage::open(&path).unwrap();
        let mut classes = ClassStore::open(&storage, Box::new(SequentialIds::new()), clock());
        let mut tasks = TaskStore::open(&storage, Box::new(SequentialIds::new()), clock());

        let created = classes.add(ClassDraft::new("Turma X", "d")).unwrap();
        tasks
            .update(1, TaskPatch::status(TaskStatus::Completed))
            .unwrap();
        created.id
    };

    let storage = SqliteStorage::open(&path).unwrap();
    let mut classes = ClassStore::new(&storage, Box::new(SequentialIds::new()), clock());
    assert_eq!(classes.load(), LoadSource::Persisted);
    assert_eq!(classes.get_by_id(created_id).unwrap().name, "Turma X");

    let tasks = TaskStore::open(&storage, Box::new(SequentialIds::new()), clock());
    assert_eq!(tasks.get_by_id(1).unwrap().status, TaskStatus::Completed);
    assert_eq!(tasks.get_by_id(2).unwrap().status, TaskStatus::Pending);
}

#[test]
fn malformed_row_value_falls_back_to_seed() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    storage.set_item("classes", "not json").unwrap();

    let mut classes = ClassStore::new(&storage, Box::new(SequentialIds::new()), clock());
    assert_eq!(classes.load(), LoadSource::Seed);
    assert_eq!(classes.len(), 2);
}

#[test]
fn non_text_row_value_is_reported_and_store_seeds() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    storage
        .connection()
        .execute(
            "INSERT INTO kv_store (key, value) VALUES ('classes', x'00ff');",
            [],
        )
        .unwrap();

    let err = storage.get_item("classes").err().unwrap();
    match err {
        StorageError::Db(DbError::CorruptValue { key }) => assert_eq!(key, "classes"),
        other => panic!("unexpected error: {other}"),
    }

    let mut classes = ClassStore::new(&storage, Box::new(SequentialIds::new()), clock());
    assert_eq!(classes.load(), LoadSource::Seed);
    assert_eq!(classes.len(), 2);
}
