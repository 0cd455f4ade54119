use review_core::{
    open_db, open_db_in_memory, ReviewRepository, SqliteEmployeeRepository,
    SqliteReviewRepository,
};
use rusqlite::Connection;
use std::rc::Rc;

#[test]
fn open_db_enables_foreign_keys() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(foreign_keys(&conn), 1);
}

#[test]
fn file_database_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reviews.db");

    let id = {
        let conn = open_db(&path).unwrap();
        let employees = SqliteEmployeeRepository::new(&conn);
        employees.create_table().unwrap();
        let lee = employees.create("Lee", "Engineer").unwrap().id().unwrap();

        let reviews = SqliteReviewRepository::new(&conn);
        reviews.create_table().unwrap();
        let review = reviews.create(2024, "Durable", lee).unwrap();
        let id = review.borrow().id().unwrap();
        assert_eq!(reviews.cached_len(), 1);
        id
    };

    let conn = open_db(&path).unwrap();
    assert_eq!(foreign_keys(&conn), 1);
    let reviews = SqliteReviewRepository::new(&conn);
    let first = reviews.find_by_id(id).unwrap().unwrap();
    let second = reviews.get_all().unwrap();
    assert_eq!(first.borrow().summary(), "Durable");
    assert_eq!(second.len(), 1);
    assert!(Rc::ptr_eq(&first, &second[0]));
}

#[test]
fn foreign_key_blocks_deleting_reviewed_employee() {
    let conn = open_db_in_memory().unwrap();
    let employees = SqliteEmployeeRepository::new(&conn);
    employees.create_table().unwrap();
    let lee = employees.create("Lee", "Engineer").unwrap().id().unwrap();
    let reviews = SqliteReviewRepository::new(&conn);
    reviews.create_table().unwrap();
    reviews.create(2024, "Referenced", lee).unwrap();

    assert!(conn
        .execute("DELETE FROM employees WHERE id = ?1;", [lee])
        .is_err());
}

fn foreign_keys(conn: &Connection) -> i64 {
    conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap()
}
