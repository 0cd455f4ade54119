use review_core::{
    employee_exists, open_db_in_memory, Employee, EmployeeValidationError, RepoError,
    SqliteEmployeeRepository,
};

#[test]
fn create_and_find_employee() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);
    repo.create_table().unwrap();

    let created = repo.create("Lee", "Manager").unwrap();
    let id = created.id().unwrap();

    let found = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(found, created);
    assert!(repo.exists(id).unwrap());
    assert!(employee_exists(&conn, id).unwrap());
    assert!(!repo.exists(id + 1).unwrap());
    assert!(repo.find_by_id(id + 1).unwrap().is_none());
}

#[test]
fn blank_employee_name_is_rejected() {
    assert_eq!(
        Employee::new(" ", "Manager").unwrap_err(),
        EmployeeValidationError::BlankName
    );

    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);
    repo.create_table().unwrap();
    assert!(matches!(
        repo.create("", "Manager"),
        Err(RepoError::EmployeeValidation(_))
    ));
}

#[test]
fn blank_stored_name_surfaces_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);
    repo.create_table().unwrap();
    conn.execute(
        "INSERT INTO employees (id, name, job_title) VALUES (5, '  ', 'Manager');",
        [],
    )
    .unwrap();

    assert!(matches!(repo.find_by_id(5), Err(RepoError::InvalidData(_))));
    assert!(repo.exists(5).unwrap());
}

#[test]
fn lookup_without_employees_table_is_a_storage_error() {
    let conn = open_db_in_memory().unwrap();

    assert!(matches!(employee_exists(&conn, 1), Err(RepoError::Db(_))));
}

#[test]
fn employee_table_lifecycle_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    repo.create_table().unwrap();
    repo.create_table().unwrap();
    repo.drop_table().unwrap();
    repo.drop_table().unwrap();
}
