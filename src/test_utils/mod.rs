//! the test_utils folder here will share fixtures and helpers between unit
//! tests and integration tests

use chrono::Local;
use tempfile::TempDir;

use crate::Department;
use crate::Salary;
use crate::User;

static LOGGER_INIT: once_cell::sync::Lazy<()> = once_cell::sync::Lazy::new(|| {
    env_logger::init();
});

pub fn enable_logger() {
    *LOGGER_INIT;
    println!("setup logger for unit test.");
}

/// Opens a throwaway sled database; keep the returned [`TempDir`] alive for
/// as long as the database is used.
pub fn open_temp_db() -> (TempDir, sled::Db) {
    let temp_dir = tempfile::tempdir().expect("should create temp dir");
    let db = sled::Config::default()
        .path(temp_dir.path())
        .open()
        .expect("should open temp db");
    (temp_dir, db)
}

/// The canonical three-user seed: ages 30/55/40, salaries
/// 10000.00/20000.00/25000.00.
pub fn sample_users() -> Vec<User> {
    vec![
        seed_user("Suman Das", 30, "10000.00", "suman.das@abc.com"),
        seed_user("Arjun Das", 55, "20000.00", "Arjun.Das@abc.com"),
        seed_user("Saurabh Ganguly", 40, "25000.00", "Saurabh.Ganguly@abc.com"),
    ]
}

pub fn sample_departments() -> Vec<Department> {
    vec![
        Department::new("Mechanical", 1, "Mumbai"),
        Department::new("Computer", 2, "Bangalore"),
    ]
}

fn seed_user(
    name: &str,
    age: u32,
    salary: &str,
    email: &str,
) -> User {
    User {
        id: None,
        name: name.to_string(),
        age,
        salary: salary.parse().expect("should parse seed salary"),
        email: email.to_string(),
        insert_date: Local::now().date_naive(),
        department_id: None,
    }
}

/// A draft that passes every boundary constraint.
pub fn valid_draft(name: &str) -> User {
    User {
        id: None,
        name: name.to_string(),
        age: 28,
        salary: Salary::from_cents(555_555_500),
        email: format!("{}@abc.com", name.to_lowercase()),
        insert_date: Local::now().date_naive(),
        department_id: None,
    }
}
