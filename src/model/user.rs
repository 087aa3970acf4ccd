//! User record
//!
//! The canonical entity managed by the engine. Identity is store-assigned:
//! absent before the first save, present and immutable afterwards.

use chrono::Local;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::Salary;
use crate::StoreRecord;
use crate::ValidationError;

lazy_static! {
    static ref NAME_PATTERN: Regex =
        Regex::new(r"^[a-zA-Z0-9\-]{3,25}$").expect("invalid name pattern");
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email pattern");
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier; `None` until the record is first saved
    pub id: Option<String>,

    /// Customer name, 3-25 alphanumeric/hyphen characters
    pub name: String,

    /// Customer age, 18-65 inclusive
    pub age: u32,

    /// Two-fraction-digit amount between 1000.00 and 10,000,000,000.00
    pub salary: Salary,

    /// Customer email id
    pub email: String,

    /// Must not lie in the past at creation time
    pub insert_date: NaiveDate,

    /// Non-owning reference into the department store. The target may not
    /// exist; absence is handled by the join, not treated as an error.
    pub department_id: Option<String>,
}

impl User {
    /// Checks every field constraint and collects all violations, so the
    /// caller can surface the complete list in one rejection.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let mut violations = Vec::new();

        if !NAME_PATTERN.is_match(&self.name) {
            violations.push(format!("name: '{}' does not match ^[a-zA-Z0-9-]{{3,25}}$", self.name));
        }
        if !(18..=65).contains(&self.age) {
            violations.push(format!("age: {} is outside 18..=65", self.age));
        }
        if !self.salary.is_positive() {
            violations.push(format!("salary: {} is not positive", self.salary));
        } else if !self.salary.in_accepted_range() {
            violations.push(format!(
                "salary: {} is outside 1000.00..=10000000000.00",
                self.salary
            ));
        }
        if !EMAIL_PATTERN.is_match(&self.email) {
            violations.push(format!("email: '{}' is not a valid email address", self.email));
        }
        if self.insert_date < Local::now().date_naive() {
            violations.push(format!("insert_date: {} lies in the past", self.insert_date));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}

impl StoreRecord for User {
    fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_record_id(
        &mut self,
        id: String,
    ) {
        self.id = Some(id);
    }
}
