use serde::Deserialize;
use serde::Serialize;

use crate::Salary;
use crate::StoreRecord;

/// Event record held by the capped user feed.
///
/// A trimmed projection of [`crate::User`]; lives only inside the
/// fixed-capacity, oldest-evicting feed tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CappedUser {
    /// Store-assigned identifier; `None` until inserted into the feed
    pub id: Option<String>,

    pub name: String,

    pub age: u32,

    pub salary: Salary,
}

impl CappedUser {
    pub fn new(
        name: impl Into<String>,
        age: u32,
        salary: Salary,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            age,
            salary,
        }
    }
}

impl StoreRecord for CappedUser {
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
