use serde::Deserialize;
use serde::Serialize;

use crate::StoreRecord;

/// Organizational unit referenced by [`crate::User::department_id`].
///
/// Departments carry no back-reference to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Store-assigned identifier; `None` until the record is first saved
    pub id: Option<String>,

    pub name: String,

    /// Human-facing department number
    pub code: u32,

    pub location: String,
}

impl Department {
    pub fn new(
        name: impl Into<String>,
        code: u32,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            code,
            location: location.into(),
        }
    }
}

impl StoreRecord for Department {
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
