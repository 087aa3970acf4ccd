use serde::Deserialize;
use serde::Serialize;

use crate::Department;
use crate::Salary;
use crate::User;

/// Read-only denormalized projection of a user and its department.
///
/// Built per request by the join and discarded after serialization; never
/// persisted. The three department fields stay `None` when the user's
/// department reference is unset or points at a record that no longer
/// exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDepartmentView {
    pub user_id: Option<String>,
    pub user_name: String,
    pub age: u32,
    pub salary: Salary,
    pub department_id: Option<String>,
    pub department_name: Option<String>,
    pub location: Option<String>,
}

impl UserDepartmentView {
    pub fn assemble(
        user: User,
        department: Option<Department>,
    ) -> Self {
        let (department_id, department_name, location) = match department {
            Some(department) => (department.id, Some(department.name), Some(department.location)),
            None => (None, None, None),
        };

        Self {
            user_id: user.id,
            user_name: user.name,
            age: user.age,
            salary: user.salary,
            department_id,
            department_name,
            location,
        }
    }
}
