//! JoinService
//!
//! Assembles the denormalized user/department view from two dependent
//! asynchronous lookups. The composition is strictly sequential: the
//! department key only exists once the user record has resolved, so the
//! second lookup is never issued in parallel with the first.

use std::sync::Arc;

use tracing::trace;

use crate::AsyncStore;
use crate::Department;
use crate::Result;
use crate::User;
use crate::UserDepartmentView;

pub struct JoinService<US, DS>
where
    US: AsyncStore<User>,
    DS: AsyncStore<Department>,
{
    user_store: Arc<US>,

    department_store: Arc<DS>,
}

impl<US, DS> JoinService<US, DS>
where
    US: AsyncStore<User>,
    DS: AsyncStore<Department>,
{
    pub fn new(
        user_store: Arc<US>,
        department_store: Arc<DS>,
    ) -> Self {
        Self {
            user_store,
            department_store,
        }
    }

    /// Resolves the flattened user/department projection for `user_id`.
    ///
    /// Resolves empty when the user does not exist; the department store
    /// is not consulted in that case. A user whose department reference is
    /// unset or dangling still produces a view, with the department fields
    /// left empty.
    pub async fn fetch_user_and_department(
        &self,
        user_id: &str,
    ) -> Result<Option<UserDepartmentView>> {
        let user = match self.user_store.find_by_id(user_id).await? {
            Some(user) => user,
            // short-circuit: the department lookup never runs
            None => return Ok(None),
        };

        let department = match user.department_id.as_deref() {
            Some(department_id) => self.department_store.find_by_id(department_id).await?,
            None => None,
        };
        if department.is_none() {
            trace!("user {} has no resolvable department", user_id);
        }

        Ok(Some(UserDepartmentView::assemble(user, department)))
    }
}
