//! UserService
//!
//! Façade over the stores, the join and the capped feed. This is the
//! surface an external request-handling layer talks to: every operation
//! either resolves with a value (possibly empty) or fails with one of the
//! crate's error kinds. Field validation happens here, before any store
//! call; absence is always `Ok(None)`, never an error.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use tracing::instrument;

use crate::AsyncStore;
use crate::CappedFeed;
use crate::CappedUser;
use crate::Department;
use crate::EntityStream;
use crate::FeedTail;
use crate::JoinService;
use crate::Result;
use crate::User;
use crate::UserDepartmentView;

pub struct UserService<US, DS>
where
    US: AsyncStore<User>,
    DS: AsyncStore<Department>,
{
    user_store: Arc<US>,

    department_store: Arc<DS>,

    join_service: JoinService<US, DS>,

    feed: Arc<CappedFeed>,
}

impl<US, DS> UserService<US, DS>
where
    US: AsyncStore<User>,
    DS: AsyncStore<Department>,
{
    pub fn new(
        user_store: Arc<US>,
        department_store: Arc<DS>,
        feed: Arc<CappedFeed>,
    ) -> Self {
        let join_service = JoinService::new(user_store.clone(), department_store.clone());
        Self {
            user_store,
            department_store,
            join_service,
            feed,
        }
    }

    /// Validates the draft against every field constraint, then persists
    /// it. Rejected drafts never reach the store.
    pub async fn create_user(
        &self,
        draft: User,
    ) -> Result<User> {
        draft.validate()?;
        self.user_store.create(draft).await
    }

    pub fn list_users(&self) -> EntityStream<User> {
        self.user_store.find_all()
    }

    pub async fn get_user(
        &self,
        id: &str,
    ) -> Result<Option<User>> {
        self.user_store.find_by_id(id).await
    }

    /// Validates the draft, then replaces the record stored under `id`.
    /// Resolves empty when `id` does not exist; the identity is never
    /// changed by an update.
    pub async fn update_user(
        &self,
        id: &str,
        draft: User,
    ) -> Result<Option<User>> {
        draft.validate()?;
        self.user_store.update(id, draft).await
    }

    pub async fn delete_user(
        &self,
        id: &str,
    ) -> Result<Option<()>> {
        self.user_store.delete(id).await
    }

    pub fn list_users_by_age(
        &self,
        age: u32,
    ) -> EntityStream<User> {
        self.user_store.find_matching(Box::new(move |user: &User| user.age == age))
    }

    pub fn list_users_by_ids(
        &self,
        ids: HashSet<String>,
    ) -> EntityStream<User> {
        self.user_store.find_by_ids(ids)
    }

    pub async fn get_user_department_view(
        &self,
        id: &str,
    ) -> Result<Option<UserDepartmentView>> {
        self.join_service.fetch_user_and_department(id).await
    }

    /// Live tail of user events inserted after this call. The consumer
    /// cancels by dropping the stream.
    pub fn subscribe_user_events(&self) -> FeedTail {
        self.feed.tail()
    }

    /// Insert side of the event feed; eviction keeps the feed bounded.
    pub async fn publish_user_event(
        &self,
        event: CappedUser,
    ) -> Result<CappedUser> {
        self.feed.insert(event)
    }

    /// Clears both stores and loads the given records. Initialization
    /// only; seeded records bypass boundary validation the same way any
    /// out-of-band store write would.
    #[instrument(skip_all)]
    pub async fn seed(
        &self,
        users: Vec<User>,
        departments: Vec<Department>,
    ) -> Result<()> {
        self.user_store.delete_all().await?;
        self.department_store.delete_all().await?;

        for user in users {
            let stored = self.user_store.create(user).await?;
            info!("User inserted from seed: {:?}", stored.id);
        }
        for department in departments {
            let stored = self.department_store.create(department).await?;
            info!("Department inserted from seed: {:?}", stored.id);
        }
        Ok(())
    }
}
