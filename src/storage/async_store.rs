//! AsyncStore
//!
//! Non-blocking abstraction over persisted records. Single-record
//! operations resolve as futures; multi-record reads are lazily-produced
//! finite streams. Absence of a record is an `Ok(None)` resolution, never
//! an error.

use std::collections::HashSet;

use async_trait::async_trait;
use futures::stream::BoxStream;
#[cfg(test)]
use mockall::automock;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::Result;

/// Lazily-produced, finite scan over stored records. Each call produces a
/// fresh scan; an exhausted stream is not restartable.
pub type EntityStream<T> = BoxStream<'static, Result<T>>;

/// Boxed record predicate used by filtered scans.
pub type RecordPredicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// A record kind the store can persist.
///
/// Identity is opaque and store-assigned: absent before the first save,
/// present and stable afterwards.
pub trait StoreRecord: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    fn record_id(&self) -> Option<&str>;

    fn set_record_id(
        &mut self,
        id: String,
    );
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AsyncStore<T: StoreRecord>: Send + Sync + 'static {
    /// Assigns an identity if the record carries none, persists, and
    /// resolves with the stored record including the assigned identity.
    /// Field validation happens at the service boundary before this call.
    async fn create(
        &self,
        record: T,
    ) -> Result<T>;

    async fn find_by_id(
        &self,
        id: &str,
    ) -> Result<Option<T>>;

    /// All records of this kind. Order follows the store's key order.
    fn find_all(&self) -> EntityStream<T>;

    /// Records matching `predicate`, e.g. "age equals N".
    fn find_matching(
        &self,
        predicate: RecordPredicate<T>,
    ) -> EntityStream<T>;

    /// Only existing matches; missing ids are silently omitted.
    fn find_by_ids(
        &self,
        ids: HashSet<String>,
    ) -> EntityStream<T>;

    /// Replaces all mutable fields of the record stored under `id`,
    /// keeping the identity unchanged. Resolves `Ok(None)` when `id` does
    /// not exist; there is no upsert.
    async fn update(
        &self,
        id: &str,
        record: T,
    ) -> Result<Option<T>>;

    /// Resolves `Ok(None)` when `id` does not exist; repeated deletes of
    /// the same id keep resolving empty.
    async fn delete(
        &self,
        id: &str,
    ) -> Result<Option<()>>;

    /// Clears the store. Initialization/seeding only; not part of the
    /// externally-facing operation set.
    async fn delete_all(&self) -> Result<()>;
}
