use std::collections::HashSet;
use std::marker::PhantomData;

use async_trait::async_trait;
use futures::stream;
use nanoid::nanoid;
use sled::IVec;
use tracing::instrument;
use tracing::trace;

use crate::AsyncStore;
use crate::EntityStream;
use crate::Error;
use crate::RecordPredicate;
use crate::Result;
use crate::StorageError;
use crate::StoreRecord;

/// Sled-backed [`AsyncStore`] adapter.
///
/// One tree per record kind; values are bincode-encoded, keys are the
/// store-assigned record ids. Sled reads and writes are page-cache fast,
/// so they run inline on the calling task the way the rest of the engine
/// does; nothing here performs blocking I/O on a request-accepting thread.
pub struct SledStore<T>
where
    T: StoreRecord,
{
    tree: sled::Tree,

    tree_name: String,

    _marker: PhantomData<fn() -> T>,
}

impl<T> SledStore<T>
where
    T: StoreRecord,
{
    pub fn new(
        db: &sled::Db,
        tree_name: &str,
    ) -> Result<Self> {
        let tree = db.open_tree(tree_name)?;
        Ok(Self {
            tree,
            tree_name: tree_name.to_string(),
            _marker: PhantomData,
        })
    }

    fn decode(
        tree_name: &str,
        key: &IVec,
        value: &IVec,
    ) -> Result<T> {
        bincode::deserialize(value.as_ref()).map_err(|_| {
            StorageError::DataCorruption {
                location: format!("{}/{}", tree_name, String::from_utf8_lossy(key)),
            }
            .into()
        })
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.tree.len()
    }
}

#[async_trait]
impl<T> AsyncStore<T> for SledStore<T>
where
    T: StoreRecord,
{
    async fn create(
        &self,
        mut record: T,
    ) -> Result<T> {
        let id = match record.record_id() {
            Some(id) => id.to_string(),
            None => {
                let id = nanoid!();
                record.set_record_id(id.clone());
                id
            }
        };

        let value = bincode::serialize(&record)?;
        self.tree.insert(id.as_bytes(), value)?;

        trace!("created record {} in {}", id, self.tree_name);
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn find_by_id(
        &self,
        id: &str,
    ) -> Result<Option<T>> {
        match self.tree.get(id.as_bytes())? {
            Some(value) => Self::decode(&self.tree_name, &IVec::from(id.as_bytes()), &value).map(Some),
            None => Ok(None),
        }
    }

    fn find_all(&self) -> EntityStream<T> {
        let tree_name = self.tree_name.clone();
        Box::pin(stream::iter(self.tree.iter().map(move |item| match item {
            Ok((key, value)) => Self::decode(&tree_name, &key, &value),
            Err(e) => Err(Error::from(e)),
        })))
    }

    fn find_matching(
        &self,
        predicate: RecordPredicate<T>,
    ) -> EntityStream<T> {
        let tree_name = self.tree_name.clone();
        Box::pin(stream::iter(self.tree.iter().filter_map(move |item| {
            match item {
                Ok((key, value)) => match Self::decode(&tree_name, &key, &value) {
                    Ok(record) => predicate(&record).then_some(Ok(record)),
                    Err(e) => Some(Err(e)),
                },
                Err(e) => Some(Err(Error::from(e))),
            }
        })))
    }

    fn find_by_ids(
        &self,
        ids: HashSet<String>,
    ) -> EntityStream<T> {
        let tree = self.tree.clone();
        let tree_name = self.tree_name.clone();
        Box::pin(stream::iter(ids.into_iter().filter_map(move |id| {
            match tree.get(id.as_bytes()) {
                Ok(Some(value)) => {
                    Some(Self::decode(&tree_name, &IVec::from(id.as_bytes()), &value))
                }
                // missing ids are omitted, not reported
                Ok(None) => None,
                Err(e) => Some(Err(Error::from(e))),
            }
        })))
    }

    #[instrument(skip(self, record))]
    async fn update(
        &self,
        id: &str,
        mut record: T,
    ) -> Result<Option<T>> {
        if self.tree.get(id.as_bytes())?.is_none() {
            return Ok(None);
        }

        // identity is immutable once assigned
        record.set_record_id(id.to_string());
        let value = bincode::serialize(&record)?;
        self.tree.insert(id.as_bytes(), value)?;

        trace!("updated record {} in {}", id, self.tree_name);
        Ok(Some(record))
    }

    #[instrument(skip(self))]
    async fn delete(
        &self,
        id: &str,
    ) -> Result<Option<()>> {
        match self.tree.remove(id.as_bytes())? {
            Some(_) => Ok(Some(())),
            None => Ok(None),
        }
    }

    async fn delete_all(&self) -> Result<()> {
        self.tree.clear()?;
        Ok(())
    }
}

impl<T> std::fmt::Debug for SledStore<T>
where
    T: StoreRecord,
{
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("SledStore")
            .field("tree", &self.tree_name)
            .field("tree_len", &self.tree.len())
            .finish()
    }
}
