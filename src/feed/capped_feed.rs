//! CappedFeed
//!
//! Bounded, insertion-ordered event store with live tail subscriptions.
//! Records are keyed by a monotonic big-endian sequence number inside a
//! dedicated sled tree; once the tree holds `capacity` records, every
//! insert removes the single oldest record in the same atomic batch.
//!
//! Tail subscribers receive every record inserted strictly after their
//! subscription, in insertion order, over an unbounded channel. The
//! consumer suspends on the channel when the feed is quiet; there is no
//! polling and no termination on inactivity.

use nanoid::nanoid;
use parking_lot::Mutex;
use sled::Batch;
use tokio::sync::mpsc;
use tracing::debug;
use tracing::instrument;
use tracing::trace;
use tracing::warn;

use crate::constants::USER_EVENTS_TREE;
use crate::CappedUser;
use crate::FeedError;
use crate::FeedTail;
use crate::Result;
use crate::StorageError;
use crate::StoreRecord;

/// Fill state of the capped tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    Empty,
    /// Below capacity; inserts only append
    Filling,
    /// At capacity; every insert evicts the single oldest record
    Full,
}

pub struct CappedFeed {
    tree: sled::Tree,

    capacity: usize,

    /// Guards the sequence counter, the subscriber list and the
    /// insert-evict batch, so no subscriber can observe a state above
    /// `capacity` or miss a post-subscription insert.
    inner: Mutex<FeedInner>,
}

struct FeedInner {
    next_seq: u64,
    subscribers: Vec<mpsc::UnboundedSender<std::result::Result<CappedUser, FeedError>>>,
}

impl CappedFeed {
    /// Opens the capped tree inside `db`, recovering the sequence counter
    /// from the highest persisted key.
    pub fn open(
        db: &sled::Db,
        capacity: usize,
    ) -> Result<Self> {
        let tree = db.open_tree(USER_EVENTS_TREE)?;

        let next_seq = match tree.last()? {
            Some((key, _)) => Self::key_to_seq(&key)? + 1,
            None => 0,
        };
        debug!("capped feed opened, len = {}, next_seq = {}", tree.len(), next_seq);

        Ok(Self {
            tree,
            capacity,
            inner: Mutex::new(FeedInner {
                next_seq,
                subscribers: Vec::new(),
            }),
        })
    }

    /// Inserts `record`, evicting the oldest record when the tree is full.
    ///
    /// Never rejects on a full feed; eviction makes room inside the same
    /// atomic batch. Live subscribers observe the record immediately after
    /// the batch is applied, in insertion order.
    pub fn insert(
        &self,
        mut record: CappedUser,
    ) -> Result<CappedUser> {
        if record.record_id().is_none() {
            record.set_record_id(nanoid!());
        }
        let value = bincode::serialize(&record)?;

        let mut inner = self.inner.lock();

        let mut batch = Batch::default();
        if self.tree.len() >= self.capacity {
            if let Some((oldest, _)) = self.tree.first()? {
                batch.remove(oldest);
            }
        }
        batch.insert(&Self::seq_to_key(inner.next_seq), value);
        self.tree.apply_batch(batch)?;

        inner.next_seq += 1;
        // dropped tails unregister here
        inner.subscribers.retain(|tx| tx.send(Ok(record.clone())).is_ok());

        trace!("feed insert, seq = {}, len = {}", inner.next_seq - 1, self.tree.len());
        Ok(record)
    }

    /// Subscribes to the live tail: every record inserted after this call,
    /// in insertion order, indefinitely. History is never replayed.
    /// Dropping the returned stream cancels the subscription without
    /// affecting other subscribers.
    pub fn tail(&self) -> FeedTail {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.lock().subscribers.push(tx);
        debug!("feed tail subscribed");
        FeedTail::new(rx)
    }

    /// Historical snapshot read: at most `capacity` records, oldest first.
    /// Distinct from [`CappedFeed::tail`], which never replays history.
    pub fn scan(&self) -> Result<Vec<CappedUser>> {
        self.tree
            .iter()
            .map(|item| {
                let (key, value) = item?;
                bincode::deserialize(value.as_ref()).map_err(|_| {
                    StorageError::DataCorruption {
                        location: format!("{}/{:?}", USER_EVENTS_TREE, key),
                    }
                    .into()
                })
            })
            .collect()
    }

    /// Clears the feed and terminates every active tail with
    /// [`FeedError::Teardown`]; subscribers must resubscribe.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Result<()> {
        let mut inner = self.inner.lock();

        self.tree.clear()?;
        inner.next_seq = 0;

        let torn_down = inner.subscribers.len();
        for tx in inner.subscribers.drain(..) {
            // a send failure only means the subscriber is already gone
            let _ = tx.send(Err(FeedError::Teardown));
        }
        if torn_down > 0 {
            warn!("feed reset tore down {} active subscription(s)", torn_down);
        }
        Ok(())
    }

    pub fn phase(&self) -> FeedPhase {
        match self.tree.len() {
            0 => FeedPhase::Empty,
            n if n < self.capacity => FeedPhase::Filling,
            _ => FeedPhase::Full,
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Helper: convert sequence to big-endian key bytes
    fn seq_to_key(seq: u64) -> [u8; 8] {
        seq.to_be_bytes()
    }

    /// Helper: convert key bytes back to a sequence
    fn key_to_seq(key: &[u8]) -> Result<u64> {
        let bytes: [u8; 8] = key.try_into().map_err(|_| StorageError::DataCorruption {
            location: format!("{}/key len {}", USER_EVENTS_TREE, key.len()),
        })?;
        Ok(u64::from_be_bytes(bytes))
    }
}

impl std::fmt::Debug for CappedFeed {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("CappedFeed")
            .field("capacity", &self.capacity)
            .field("len", &self.tree.len())
            .field("phase", &self.phase())
            .finish()
    }
}
