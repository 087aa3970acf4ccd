use std::pin::Pin;
use std::task::Context;
use std::task::Poll;

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::CappedUser;
use crate::FeedError;

/// Live, unbounded tail over the capped feed.
///
/// Yields every record inserted after the subscription began, in insertion
/// order. Polling suspends while the feed is quiet. The stream ends only
/// when the subscriber drops it (cancellation) or after an
/// `Err(FeedError::Teardown)` item when the feed was reset.
pub struct FeedTail {
    inner: UnboundedReceiverStream<std::result::Result<CappedUser, FeedError>>,
}

impl FeedTail {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<std::result::Result<CappedUser, FeedError>>) -> Self {
        Self {
            inner: UnboundedReceiverStream::new(rx),
        }
    }
}

impl Stream for FeedTail {
    type Item = std::result::Result<CappedUser, FeedError>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
