//! Mock byte sources for test fixtures.
//!
//! `TrackedStream` counts how often it is polled and released, which lets
//! tests check laziness and the release-once contract of `EventStream`.

use std::collections::VecDeque;
use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;

/// Counters shared between a `TrackedStream` and the test.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    polls: Arc<AtomicUsize>,
    releases: Arc<AtomicUsize>,
}

impl Tracker {
    /// Number of times the source was polled for a chunk.
    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    /// Number of times the source was dropped.
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

/// A byte source that yields preset chunks and records polls and drops.
pub struct TrackedStream {
    items: VecDeque<io::Result<Bytes>>,
    tracker: Tracker,
}

impl TrackedStream {
    /// A source yielding `chunks` in order, then ending.
    pub fn new<I, T>(chunks: I) -> (Self, Tracker)
    where
        I: IntoIterator<Item = T>,
        T: Into<Bytes>,
    {
        let items = chunks.into_iter().map(|c| Ok(c.into())).collect();
        Self::from_items(items)
    }

    /// A source yielding `chunks`, then failing with `error`.
    #[allow(dead_code)]
    pub fn failing<I, T>(chunks: I, error: io::Error) -> (Self, Tracker)
    where
        I: IntoIterator<Item = T>,
        T: Into<Bytes>,
    {
        let mut items: VecDeque<io::Result<Bytes>> =
            chunks.into_iter().map(|c| Ok(c.into())).collect();
        items.push_back(Err(error));
        Self::from_items(items)
    }

    fn from_items(items: VecDeque<io::Result<Bytes>>) -> (Self, Tracker) {
        let tracker = Tracker::default();
        (
            Self {
                items,
                tracker: tracker.clone(),
            },
            tracker,
        )
    }
}

impl Stream for TrackedStream {
    type Item = io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.tracker.polls.fetch_add(1, Ordering::SeqCst);
        Poll::Ready(self.items.pop_front())
    }
}

impl Drop for TrackedStream {
    fn drop(&mut self) {
        self.tracker.releases.fetch_add(1, Ordering::SeqCst);
    }
}
