use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Default number of entries kept before the oldest ones are evicted.
pub const DEFAULT_LOG_CAPACITY: usize = 1000;

/// Ordered, append-only list of log lines shown in the panel.
///
/// Entries are never reordered or deduplicated. With a capacity set, the feed
/// behaves as a ring buffer: appending to a full feed drops the oldest entry
/// and counts it in [`LogFeed::evicted`].
#[derive(Debug, Clone)]
pub struct LogFeed {
    entries: VecDeque<String>,
    capacity: Option<NonZeroUsize>,
    evicted: u64,
    resets: u64,
}

impl LogFeed {
    /// Creates a feed holding at most `capacity` entries. `0` means no limit.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity);
        Self {
            entries: VecDeque::with_capacity(capacity.map_or(0, NonZeroUsize::get)),
            capacity,
            evicted: 0,
            resets: 0,
        }
    }

    pub fn unbounded() -> Self {
        Self::new(0)
    }

    pub fn append(&mut self, entry: impl Into<String>) {
        if let Some(capacity) = self.capacity {
            if self.entries.len() >= capacity.get() {
                self.entries.pop_front();
                self.evicted += 1;
            }
        }
        self.entries.push_back(entry.into());
    }

    /// Clears the feed. Called once at the start of every session.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.evicted = 0;
        self.resets += 1;
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Number of entries dropped since the last reset.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Number of times the feed has been reset, i.e. how many sessions it has seen.
    pub fn resets(&self) -> u64 {
        self.resets
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity.map(NonZeroUsize::get)
    }
}

impl Default for LogFeed {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}
