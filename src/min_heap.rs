use thiserror::Error;

/// Error returned when extracting from an empty [MinHeap].
///
/// Correct search logic never observes this: the engine stops expanding as
/// soon as the frontier is empty, so an occurrence indicates a broken loop
/// invariant rather than a recoverable condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("extract_min called on an empty queue")]
pub struct EmptyQueueError;

/// A binary min-heap of `(item, key)` entries ordered by ascending key.
///
/// Duplicate items are permitted: re-inserting an item under a better key is
/// how the search engine "decreases" keys, and the stale older entry is left
/// in place for the caller to discard when popped. There is no ordering
/// guarantee among entries with equal keys.
#[derive(Clone, Debug)]
pub struct MinHeap<T, K> {
    entries: Vec<(T, K)>,
}

impl<T, K> Default for MinHeap<T, K> {
    fn default() -> MinHeap<T, K> {
        MinHeap {
            entries: Vec::new(),
        }
    }
}

impl<T, K: Ord + Copy> MinHeap<T, K> {
    pub fn new() -> MinHeap<T, K> {
        MinHeap::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The minimum-key entry without removing it.
    pub fn peek(&self) -> Option<(&T, K)> {
        self.entries.first().map(|(item, key)| (item, *key))
    }

    /// All entries in arbitrary storage order, stale duplicates included.
    pub fn iter(&self) -> impl Iterator<Item = (&T, K)> {
        self.entries.iter().map(|(item, key)| (item, *key))
    }

    /// Appends an entry and sifts it up while its parent key is strictly
    /// greater.
    pub fn insert(&mut self, item: T, key: K) {
        self.entries.push((item, key));
        self.sift_up(self.entries.len() - 1);
    }

    /// Removes and returns the minimum-key entry. The last entry takes the
    /// root position and is sifted down toward the smaller child until heap
    /// order is restored.
    pub fn extract_min(&mut self) -> Result<(T, K), EmptyQueueError> {
        if self.entries.is_empty() {
            return Err(EmptyQueueError);
        }
        let min = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    fn sift_up(&mut self, mut ix: usize) {
        while ix > 0 {
            let parent = (ix - 1) / 2;
            if self.entries[parent].1 <= self.entries[ix].1 {
                break;
            }
            self.entries.swap(parent, ix);
            ix = parent;
        }
    }

    fn sift_down(&mut self, mut ix: usize) {
        loop {
            let left = 2 * ix + 1;
            if left >= self.entries.len() {
                break;
            }
            let right = left + 1;
            let smaller = if right < self.entries.len() && self.entries[right].1 < self.entries[left].1
            {
                right
            } else {
                left
            };
            if self.entries[ix].1 <= self.entries[smaller].1 {
                break;
            }
            self.entries.swap(ix, smaller);
            ix = smaller;
        }
    }
}
