//! One set of the index table, with LRU replacement.
//!
//! Entries are kept in a recency-ordered list: index 0 is the least
//! recently used, the last index the most recently used. Touching an entry
//! splices it to the MRU end; inserting into a full set drops the LRU
//! entry. The backing store is a plain `Vec`, so `find` and the splices are
//! O(W); W is small and fixed.

use super::entry::DeltaEntry;

/// A single associative set of delta history entries.
#[derive(Debug)]
pub struct LruSet {
    /// Entry capacity of the set.
    ways: usize,
    /// Resident entries, LRU first, MRU last. Tags are unique.
    entries: Vec<DeltaEntry>,
}

impl LruSet {
    /// Replacement algorithm identifier, for display output.
    pub const REPLACEMENT_ALGO: &'static str = "LRU";

    /// Creates an empty set with capacity `ways`.
    pub fn new(ways: usize) -> Self {
        Self {
            ways,
            entries: Vec::with_capacity(ways),
        }
    }

    /// Finds the entry with the given tag.
    ///
    /// # Returns
    ///
    /// The entry's current position in the recency order, or `None`.
    pub fn find(&self, tag: u64) -> Option<usize> {
        self.entries.iter().position(|e| e.tag() == tag)
    }

    /// Marks the entry at `index` as most recently used.
    ///
    /// Splices it to the MRU end; the relative order of the other entries
    /// is preserved.
    ///
    /// # Returns
    ///
    /// A mutable reference to the spliced entry, now at the MRU position.
    pub fn touch(&mut self, index: usize) -> &mut DeltaEntry {
        let entry = self.entries.remove(index);
        self.entries.push(entry);
        self.entries.last_mut().unwrap()
    }

    /// Inserts a new entry at the MRU position.
    ///
    /// When the set is full the LRU entry is dropped first. The caller must
    /// have checked with [`find`](Self::find) that the tag is not resident.
    pub fn insert(&mut self, entry: DeltaEntry) {
        if self.entries.len() == self.ways {
            self.entries.remove(0);
        }
        self.entries.push(entry);
    }

    /// The entry at `index` in the recency order.
    pub fn entry(&self, index: usize) -> &DeltaEntry {
        &self.entries[index]
    }

    /// The most recently used entry, if any.
    pub fn mru_mut(&mut self) -> Option<&mut DeltaEntry> {
        self.entries.last_mut()
    }

    /// Resident entries, LRU first.
    pub fn entries(&self) -> &[DeltaEntry] {
        &self.entries
    }

    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the set is at capacity.
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.ways
    }
}
