//! Delta history entry.
//!
//! One entry tracks the miss stream of a single program counter: the last
//! miss address, the last prefetch issued, and a bounded FIFO window of
//! signed deltas between successive miss addresses. Candidate generation
//! searches the window for an earlier occurrence of the most recent deltas
//! and replays what followed.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `record()`: O(1)
//!   - `prefetch_candidates()`: O(N·i) for window length N and match length i
//! - **Space Complexity:** O(N) per entry

use std::collections::VecDeque;
use std::fmt;

use crate::common::addr::{low_mask, same_block};

/// Per-PC delta history record.
#[derive(Debug)]
pub struct DeltaEntry {
    /// Full PC of the instruction this entry tracks.
    tag: u64,
    /// Most recent miss address seen for this PC.
    last_addr: u64,
    /// Most recent address emitted as a prefetch for this PC (0 when none).
    last_prefetch: u64,
    /// Largest delta magnitude representable in `delta_bits` bits.
    delta_mask: u64,
    /// FIFO window of signed deltas, oldest first. Element 0 is the
    /// sentinel for a delta that overflowed `delta_mask`.
    deltas: VecDeque<i64>,
    /// Window capacity.
    window: usize,
}

impl DeltaEntry {
    /// Creates an entry for a newly observed PC.
    ///
    /// # Arguments
    ///
    /// * `tag` - The PC this entry tracks.
    /// * `addr` - The miss address that triggered creation. No delta is
    ///   recorded for it; the sequence starts here.
    /// * `delta_bits` - Width in bits of a representable delta.
    /// * `window` - Delta window capacity.
    pub fn new(tag: u64, addr: u64, delta_bits: u32, window: usize) -> Self {
        Self {
            tag,
            last_addr: addr,
            last_prefetch: 0,
            delta_mask: low_mask(delta_bits),
            deltas: VecDeque::with_capacity(window),
            window,
        }
    }

    /// The PC this entry tracks.
    #[inline(always)]
    pub fn tag(&self) -> u64 {
        self.tag
    }

    /// The most recent miss address seen for this PC.
    #[inline(always)]
    pub fn last_addr(&self) -> u64 {
        self.last_addr
    }

    /// The most recent address emitted as a prefetch for this PC.
    #[inline(always)]
    pub fn last_prefetch(&self) -> u64 {
        self.last_prefetch
    }

    /// Records the tail of an issued prefetch sequence.
    #[inline(always)]
    pub fn set_last_prefetch(&mut self, addr: u64) {
        self.last_prefetch = addr;
    }

    /// The recorded deltas, oldest first.
    pub fn deltas(&self) -> impl Iterator<Item = i64> + '_ {
        self.deltas.iter().copied()
    }

    /// Number of deltas currently in the window.
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    /// Whether the window holds no deltas yet.
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Records a new miss address.
    ///
    /// The signed difference to the previous address is appended to the
    /// window: the 0 sentinel if its magnitude exceeds the delta mask,
    /// nothing at all if the address repeats exactly (a 0 delta would be
    /// indistinguishable from the sentinel), the delta itself otherwise.
    /// `last_addr` is updated unconditionally.
    pub fn record(&mut self, addr: u64) {
        let delta = addr.wrapping_sub(self.last_addr) as i64;
        if delta.unsigned_abs() > self.delta_mask {
            self.push_delta(0);
        } else if delta != 0 {
            self.push_delta(delta);
        }
        self.last_addr = addr;
    }

    /// Appends a delta, dropping the oldest when the window is full.
    fn push_delta(&mut self, delta: i64) {
        if self.deltas.len() == self.window {
            self.deltas.pop_front();
        }
        self.deltas.push_back(delta);
    }

    /// Generates prefetch candidate addresses by delta correlation.
    ///
    /// The most recent `depth` deltas form the search pattern. The window is
    /// scanned from the oldest delta forward for an earlier occurrence of
    /// the pattern; the earliest occurrence yields the longest continuation.
    /// On a match at position `k`, every delta from `k + depth` to the
    /// newest is replayed onto `last_addr`, appending each accumulated
    /// address, with two policies applied while appending:
    ///
    /// * **Block deduplication:** an address whose cache block is already
    ///   represented in the list is skipped (`blk_mask` selects the frame).
    /// * **Re-issue suppression:** when the accumulator reaches
    ///   `last_prefetch`, the list is cleared and accumulation continues.
    ///   Only the unissued continuation of an already-announced sequence
    ///   survives.
    ///
    /// # Returns
    ///
    /// Candidate addresses in generation order. Empty when the window holds
    /// fewer than `2 * depth` deltas or no earlier occurrence exists.
    pub fn prefetch_candidates(&self, depth: usize, blk_mask: u64) -> Vec<u64> {
        let len = self.deltas.len();
        if depth == 0 || len < 2 * depth {
            return Vec::new();
        }

        let pattern_start = len - depth;
        let mut matched = None;
        for k in 0..=len - 2 * depth {
            if (0..depth).all(|j| self.deltas[k + j] == self.deltas[pattern_start + j]) {
                matched = Some(k);
                break;
            }
        }
        let Some(k) = matched else {
            return Vec::new();
        };

        let mut candidates: Vec<u64> = Vec::new();
        let mut pf_addr = self.last_addr;
        for idx in k + depth..len {
            pf_addr = pf_addr.wrapping_add(self.deltas[idx] as u64);
            if pf_addr == self.last_prefetch {
                candidates.clear();
            } else if !candidates.iter().any(|&c| same_block(c, pf_addr, blk_mask)) {
                candidates.push(pf_addr);
            }
        }
        candidates
    }
}

impl fmt::Display for DeltaEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:#x}, {:#x}, {:#x}, {} deltas)",
            self.tag,
            self.last_addr,
            self.last_prefetch,
            self.deltas.len()
        )
    }
}
