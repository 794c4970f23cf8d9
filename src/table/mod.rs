//! The delta history table.
//!
//! A set-associative, LRU-replaced index of per-PC delta histories. The
//! table owns address decoding (byte/set/tag split), dispatches lookups to
//! its sets, runs delta correlation through the entries, and filters the
//! resulting candidates against the host cache's contents and queues.

/// Per-PC delta history entries.
pub mod entry;

/// LRU-ordered associative sets.
pub mod set;

use std::fmt;

use self::entry::DeltaEntry;
use self::set::LruSet;
use crate::common::addr::{block_mask, low_mask, same_block, ADDR_BITS};
use crate::common::error::DcptError;
use crate::config::DcptConfig;
use crate::host::{HostCache, Packet};
use crate::stats::PrefetchStats;

/// Set-associative container of delta history entries, indexed by PC.
#[derive(Debug)]
pub struct IndexTable {
    /// The associative sets.
    sets: Vec<LruSet>,
    /// Bits selecting the byte offset within a cache block.
    byte_bits: u32,
    /// Bits selecting the set.
    set_bits: u32,
    /// Remaining tag bits.
    tag_bits: u32,
    /// Mask over the byte-offset bits.
    byte_mask: u64,
    /// Mask over the set-index bits, in place.
    set_mask: u64,
    /// Mask over the tag bits, in place.
    tag_mask: u64,
    /// Block-frame mask derived from the host block size.
    blk_mask: u64,
    /// Delta window length per entry.
    window: usize,
    /// Delta width in bits.
    delta_bits: u32,
    /// Correlation match length.
    match_degree: usize,
    /// Event counters.
    pub stats: PrefetchStats,
}

impl IndexTable {
    /// Creates a table from a configuration and the host's block size.
    ///
    /// # Errors
    ///
    /// [`DcptError::InvalidConfiguration`] when `config.sets` or
    /// `config.ways` is zero, or `block_size` is not a power of two. The
    /// byte/set/tag split is undefined without a power-of-two block.
    pub fn new(config: &DcptConfig, block_size: u64) -> Result<Self, DcptError> {
        if config.sets == 0 {
            return Err(DcptError::InvalidConfiguration(
                "number of sets must be a positive integer".into(),
            ));
        }
        if config.ways == 0 {
            return Err(DcptError::InvalidConfiguration(
                "ways must be a positive integer".into(),
            ));
        }
        if !block_size.is_power_of_two() {
            return Err(DcptError::InvalidConfiguration(format!(
                "block size must be a power of two, got {}",
                block_size
            )));
        }

        let byte_bits = block_size.ilog2();
        let set_bits = (config.sets as u64).ilog2();
        let tag_bits = ADDR_BITS.saturating_sub(set_bits + byte_bits);

        let byte_mask = low_mask(byte_bits);
        let set_mask = if set_bits >= ADDR_BITS {
            u64::MAX
        } else {
            low_mask(set_bits) << byte_bits
        };
        let tag_mask = if tag_bits >= ADDR_BITS {
            u64::MAX
        } else {
            low_mask(tag_bits) << (byte_bits + set_bits)
        };

        let mut sets = Vec::with_capacity(config.sets);
        for _ in 0..config.sets {
            sets.push(LruSet::new(config.ways));
        }

        Ok(Self {
            sets,
            byte_bits,
            set_bits,
            tag_bits,
            byte_mask,
            set_mask,
            tag_mask,
            blk_mask: block_mask(block_size),
            window: config.window,
            delta_bits: config.delta_bits,
            match_degree: config.match_degree,
            stats: PrefetchStats::default(),
        })
    }

    /// The block-frame mask in use.
    #[inline(always)]
    pub fn blk_mask(&self) -> u64 {
        self.blk_mask
    }

    /// The associative sets, for inspection.
    pub fn sets(&self) -> &[LruSet] {
        &self.sets
    }

    /// Set index a PC maps to.
    #[inline(always)]
    pub fn set_index(&self, pc: u64) -> usize {
        ((pc & self.set_mask) >> self.byte_bits) as usize
    }

    /// Trains the table on a demand miss and returns prefetch candidates.
    ///
    /// The PC selects a set; the full PC is the tag. A new PC allocates an
    /// entry (evicting the set's LRU victim when full) and produces nothing,
    /// since the delta sequence starts here. A repeat of the entry's last
    /// address produces nothing and leaves the entry untouched. Otherwise
    /// the entry is promoted to MRU, the new delta recorded, candidates
    /// generated by correlation, and the survivors of
    /// [`prefetch_filter`](Self::prefetch_filter) returned; the last
    /// survivor becomes the entry's `last_prefetch`.
    pub fn train<H: HostCache>(&mut self, host: &H, pc: u64, addr: u64) -> Vec<u64> {
        let set_no = self.set_index(pc);
        let tag = pc;

        let Some(index) = self.sets[set_no].find(tag) else {
            self.stats.entries_allocated += 1;
            if self.sets[set_no].is_full() {
                self.stats.entries_evicted += 1;
            }
            let entry = DeltaEntry::new(tag, addr, self.delta_bits, self.window);
            self.sets[set_no].insert(entry);
            return Vec::new();
        };

        if self.sets[set_no].entry(index).last_addr() == addr {
            self.stats.repeated_addresses += 1;
            return Vec::new();
        }

        self.stats.demand_trains += 1;
        let depth = self.match_degree;
        let blk_mask = self.blk_mask;

        let entry = self.sets[set_no].touch(index);
        entry.record(addr);
        let mut candidates = entry.prefetch_candidates(depth, blk_mask);

        if !candidates.is_empty() {
            self.stats.patterns_matched += 1;
        }
        self.stats.candidates_generated += candidates.len() as u64;

        let before = candidates.len();
        self.prefetch_filter(host, &mut candidates);
        self.stats.candidates_filtered += (before - candidates.len()) as u64;

        if let Some(&tail) = candidates.last() {
            if let Some(mru) = self.sets[set_no].mru_mut() {
                mru.set_last_prefetch(tail);
            }
        }
        candidates
    }

    /// Removes candidates already present in the cache or in flight.
    ///
    /// A candidate is dropped when its cache block is resident and valid in
    /// the host cache, or collocated with an active packet in the host's
    /// read, write, or prefetch queue or MSHR list. The surviving order is
    /// preserved.
    pub fn prefetch_filter<H: HostCache>(&self, host: &H, candidates: &mut Vec<u64>) {
        candidates.retain(|&addr| !self.in_queues_or_cache(host, addr));
    }

    /// Whether the block containing `addr` is resident and valid in the host cache.
    fn in_cache<H: HostCache>(&self, host: &H, addr: u64) -> bool {
        let set = host.get_set(addr);
        let way = host.get_way(addr, set);
        if way >= host.num_ways() {
            return false;
        }
        let block = host.block((set * host.num_ways() + way) as usize);
        block.valid && same_block(block.v_address, addr, self.blk_mask)
    }

    /// Whether any active packet in `packets` shares `addr`'s block frame.
    ///
    /// A packet with a zeroed address frame is an inactive slot.
    fn is_in(&self, packets: &[Packet], addr: u64) -> bool {
        packets
            .iter()
            .any(|p| p.address & self.blk_mask != 0 && same_block(p.v_address, addr, self.blk_mask))
    }

    /// Whether `addr`'s block is anywhere the host already tracks it.
    fn in_queues_or_cache<H: HostCache>(&self, host: &H, addr: u64) -> bool {
        self.is_in(host.read_queue(), addr)
            || self.is_in(host.write_queue(), addr)
            || self.is_in(host.prefetch_queue(), addr)
            || self.is_in(host.mshrs(), addr)
            || self.in_cache(host, addr)
    }
}

impl fmt::Display for IndexTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Replacement Algorithm  = {}", LruSet::REPLACEMENT_ALGO)?;
        writeln!(f, "No of sets             = {}", self.sets.len())?;
        writeln!(f, "Window                 = {}", self.window)?;
        writeln!(f, "Delta bits             = {}", self.delta_bits)?;
        writeln!(f, "Match degree           = {}", self.match_degree)?;
        writeln!(f, "byte_bits              = {}", self.byte_bits)?;
        writeln!(f, "set_bits               = {}", self.set_bits)?;
        writeln!(f, "tag_bits               = {}", self.tag_bits)?;
        writeln!(f, "byte_mask              = {:#066b}", self.byte_mask)?;
        writeln!(f, "set_mask               = {:#066b}", self.set_mask)?;
        write!(f, "tag_mask               = {:#066b}", self.tag_mask)
    }
}
