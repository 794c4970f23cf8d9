//! Host cache capability surface.
//!
//! The prefetcher never owns cache state. Everything it needs from the host
//! simulator is expressed here:
//! 1. **Geometry:** Block size and associativity constants.
//! 2. **Inspection:** Address-to-set-and-way lookup, per-line block records,
//!    and enumeration of the in-flight queues (RQ, WQ, PQ, MSHRs).
//! 3. **Submission:** The `prefetch_line` entry point, fire-and-forget from
//!    the prefetcher's perspective.

use std::fmt;

/// Identity of a host cache instance, used as the registry key.
///
/// The host picks the value; any stable integer that distinguishes its cache
/// instances for the lifetime of the simulation will do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostId(pub u64);

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Per-line cache block record inspected by the prefetch filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheBlock {
    /// Whether the line currently holds valid data.
    pub valid: bool,
    /// Virtual address of the data held by the line.
    pub v_address: u64,
}

/// An in-flight packet in one of the host's queues or MSHR list.
///
/// A packet whose `address` field is zero is an inactive slot and is ignored
/// by the filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Packet {
    /// Physical address of the request; zero marks an inactive slot.
    pub address: u64,
    /// Virtual address of the request, compared block-wise by the filter.
    pub v_address: u64,
}

/// Type of cache access reported to the prefetcher.
///
/// Only `Prefetch` is discriminated by the core: prefetch-originated misses
/// must not retrain the predictor. The remaining variants mirror the demand
/// traffic classes a host cache distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Demand load access.
    Load,
    /// Read-for-ownership (store miss) access.
    Rfo,
    /// Prefetch-originated access.
    Prefetch,
    /// Writeback from an inner cache level.
    Writeback,
    /// Address-translation access.
    Translation,
}

/// Capability trait the host cache implements for the prefetcher.
///
/// The prefetcher borrows the host immutably while filtering candidates and
/// mutably only to submit surviving prefetches. The host outlives every
/// prefetcher attached to it.
pub trait HostCache {
    /// Cache block size in bytes. Must be a positive power of two.
    fn block_size(&self) -> u64;

    /// Cache associativity.
    fn num_ways(&self) -> u32;

    /// Maps an address to its cache-set index.
    fn get_set(&self, addr: u64) -> u32;

    /// Returns the way holding `addr` in `set`, or any value greater than or
    /// equal to [`num_ways`](Self::num_ways) on a miss.
    fn get_way(&self, addr: u64, set: u32) -> u32;

    /// Returns the block record at flat index `set * num_ways + way`.
    fn block(&self, index: usize) -> CacheBlock;

    /// In-flight packets in the read queue.
    fn read_queue(&self) -> &[Packet];

    /// In-flight packets in the write queue.
    fn write_queue(&self) -> &[Packet];

    /// In-flight packets in the prefetch queue.
    fn prefetch_queue(&self) -> &[Packet];

    /// Miss-status holding registers.
    fn mshrs(&self) -> &[Packet];

    /// Submits a prefetch for the block containing `addr`.
    ///
    /// `fill_this_level` asks the host to fill the line into this cache
    /// level; `metadata` is passed through the host's prefetch machinery
    /// untouched.
    fn prefetch_line(&mut self, addr: u64, fill_this_level: bool, metadata: u32);
}
