//! Host adapter.
//!
//! Translates the host cache's callbacks into index table operations and
//! forwards surviving candidates to the host's prefetch submission entry
//! point. One adapter serves one cache instance; hosts that dispatch by
//! identity wrap adapters in a [`Registry`](crate::registry::Registry).

use crate::common::error::DcptError;
use crate::config::DcptConfig;
use crate::host::{AccessType, HostCache};
use crate::stats::PrefetchStats;
use crate::table::IndexTable;

/// A DCPT prefetcher attached to one host cache.
#[derive(Debug)]
pub struct DcptPrefetcher {
    table: IndexTable,
}

impl DcptPrefetcher {
    /// Creates a prefetcher with the default configuration.
    ///
    /// The block size is taken from the host; everything else uses
    /// [`DcptConfig::default`] (128 sets, 4 ways, window 19, 12 delta bits,
    /// match degree 2).
    ///
    /// # Errors
    ///
    /// [`DcptError::InvalidConfiguration`] when the host reports a block
    /// size that is not a power of two.
    pub fn new<H: HostCache>(host: &H) -> Result<Self, DcptError> {
        Self::with_config(&DcptConfig::default(), host)
    }

    /// Creates a prefetcher with an explicit configuration.
    ///
    /// # Errors
    ///
    /// [`DcptError::InvalidConfiguration`] on degenerate geometry.
    pub fn with_config<H: HostCache>(config: &DcptConfig, host: &H) -> Result<Self, DcptError> {
        Ok(Self {
            table: IndexTable::new(config, host.block_size())?,
        })
    }

    /// Per-access hook, called by the host on every cache access.
    ///
    /// Demand misses (not a hit, not prefetch-originated) train the table
    /// and submit every surviving candidate through
    /// [`HostCache::prefetch_line`] with `fill_this_level` set and zero
    /// metadata. All other accesses are ignored.
    ///
    /// # Returns
    ///
    /// `metadata_in`, unchanged.
    pub fn cache_operate<H: HostCache>(
        &mut self,
        host: &mut H,
        addr: u64,
        ip: u64,
        cache_hit: bool,
        kind: AccessType,
        metadata_in: u32,
    ) -> u32 {
        if !cache_hit && kind != AccessType::Prefetch {
            let candidates = self.table.train(host, ip, addr);
            self.table.stats.prefetches_issued += candidates.len() as u64;
            for candidate in candidates {
                host.prefetch_line(candidate, true, 0);
            }
        }
        metadata_in
    }

    /// Per-fill hook. The predictor learns nothing from fills.
    ///
    /// # Returns
    ///
    /// `metadata_in`, unchanged.
    pub fn cache_fill(
        &mut self,
        _addr: u64,
        _set: u32,
        _way: u32,
        _prefetch: bool,
        _evicted_addr: u64,
        metadata_in: u32,
    ) -> u32 {
        metadata_in
    }

    /// Per-cycle hook. The predictor has no clocked state.
    pub fn cycle_operate(&mut self) {}

    /// The underlying index table.
    pub fn table(&self) -> &IndexTable {
        &self.table
    }

    /// Event counters accumulated since construction.
    pub fn stats(&self) -> &PrefetchStats {
        &self.table.stats
    }
}
