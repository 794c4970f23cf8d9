//! Prefetcher statistics collection.
//!
//! Event counters for the prediction pipeline: training, entry allocation
//! and replacement, candidate generation, filtering, and submission. The
//! counters feed nothing back into prediction; they exist for the host's
//! end-of-simulation reporting.

use std::fmt;

/// Event counters accumulated by a table and its adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrefetchStats {
    /// Demand misses that advanced an existing entry's delta history.
    pub demand_trains: u64,
    /// Demand misses repeating an entry's last address, ignored entirely.
    pub repeated_addresses: u64,
    /// Entries created for newly observed PCs.
    pub entries_allocated: u64,
    /// Entries dropped to make room in a full set.
    pub entries_evicted: u64,
    /// Training events whose correlation search produced candidates.
    pub patterns_matched: u64,
    /// Candidate addresses produced by correlation, before filtering.
    pub candidates_generated: u64,
    /// Candidates removed because their block was resident or in flight.
    pub candidates_filtered: u64,
    /// Candidates submitted to the host after filtering.
    pub prefetches_issued: u64,
}

impl PrefetchStats {
    /// Fraction of generated candidates removed by the filter.
    ///
    /// # Returns
    ///
    /// A value in `[0, 1]`, or 0 when nothing was generated.
    pub fn filter_rate(&self) -> f64 {
        if self.candidates_generated == 0 {
            0.0
        } else {
            self.candidates_filtered as f64 / self.candidates_generated as f64
        }
    }

    /// Average prefetches submitted per training event.
    ///
    /// # Returns
    ///
    /// Submitted candidates over training events, or 0 when nothing trained.
    pub fn issue_rate(&self) -> f64 {
        if self.demand_trains == 0 {
            0.0
        } else {
            self.prefetches_issued as f64 / self.demand_trains as f64
        }
    }
}

impl fmt::Display for PrefetchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "trains                 = {}", self.demand_trains)?;
        writeln!(f, "repeated addresses     = {}", self.repeated_addresses)?;
        writeln!(f, "entries allocated      = {}", self.entries_allocated)?;
        writeln!(f, "entries evicted        = {}", self.entries_evicted)?;
        writeln!(f, "patterns matched       = {}", self.patterns_matched)?;
        writeln!(f, "candidates generated   = {}", self.candidates_generated)?;
        writeln!(f, "candidates filtered    = {}", self.candidates_filtered)?;
        write!(f, "prefetches issued      = {}", self.prefetches_issued)
    }
}
