//! Prefetcher configuration.
//!
//! This module defines the parameter structure for the delta history table.
//! It provides:
//! 1. **Defaults:** The baseline geometry and correlation parameters.
//! 2. **Deserialization:** Partial JSON overrides with per-field defaults,
//!    for hosts that carry their configuration as JSON.
//!
//! The block size is not configured here; it is a host geometry constant
//! taken from [`HostCache::block_size`](crate::host::HostCache::block_size)
//! at construction.

use serde::Deserialize;

/// Default configuration constants for the prefetcher.
mod defaults {
    /// Default number of index table sets.
    pub const INDEX_SETS: usize = 128;

    /// Default index table associativity.
    pub const INDEX_WAYS: usize = 4;

    /// Default delta window length per entry.
    pub const DELTA_WINDOW: usize = 19;

    /// Default width in bits of a representable delta.
    pub const DELTA_BITS: u32 = 12;

    /// Default correlation match length (number of trailing deltas searched).
    pub const MATCH_DEGREE: usize = 2;
}

/// Parameters of the delta history table.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use dcpt::config::DcptConfig;
///
/// let config = DcptConfig::default();
/// assert_eq!(config.sets, 128);
/// assert_eq!(config.window, 19);
/// ```
///
/// Deserializing a partial override from JSON (unspecified fields keep
/// their defaults):
///
/// ```
/// use dcpt::config::DcptConfig;
///
/// let config: DcptConfig = serde_json::from_str(r#"{"sets": 64, "delta_bits": 16}"#).unwrap();
/// assert_eq!(config.sets, 64);
/// assert_eq!(config.delta_bits, 16);
/// assert_eq!(config.ways, 4);
/// assert_eq!(config.match_degree, 2);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct DcptConfig {
    /// Number of sets in the index table
    #[serde(default = "DcptConfig::default_sets")]
    pub sets: usize,

    /// Index table associativity (entries per set)
    #[serde(default = "DcptConfig::default_ways")]
    pub ways: usize,

    /// Delta window length per entry
    #[serde(default = "DcptConfig::default_window")]
    pub window: usize,

    /// Width in bits of a representable delta; wider deltas record the
    /// overflow sentinel
    #[serde(default = "DcptConfig::default_delta_bits")]
    pub delta_bits: u32,

    /// Number of trailing deltas used as the correlation search pattern
    #[serde(default = "DcptConfig::default_match_degree")]
    pub match_degree: usize,
}

impl DcptConfig {
    /// Returns the default number of index table sets.
    fn default_sets() -> usize {
        defaults::INDEX_SETS
    }

    /// Returns the default index table associativity.
    fn default_ways() -> usize {
        defaults::INDEX_WAYS
    }

    /// Returns the default delta window length.
    fn default_window() -> usize {
        defaults::DELTA_WINDOW
    }

    /// Returns the default delta width in bits.
    fn default_delta_bits() -> u32 {
        defaults::DELTA_BITS
    }

    /// Returns the default correlation match length.
    fn default_match_degree() -> usize {
        defaults::MATCH_DEGREE
    }
}

impl Default for DcptConfig {
    fn default() -> Self {
        Self {
            sets: defaults::INDEX_SETS,
            ways: defaults::INDEX_WAYS,
            window: defaults::DELTA_WINDOW,
            delta_bits: defaults::DELTA_BITS,
            match_degree: defaults::MATCH_DEGREE,
        }
    }
}
