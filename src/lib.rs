//! Delta-correlating prediction table (DCPT) prefetcher.
//!
//! This crate implements a hardware-style cache prefetcher that attaches to a
//! host cache simulator. It provides the following:
//! 1. **Prediction:** A per-PC delta history table that correlates recent
//!    miss-address deltas and projects candidate prefetch addresses.
//! 2. **Filtering:** Candidate post-filtering against the host cache's
//!    contents and in-flight queues (RQ, WQ, PQ, MSHRs).
//! 3. **Host integration:** Lifecycle hooks the host cache drives on each
//!    access, plus a registry binding host identities to their predictors.
//! 4. **Configuration:** Table geometry and correlation parameters with
//!    defaults, deserializable from host-supplied JSON.
//! 5. **Statistics:** Event counters for training, allocation, candidate
//!    generation, and filtering.

/// Common types and helpers (bit-mask arithmetic, error taxonomy).
pub mod common;
/// Prefetcher configuration (defaults and parameter structure).
pub mod config;
/// Host cache capability surface (trait, packets, access types).
pub mod host;
/// Host adapter exposing the prefetcher lifecycle hooks.
pub mod prefetcher;
/// Binding of host cache identities to their prefetchers.
pub mod registry;
/// Prefetcher statistics counters.
pub mod stats;
/// The delta history table (entries, sets, correlation, filtering).
pub mod table;

/// Root configuration type; use `DcptConfig::default()` or deserialize from JSON.
pub use crate::config::DcptConfig;
/// Prefetcher error taxonomy.
pub use crate::common::error::DcptError;
/// Host-facing capability trait plus the records it exposes.
pub use crate::host::{AccessType, CacheBlock, HostCache, HostId, Packet};
/// Main adapter type; holds the index table and serves the host hooks.
pub use crate::prefetcher::DcptPrefetcher;
/// Host-identity keyed prefetcher registry.
pub use crate::registry::Registry;
/// Event counters exposed by the table and adapter.
pub use crate::stats::PrefetchStats;
/// The set-associative delta history table.
pub use crate::table::IndexTable;
