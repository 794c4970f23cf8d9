//! Error definitions.
//!
//! This module defines the failure taxonomy of the prefetcher. It covers:
//! 1. **Construction:** Rejecting degenerate table geometry before any state
//!    is allocated.
//! 2. **Registry:** Strict pairing of initialize and teardown per host
//!    identity.
//!
//! The per-access prediction path surfaces no errors: address arithmetic
//! wraps on fixed-width integers, and a fruitless correlation simply yields
//! an empty candidate list.

use std::fmt;

use crate::host::HostId;

/// Errors reported by table construction and the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DcptError {
    /// Degenerate geometry at construction.
    ///
    /// Raised for zero sets, zero ways, or a block size that is not a power
    /// of two. The host must treat this as a fatal initialization failure.
    /// The associated value describes the offending parameter.
    InvalidConfiguration(String),

    /// Registry access for a host identity with no registered prefetcher.
    ///
    /// Every operation against the registry requires a prior `initialize`
    /// for the same identity.
    UnknownHost(HostId),

    /// A second `initialize` for a host identity that is still registered.
    ///
    /// Initialize and teardown must pair strictly; re-registering would
    /// silently discard the live table's history.
    AlreadyRegistered(HostId),
}

impl fmt::Display for DcptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DcptError::InvalidConfiguration(reason) => {
                write!(f, "invalid configuration: {}", reason)
            }
            DcptError::UnknownHost(id) => write!(f, "no prefetcher registered for host {}", id),
            DcptError::AlreadyRegistered(id) => {
                write!(f, "prefetcher already registered for host {}", id)
            }
        }
    }
}

impl std::error::Error for DcptError {}
