//! Host-identity keyed prefetcher registry.
//!
//! Hosts that drive several cache instances through one dispatch point bind
//! each instance's identity to its prefetcher here. Initialize and teardown
//! pair strictly: every identity registers exactly one prefetcher, and
//! teardown removes exactly that one. The registry is owned by the host and
//! accessed single-threaded, like every other entry point of this crate.

use std::collections::HashMap;

use crate::common::error::DcptError;
use crate::config::DcptConfig;
use crate::host::{AccessType, HostCache, HostId};
use crate::prefetcher::DcptPrefetcher;

/// Mapping from host cache identity to its prefetcher.
#[derive(Default)]
pub struct Registry {
    prefetchers: HashMap<HostId, DcptPrefetcher>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a default-configured prefetcher for `id`.
    ///
    /// # Errors
    ///
    /// [`DcptError::AlreadyRegistered`] when `id` is still bound;
    /// [`DcptError::InvalidConfiguration`] from table construction.
    pub fn initialize<H: HostCache>(&mut self, id: HostId, host: &H) -> Result<(), DcptError> {
        self.initialize_with_config(id, &DcptConfig::default(), host)
    }

    /// Registers a prefetcher for `id` with an explicit configuration.
    ///
    /// # Errors
    ///
    /// [`DcptError::AlreadyRegistered`] when `id` is still bound;
    /// [`DcptError::InvalidConfiguration`] from table construction.
    pub fn initialize_with_config<H: HostCache>(
        &mut self,
        id: HostId,
        config: &DcptConfig,
        host: &H,
    ) -> Result<(), DcptError> {
        if self.prefetchers.contains_key(&id) {
            return Err(DcptError::AlreadyRegistered(id));
        }
        let prefetcher = DcptPrefetcher::with_config(config, host)?;
        self.prefetchers.insert(id, prefetcher);
        Ok(())
    }

    /// The prefetcher bound to `id`.
    ///
    /// # Errors
    ///
    /// [`DcptError::UnknownHost`] when `id` was never registered or already
    /// torn down.
    pub fn get(&self, id: HostId) -> Result<&DcptPrefetcher, DcptError> {
        self.prefetchers.get(&id).ok_or(DcptError::UnknownHost(id))
    }

    /// The prefetcher bound to `id`, mutably.
    ///
    /// # Errors
    ///
    /// [`DcptError::UnknownHost`] when `id` was never registered or already
    /// torn down.
    pub fn get_mut(&mut self, id: HostId) -> Result<&mut DcptPrefetcher, DcptError> {
        self.prefetchers
            .get_mut(&id)
            .ok_or(DcptError::UnknownHost(id))
    }

    /// Unbinds and returns the prefetcher for `id`.
    ///
    /// Returning it lets the host read final statistics before dropping.
    ///
    /// # Errors
    ///
    /// [`DcptError::UnknownHost`] when `id` is not bound.
    pub fn teardown(&mut self, id: HostId) -> Result<DcptPrefetcher, DcptError> {
        self.prefetchers
            .remove(&id)
            .ok_or(DcptError::UnknownHost(id))
    }

    /// Per-access hook dispatched by host identity.
    ///
    /// # Errors
    ///
    /// [`DcptError::UnknownHost`] when `id` is not bound.
    #[allow(clippy::too_many_arguments)]
    pub fn cache_operate<H: HostCache>(
        &mut self,
        id: HostId,
        host: &mut H,
        addr: u64,
        ip: u64,
        cache_hit: bool,
        kind: AccessType,
        metadata_in: u32,
    ) -> Result<u32, DcptError> {
        let prefetcher = self.get_mut(id)?;
        Ok(prefetcher.cache_operate(host, addr, ip, cache_hit, kind, metadata_in))
    }

    /// Per-fill hook dispatched by host identity.
    ///
    /// # Errors
    ///
    /// [`DcptError::UnknownHost`] when `id` is not bound.
    #[allow(clippy::too_many_arguments)]
    pub fn cache_fill(
        &mut self,
        id: HostId,
        addr: u64,
        set: u32,
        way: u32,
        prefetch: bool,
        evicted_addr: u64,
        metadata_in: u32,
    ) -> Result<u32, DcptError> {
        let prefetcher = self.get_mut(id)?;
        Ok(prefetcher.cache_fill(addr, set, way, prefetch, evicted_addr, metadata_in))
    }

    /// Whether `id` currently has a prefetcher bound.
    pub fn contains(&self, id: HostId) -> bool {
        self.prefetchers.contains_key(&id)
    }

    /// Number of bound prefetchers.
    pub fn len(&self) -> usize {
        self.prefetchers.len()
    }

    /// Whether no prefetcher is bound.
    pub fn is_empty(&self) -> bool {
        self.prefetchers.is_empty()
    }
}
