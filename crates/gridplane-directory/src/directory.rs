//! Directory service — registration, deregistration, and the query surface.
//!
//! Owns the conflict-detection policy: both per-scope uniqueness invariants
//! (region ID, grid cell) are enforced by the store's atomic conditional
//! insert, never by a separate existence check. Absence is a normal query
//! outcome; only store-level faults propagate as errors.

use tracing::{info, warn};

use gridplane_core::{
    GridConfig, NameQuery, RegionDescriptor, RegionId, RegionStore, ScopeId, StoreOutcome,
    StoreResult,
};
use gridplane_store::RedbRegionStore;

use crate::record::{descriptor_to_record, record_to_descriptor};

/// The authoritative spatial registry for one grid.
///
/// Generic over the store backend so any conforming [`RegionStore`] can be
/// substituted. Shareable across threads by reference; all operations
/// complete in one store round trip.
pub struct DirectoryService<S: RegionStore> {
    store: S,
}

impl DirectoryService<RedbRegionStore> {
    /// Open the embedded store at the configured path.
    pub fn from_config(config: &GridConfig) -> StoreResult<Self> {
        let store = RedbRegionStore::open(&config.directory.store_path)?;
        Ok(Self::new(store))
    }
}

impl<S: RegionStore> DirectoryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a region in the given scope.
    ///
    /// Returns `false` without any state change if the region ID is already
    /// registered or the cell is already occupied in that scope. The caller
    /// decides retry or alternate-placement policy.
    pub fn register_region(
        &self,
        scope_id: ScopeId,
        rinfo: &RegionDescriptor,
    ) -> StoreResult<bool> {
        if rinfo.region_id.is_nil() {
            warn!(
                scope = %scope_id,
                x = rinfo.x,
                y = rinfo.y,
                "rejecting registration with nil region ID"
            );
            return Ok(false);
        }

        let mut rdata = descriptor_to_record(scope_id, rinfo);
        // Out-of-band name index: the store matches name queries against
        // this column, but the translation never reads it back.
        rdata.name = rinfo.name.clone();

        match self.store.store(&rdata)? {
            StoreOutcome::Stored => {
                info!(
                    region = %rinfo.region_id,
                    scope = %scope_id,
                    x = rinfo.x,
                    y = rinfo.y,
                    "region registered"
                );
                Ok(true)
            }
            StoreOutcome::IdentityConflict => {
                warn!(
                    region = %rinfo.region_id,
                    scope = %scope_id,
                    "region already registered"
                );
                Ok(false)
            }
            StoreOutcome::PositionConflict => {
                warn!(
                    region = %rinfo.region_id,
                    scope = %scope_id,
                    x = rinfo.x,
                    y = rinfo.y,
                    "coordinates already in use"
                );
                Ok(false)
            }
        }
    }

    /// Remove a region by identity alone. Returns `false` if no such
    /// region existed — a no-op signal, not an error. A region that must
    /// move deregisters and re-registers.
    pub fn deregister_region(&self, region_id: RegionId) -> StoreResult<bool> {
        let existed = self.store.delete(region_id)?;
        if existed {
            info!(region = %region_id, "region deregistered");
        }
        Ok(existed)
    }

    /// Exact lookup by identity within a scope.
    pub fn get_region_by_uuid(
        &self,
        scope_id: ScopeId,
        region_id: RegionId,
    ) -> StoreResult<Option<RegionDescriptor>> {
        Ok(self
            .store
            .get_by_id(region_id, scope_id)?
            .map(|rdata| record_to_descriptor(&rdata)))
    }

    /// Exact lookup by grid coordinate within a scope.
    pub fn get_region_by_position(
        &self,
        scope_id: ScopeId,
        x: u32,
        y: u32,
    ) -> StoreResult<Option<RegionDescriptor>> {
        Ok(self
            .store
            .get_by_position(x, y, scope_id)?
            .map(|rdata| record_to_descriptor(&rdata)))
    }

    /// First region whose name starts with `name`, in store order.
    ///
    /// The redb backend scans in ascending region-ID key order, so the
    /// pick is deterministic there; other backends must document theirs.
    pub fn get_region_by_name(
        &self,
        scope_id: ScopeId,
        name: &str,
    ) -> StoreResult<Option<RegionDescriptor>> {
        let rdatas = self.store.get_by_name(&NameQuery::prefix(name), scope_id)?;
        Ok(rdatas.first().map(record_to_descriptor))
    }

    /// Regions whose name contains `name`, capped at `max` results.
    /// Matches beyond the cap are silently dropped; `max == 0` yields
    /// nothing, the counting cutoff taken literally.
    pub fn get_regions_by_name(
        &self,
        scope_id: ScopeId,
        name: &str,
        max: usize,
    ) -> StoreResult<Vec<RegionDescriptor>> {
        let rdatas = self
            .store
            .get_by_name(&NameQuery::contains(name), scope_id)?;
        Ok(rdatas.iter().take(max).map(record_to_descriptor).collect())
    }

    /// Every region within Chebyshev distance 1 of `(x, y)`, including the
    /// queried cell itself when occupied. The inclusive-of-self behavior
    /// is load-bearing for existing grid clients; do not narrow it.
    pub fn get_neighbours(
        &self,
        scope_id: ScopeId,
        x: u32,
        y: u32,
    ) -> StoreResult<Vec<RegionDescriptor>> {
        self.get_region_range(
            scope_id,
            x.saturating_sub(1),
            x.saturating_add(1),
            y.saturating_sub(1),
            y.saturating_add(1),
        )
    }

    /// Every region inside the inclusive rectangle.
    pub fn get_region_range(
        &self,
        scope_id: ScopeId,
        xmin: u32,
        xmax: u32,
        ymin: u32,
        ymax: u32,
    ) -> StoreResult<Vec<RegionDescriptor>> {
        let rdatas = self.store.get_range(xmin, ymin, xmax, ymax, scope_id)?;
        Ok(rdatas.iter().map(record_to_descriptor).collect())
    }
}
