//! Store contract consumed by the directory service.
//!
//! Any conforming backend (embedded, relational, in-memory) may be
//! substituted without changing the directory. Uniqueness of region ID and
//! of `(scope, x, y)` is enforced here, at the store boundary, because only
//! the store can make the check-and-insert atomic.

use crate::error::StoreResult;
use crate::types::{NameQuery, RegionId, RegionRecord, ScopeId};

/// Outcome of the conditional insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Stored,
    /// A record with the same region ID already exists.
    IdentityConflict,
    /// Another record already occupies `(x, y)` in the scope.
    PositionConflict,
}

/// Backing store for region records.
pub trait RegionStore: Send + Sync {
    /// Exact lookup by identity, constrained to the given scope.
    fn get_by_id(
        &self,
        region_id: RegionId,
        scope_id: ScopeId,
    ) -> StoreResult<Option<RegionRecord>>;

    /// Exact lookup by grid coordinate within the scope.
    fn get_by_position(&self, x: u32, y: u32, scope_id: ScopeId)
    -> StoreResult<Option<RegionRecord>>;

    /// Records whose display name matches the query, in ascending
    /// region-ID key order.
    fn get_by_name(&self, query: &NameQuery, scope_id: ScopeId) -> StoreResult<Vec<RegionRecord>>;

    /// Records inside the inclusive rectangle `[xmin, xmax] × [ymin, ymax]`.
    fn get_range(
        &self,
        xmin: u32,
        ymin: u32,
        xmax: u32,
        ymax: u32,
        scope_id: ScopeId,
    ) -> StoreResult<Vec<RegionRecord>>;

    /// Conditional insert.
    ///
    /// Must be atomic: the insert fails if either the region ID or the
    /// position key is already taken, with no window in which two
    /// concurrent callers can both observe "no conflict" and both succeed.
    /// A conflict leaves the store unchanged.
    fn store(&self, record: &RegionRecord) -> StoreResult<StoreOutcome>;

    /// Delete by identity alone, across scopes. Returns true if a record
    /// existed.
    fn delete(&self, region_id: RegionId) -> StoreResult<bool>;
}
