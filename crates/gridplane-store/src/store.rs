//! RedbRegionStore — redb-backed region persistence.
//!
//! Implements the [`RegionStore`] contract over two tables: `regions`
//! (identity → JSON record) and `positions` (scope/coordinate → identity).
//! Registration runs as a single write transaction under redb's
//! single-writer lock, which makes the two-key uniqueness check atomic.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable};
use tracing::debug;

use gridplane_core::{
    NameQuery, RegionId, RegionRecord, RegionStore, ScopeId, StoreError, StoreOutcome,
    StoreResult, position_key,
};

use crate::tables::{POSITIONS, REGIONS};

/// Map any `Display` error into the retryable infrastructure variant.
macro_rules! unavailable {
    () => {
        |e| StoreError::Unavailable(e.to_string())
    };
}

/// Thread-safe region store backed by redb.
#[derive(Clone)]
pub struct RedbRegionStore {
    db: Arc<Database>,
}

impl RedbRegionStore {
    /// Open (or create) a persistent region store at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let db = Database::create(path).map_err(unavailable!())?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "region store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory region store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(unavailable!())?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory region store opened");
        Ok(store)
    }

    /// Create both tables if they don't exist yet.
    fn ensure_tables(&self) -> StoreResult<()> {
        let txn = self.db.begin_write().map_err(unavailable!())?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(REGIONS).map_err(unavailable!())?;
        txn.open_table(POSITIONS).map_err(unavailable!())?;
        txn.commit().map_err(unavailable!())?;
        Ok(())
    }

    fn decode(bytes: &[u8]) -> StoreResult<RegionRecord> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::CorruptRecord(e.to_string()))
    }
}

impl RegionStore for RedbRegionStore {
    fn get_by_id(
        &self,
        region_id: RegionId,
        scope_id: ScopeId,
    ) -> StoreResult<Option<RegionRecord>> {
        let txn = self.db.begin_read().map_err(unavailable!())?;
        let table = txn.open_table(REGIONS).map_err(unavailable!())?;
        match table
            .get(region_id.to_string().as_str())
            .map_err(unavailable!())?
        {
            Some(guard) => {
                let record = Self::decode(guard.value())?;
                // The table is keyed by identity alone; scope is a filter.
                Ok((record.scope_id == scope_id).then_some(record))
            }
            None => Ok(None),
        }
    }

    fn get_by_position(
        &self,
        x: u32,
        y: u32,
        scope_id: ScopeId,
    ) -> StoreResult<Option<RegionRecord>> {
        let txn = self.db.begin_read().map_err(unavailable!())?;
        let positions = txn.open_table(POSITIONS).map_err(unavailable!())?;
        let key = position_key(scope_id, x, y);
        let region_id = match positions.get(key.as_str()).map_err(unavailable!())? {
            Some(guard) => guard.value().to_string(),
            None => return Ok(None),
        };
        let regions = txn.open_table(REGIONS).map_err(unavailable!())?;
        match regions.get(region_id.as_str()).map_err(unavailable!())? {
            Some(guard) => Ok(Some(Self::decode(guard.value())?)),
            // Both tables are written in one transaction; a dangling index
            // entry means the database itself is damaged.
            None => Err(StoreError::CorruptRecord(format!(
                "position index {key} points at missing region {region_id}"
            ))),
        }
    }

    fn get_by_name(&self, query: &NameQuery, scope_id: ScopeId) -> StoreResult<Vec<RegionRecord>> {
        let txn = self.db.begin_read().map_err(unavailable!())?;
        let table = txn.open_table(REGIONS).map_err(unavailable!())?;
        let mut results = Vec::new();
        // Key order is ascending region-ID, so "first match" is stable.
        for entry in table.iter().map_err(unavailable!())? {
            let (_, value) = entry.map_err(unavailable!())?;
            let record = Self::decode(value.value())?;
            if record.scope_id == scope_id && query.matches(&record.name) {
                results.push(record);
            }
        }
        Ok(results)
    }

    fn get_range(
        &self,
        xmin: u32,
        ymin: u32,
        xmax: u32,
        ymax: u32,
        scope_id: ScopeId,
    ) -> StoreResult<Vec<RegionRecord>> {
        let txn = self.db.begin_read().map_err(unavailable!())?;
        let table = txn.open_table(REGIONS).map_err(unavailable!())?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(unavailable!())? {
            let (_, value) = entry.map_err(unavailable!())?;
            let record = Self::decode(value.value())?;
            if record.scope_id == scope_id
                && (xmin..=xmax).contains(&record.pos_x)
                && (ymin..=ymax).contains(&record.pos_y)
            {
                results.push(record);
            }
        }
        Ok(results)
    }

    fn store(&self, record: &RegionRecord) -> StoreResult<StoreOutcome> {
        let id_key = record.id_key();
        let pos_key = record.position_key();
        let value =
            serde_json::to_vec(record).map_err(|e| StoreError::CorruptRecord(e.to_string()))?;

        // One write transaction covers both uniqueness checks and both
        // inserts. redb serializes writers, so no second registration can
        // slip between the checks and the inserts.
        let txn = self.db.begin_write().map_err(unavailable!())?;
        let outcome;
        {
            let mut regions = txn.open_table(REGIONS).map_err(unavailable!())?;
            let mut positions = txn.open_table(POSITIONS).map_err(unavailable!())?;
            if regions
                .get(id_key.as_str())
                .map_err(unavailable!())?
                .is_some()
            {
                outcome = StoreOutcome::IdentityConflict;
            } else if positions
                .get(pos_key.as_str())
                .map_err(unavailable!())?
                .is_some()
            {
                outcome = StoreOutcome::PositionConflict;
            } else {
                regions
                    .insert(id_key.as_str(), value.as_slice())
                    .map_err(unavailable!())?;
                positions
                    .insert(pos_key.as_str(), id_key.as_str())
                    .map_err(unavailable!())?;
                outcome = StoreOutcome::Stored;
            }
        }
        txn.commit().map_err(unavailable!())?;
        debug!(%id_key, %pos_key, ?outcome, "conditional insert");
        Ok(outcome)
    }

    fn delete(&self, region_id: RegionId) -> StoreResult<bool> {
        let id_key = region_id.to_string();
        let txn = self.db.begin_write().map_err(unavailable!())?;
        let existed;
        {
            let mut regions = txn.open_table(REGIONS).map_err(unavailable!())?;
            let mut positions = txn.open_table(POSITIONS).map_err(unavailable!())?;
            let removed = match regions.remove(id_key.as_str()).map_err(unavailable!())? {
                Some(guard) => Some(Self::decode(guard.value())?),
                None => None,
            };
            match removed {
                Some(record) => {
                    positions
                        .remove(record.position_key().as_str())
                        .map_err(unavailable!())?;
                    existed = true;
                }
                None => existed = false,
            }
        }
        txn.commit().map_err(unavailable!())?;
        debug!(%id_key, existed, "region deleted");
        Ok(existed)
    }
}
