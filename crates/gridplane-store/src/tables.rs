//! redb table definitions for the region store.

use redb::TableDefinition;

/// Region records keyed by `{region_id}`, valued by JSON-serialized
/// [`RegionRecord`](gridplane_core::RegionRecord)s.
pub const REGIONS: TableDefinition<&str, &[u8]> = TableDefinition::new("regions");

/// Position index keyed by `{scope_id}/{x}:{y}`, valued by the owning
/// region ID. Written and removed in the same transaction as the regions
/// row, so the two tables never disagree.
pub const POSITIONS: TableDefinition<&str, &str> = TableDefinition::new("positions");
