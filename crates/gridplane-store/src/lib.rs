//! gridplane-store — embedded region store for the grid directory.
//!
//! Backed by [redb](https://docs.rs/redb), implements the
//! [`RegionStore`](gridplane_core::RegionStore) contract with the atomic
//! conditional insert the directory requires: one write transaction checks
//! both uniqueness keys (region ID, scope/position) and inserts, so two
//! concurrent registrations for the same cell can never both succeed.
//!
//! # Architecture
//!
//! Region records are JSON-serialized into redb's `&[u8]` value column,
//! keyed by region ID. A second table indexes `{scope}/{x}:{y}` back to the
//! owning region ID for coordinate lookups and position uniqueness.
//!
//! The store is `Clone` + `Send` + `Sync` (backed by `Arc<Database>`) and
//! can be shared across threads.

pub mod store;
pub mod tables;

pub use store::RedbRegionStore;
