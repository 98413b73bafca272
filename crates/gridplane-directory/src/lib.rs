//! gridplane-directory — the authoritative spatial registry of a grid.
//!
//! Simulator processes register the region they host, discover neighboring
//! regions, and resolve a region's network location by identity, name, or
//! coordinate. The directory enforces two uniqueness invariants per scope
//! (region ID and grid cell) by delegating to the store's atomic
//! conditional insert, and converts stored records back to caller
//! descriptors on every read.
//!
//! # Components
//!
//! - **`directory`** — The [`DirectoryService`] contract (register,
//!   deregister, six queries)
//! - **`record`** — Record translation between descriptors and stored
//!   records, with fail-soft decoding

pub mod directory;
pub mod record;

pub use directory::DirectoryService;
pub use record::{descriptor_to_record, record_to_descriptor};
