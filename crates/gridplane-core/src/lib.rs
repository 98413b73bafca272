//! gridplane-core — shared types for the region grid directory.
//!
//! A grid is a set of simulated regions laid out on an integer coordinate
//! plane, partitioned into independent scopes. This crate holds the domain
//! types exchanged between simulators and the directory, the [`RegionStore`]
//! contract any backend must satisfy, the error taxonomy, and the TOML
//! configuration.

pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use config::{DirectoryConfig, GridConfig};
pub use error::{StoreError, StoreResult};
pub use store::{RegionStore, StoreOutcome};
pub use types::*;
