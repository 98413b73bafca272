//! Domain types for the region grid directory.
//!
//! [`RegionDescriptor`] is the caller-facing shape a simulator submits when
//! it registers the region it hosts. [`RegionRecord`] is the persisted shape
//! the store keeps: identity, scope, position, plus an open string-keyed
//! attribute map for the endpoint bundle, so backends can add or ignore
//! fields without a schema migration. The translation between the two lives
//! in `gridplane-directory`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use uuid::Uuid;

/// Globally unique identifier of a region.
pub type RegionId = Uuid;

/// Partition key segregating independent coordinate spaces sharing one
/// directory. Distinct scopes may reuse the same coordinates.
pub type ScopeId = Uuid;

/// Attribute-map keys for the serialized endpoint bundle.
pub mod attr {
    pub const EXTERNAL_IP_ADDRESS: &str = "external_ip_address";
    pub const EXTERNAL_PORT: &str = "external_port";
    pub const EXTERNAL_HOST_NAME: &str = "external_host_name";
    pub const HTTP_PORT: &str = "http_port";
    pub const INTERNAL_IP_ADDRESS: &str = "internal_ip_address";
    pub const INTERNAL_PORT: &str = "internal_port";
    pub const ALTERNATE_PORTS: &str = "alternate_ports";
    pub const SERVER_URI: &str = "server_uri";
}

/// The zero endpoint substituted when address or port fields are missing
/// or unparsable: `0.0.0.0:0`.
pub fn unspecified_endpoint() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0)
}

// ── Caller-facing descriptor ──────────────────────────────────────

/// Placement and network location of a region, as seen by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionDescriptor {
    pub region_id: RegionId,
    /// Display name. Fed to the store's name index at registration time;
    /// never recovered by reads (the translator does not persist it).
    pub name: String,
    /// Grid coordinates within the scope.
    pub x: u32,
    pub y: u32,
    /// Endpoint viewers connect to.
    pub external_endpoint: SocketAddr,
    pub external_host_name: String,
    /// Endpoint the simulator listens on inside its own network.
    pub internal_endpoint: SocketAddr,
    pub http_port: u16,
    pub allow_alternate_ports: bool,
    pub server_uri: String,
}

// ── Persisted record ──────────────────────────────────────────────

/// Persisted shape of a registered region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegionRecord {
    pub region_id: RegionId,
    pub scope_id: ScopeId,
    /// Display name column. Maintained by the store for name queries,
    /// outside the attribute map and outside the identity/position keys.
    pub name: String,
    pub pos_x: u32,
    pub pos_y: u32,
    /// Serialized endpoint fields, keyed by the [`attr`] constants.
    pub data: HashMap<String, String>,
}

impl RegionRecord {
    /// Key for the regions table.
    pub fn id_key(&self) -> String {
        self.region_id.to_string()
    }

    /// Composite key for the position index.
    pub fn position_key(&self) -> String {
        position_key(self.scope_id, self.pos_x, self.pos_y)
    }
}

/// Build the position-index key `{scope_id}/{x}:{y}`.
pub fn position_key(scope_id: ScopeId, x: u32, y: u32) -> String {
    format!("{scope_id}/{x}:{y}")
}

// ── Name queries ──────────────────────────────────────────────────

/// Name match patterns supported by the store.
///
/// The Rust-native rendering of the `prefix%` / `%substring%` patterns a
/// relational backend would receive. Matching is case-insensitive; build
/// queries through [`NameQuery::prefix`] / [`NameQuery::contains`], which
/// fold the pattern once so scans only fold each candidate name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameQuery {
    /// Name starts with the given string. Pattern is stored lowercased.
    Prefix(String),
    /// Name contains the given string anywhere. Pattern is stored lowercased.
    Contains(String),
}

impl NameQuery {
    /// Anchored match: name starts with `pattern`.
    pub fn prefix(pattern: impl Into<String>) -> Self {
        NameQuery::Prefix(pattern.into().to_lowercase())
    }

    /// Unanchored match: name contains `pattern` anywhere.
    pub fn contains(pattern: impl Into<String>) -> Self {
        NameQuery::Contains(pattern.into().to_lowercase())
    }

    /// Match against a stored display name.
    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        match self {
            NameQuery::Prefix(p) => name.starts_with(p.as_str()),
            NameQuery::Contains(s) => name.contains(s.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_key_embeds_scope_and_coordinates() {
        let scope = Uuid::nil();
        assert_eq!(
            position_key(scope, 1000, 1002),
            format!("{scope}/1000:1002")
        );
    }

    #[test]
    fn record_keys_agree_with_fields() {
        let record = RegionRecord {
            region_id: Uuid::new_v4(),
            scope_id: Uuid::new_v4(),
            name: "Sandbox".to_string(),
            pos_x: 5,
            pos_y: 7,
            data: HashMap::new(),
        };
        assert_eq!(record.id_key(), record.region_id.to_string());
        assert_eq!(
            record.position_key(),
            position_key(record.scope_id, 5, 7)
        );
    }

    #[test]
    fn prefix_query_is_anchored() {
        let q = NameQuery::prefix("Sand");
        assert!(q.matches("Sandbox Island"));
        assert!(!q.matches("Quicksand"));
    }

    #[test]
    fn contains_query_matches_anywhere() {
        let q = NameQuery::contains("sand");
        assert!(q.matches("Quicksand"));
        assert!(q.matches("Sandbox"));
        assert!(!q.matches("Gravel Pit"));
    }

    #[test]
    fn matching_ignores_case() {
        assert!(NameQuery::prefix("sAnD").matches("SANDBOX"));
    }

    #[test]
    fn patterns_fold_case_at_construction() {
        // The fold happens once, in the constructor, not per candidate.
        assert_eq!(
            NameQuery::prefix("sAnD"),
            NameQuery::Prefix("sand".to_string())
        );
        assert_eq!(
            NameQuery::contains("PLAZA"),
            NameQuery::Contains("plaza".to_string())
        );
    }

    #[test]
    fn unspecified_endpoint_is_zero() {
        assert_eq!(unspecified_endpoint().to_string(), "0.0.0.0:0");
    }
}
