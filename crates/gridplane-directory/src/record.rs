//! Record translation between caller descriptors and stored records.
//!
//! Writes encode the endpoint bundle into the record's string attribute
//! map. Reads decode best-effort: missing or unparsable fields degrade to
//! their zero values (`0.0.0.0:0`, empty string, `false`) instead of
//! failing, so a partially damaged record keeps its cell on the map.
//!
//! The display name is deliberately absent from the translation in both
//! directions; the store indexes it out-of-band (see the directory service).

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use gridplane_core::{RegionDescriptor, RegionRecord, ScopeId, attr, unspecified_endpoint};

/// Encode a descriptor into the persisted record shape.
pub fn descriptor_to_record(scope_id: ScopeId, rinfo: &RegionDescriptor) -> RegionRecord {
    let mut data = HashMap::new();
    data.insert(
        attr::EXTERNAL_IP_ADDRESS.to_string(),
        rinfo.external_endpoint.ip().to_string(),
    );
    data.insert(
        attr::EXTERNAL_PORT.to_string(),
        rinfo.external_endpoint.port().to_string(),
    );
    data.insert(
        attr::EXTERNAL_HOST_NAME.to_string(),
        rinfo.external_host_name.clone(),
    );
    data.insert(attr::HTTP_PORT.to_string(), rinfo.http_port.to_string());
    data.insert(
        attr::INTERNAL_IP_ADDRESS.to_string(),
        rinfo.internal_endpoint.ip().to_string(),
    );
    data.insert(
        attr::INTERNAL_PORT.to_string(),
        rinfo.internal_endpoint.port().to_string(),
    );
    data.insert(
        attr::ALTERNATE_PORTS.to_string(),
        rinfo.allow_alternate_ports.to_string(),
    );
    data.insert(attr::SERVER_URI.to_string(), rinfo.server_uri.clone());

    RegionRecord {
        region_id: rinfo.region_id,
        scope_id,
        // Name is indexed by the store, not carried by the translation.
        name: String::new(),
        pos_x: rinfo.x,
        pos_y: rinfo.y,
        data,
    }
}

/// Decode a persisted record back into a caller descriptor.
pub fn record_to_descriptor(rdata: &RegionRecord) -> RegionDescriptor {
    RegionDescriptor {
        region_id: rdata.region_id,
        name: String::new(),
        x: rdata.pos_x,
        y: rdata.pos_y,
        external_endpoint: parse_endpoint(
            rdata.data.get(attr::EXTERNAL_IP_ADDRESS),
            rdata.data.get(attr::EXTERNAL_PORT),
        ),
        external_host_name: rdata
            .data
            .get(attr::EXTERNAL_HOST_NAME)
            .cloned()
            .unwrap_or_default(),
        internal_endpoint: parse_endpoint(
            rdata.data.get(attr::INTERNAL_IP_ADDRESS),
            rdata.data.get(attr::INTERNAL_PORT),
        ),
        http_port: parse_port(rdata.data.get(attr::HTTP_PORT)),
        allow_alternate_ports: parse_flag(rdata.data.get(attr::ALTERNATE_PORTS)),
        server_uri: rdata.data.get(attr::SERVER_URI).cloned().unwrap_or_default(),
    }
}

/// Best-effort decimal port parse; absent or unparsable values become 0.
fn parse_port(value: Option<&String>) -> u16 {
    value.and_then(|s| s.parse().ok()).unwrap_or(0)
}

/// Best-effort boolean parse; absent or unparsable values become false.
fn parse_flag(value: Option<&String>) -> bool {
    value.and_then(|s| s.parse().ok()).unwrap_or(false)
}

/// An unparsable address voids the whole endpoint; an unparsable port
/// alone degrades to port 0 on the parsed address.
fn parse_endpoint(ip: Option<&String>, port: Option<&String>) -> SocketAddr {
    match ip.and_then(|s| s.parse::<IpAddr>().ok()) {
        Some(addr) => SocketAddr::new(addr, parse_port(port)),
        None => unspecified_endpoint(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample_descriptor() -> RegionDescriptor {
        RegionDescriptor {
            region_id: Uuid::new_v4(),
            name: "Sandbox".to_string(),
            x: 1000,
            y: 1002,
            external_endpoint: "203.0.113.9:9000".parse().unwrap(),
            external_host_name: "sim1.example.net".to_string(),
            internal_endpoint: "10.0.0.9:9000".parse().unwrap(),
            http_port: 9001,
            allow_alternate_ports: true,
            server_uri: "http://sim1.example.net:9001/".to_string(),
        }
    }

    #[test]
    fn encodes_every_endpoint_field() {
        let scope = Uuid::new_v4();
        let rinfo = sample_descriptor();
        let rdata = descriptor_to_record(scope, &rinfo);

        assert_eq!(rdata.region_id, rinfo.region_id);
        assert_eq!(rdata.scope_id, scope);
        assert_eq!((rdata.pos_x, rdata.pos_y), (1000, 1002));
        assert_eq!(rdata.data[attr::EXTERNAL_IP_ADDRESS], "203.0.113.9");
        assert_eq!(rdata.data[attr::EXTERNAL_PORT], "9000");
        assert_eq!(rdata.data[attr::EXTERNAL_HOST_NAME], "sim1.example.net");
        assert_eq!(rdata.data[attr::HTTP_PORT], "9001");
        assert_eq!(rdata.data[attr::INTERNAL_IP_ADDRESS], "10.0.0.9");
        assert_eq!(rdata.data[attr::INTERNAL_PORT], "9000");
        assert_eq!(rdata.data[attr::ALTERNATE_PORTS], "true");
        assert_eq!(
            rdata.data[attr::SERVER_URI],
            "http://sim1.example.net:9001/"
        );
    }

    #[test]
    fn round_trips_all_persisted_fields() {
        let rinfo = sample_descriptor();
        let rdata = descriptor_to_record(Uuid::new_v4(), &rinfo);
        let back = record_to_descriptor(&rdata);

        // Name is not persisted; everything else survives.
        assert_eq!(back.name, "");
        assert_eq!(back.region_id, rinfo.region_id);
        assert_eq!((back.x, back.y), (rinfo.x, rinfo.y));
        assert_eq!(back.external_endpoint, rinfo.external_endpoint);
        assert_eq!(back.external_host_name, rinfo.external_host_name);
        assert_eq!(back.internal_endpoint, rinfo.internal_endpoint);
        assert_eq!(back.http_port, rinfo.http_port);
        assert_eq!(back.allow_alternate_ports, rinfo.allow_alternate_ports);
        assert_eq!(back.server_uri, rinfo.server_uri);
    }

    #[test]
    fn name_is_not_written_by_the_translator() {
        let rdata = descriptor_to_record(Uuid::new_v4(), &sample_descriptor());
        assert_eq!(rdata.name, "");
    }

    #[test]
    fn malformed_port_decodes_to_zero() {
        let mut rdata = descriptor_to_record(Uuid::new_v4(), &sample_descriptor());
        rdata
            .data
            .insert(attr::EXTERNAL_PORT.to_string(), "not-a-port".to_string());
        rdata
            .data
            .insert(attr::HTTP_PORT.to_string(), "99999999".to_string());

        let back = record_to_descriptor(&rdata);
        assert_eq!(back.external_endpoint.port(), 0);
        assert_eq!(back.external_endpoint.ip().to_string(), "203.0.113.9");
        assert_eq!(back.http_port, 0);
    }

    #[test]
    fn malformed_address_voids_the_endpoint() {
        let mut rdata = descriptor_to_record(Uuid::new_v4(), &sample_descriptor());
        rdata.data.insert(
            attr::INTERNAL_IP_ADDRESS.to_string(),
            "not an address".to_string(),
        );

        let back = record_to_descriptor(&rdata);
        assert_eq!(back.internal_endpoint.to_string(), "0.0.0.0:0");
    }

    #[test]
    fn malformed_flag_decodes_to_false() {
        let mut rdata = descriptor_to_record(Uuid::new_v4(), &sample_descriptor());
        rdata
            .data
            .insert(attr::ALTERNATE_PORTS.to_string(), "maybe".to_string());

        assert!(!record_to_descriptor(&rdata).allow_alternate_ports);
    }

    #[test]
    fn absent_attributes_decode_to_zero_values() {
        let rinfo = sample_descriptor();
        let mut rdata = descriptor_to_record(Uuid::new_v4(), &rinfo);
        rdata.data.clear();

        let back = record_to_descriptor(&rdata);
        assert_eq!(back.external_endpoint.to_string(), "0.0.0.0:0");
        assert_eq!(back.internal_endpoint.to_string(), "0.0.0.0:0");
        assert_eq!(back.external_host_name, "");
        assert_eq!(back.http_port, 0);
        assert!(!back.allow_alternate_ports);
        assert_eq!(back.server_uri, "");
        // Identity and position live outside the attribute map.
        assert_eq!(back.region_id, rinfo.region_id);
        assert_eq!((back.x, back.y), (rinfo.x, rinfo.y));
    }
}
