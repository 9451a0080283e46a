use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// TTL used for ACME challenge TXT records, as the wire string the
/// dns.services API expects.
pub const CHALLENGE_TTL: &str = "3600";

// ============ Host-Facing Types ============

/// Account credentials for the dns.services API.
///
/// Supplied by the external credential source (e.g. the challenge host's
/// secret store); the crate treats both fields as opaque strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// A DNS-01 challenge request handed over by the external challenge host.
///
/// `resolved_fqdn` is the full name to publish the TXT record under,
/// `resolved_zone` the DNS name of the zone it belongs to, and `key` the TXT
/// value to publish.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    /// Full name to publish the challenge under
    /// (e.g. `"_acme-challenge.example.com."`).
    #[serde(rename = "resolvedFQDN")]
    pub resolved_fqdn: String,
    /// DNS name of the zone (e.g. `"example.com."`).
    pub resolved_zone: String,
    /// TXT value to publish.
    pub key: String,
    /// Namespace the challenge originates from. Carried for logging only.
    #[serde(default)]
    pub resource_namespace: String,
    /// Host-specific solver configuration, carried opaquely. Decoding
    /// credential references out of it is the host's concern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

// ============ Zone Types ============

/// Account zone listing, as returned by `GET /dns`.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneList {
    /// Service identifiers visible to the account.
    #[serde(default)]
    pub service_ids: Vec<String>,
    /// Zones visible to the account, in provider-returned order.
    ///
    /// The order matters: zone resolution is first-match (see
    /// [`find_zone`](crate::matching::find_zone)).
    #[serde(default)]
    pub zones: Vec<Zone>,
}

/// A DNS zone owned by the account, identified by `(service_id, domain_id)`.
///
/// Immutable once fetched; the client re-fetches the zone list on every
/// operation rather than caching it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Provider-assigned domain identifier.
    pub domain_id: String,
    /// Zone DNS name, without a trailing dot.
    pub name: String,
    /// Provider-assigned service identifier.
    pub service_id: String,
}

/// Zone details as returned by `GET /service/{service_id}/dns/{domain_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneDetails {
    /// Provider-assigned service identifier.
    #[serde(default)]
    pub service_id: String,
    /// Zone DNS name.
    #[serde(default)]
    pub name: String,
    /// Records in the zone, keyed by record name. Iteration order is
    /// undefined.
    #[serde(default)]
    pub records: HashMap<String, ApiRecord>,
}

// ============ Record Types ============

/// A DNS resource record as the dns.services API returns it.
///
/// `ttl` and `prio` are strings on the wire; the crate never does arithmetic
/// on them, so they are kept as-is. `content` is polymorphic (a plain string
/// for most types, structured JSON for others) — use [`data()`](Self::data)
/// for a typed view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiRecord {
    /// Provider-assigned record identifier, unknown until creation or lookup.
    #[serde(default)]
    pub id: String,
    /// Provider-assigned domain identifier.
    #[serde(default)]
    pub domain_id: String,
    /// Record name.
    pub name: String,
    /// Record type (e.g. `"TXT"`), compared verbatim.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Time-to-live, as the wire string.
    #[serde(default)]
    pub ttl: String,
    /// Priority, as the wire string. Empty for types without one.
    #[serde(default)]
    pub prio: String,
    /// Raw record content (string or structured, depending on type).
    #[serde(default)]
    pub content: Value,
}

impl ApiRecord {
    /// Typed view of `(type, content)`.
    pub fn data(&self) -> RecordData {
        RecordData::from_wire(&self.record_type, &self.content)
    }
}

/// Type-safe representation of DNS record content.
///
/// The wire carries an untyped `content` next to a `type` string; this maps
/// the pair into a variant keyed by record type. Types this crate does not
/// model (or content shapes that don't match the type) fall back to
/// [`Raw`](Self::Raw) so that foreign records in a zone never fail decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordData {
    /// TXT record — arbitrary text data (the only type the solver creates).
    Txt {
        /// Text content.
        text: String,
    },
    /// A record — IPv4 address.
    A {
        /// IPv4 address (e.g. `"192.0.2.1"`).
        address: String,
    },
    /// AAAA record — IPv6 address.
    Aaaa {
        /// IPv6 address (e.g. `"2001:db8::1"`).
        address: String,
    },
    /// CNAME record — alias to another name.
    Cname {
        /// Target hostname.
        target: String,
    },
    /// NS record — authoritative name server.
    Ns {
        /// Name server hostname.
        nameserver: String,
    },
    /// Any other record type, or structured content, kept verbatim.
    Raw {
        /// Record type string from the wire.
        record_type: String,
        /// Untouched content value.
        content: Value,
    },
}

impl RecordData {
    /// Build the typed view from wire `type` and `content` fields.
    pub fn from_wire(record_type: &str, content: &Value) -> Self {
        let text = content.as_str();
        match (record_type.to_uppercase().as_str(), text) {
            ("TXT", Some(s)) => Self::Txt { text: s.to_string() },
            ("A", Some(s)) => Self::A {
                address: s.to_string(),
            },
            ("AAAA", Some(s)) => Self::Aaaa {
                address: s.to_string(),
            },
            ("CNAME", Some(s)) => Self::Cname {
                target: s.to_string(),
            },
            ("NS", Some(s)) => Self::Ns {
                nameserver: s.to_string(),
            },
            _ => Self::Raw {
                record_type: record_type.to_string(),
                content: content.clone(),
            },
        }
    }

    /// Returns the primary display value (the address/target/text, or the
    /// raw content rendered as JSON).
    pub fn display_value(&self) -> String {
        match self {
            Self::Txt { text } => text.clone(),
            Self::A { address } | Self::Aaaa { address } => address.clone(),
            Self::Cname { target } => target.clone(),
            Self::Ns { nameserver } => nameserver.clone(),
            Self::Raw { content, .. } => content.to_string(),
        }
    }
}

/// Record payload for `POST /service/{service_id}/dns/{domain_id}/records`.
#[derive(Debug, Clone, Serialize)]
pub struct NewRecord {
    /// Record name relative to the zone (the challenge entry).
    pub name: String,
    /// Record type string.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Time-to-live, as the wire string.
    pub ttl: String,
    /// Record content.
    pub content: String,
}

impl NewRecord {
    /// A challenge TXT record with the standard [`CHALLENGE_TTL`].
    pub fn txt(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type: "TXT".to_string(),
            ttl: CHALLENGE_TTL.to_string(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn txt_record_constructor() {
        let rec = NewRecord::txt("_acme-challenge", "key-123");
        assert_eq!(rec.name, "_acme-challenge");
        assert_eq!(rec.record_type, "TXT");
        assert_eq!(rec.ttl, "3600");
        assert_eq!(rec.content, "key-123");
    }

    #[test]
    fn new_record_serializes_type_field() {
        let rec = NewRecord::txt("entry", "value");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["type"], "TXT");
        assert_eq!(json["ttl"], "3600");
    }

    #[test]
    fn record_data_txt_from_wire() {
        let data = RecordData::from_wire("TXT", &json!("challenge-value"));
        assert_eq!(
            data,
            RecordData::Txt {
                text: "challenge-value".to_string()
            }
        );
        assert_eq!(data.display_value(), "challenge-value");
    }

    #[test]
    fn record_data_structured_content_falls_back_to_raw() {
        let content = json!({"priority": 10, "exchange": "mail.example.com"});
        let data = RecordData::from_wire("MX", &content);
        assert!(matches!(data, RecordData::Raw { ref record_type, .. } if record_type == "MX"));
    }

    #[test]
    fn zone_details_decodes_record_map() {
        let body = json!({
            "service_id": "s1",
            "name": "example.com",
            "records": {
                "_acme-challenge.example.com": {
                    "id": "r1",
                    "domain_id": "d1",
                    "name": "_acme-challenge.example.com",
                    "type": "TXT",
                    "ttl": "3600",
                    "prio": "0",
                    "content": "key-123"
                }
            }
        });
        let details: ZoneDetails = serde_json::from_value(body).unwrap();
        let rec = &details.records["_acme-challenge.example.com"];
        assert_eq!(rec.record_type, "TXT");
        assert_eq!(
            rec.data(),
            RecordData::Txt {
                text: "key-123".to_string()
            }
        );
    }

    #[test]
    fn zone_details_tolerates_missing_records() {
        let details: ZoneDetails =
            serde_json::from_value(json!({"service_id": "s1", "name": "example.com"})).unwrap();
        assert!(details.records.is_empty());
    }

    #[test]
    fn challenge_request_decodes_camel_case() {
        let req: ChallengeRequest = serde_json::from_value(json!({
            "resolvedFQDN": "_acme-challenge.example.com.",
            "resolvedZone": "example.com.",
            "key": "key-123"
        }))
        .unwrap();
        assert_eq!(req.resolved_fqdn, "_acme-challenge.example.com.");
        assert_eq!(req.resource_namespace, "");
        assert!(req.config.is_none());
    }
}
