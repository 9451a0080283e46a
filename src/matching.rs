//! Zone resolution and record matching.
//!
//! Pure functions over the typed zone/record data. All name comparisons
//! happen after trailing-dot normalization: `"example.com."` and
//! `"example.com"` are the same name.

use crate::types::{ApiRecord, Zone};

/// Strip a single trailing dot from a DNS name.
pub fn normalize_name(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Resolve the zone responsible for `requested` from the provider-returned
/// zone list.
///
/// First pass: the first zone whose normalized name equals the requested
/// name. Second pass, only when no exact match exists: the first zone whose
/// normalized name is a substring of the requested name.
///
/// # Known limitation
///
/// The substring fallback is first-match in provider-returned order, not
/// most-specific-match. When a zone list contains nested domains (say
/// `"example.com"` and `"sub.example.com"`), resolution of a name under the
/// nested zone depends on listing order. This matches the provider-parity
/// behavior the crate commits to and must not be upgraded to longest-suffix
/// matching.
pub fn find_zone<'a>(zones: &'a [Zone], requested: &str) -> Option<&'a Zone> {
    let requested = normalize_name(requested);

    if let Some(zone) = zones
        .iter()
        .find(|zone| normalize_name(&zone.name) == requested)
    {
        return Some(zone);
    }

    zones
        .iter()
        .find(|zone| requested.contains(normalize_name(&zone.name)))
}

/// Find the record matching `record_type` and `name` exactly.
///
/// Both the target name and each candidate name are normalized before
/// comparison. Unlike zone resolution there is no substring fallback, and
/// the record type must match verbatim. Iteration order is whatever the
/// backing name-keyed map yields.
pub fn find_record<'a, I>(records: I, record_type: &str, name: &str) -> Option<&'a ApiRecord>
where
    I: IntoIterator<Item = &'a ApiRecord>,
{
    let name = normalize_name(name);
    records
        .into_iter()
        .find(|record| record.record_type == record_type && normalize_name(&record.name) == name)
}

/// Split a challenge FQDN into `(entry, domain)`.
///
/// The entry is the FQDN with the zone suffix removed and any stray trailing
/// dot stripped; the domain is the zone name without its trailing dot.
pub fn split_fqdn(fqdn: &str, zone: &str) -> (String, String) {
    let entry = fqdn.strip_suffix(zone).unwrap_or(fqdn);
    let entry = entry.strip_suffix('.').unwrap_or(entry);
    let domain = normalize_name(zone);
    (entry.to_string(), domain.to_string())
}
