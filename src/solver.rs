//! Present/cleanup orchestration for DNS-01 challenges.
//!
//! Each operation is a short-lived, stateless-between-calls sequence:
//! login, derive the challenge entry and domain, resolve the zone, then
//! add (present) or find-and-remove (cleanup) the TXT record. There are no
//! retries at this level; every provider failure propagates immediately and
//! the external host decides whether to invoke the operation again.

use crate::client::{DnsServicesClient, Session};
use crate::error::{Result, SolverError};
use crate::matching::{find_record, find_zone, split_fqdn};
use crate::types::{ChallengeRequest, Credentials, NewRecord, Zone};

/// Record type published for DNS-01 challenges.
const CHALLENGE_RECORD_TYPE: &str = "TXT";

/// Sequences provider calls for a single DNS-01 challenge operation.
///
/// Holds only an unauthenticated [`DnsServicesClient`]; every
/// [`present`](Self::present) or [`cleanup`](Self::cleanup) performs its own
/// login and zone listing, so concurrent operations for different challenges
/// are naturally isolated.
pub struct ChallengeSolver {
    client: DnsServicesClient,
}

impl ChallengeSolver {
    /// Solver against the production dns.services endpoint.
    pub fn new() -> Self {
        Self {
            client: DnsServicesClient::new(),
        }
    }

    /// Solver against a custom endpoint (test servers, staging).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: DnsServicesClient::with_base_url(base_url),
        }
    }

    /// Publish the challenge TXT record.
    ///
    /// Tolerates being invoked multiple times with the same value: no error
    /// is raised on repeats, but the provider API does not deduplicate, so a
    /// duplicate record may be created. That is accepted behavior, not
    /// silently fixed here.
    pub async fn present(
        &self,
        request: &ChallengeRequest,
        credentials: &Credentials,
    ) -> Result<()> {
        log::info!(
            "Present: namespace={}, zone={}, fqdn={}",
            request.resource_namespace,
            request.resolved_zone,
            request.resolved_fqdn
        );
        log_outcome("present", self.do_present(request, credentials).await)
    }

    /// Remove the challenge TXT record.
    ///
    /// Idempotent from the caller's perspective: an already-gone record is
    /// success, not an error.
    pub async fn cleanup(
        &self,
        request: &ChallengeRequest,
        credentials: &Credentials,
    ) -> Result<()> {
        log::info!(
            "CleanUp: namespace={}, zone={}, fqdn={}",
            request.resource_namespace,
            request.resolved_zone,
            request.resolved_fqdn
        );
        log_outcome("cleanup", self.do_cleanup(request, credentials).await)
    }

    async fn do_present(
        &self,
        request: &ChallengeRequest,
        credentials: &Credentials,
    ) -> Result<()> {
        let session = self.client.login(credentials).await?;

        let (entry, domain) = split_fqdn(&request.resolved_fqdn, &request.resolved_zone);
        log::debug!("Adding TXT entry '{entry}' to domain '{domain}'");

        let zone = self.resolve_zone(&session, &domain).await?;
        let txt = NewRecord::txt(&entry, &request.key);
        session.add_record(&zone, &txt).await?;

        log::info!("Presented TXT record for {}", request.resolved_fqdn);
        Ok(())
    }

    async fn do_cleanup(
        &self,
        request: &ChallengeRequest,
        credentials: &Credentials,
    ) -> Result<()> {
        let session = self.client.login(credentials).await?;

        let (entry, domain) = split_fqdn(&request.resolved_fqdn, &request.resolved_zone);
        log::debug!("Removing TXT entry '{entry}' from domain '{domain}'");

        let zone = self.resolve_zone(&session, &domain).await?;
        let details = session.zone_details(&zone).await?;

        // Lookup first by the full resolved FQDN, then by the bare entry.
        let record = find_record(
            details.records.values(),
            CHALLENGE_RECORD_TYPE,
            &request.resolved_fqdn,
        )
        .or_else(|| find_record(details.records.values(), CHALLENGE_RECORD_TYPE, &entry));

        let Some(record) = record else {
            log::info!(
                "Record not found: {} / {entry}, nothing to clean up",
                request.resolved_fqdn
            );
            return Ok(());
        };

        log::debug!(
            "Found record {} ({} = {})",
            record.id,
            record.name,
            record.data().display_value()
        );
        session.remove_record(&zone, &record.id).await?;

        log::info!("Removed TXT record for {}", request.resolved_fqdn);
        Ok(())
    }

    /// List the account's zones and pick the one matching `domain`.
    async fn resolve_zone(&self, session: &Session, domain: &str) -> Result<Zone> {
        let zones = session.list_zones().await?;
        find_zone(&zones.zones, domain)
            .cloned()
            .ok_or_else(|| SolverError::ZoneNotFound {
                domain: domain.to_string(),
            })
    }
}

impl Default for ChallengeSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Log a finished operation at the level its outcome deserves.
fn log_outcome(operation: &str, result: Result<()>) -> Result<()> {
    if let Err(error) = &result {
        if error.is_expected() {
            log::warn!("{operation} failed: {error}");
        } else {
            log::error!("{operation} failed: {error}");
        }
    }
    result
}
