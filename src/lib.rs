//! # dnsservices-acme
//!
//! An ACME DNS-01 challenge client for the [dns.services](https://dns.services)
//! DNS API: it logs in, resolves the zone responsible for a challenge domain,
//! and creates/deletes the `_acme-challenge` TXT records that DNS-01
//! validation requires.
//!
//! This is deliberately not a general-purpose DNS provider abstraction — it
//! targets one provider's API shape and one challenge type (TXT). The
//! challenge host (the component receiving ACME orders and retrying failed
//! operations) stays outside this crate; it supplies credentials and
//! [`ChallengeRequest`]s and receives plain `Result`s back.
//!
//! ## Feature Flags
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dnsservices_acme::{ChallengeRequest, ChallengeSolver, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let solver = ChallengeSolver::new();
//!     let credentials = Credentials::new("user", "secret");
//!
//!     let request = ChallengeRequest {
//!         resolved_fqdn: "_acme-challenge.example.com.".to_string(),
//!         resolved_zone: "example.com.".to_string(),
//!         key: "txt-challenge-value".to_string(),
//!         resource_namespace: String::new(),
//!         config: None,
//!     };
//!
//!     solver.present(&request, &credentials).await?;
//!     // ... ACME validation happens ...
//!     solver.cleanup(&request, &credentials).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Behavior Notes
//!
//! - **Stateless per call.** Every `present`/`cleanup` performs its own login
//!   and zone listing; nothing (token, zone list) is cached across calls.
//!   Correctness-simple at the cost of request volume.
//! - **No retries.** Every provider failure is terminal for the invocation;
//!   the host owns retry/backoff across invocations.
//! - **Idempotent cleanup.** A record that is already gone is success.
//! - **At-least-once present.** Repeating `present` with identical inputs
//!   does not error, but the provider API does not deduplicate, so duplicate
//!   TXT records may accumulate.
//! - **First-match zone resolution.** Zones are matched in provider-returned
//!   order, exact name first, then substring containment — not longest
//!   suffix. See [`matching::find_zone`] for the known limitation with
//!   nested zones.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, SolverError>`](SolverError), a
//! serializable tagged enum. [`SolverError::is_expected`] distinguishes
//! expected conditions (bad credentials, unknown zone) from operational
//! faults for log-level selection.

mod client;
mod error;
mod http;
mod solver;
mod types;
mod utils;

pub mod matching;

// Re-export error types
pub use error::{Result, SolverError};

// Re-export the client surface
pub use client::{DnsServicesClient, Session};

// Re-export the orchestrator
pub use solver::ChallengeSolver;

// Re-export types
pub use types::{
    ApiRecord, ChallengeRequest, Credentials, NewRecord, RecordData, Zone, ZoneDetails, ZoneList,
    CHALLENGE_TTL,
};
