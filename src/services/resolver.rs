//! Resolution capability set.
//!
//! Handlers only talk to [`Resolver`]; where the handle-to-key mappings live
//! (in memory, a key-value store, another service) is up to the implementation.

use async_trait::async_trait;

use crate::models::Paymail;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("invalid paymail identifier: {0}")]
    InvalidIdentifier(String),

    #[error("domain {0} is not served here")]
    UnknownDomain(String),

    #[error("no paymail {0}")]
    UnknownAlias(String),

    #[error("paymail {0} has no payment destination")]
    NoDestination(String),

    #[error("resolver unavailable: {0}")]
    ResolverUnavailable(String),
}

/// Public key bound to a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkiRecord {
    pub handle: String,
    pub pubkey: String,
}

/// One output a payer should fund.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub script: String,
    pub satoshis: Option<u64>,
}

/// Request-time parameters for payment destination lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationRequest {
    pub amount: Option<u64>,
    pub sender_handle: Option<Paymail>,
    pub purpose: Option<String>,
}

#[async_trait]
pub trait Resolver: Send + Sync {
    /// Look up the public key for `paymail`.
    async fn resolve_identity(&self, paymail: &Paymail) -> Result<PkiRecord, ResolutionError>;

    /// Produce one or more outputs paying `paymail`.
    ///
    /// Implementations must return at least one destination on success.
    async fn resolve_destinations(
        &self,
        paymail: &Paymail,
        request: &DestinationRequest,
    ) -> Result<Vec<Destination>, ResolutionError>;
}
