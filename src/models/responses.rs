use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Protocol version advertised in every bsvalias payload.
pub const BSVALIAS_VERSION: &str = "1.0";

/// Capability document returned from `/.well-known/bsvalias`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDiscoveryResponse {
    #[serde(rename = "bsvalias")]
    pub version: String,

    // Values are usually URL templates but the protocol allows nested objects
    pub capabilities: BTreeMap<String, serde_json::Value>,
}

/// Public key record for a handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PkiResponse {
    #[serde(rename = "bsvalias")]
    pub version: String,
    pub handle: String,
    pub pubkey: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationOutput {
    pub script: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satoshis: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDestinationResponse {
    /// First output script, for clients that only read a single output
    pub output: String,
    pub outputs: Vec<DestinationOutput>,
}

/// Query parameters accepted by the payment destination endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDestinationQuery {
    pub amount: Option<String>,
    pub sender_handle: Option<String>,
    pub purpose: Option<String>,
}

/// JSON body returned with every error status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
