use axum::{extract::State, Json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{ServiceDiscoveryResponse, BSVALIAS_VERSION};
use crate::server::AppState;

pub const PKI_PATH: &str = "/api/v1/bsvalias/id/{alias}@{domain.tld}";
pub const PAYMENT_DESTINATION_PATH: &str = "/api/v1/bsvalias/address/{alias}@{domain.tld}";

/// Build the capability document for `config`.
///
/// Placeholders stay literal; clients substitute the handle themselves.
pub fn capability_document(config: &Config) -> ServiceDiscoveryResponse {
    let base = config.capability_base();

    let mut capabilities = BTreeMap::new();
    capabilities.insert(
        "pki".to_string(),
        serde_json::Value::String(format!("{}{}", base, PKI_PATH)),
    );
    capabilities.insert(
        "paymentDestination".to_string(),
        serde_json::Value::String(format!("{}{}", base, PAYMENT_DESTINATION_PATH)),
    );

    ServiceDiscoveryResponse {
        version: BSVALIAS_VERSION.to_string(),
        capabilities,
    }
}

/// GET /.well-known/bsvalias
pub async fn service_discovery(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(base_url = %state.config.base_url, "Serving capability document");

    // Encode up front so a failure becomes a 500 with an error body
    let document = serde_json::to_value(capability_document(&state.config))
        .map_err(|e| ApiError::Internal(format!("failed to encode capability document: {}", e)))?;

    Ok(Json(document))
}
