use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::models::{Paymail, PkiResponse, BSVALIAS_VERSION};
use crate::server::AppState;

/// GET /api/v1/bsvalias/id/{paymail}
///
/// Returns the public key bound to the handle.
pub async fn identity(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<PkiResponse>, ApiError> {
    let Path(raw) = path?;
    let paymail: Paymail = raw.parse()?;

    let record = state.resolver.resolve_identity(&paymail).await?;
    info!(handle = %record.handle, "Resolved identity");

    Ok(Json(PkiResponse {
        version: BSVALIAS_VERSION.to_string(),
        handle: record.handle,
        pubkey: record.pubkey,
    }))
}
