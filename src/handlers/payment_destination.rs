use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::models::{
    DestinationOutput, Paymail, PaymentDestinationQuery, PaymentDestinationResponse,
};
use crate::server::AppState;
use crate::services::DestinationRequest;

/// Longest free-text purpose we pass on to the resolver.
const MAX_PURPOSE_LEN: usize = 512;

impl TryFrom<PaymentDestinationQuery> for DestinationRequest {
    type Error = ApiError;

    fn try_from(query: PaymentDestinationQuery) -> Result<Self, Self::Error> {
        let amount = match query.amount.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(ApiError::InvalidRequest(
                        "amount must be greater than zero".to_string(),
                    ))
                }
                Ok(amount) => Some(amount),
                Err(_) => {
                    return Err(ApiError::InvalidRequest(format!(
                        "amount '{}' is not a whole number of satoshis",
                        raw
                    )))
                }
            },
        };

        let sender_handle = match query.sender_handle.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<Paymail>().map_err(|e| {
                ApiError::InvalidRequest(format!("senderHandle: {}", e))
            })?),
        };

        if query
            .purpose
            .as_ref()
            .is_some_and(|purpose| purpose.len() > MAX_PURPOSE_LEN)
        {
            return Err(ApiError::InvalidRequest(format!(
                "purpose is longer than {} bytes",
                MAX_PURPOSE_LEN
            )));
        }

        Ok(DestinationRequest {
            amount,
            sender_handle,
            purpose: query.purpose,
        })
    }
}

/// GET /api/v1/bsvalias/address/{paymail}
///
/// Resolves the handle to one or more output scripts. `amount`,
/// `senderHandle` and `purpose` are optional query parameters; the sender is
/// recorded but not verified.
pub async fn payment_destination(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<PaymentDestinationQuery>, QueryRejection>,
) -> Result<Json<PaymentDestinationResponse>, ApiError> {
    let Path(raw) = path?;
    let Query(query) = query?;
    let paymail: Paymail = raw.parse()?;
    let request = DestinationRequest::try_from(query)?;

    debug!(
        handle = %paymail,
        sender = ?request.sender_handle.as_ref().map(Paymail::handle),
        amount = ?request.amount,
        "Payment destination requested"
    );

    let destinations = state
        .resolver
        .resolve_destinations(&paymail, &request)
        .await?;

    let outputs: Vec<DestinationOutput> = destinations
        .into_iter()
        .map(|d| DestinationOutput {
            script: d.script,
            satoshis: d.satoshis,
        })
        .collect();

    let output = outputs
        .first()
        .map(|o| o.script.clone())
        .ok_or_else(|| ApiError::Internal(format!("resolver returned no outputs for {}", paymail)))?;

    info!(handle = %paymail, outputs = outputs.len(), "Resolved payment destination");

    Ok(Json(PaymentDestinationResponse { output, outputs }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(amount: Option<&str>, sender: Option<&str>) -> PaymentDestinationQuery {
        PaymentDestinationQuery {
            amount: amount.map(String::from),
            sender_handle: sender.map(String::from),
            purpose: None,
        }
    }

    #[test]
    fn test_empty_query_is_valid() {
        let request = DestinationRequest::try_from(PaymentDestinationQuery::default()).unwrap();
        assert_eq!(request, DestinationRequest::default());
    }

    #[test]
    fn test_amount_parsed() {
        let request = DestinationRequest::try_from(query(Some("2500"), None)).unwrap();
        assert_eq!(request.amount, Some(2500));
    }

    #[test]
    fn test_bad_amounts_rejected() {
        for amount in ["0", "-5", "1.5", "lots"] {
            let err = DestinationRequest::try_from(query(Some(amount), None)).unwrap_err();
            assert_eq!(err.code(), "INVALID_REQUEST", "amount {}", amount);
        }
    }

    #[test]
    fn test_sender_handle_validated() {
        let request =
            DestinationRequest::try_from(query(None, Some("Bob@Example.com"))).unwrap();
        assert_eq!(
            request.sender_handle.map(|p| p.handle()),
            Some("bob@example.com".to_string())
        );

        let err = DestinationRequest::try_from(query(None, Some("bob"))).unwrap_err();
        assert_eq!(err.code(), "INVALID_REQUEST");
    }

    #[test]
    fn test_purpose_length_limited() {
        let mut q = query(None, None);
        q.purpose = Some("x".repeat(MAX_PURPOSE_LEN + 1));
        assert!(DestinationRequest::try_from(q).is_err());
    }
}
