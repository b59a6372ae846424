use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::resolver::{Destination, DestinationRequest, PkiRecord, ResolutionError, Resolver};
use crate::models::Paymail;

/// Bounds every call of an inner resolver by a deadline.
///
/// A call that outlives the deadline is reported as
/// [`ResolutionError::ResolverUnavailable`].
pub struct TimeoutResolver {
    inner: Arc<dyn Resolver>,
    timeout: Duration,
}

impl TimeoutResolver {
    pub fn new(inner: Arc<dyn Resolver>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        paymail: &Paymail,
        call: impl Future<Output = Result<T, ResolutionError>>,
    ) -> Result<T, ResolutionError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    handle = %paymail,
                    operation,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Resolver call timed out"
                );
                Err(ResolutionError::ResolverUnavailable(format!(
                    "{} timed out after {}ms",
                    operation,
                    self.timeout.as_millis()
                )))
            }
        }
    }
}

#[async_trait]
impl Resolver for TimeoutResolver {
    async fn resolve_identity(&self, paymail: &Paymail) -> Result<PkiRecord, ResolutionError> {
        self.bounded("identity lookup", paymail, self.inner.resolve_identity(paymail))
            .await
    }

    async fn resolve_destinations(
        &self,
        paymail: &Paymail,
        request: &DestinationRequest,
    ) -> Result<Vec<Destination>, ResolutionError> {
        self.bounded(
            "destination lookup",
            paymail,
            self.inner.resolve_destinations(paymail, request),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowResolver;

    #[async_trait]
    impl Resolver for SlowResolver {
        async fn resolve_identity(&self, paymail: &Paymail) -> Result<PkiRecord, ResolutionError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(PkiRecord {
                handle: paymail.handle(),
                pubkey: String::new(),
            })
        }

        async fn resolve_destinations(
            &self,
            _paymail: &Paymail,
            _request: &DestinationRequest,
        ) -> Result<Vec<Destination>, ResolutionError> {
            Ok(vec![Destination {
                script: "51".to_string(),
                satoshis: None,
            }])
        }
    }

    #[tokio::test]
    async fn test_slow_call_becomes_unavailable() {
        let resolver = TimeoutResolver::new(Arc::new(SlowResolver), Duration::from_millis(50));
        let paymail: Paymail = "alice@example.com".parse().unwrap();

        let err = resolver.resolve_identity(&paymail).await.unwrap_err();
        assert!(matches!(err, ResolutionError::ResolverUnavailable(_)));
    }

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let resolver = TimeoutResolver::new(Arc::new(SlowResolver), Duration::from_secs(1));
        let paymail: Paymail = "alice@example.com".parse().unwrap();

        let outputs = resolver
            .resolve_destinations(&paymail, &DestinationRequest::default())
            .await
            .unwrap();
        assert_eq!(outputs.len(), 1);
    }
}
