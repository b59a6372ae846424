#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use paymail_server::middleware::{RequestObserver, RequestRecord};
use paymail_server::models::{Account, Paymail, RotationPolicy};
use paymail_server::services::{
    Destination, DestinationRequest, PkiRecord, ResolutionError, Resolver,
};
use paymail_server::{create_router, AppState, Config, DirectoryResolver};

pub const ALICE_KEY: &str = "02f2b2ae8e1b9b2c3b6f7c1c6b2b8f6e1c1d7f9e6a2c3b4d5e6f708192a3b4c5d6";
pub const BOB_KEY: &str = "03a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f90";
pub const SCRIPT_A: &str = "76a914000102030405060708090a0b0c0d0e0f1011121388ac";
pub const SCRIPT_B: &str = "76a9141415161718191a1b1c1d1e1f202122232425262788ac";

pub const SCHEMA_CONTENT_TYPE: &str =
    r#"application/json; schema="https://schemas.nchain.com/bsvalias/1.0/capability-discovery""#;

fn paymail(handle: &str) -> Paymail {
    handle.parse().unwrap()
}

/// alice: static, two outputs. bob: rotating, two outputs. carol: no outputs.
pub fn fixture_directory() -> DirectoryResolver {
    DirectoryResolver::from_accounts(vec![
        Account::new(paymail("alice@example.com"), ALICE_KEY).with_destinations(
            vec![SCRIPT_A.to_string(), SCRIPT_B.to_string()],
            RotationPolicy::Static,
        ),
        Account::new(paymail("bob@example.com"), BOB_KEY).with_destinations(
            vec![SCRIPT_A.to_string(), SCRIPT_B.to_string()],
            RotationPolicy::Rotating,
        ),
        Account::new(paymail("carol@example.com"), ALICE_KEY),
    ])
    .unwrap()
}

/// Collects every request record for inspection.
#[derive(Default)]
pub struct RecordingObserver {
    pub records: Mutex<Vec<RequestRecord>>,
}

impl RecordingObserver {
    pub fn records(&self) -> Vec<RequestRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl RequestObserver for RecordingObserver {
    fn on_request(&self, record: &RequestRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}

/// Resolver whose upstream is always down.
pub struct UnavailableResolver;

#[async_trait]
impl Resolver for UnavailableResolver {
    async fn resolve_identity(&self, _paymail: &Paymail) -> Result<PkiRecord, ResolutionError> {
        Err(ResolutionError::ResolverUnavailable("key store offline".into()))
    }

    async fn resolve_destinations(
        &self,
        _paymail: &Paymail,
        _request: &DestinationRequest,
    ) -> Result<Vec<Destination>, ResolutionError> {
        Err(ResolutionError::ResolverUnavailable("key store offline".into()))
    }
}

/// Resolver that never answers within any sensible deadline.
pub struct StalledResolver;

#[async_trait]
impl Resolver for StalledResolver {
    async fn resolve_identity(&self, paymail: &Paymail) -> Result<PkiRecord, ResolutionError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Err(ResolutionError::UnknownAlias(paymail.handle()))
    }

    async fn resolve_destinations(
        &self,
        paymail: &Paymail,
        _request: &DestinationRequest,
    ) -> Result<Vec<Destination>, ResolutionError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Err(ResolutionError::UnknownAlias(paymail.handle()))
    }
}

pub fn server_with(config: Config, resolver: Arc<dyn Resolver>) -> (TestServer, Arc<RecordingObserver>) {
    let observer = Arc::new(RecordingObserver::default());
    let state = Arc::new(AppState::new(config, resolver));
    let app = create_router(state, Some(observer.clone() as Arc<dyn RequestObserver>));
    (TestServer::new(app).unwrap(), observer)
}

pub fn test_server() -> (TestServer, Arc<RecordingObserver>) {
    server_with(
        Config::default().with_base_url("https://pay.example.com"),
        Arc::new(fixture_directory()),
    )
}
