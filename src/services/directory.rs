//! In-memory directory of paymail accounts.
//!
//! The directory is read once at startup and never written back. The only
//! state that changes afterwards is the rotation cursor of rotating accounts.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

use super::resolver::{Destination, DestinationRequest, PkiRecord, ResolutionError, Resolver};
use crate::models::{Account, DirectoryFile, Paymail, RotationPolicy};

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("failed to read directory file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse directory file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{handle}: public key must be a 33-byte compressed key in hex")]
    InvalidPubkey { handle: String },

    #[error("{handle}: destination script is not valid hex")]
    InvalidScript { handle: String },

    #[error("{0} is listed more than once")]
    DuplicateHandle(String),
}

#[derive(Debug)]
struct Entry {
    pubkey: String,
    destinations: Vec<String>,
    rotation: RotationPolicy,
    cursor: AtomicUsize,
}

impl Entry {
    fn next_destinations(&self) -> Vec<String> {
        match self.rotation {
            RotationPolicy::Static => self.destinations.clone(),
            RotationPolicy::Rotating => {
                let turn = self.cursor.fetch_add(1, Ordering::Relaxed);
                vec![self.destinations[turn % self.destinations.len()].clone()]
            }
        }
    }
}

/// [`Resolver`] backed by a fixed set of accounts.
#[derive(Debug, Default)]
pub struct DirectoryResolver {
    accounts: HashMap<String, Entry>,
    domains: HashSet<String>,
}

impl DirectoryResolver {
    /// Create a directory with no accounts
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a directory from already parsed accounts
    pub fn from_accounts(accounts: Vec<Account>) -> Result<Self, DirectoryError> {
        let mut directory = Self::default();

        for account in accounts {
            let handle = account.handle.handle();

            if !is_compressed_pubkey(&account.pubkey) {
                return Err(DirectoryError::InvalidPubkey { handle });
            }
            if !account.destinations.iter().all(|script| is_hex_script(script)) {
                return Err(DirectoryError::InvalidScript { handle });
            }
            if directory.accounts.contains_key(&handle) {
                return Err(DirectoryError::DuplicateHandle(handle));
            }

            directory.domains.insert(account.handle.domain().to_string());
            directory.accounts.insert(
                handle,
                Entry {
                    pubkey: account.pubkey.to_ascii_lowercase(),
                    destinations: account
                        .destinations
                        .iter()
                        .map(|script| script.to_ascii_lowercase())
                        .collect(),
                    rotation: account.rotation,
                    cursor: AtomicUsize::new(0),
                },
            );
        }

        Ok(directory)
    }

    /// Load a JSON directory file from disk
    pub async fn load(path: &Path) -> Result<Self, DirectoryError> {
        let raw = tokio::fs::read(path).await.map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: DirectoryFile = serde_json::from_slice(&raw)?;
        let directory = Self::from_accounts(file.accounts)?;

        info!(
            path = %path.display(),
            accounts = directory.len(),
            domains = directory.domains.len(),
            "Loaded paymail directory"
        );

        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn serves_domain(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    fn lookup(&self, paymail: &Paymail) -> Result<&Entry, ResolutionError> {
        if !self.serves_domain(paymail.domain()) {
            return Err(ResolutionError::UnknownDomain(paymail.domain().to_string()));
        }
        self.accounts
            .get(&paymail.handle())
            .ok_or_else(|| ResolutionError::UnknownAlias(paymail.handle()))
    }
}

#[async_trait]
impl Resolver for DirectoryResolver {
    async fn resolve_identity(&self, paymail: &Paymail) -> Result<PkiRecord, ResolutionError> {
        let entry = self.lookup(paymail)?;
        Ok(PkiRecord {
            handle: paymail.handle(),
            pubkey: entry.pubkey.clone(),
        })
    }

    async fn resolve_destinations(
        &self,
        paymail: &Paymail,
        request: &DestinationRequest,
    ) -> Result<Vec<Destination>, ResolutionError> {
        let entry = self.lookup(paymail)?;
        if entry.destinations.is_empty() {
            return Err(ResolutionError::NoDestination(paymail.handle()));
        }

        let mut destinations: Vec<Destination> = entry
            .next_destinations()
            .into_iter()
            .map(|script| Destination {
                script,
                satoshis: None,
            })
            .collect();

        // The requested amount goes to the first output only
        if let Some(first) = destinations.first_mut() {
            first.satoshis = request.amount;
        }

        debug!(
            handle = %paymail,
            outputs = destinations.len(),
            amount = ?request.amount,
            "Resolved payment destinations"
        );

        Ok(destinations)
    }
}

/// SEC1 compressed point: 33 bytes with an even/odd `y` prefix.
fn is_compressed_pubkey(value: &str) -> bool {
    match hex::decode(value) {
        Ok(bytes) => bytes.len() == 33 && matches!(bytes[0], 0x02 | 0x03),
        Err(_) => false,
    }
}

fn is_hex_script(value: &str) -> bool {
    hex::decode(value).map_or(false, |bytes| !bytes.is_empty())
}
