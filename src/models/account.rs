use serde::{Deserialize, Serialize};

use super::Paymail;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPolicy {
    /// Every request receives all configured outputs
    #[default]
    Static,
    /// Each request receives the next output in turn
    Rotating,
}

/// One entry of the directory file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub handle: Paymail,
    pub pubkey: String,                  // 33-byte compressed key, hex
    #[serde(default)]
    pub destinations: Vec<String>,       // Locking scripts, hex
    #[serde(default)]
    pub rotation: RotationPolicy,
}

/// On-disk layout of the directory file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryFile {
    #[serde(default)]
    pub accounts: Vec<Account>,
}

impl Account {
    /// Create a static account with no payment destinations
    pub fn new(handle: Paymail, pubkey: impl Into<String>) -> Self {
        Self {
            handle,
            pubkey: pubkey.into(),
            destinations: Vec::new(),
            rotation: RotationPolicy::Static,
        }
    }

    pub fn with_destinations(mut self, destinations: Vec<String>, rotation: RotationPolicy) -> Self {
        self.destinations = destinations;
        self.rotation = rotation;
        self
    }
}
