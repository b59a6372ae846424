use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Longest handle accepted, matching the e-mail address limit.
pub const MAX_HANDLE_LEN: usize = 254;

fn alias_pattern() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex::Regex::new(r"^[a-z0-9][a-z0-9._+\-]*$").expect("alias pattern compiles")
    })
}

fn domain_pattern() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex::Regex::new(r"^[a-z0-9]([a-z0-9\-]*[a-z0-9])?(\.[a-z0-9]([a-z0-9\-]*[a-z0-9])?)*$")
            .expect("domain pattern compiles")
    })
}

/// A validated `alias@domain` identifier.
///
/// Both parts are stored lower-cased so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Paymail {
    alias: String,
    domain: String,
}

impl Paymail {
    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The normalized `alias@domain` form.
    pub fn handle(&self) -> String {
        format!("{}@{}", self.alias, self.domain)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymailError {
    #[error("paymail must have the form alias@domain")]
    MissingSeparator,

    #[error("paymail contains more than one '@'")]
    MultipleSeparators,

    #[error("paymail alias is empty")]
    EmptyAlias,

    #[error("paymail domain is empty")]
    EmptyDomain,

    #[error("paymail alias contains invalid characters")]
    InvalidAlias,

    #[error("paymail domain is not a valid host name")]
    InvalidDomain,

    #[error("paymail is longer than {} characters", MAX_HANDLE_LEN)]
    TooLong,
}

impl FromStr for Paymail {
    type Err = PaymailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() > MAX_HANDLE_LEN {
            return Err(PaymailError::TooLong);
        }

        let (alias, domain) = s.split_once('@').ok_or(PaymailError::MissingSeparator)?;
        if domain.contains('@') {
            return Err(PaymailError::MultipleSeparators);
        }
        if alias.is_empty() {
            return Err(PaymailError::EmptyAlias);
        }
        if domain.is_empty() {
            return Err(PaymailError::EmptyDomain);
        }

        let alias = alias.to_ascii_lowercase();
        let domain = domain.to_ascii_lowercase();

        if !alias_pattern().is_match(&alias) {
            return Err(PaymailError::InvalidAlias);
        }
        if !domain_pattern().is_match(&domain) {
            return Err(PaymailError::InvalidDomain);
        }

        Ok(Self { alias, domain })
    }
}

impl fmt::Display for Paymail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.alias, self.domain)
    }
}

impl Serialize for Paymail {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Paymail {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
