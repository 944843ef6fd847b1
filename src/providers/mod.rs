// 🌐 Payment Providers - remote account + card BIN resolution
//
// Closed set of providers, dispatched with `match`.
// - shape: pure re-shaping of provider JSON into AccountDetails / CardBin
// - client: reqwest calls (feature "providers")

pub mod shape;

#[cfg(feature = "providers")]
pub mod client;

#[cfg(feature = "providers")]
pub use client::ProviderClient;

#[cfg(all(test, feature = "server"))]
pub(crate) mod mock;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// PROVIDER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Paystack,
    Flutterwave,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Paystack, Provider::Flutterwave];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Paystack => "paystack",
            Provider::Flutterwave => "flutterwave",
        }
    }

    /// Environment variable holding the secret key
    pub fn secret_key_var(&self) -> &'static str {
        match self {
            Provider::Paystack => "PAYSTACK_SECRET_KEY",
            Provider::Flutterwave => "FLUTTERWAVE_SECRET_KEY",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paystack" => Ok(Provider::Paystack),
            "flutterwave" => Ok(Provider::Flutterwave),
            _ => Err(ProviderError::UnknownProvider(s.to_string())),
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Unknown provider {0:?} (expected paystack or flutterwave)")]
    UnknownProvider(String),

    #[error("No secret key configured for {0} (set {var})", var = .0.secret_key_var())]
    MissingSecretKey(Provider),

    #[cfg(feature = "providers")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered but refused the lookup
    #[error("{provider} rejected the request{}: {message}", status_suffix(.status))]
    Rejected {
        provider: Provider,
        status: Option<u16>,
        message: String,
    },

    /// Provider answered with something we cannot read
    #[error("{provider} returned an unexpected response: {reason}")]
    Malformed { provider: Provider, reason: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}
