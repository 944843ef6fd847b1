// ⚙️ Configuration - environment (+ optional .env file)

use crate::providers::Provider;
use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_PAYSTACK_BASE_URL: &str = "https://api.paystack.co";
pub const DEFAULT_FLUTTERWAVE_BASE_URL: &str = "https://api.flutterwave.com";
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Endpoint + credentials for one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub base_url: String,
    pub secret_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub paystack: ProviderSettings,
    pub flutterwave: ProviderSettings,

    /// Provider used when a request does not name one
    pub default_provider: Provider,

    /// Run the offline check digit before contacting a provider
    pub precheck: bool,

    pub http_timeout: Duration,
    pub server_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            paystack: ProviderSettings {
                base_url: DEFAULT_PAYSTACK_BASE_URL.to_string(),
                secret_key: None,
            },
            flutterwave: ProviderSettings {
                base_url: DEFAULT_FLUTTERWAVE_BASE_URL.to_string(),
                secret_key: None,
            },
            default_provider: Provider::Paystack,
            precheck: true,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            server_addr: DEFAULT_SERVER_ADDR.to_string(),
        }
    }
}

impl Config {
    /// Load `.env` (if present) then read the process environment
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or blank keys take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(url) = get("PAYSTACK_BASE_URL") {
            config.paystack.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = get("FLUTTERWAVE_BASE_URL") {
            config.flutterwave.base_url = url.trim_end_matches('/').to_string();
        }
        config.paystack.secret_key = get(Provider::Paystack.secret_key_var());
        config.flutterwave.secret_key = get(Provider::Flutterwave.secret_key_var());

        if let Some(provider) = get("NUBAN_PROVIDER") {
            config.default_provider = provider
                .parse::<Provider>()
                .with_context(|| format!("Invalid NUBAN_PROVIDER: {:?}", provider))?;
        }
        if let Some(precheck) = get("NUBAN_PRECHECK") {
            config.precheck = parse_bool(&precheck)
                .with_context(|| format!("Invalid NUBAN_PRECHECK: {:?}", precheck))?;
        }
        if let Some(secs) = get("NUBAN_HTTP_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("Invalid NUBAN_HTTP_TIMEOUT_SECS: {:?}", secs))?;
            config.http_timeout = Duration::from_secs(secs);
        }
        if let Some(addr) = get("NUBAN_SERVER_ADDR") {
            config.server_addr = addr;
        }

        Ok(config)
    }

    pub fn provider(&self, provider: Provider) -> &ProviderSettings {
        match provider {
            Provider::Paystack => &self.paystack,
            Provider::Flutterwave => &self.flutterwave,
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected true/false, got {:?}", other),
    }
}
