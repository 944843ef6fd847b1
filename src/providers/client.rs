// 📡 Provider Client - one best-effort HTTP call per lookup, no retries

use super::{shape, Provider, ProviderError};
use crate::config::{Config, ProviderSettings};
use crate::entities::{AccountDetails, CardBin};
use reqwest::RequestBuilder;
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    paystack: ProviderSettings,
    flutterwave: ProviderSettings,
}

impl ProviderClient {
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!("nuban-validator/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(ProviderClient {
            http,
            paystack: config.paystack.clone(),
            flutterwave: config.flutterwave.clone(),
        })
    }

    fn settings(&self, provider: Provider) -> &ProviderSettings {
        match provider {
            Provider::Paystack => &self.paystack,
            Provider::Flutterwave => &self.flutterwave,
        }
    }

    /// Base URL + secret key, or `MissingSecretKey` before any request goes out
    fn endpoint(&self, provider: Provider) -> Result<(&str, &str), ProviderError> {
        let settings = self.settings(provider);
        let key = settings
            .secret_key
            .as_deref()
            .ok_or(ProviderError::MissingSecretKey(provider))?;
        Ok((settings.base_url.as_str(), key))
    }

    /// Ask the provider for the holder name of `account_number` at `bank_code`
    pub async fn resolve_account(
        &self,
        provider: Provider,
        account_number: &str,
        bank_code: &str,
    ) -> Result<AccountDetails, ProviderError> {
        let (base_url, key) = self.endpoint(provider)?;

        let request = match provider {
            Provider::Paystack => {
                let url = format!(
                    "{}/bank/resolve?account_number={}&bank_code={}",
                    base_url,
                    urlencoding::encode(account_number),
                    urlencoding::encode(bank_code)
                );
                self.http.get(url).bearer_auth(key)
            }
            Provider::Flutterwave => {
                let url = format!("{}/v3/accounts/resolve", base_url);
                self.http.post(url).bearer_auth(key).json(&json!({
                    "account_number": account_number,
                    "account_bank": bank_code,
                }))
            }
        };

        tracing::info!(%provider, account_number, bank_code, "resolving account");
        let body = self.send(provider, request).await?;
        shape::shape_account(provider, &body, bank_code)
    }

    /// Ask the provider for issuer metadata of a 6-digit card BIN
    pub async fn resolve_card_bin(
        &self,
        provider: Provider,
        bin: &str,
    ) -> Result<CardBin, ProviderError> {
        let (base_url, key) = self.endpoint(provider)?;
        let bin_path = urlencoding::encode(bin);

        let url = match provider {
            Provider::Paystack => format!("{}/decision/bin/{}", base_url, bin_path),
            Provider::Flutterwave => format!("{}/v3/card-bins/{}", base_url, bin_path),
        };

        tracing::info!(%provider, bin, "resolving card BIN");
        let body = self.send(provider, self.http.get(url).bearer_auth(key)).await?;
        shape::shape_card_bin(provider, &body)
    }

    /// Send once and decode the JSON body; non-2xx becomes `Rejected`
    async fn send(&self, provider: Provider, request: RequestBuilder) -> Result<Value, ProviderError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(%provider, status = status.as_u16(), bytes = text.len(), "provider responded");

        let parsed = serde_json::from_str::<Value>(&text);

        if status.is_success() {
            return parsed.map_err(|e| ProviderError::Malformed {
                provider,
                reason: format!("body is not JSON: {}", e),
            });
        }

        let message = parsed
            .ok()
            .as_ref()
            .and_then(shape::message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

        tracing::warn!(%provider, status = status.as_u16(), %message, "provider rejected request");
        Err(ProviderError::Rejected {
            provider,
            status: Some(status.as_u16()),
            message,
        })
    }
}
