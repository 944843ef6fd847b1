// ✅ Validator - format check → check digit → provider
//
// The provider is only contacted once the account number is well-formed,
// the bank code resolves in the registry, and (with precheck on) the check
// digit says the bank could have issued the number.

use crate::config::Config;
use crate::entities::{resolve_bank_code, validate_card_bin, AccountDetails, CardBin};
use crate::error::NubanError;
use crate::nuban::{is_possible_issuer, validate_account_number};
use crate::providers::{Provider, ProviderClient, ProviderError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error(transparent)]
    Nuban(#[from] NubanError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Debug, Clone)]
pub struct Validator {
    client: ProviderClient,
    default_provider: Provider,
    precheck: bool,
}

impl Validator {
    pub fn new(client: ProviderClient, default_provider: Provider) -> Self {
        Validator {
            client,
            default_provider,
            precheck: true,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let client = ProviderClient::new(config)?;
        Ok(Self::new(client, config.default_provider).with_precheck(config.precheck))
    }

    /// Builder pattern: toggle the offline check-digit gate
    pub fn with_precheck(mut self, precheck: bool) -> Self {
        self.precheck = precheck;
        self
    }

    pub fn default_provider(&self) -> Provider {
        self.default_provider
    }

    /// Validate `account_number` against `bank_code` (6-digit or legacy 3-digit)
    pub async fn validate(
        &self,
        account_number: &str,
        bank_code: &str,
        provider: Option<Provider>,
    ) -> Result<AccountDetails, ValidationError> {
        let provider = provider.unwrap_or(self.default_provider);

        validate_account_number(account_number)?;

        // Prefer the curated record so 6-digit and 3-digit input attach the same bank
        let bank = resolve_bank_code(bank_code)
            .map(|bank| bank.weighted_entry().unwrap_or(bank))
            .ok_or_else(|| NubanError::UnknownBank(bank_code.to_string()))?;

        if self.precheck && !is_possible_issuer(account_number, &bank.code) {
            tracing::info!(account_number, bank = %bank.slug, "check digit mismatch, provider not contacted");
            return Err(NubanError::CheckDigitMismatch {
                account_number: account_number.to_string(),
                bank_code: bank.code.clone(),
            }
            .into());
        }

        let details = self
            .client
            .resolve_account(provider, account_number, bank.provider_code())
            .await?;

        Ok(details.with_bank(bank.clone()))
    }

    /// Resolve issuer metadata for a 6-digit card BIN
    pub async fn resolve_card(
        &self,
        bin: &str,
        provider: Option<Provider>,
    ) -> Result<CardBin, ValidationError> {
        validate_card_bin(bin)?;
        let provider = provider.unwrap_or(self.default_provider);
        Ok(self.client.resolve_card_bin(provider, bin).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nuban::compute_check_digit;

    fn validator() -> Validator {
        // No secret keys: any provider call fails fast with MissingSecretKey
        Validator::from_config(&Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_format_checked_first() {
        let err = validator().validate("12345", "000015", None).await.unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Nuban(NubanError::InvalidAccountNumber(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_bank() {
        let err = validator().validate("0123456789", "999999", None).await.unwrap_err();
        assert!(matches!(err, ValidationError::Nuban(NubanError::UnknownBank(_))));

        // Legacy codes outside the weighted list are unknown too
        let err = validator().validate("0123456789", "999", None).await.unwrap_err();
        assert!(matches!(err, ValidationError::Nuban(NubanError::UnknownBank(_))));
    }

    #[tokio::test]
    async fn test_check_digit_mismatch_skips_provider() {
        // 0123456780 fails the Zenith check digit (expected 9)
        let err = validator().validate("0123456780", "057", None).await.unwrap_err();
        match err {
            ValidationError::Nuban(NubanError::CheckDigitMismatch { bank_code, .. }) => {
                assert_eq!(bank_code, "000015");
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_passing_precheck_reaches_provider() {
        // Check digit passes, so the failure comes from the (unconfigured) provider
        let err = validator().validate("0123456789", "000015", None).await.unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Provider(ProviderError::MissingSecretKey(Provider::Paystack))
        ));
    }

    #[tokio::test]
    async fn test_precheck_can_be_disabled() {
        let validator = validator().with_precheck(false);
        let err = validator
            .validate("0123456780", "057", Some(Provider::Flutterwave))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Provider(ProviderError::MissingSecretKey(Provider::Flutterwave))
        ));
    }

    #[tokio::test]
    async fn test_resolve_card_validates_bin() {
        let err = validator().resolve_card("5399", None).await.unwrap_err();
        assert!(matches!(err, ValidationError::Nuban(NubanError::InvalidCardBin(_))));
    }

    #[cfg(feature = "server")]
    #[tokio::test]
    async fn test_validate_attaches_registry_bank() {
        use crate::providers::mock;

        let base = mock::spawn().await;
        let validator = Validator::from_config(&mock::config(&base, mock::SECRET)).unwrap();

        // Canonical code in, legacy code out to the provider, bank attached
        let details = validator.validate("0123456789", "000015", None).await.unwrap();
        assert_eq!(details.bank_code, "057");
        assert_eq!(details.account_name, "ADA LOVELACE");
        assert_eq!(details.bank_name(), "ZENITH BANK");
        let bank = details.bank.unwrap();
        assert_eq!(bank.code, "000015");
        assert_eq!(bank.old_code.as_deref(), Some("057"));
    }

    #[cfg(feature = "server")]
    #[tokio::test]
    async fn test_six_and_three_digit_input_attach_same_bank() {
        use crate::providers::mock;

        let base = mock::spawn().await;
        let validator = Validator::from_config(&mock::config(&base, mock::SECRET)).unwrap();

        let by_code = validator.validate("0123456789", "000015", None).await.unwrap();
        let by_old_code = validator.validate("0123456789", "057", None).await.unwrap();
        assert_eq!(by_code.bank_code, by_old_code.bank_code);
        assert_eq!(by_code.bank, by_old_code.bank);
    }

    #[cfg(feature = "server")]
    #[tokio::test]
    async fn test_generated_account_round_trip() {
        use crate::providers::mock;

        let base = mock::spawn().await;
        let validator = Validator::from_config(&mock::config(&base, mock::SECRET)).unwrap();

        let serial = "204060801";
        let digit = compute_check_digit(serial, "000015").unwrap();
        let account = format!("{}{}", serial, digit);

        let details = validator.validate(&account, "057", None).await.unwrap();
        assert_eq!(details.account_number, account);
    }
}
