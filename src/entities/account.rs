// 💳 Account Details - what a provider confirms about an account number

use crate::entities::Bank;
use crate::providers::Provider;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDetails {
    /// Provider that resolved the account
    pub provider: Provider,

    /// 10-digit NUBAN
    pub account_number: String,

    /// Holder name as registered with the bank
    pub account_name: String,

    /// Code sent to the provider (legacy code when the bank has one)
    pub bank_code: String,

    /// Registry entry the code resolved to, when known
    pub bank: Option<Bank>,

    pub resolved_at: DateTime<Utc>,
}

impl AccountDetails {
    pub fn new(
        provider: Provider,
        account_number: String,
        account_name: String,
        bank_code: String,
    ) -> Self {
        AccountDetails {
            provider,
            account_number,
            account_name,
            bank_code,
            bank: None,
            resolved_at: Utc::now(),
        }
    }

    /// Builder pattern: attach the registry entry
    pub fn with_bank(mut self, bank: Bank) -> Self {
        self.bank = Some(bank);
        self
    }

    /// Display name of the bank, falling back to the raw code
    pub fn bank_name(&self) -> &str {
        self.bank
            .as_ref()
            .map(|b| b.name.as_str())
            .unwrap_or(&self.bank_code)
    }
}
