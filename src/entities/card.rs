// 💳 Card BIN - issuer metadata for the first 6 digits of a card number

use crate::error::{NubanError, NubanResult};
use crate::providers::Provider;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const CARD_BIN_LENGTH: usize = 6;

/// Exactly 6 ASCII digits
pub fn validate_card_bin(bin: &str) -> NubanResult<()> {
    if bin.len() == CARD_BIN_LENGTH && bin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(NubanError::InvalidCardBin(bin.to_string()))
    }
}

/// Provider-neutral card issuer metadata
///
/// Flutterwave reports less than Paystack; missing fields stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardBin {
    pub provider: Provider,
    pub bin: String,

    /// Card scheme, e.g. "Mastercard", "Visa", "Verve"
    pub brand: Option<String>,
    pub sub_brand: Option<String>,

    /// "DEBIT", "CREDIT", ...
    pub card_type: Option<String>,

    /// ISO 3166-1 alpha-2
    pub country_code: Option<String>,
    pub country_name: Option<String>,

    /// Issuing bank name as reported by the provider
    pub bank: Option<String>,

    pub resolved_at: DateTime<Utc>,
}

impl CardBin {
    pub fn new(provider: Provider, bin: String) -> Self {
        CardBin {
            provider,
            bin,
            brand: None,
            sub_brand: None,
            card_type: None,
            country_code: None,
            country_name: None,
            bank: None,
            resolved_at: Utc::now(),
        }
    }

    pub fn is_domestic(&self) -> bool {
        self.country_code.as_deref() == Some("NG")
    }
}
