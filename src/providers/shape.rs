// 🧩 Response Shaping - provider JSON → AccountDetails / CardBin
//
// Paystack:    {"status": true,      "message": "...", "data": {...}}
// Flutterwave: {"status": "success", "message": "...", "data": {...}}

use super::{Provider, ProviderError};
use crate::entities::{AccountDetails, CardBin};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct AccountData {
    account_number: String,
    account_name: String,
}

#[derive(Debug, Deserialize)]
struct PaystackBinData {
    bin: String,
    brand: Option<String>,
    sub_brand: Option<String>,
    country_code: Option<String>,
    country_name: Option<String>,
    card_type: Option<String>,
    bank: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlutterwaveBinData {
    bin: String,
    card_type: Option<String>,
    issuer_info: Option<String>,
    issuing_country: Option<String>,
}

/// `message` field of a provider envelope, if any
pub fn message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn is_success(provider: Provider, body: &Value) -> bool {
    match provider {
        Provider::Paystack => body.get("status").and_then(Value::as_bool) == Some(true),
        Provider::Flutterwave => body.get("status").and_then(Value::as_str) == Some("success"),
    }
}

/// Check the envelope and decode its `data` payload
fn unwrap_data<T: DeserializeOwned>(provider: Provider, body: &Value) -> Result<T, ProviderError> {
    if !is_success(provider, body) {
        return Err(ProviderError::Rejected {
            provider,
            status: None,
            message: message(body).unwrap_or_else(|| "request was not successful".to_string()),
        });
    }

    let data = body.get("data").cloned().ok_or_else(|| ProviderError::Malformed {
        provider,
        reason: "missing data field".to_string(),
    })?;

    serde_json::from_value(data).map_err(|e| ProviderError::Malformed {
        provider,
        reason: e.to_string(),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// "NIGERIA NG" → ("NIGERIA", "NG")
fn split_issuing_country(value: &str) -> (Option<String>, Option<String>) {
    let value = value.trim();
    match value.rsplit_once(' ') {
        Some((name, code)) if code.len() == 2 && code.bytes().all(|b| b.is_ascii_alphabetic()) => {
            (non_empty(Some(name.trim().to_string())), Some(code.to_uppercase()))
        }
        _ => (non_empty(Some(value.to_string())), None),
    }
}

/// Account resolution response → AccountDetails
///
/// `bank_code` is the code that was sent; neither provider echoes it back.
pub fn shape_account(
    provider: Provider,
    body: &Value,
    bank_code: &str,
) -> Result<AccountDetails, ProviderError> {
    let data: AccountData = unwrap_data(provider, body)?;

    Ok(AccountDetails::new(
        provider,
        data.account_number,
        data.account_name,
        bank_code.to_string(),
    ))
}

/// BIN resolution response → CardBin
pub fn shape_card_bin(provider: Provider, body: &Value) -> Result<CardBin, ProviderError> {
    match provider {
        Provider::Paystack => {
            let data: PaystackBinData = unwrap_data(provider, body)?;
            let mut card = CardBin::new(provider, data.bin);
            card.brand = non_empty(data.brand);
            card.sub_brand = non_empty(data.sub_brand);
            card.card_type = non_empty(data.card_type);
            card.country_code = non_empty(data.country_code);
            card.country_name = non_empty(data.country_name);
            card.bank = non_empty(data.bank);
            Ok(card)
        }
        Provider::Flutterwave => {
            let data: FlutterwaveBinData = unwrap_data(provider, body)?;
            let mut card = CardBin::new(provider, data.bin);
            // Flutterwave reports the scheme as card_type and the funding type as issuer_info
            card.brand = non_empty(data.card_type);
            card.card_type = non_empty(data.issuer_info);
            if let Some(country) = data.issuing_country {
                let (name, code) = split_issuing_country(&country);
                card.country_name = name;
                card.country_code = code;
            }
            Ok(card)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shape_paystack_account() {
        let body = json!({
            "status": true,
            "message": "Account number resolved",
            "data": {
                "account_number": "0022728151",
                "account_name": "WES GIBBONS",
                "bank_id": 9
            }
        });

        let details = shape_account(Provider::Paystack, &body, "058").unwrap();
        assert_eq!(details.provider, Provider::Paystack);
        assert_eq!(details.account_number, "0022728151");
        assert_eq!(details.account_name, "WES GIBBONS");
        assert_eq!(details.bank_code, "058");
        assert!(details.bank.is_none());
    }

    #[test]
    fn test_shape_flutterwave_account() {
        let body = json!({
            "status": "success",
            "message": "Account details fetched",
            "data": {
                "account_number": "0690000032",
                "account_name": "Pastor Bright"
            }
        });

        let details = shape_account(Provider::Flutterwave, &body, "044").unwrap();
        assert_eq!(details.provider, Provider::Flutterwave);
        assert_eq!(details.account_name, "Pastor Bright");
    }

    #[test]
    fn test_shape_account_rejected() {
        let body = json!({
            "status": false,
            "message": "Could not resolve account name. Check parameters or try again."
        });

        match shape_account(Provider::Paystack, &body, "058") {
            Err(ProviderError::Rejected { provider, status, message }) => {
                assert_eq!(provider, Provider::Paystack);
                assert_eq!(status, None);
                assert!(message.starts_with("Could not resolve"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_status_style_is_provider_specific() {
        // A Paystack-style envelope is not a Flutterwave success
        let body = json!({
            "status": true,
            "data": { "account_number": "0690000032", "account_name": "X" }
        });
        assert!(shape_account(Provider::Flutterwave, &body, "044").is_err());
    }

    #[test]
    fn test_shape_account_missing_data() {
        let body = json!({ "status": "success", "message": "ok" });
        assert!(matches!(
            shape_account(Provider::Flutterwave, &body, "044"),
            Err(ProviderError::Malformed { .. })
        ));

        let body = json!({ "status": "success", "data": { "account_number": "0690000032" } });
        assert!(matches!(
            shape_account(Provider::Flutterwave, &body, "044"),
            Err(ProviderError::Malformed { .. })
        ));
    }

    #[test]
    fn test_shape_paystack_card_bin() {
        let body = json!({
            "status": true,
            "message": "Bin resolved",
            "data": {
                "bin": "539983",
                "brand": "Mastercard",
                "sub_brand": "",
                "country_code": "NG",
                "country_name": "Nigeria",
                "card_type": "DEBIT",
                "bank": "Guaranty Trust Bank",
                "linked_bank_id": 9
            }
        });

        let card = shape_card_bin(Provider::Paystack, &body).unwrap();
        assert_eq!(card.bin, "539983");
        assert_eq!(card.brand.as_deref(), Some("Mastercard"));
        assert_eq!(card.sub_brand, None); // empty string dropped
        assert_eq!(card.card_type.as_deref(), Some("DEBIT"));
        assert_eq!(card.bank.as_deref(), Some("Guaranty Trust Bank"));
        assert!(card.is_domestic());
    }

    #[test]
    fn test_shape_flutterwave_card_bin() {
        let body = json!({
            "status": "success",
            "message": "Completed fetching card bins",
            "data": {
                "issuing_country": "NIGERIA NG",
                "bin": "553188",
                "card_type": "MASTERCARD",
                "issuer_info": "CREDIT"
            }
        });

        let card = shape_card_bin(Provider::Flutterwave, &body).unwrap();
        assert_eq!(card.bin, "553188");
        assert_eq!(card.brand.as_deref(), Some("MASTERCARD"));
        assert_eq!(card.card_type.as_deref(), Some("CREDIT"));
        assert_eq!(card.country_name.as_deref(), Some("NIGERIA"));
        assert_eq!(card.country_code.as_deref(), Some("NG"));
        assert_eq!(card.bank, None);
    }

    #[test]
    fn test_split_issuing_country() {
        assert_eq!(
            split_issuing_country("UNITED STATES US"),
            (Some("UNITED STATES".to_string()), Some("US".to_string()))
        );
        assert_eq!(split_issuing_country("GHANA"), (Some("GHANA".to_string()), None));
        assert_eq!(split_issuing_country(""), (None, None));
    }

    #[test]
    fn test_message() {
        assert_eq!(message(&json!({ "message": "hi" })), Some("hi".to_string()));
        assert_eq!(message(&json!({ "status": true })), None);
    }
}
