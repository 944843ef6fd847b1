// NUBAN Validator - Core Library
// Exposes the offline engine plus provider glue for the CLI, API server, and tests

pub mod error;
pub mod entities;    // Bank registry + provider result types
pub mod nuban;       // Check-digit engine
pub mod providers;   // Paystack / Flutterwave
pub mod config;

#[cfg(feature = "providers")]
pub mod validator;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use error::{NubanError, NubanResult};
pub use entities::{
    all_banks, find_bank, get_bank, resolve_bank_code, weighted_banks,
    validate_card_bin, AccountDetails, Bank, BankKey, CardBin,
};
pub use nuban::{
    compute_check_digit, get_possible_banks, get_possible_issuers, is_possible_issuer,
    validate_account_number,
};
pub use providers::{Provider, ProviderError};
pub use config::{Config, ProviderSettings};

#[cfg(feature = "providers")]
pub use providers::ProviderClient;

#[cfg(feature = "providers")]
pub use validator::{ValidationError, Validator};
