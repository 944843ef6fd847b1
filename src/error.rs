// ⚠️ Core Errors
// Everything the offline engine can reject. Registry misses are `None`, not errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NubanError {
    /// Serial longer than 9 digits (never truncated)
    #[error("Serial must be at most 9 digits, got {len}")]
    InvalidSerialLength { len: usize },

    /// Serial or bank code contains something other than ASCII digits
    #[error("{field} must be numeric, got {value:?}")]
    NonNumeric { field: &'static str, value: String },

    /// Account number is not exactly 10 ASCII digits
    #[error("Account number must be exactly 10 digits, got {0:?}")]
    InvalidAccountNumber(String),

    /// Card BIN is not exactly 6 ASCII digits
    #[error("Card BIN must be exactly 6 digits, got {0:?}")]
    InvalidCardBin(String),

    /// No registry entry for the given code
    #[error("Unknown bank code: {0}")]
    UnknownBank(String),

    /// Check digit does not match the bank code
    #[error("Account number {account_number} cannot belong to bank {bank_code}")]
    CheckDigitMismatch {
        account_number: String,
        bank_code: String,
    },
}

pub type NubanResult<T> = Result<T, NubanError>;
