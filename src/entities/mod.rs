// Entity Models
//
// - Bank: static registry of institutions (full + weighted lists)
// - Account: provider-confirmed account details
// - Card: issuer metadata for a 6-digit card BIN

pub mod bank;
pub mod account;
pub mod card;

pub use bank::{
    all_banks, find_bank, get_bank, load_banks, resolve_bank_code, weighted_banks, Bank, BankKey,
};
pub use account::AccountDetails;
pub use card::{validate_card_bin, CardBin, CARD_BIN_LENGTH};
