// 🏦 Bank Registry - Static table of Nigerian financial institutions
//
// Two immutable lists, built once from CSV compiled into the binary:
// - full list: every institution with a 6-digit NIBSS code
// - weighted list: curated subset carrying legacy 3-digit codes + weights
//
// Several records may share one code (issuer variants of merged banks).

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

const FULL_BANKS_CSV: &str = include_str!("../../data/banks.csv");
const WEIGHTED_BANKS_CSV: &str = include_str!("../../data/weighted_banks.csv");

static FULL_BANKS: LazyLock<Vec<Bank>> = LazyLock::new(|| {
    load_banks(FULL_BANKS_CSV).unwrap_or_else(|e| panic!("data/banks.csv: {e:#}"))
});

static WEIGHTED_BANKS: LazyLock<Vec<Bank>> = LazyLock::new(|| {
    load_banks(WEIGHTED_BANKS_CSV).unwrap_or_else(|e| panic!("data/weighted_banks.csv: {e:#}"))
});

// ============================================================================
// BANK KEY
// ============================================================================

/// Property a registry lookup matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankKey {
    /// Lowercase snake identifier, e.g. `guaranty_trust_bank`
    Slug,

    /// Canonical 6-digit code
    Code,

    /// Legacy 3-digit code (weighted list only)
    OldCode,
}

impl BankKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            BankKey::Slug => "slug",
            BankKey::Code => "code",
            BankKey::OldCode => "old_code",
        }
    }
}

// ============================================================================
// BANK RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    /// Stable identity, shared between the full and weighted lists
    pub id: u32,

    pub slug: String,

    /// Display name
    pub name: String,

    /// Canonical 6-digit code, zero-padded
    pub code: String,

    /// Legacy 3-digit code (only the weighted list carries these)
    pub old_code: Option<String>,

    /// Relevance hint, higher is more common
    pub weight: Option<u32>,
}

impl Bank {
    /// Value of the given lookup property, if the record carries one
    pub fn key(&self, key: BankKey) -> Option<&str> {
        match key {
            BankKey::Slug => Some(&self.slug),
            BankKey::Code => Some(&self.code),
            BankKey::OldCode => self.old_code.as_deref(),
        }
    }

    /// Curated record sharing this bank's id, if the weighted list has one
    pub fn weighted_entry(&self) -> Option<&'static Bank> {
        weighted_banks().iter().find(|w| w.id == self.id)
    }

    /// Code the payment providers expect: legacy code when the registry knows
    /// one (full-list records carry none), canonical otherwise
    pub fn provider_code(&self) -> &str {
        self.old_code
            .as_deref()
            .or_else(|| self.weighted_entry().and_then(|w| w.old_code.as_deref()))
            .unwrap_or(&self.code)
    }
}

// ============================================================================
// LOADING
// ============================================================================

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a bank table from CSV (`id,slug,name,code,old_code,weight`)
///
/// Enforces: 6-digit `code`, 3-digit `old_code`, unique `id` and `slug`.
pub fn load_banks(csv_data: &str) -> Result<Vec<Bank>> {
    let mut reader = csv::Reader::from_reader(csv_data.as_bytes());
    let mut banks = Vec::new();
    let mut ids = HashSet::new();
    let mut slugs = HashSet::new();

    for (index, record) in reader.deserialize::<Bank>().enumerate() {
        let line = index + 2;
        let bank = record.with_context(|| format!("Failed to parse bank record on line {}", line))?;

        if !is_digits(&bank.code, 6) {
            return Err(anyhow!("Line {}: code {:?} is not 6 digits", line, bank.code));
        }
        if let Some(old_code) = &bank.old_code {
            if !is_digits(old_code, 3) {
                return Err(anyhow!("Line {}: old_code {:?} is not 3 digits", line, old_code));
            }
        }
        if !ids.insert(bank.id) {
            return Err(anyhow!("Line {}: duplicate id {}", line, bank.id));
        }
        if !slugs.insert(bank.slug.clone()) {
            return Err(anyhow!("Line {}: duplicate slug {:?}", line, bank.slug));
        }

        banks.push(bank);
    }

    Ok(banks)
}

// ============================================================================
// LOOKUPS
// ============================================================================

/// Every known institution
pub fn all_banks() -> &'static [Bank] {
    &FULL_BANKS
}

/// Curated, operationally relevant subset
pub fn weighted_banks() -> &'static [Bank] {
    &WEIGHTED_BANKS
}

/// First record in `banks` whose `key` equals `value`
pub fn find_bank<'a>(banks: &'a [Bank], value: &str, key: BankKey) -> Option<&'a Bank> {
    banks.iter().find(|bank| bank.key(key) == Some(value))
}

/// Registry lookup
///
/// `Slug` and `Code` search the full list. `OldCode` searches the weighted
/// list only, since that is the only list carrying legacy codes.
pub fn get_bank(value: &str, key: BankKey) -> Option<&'static Bank> {
    match key {
        BankKey::Slug | BankKey::Code => find_bank(all_banks(), value, key),
        BankKey::OldCode => find_bank(weighted_banks(), value, key),
    }
}

/// Resolve a caller-supplied bank code: 6 digits → canonical, 3 digits → legacy
pub fn resolve_bank_code(code: &str) -> Option<&'static Bank> {
    match code.len() {
        6 => get_bank(code, BankKey::Code),
        3 => get_bank(code, BankKey::OldCode),
        _ => None,
    }
}

// ============================================================================
// TESTS
// ============================================================================
