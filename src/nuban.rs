// 🔢 NUBAN Check-Digit Engine
//
// CBN check digit over `bank_code ++ serial` with alternating 3,7 weights.
// Pure functions: no state, no I/O, safe to call from any thread.

use crate::entities::{all_banks, Bank};
use crate::error::{NubanError, NubanResult};

pub const SERIAL_LENGTH: usize = 9;
pub const ACCOUNT_NUMBER_LENGTH: usize = 10;

const WEIGHTS: [u32; 2] = [3, 7];

fn ensure_numeric(field: &'static str, value: &str) -> NubanResult<()> {
    if value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(NubanError::NonNumeric {
            field,
            value: value.to_string(),
        })
    }
}

/// Format check every account number must pass before reaching the engine
pub fn validate_account_number(account_number: &str) -> NubanResult<()> {
    if account_number.len() == ACCOUNT_NUMBER_LENGTH
        && account_number.bytes().all(|b| b.is_ascii_digit())
    {
        Ok(())
    } else {
        Err(NubanError::InvalidAccountNumber(account_number.to_string()))
    }
}

/// Compute the check digit for a serial (at most 9 digits) under a bank code
///
/// The serial is left-padded to 9 digits. The result is `9 - (sum % 10)`,
/// the literal CBN formula (`10 - modulo - 1`), not `10 - modulo`.
pub fn compute_check_digit(serial: &str, bank_code: &str) -> NubanResult<u8> {
    if serial.len() > SERIAL_LENGTH {
        return Err(NubanError::InvalidSerialLength { len: serial.len() });
    }
    ensure_numeric("serial", serial)?;
    ensure_numeric("bank_code", bank_code)?;

    let padded = format!("{:0>width$}", serial, width = SERIAL_LENGTH);

    let sum: u32 = bank_code
        .bytes()
        .chain(padded.bytes())
        .zip(WEIGHTS.iter().cycle())
        .map(|(digit, weight)| u32::from(digit - b'0') * weight)
        .sum();

    let modulo = (sum % 10) as u8;
    Ok(9 - modulo)
}

/// Could `bank_code` have issued `account_number`?
///
/// Expects a validated 10-digit account number; anything else is `false`.
pub fn is_possible_issuer(account_number: &str, bank_code: &str) -> bool {
    if validate_account_number(account_number).is_err() {
        return false;
    }

    let (serial, check) = account_number.split_at(SERIAL_LENGTH);
    let claimed = check.as_bytes()[0] - b'0';

    compute_check_digit(serial, bank_code)
        .map(|expected| expected == claimed)
        .unwrap_or(false)
}

/// Candidates whose code passes the check digit, in input order
///
/// Over the full registry this routinely yields many banks: distinct codes
/// collide on the same check digit. Narrow with a curated list.
pub fn get_possible_issuers<'a, I>(account_number: &str, candidates: I) -> Vec<Bank>
where
    I: IntoIterator<Item = &'a Bank>,
{
    let matches: Vec<Bank> = candidates
        .into_iter()
        .filter(|bank| is_possible_issuer(account_number, &bank.code))
        .cloned()
        .collect();

    tracing::trace!(account_number, matches = matches.len(), "filtered possible issuers");
    matches
}

/// `get_possible_issuers` against the full registry
pub fn get_possible_banks(account_number: &str) -> Vec<Bank> {
    get_possible_issuers(account_number, all_banks())
}

// ============================================================================
// TESTS
// ============================================================================
