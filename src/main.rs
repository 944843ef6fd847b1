use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use nuban_validator::{
    all_banks, compute_check_digit, get_bank, get_possible_issuers, validate_account_number,
    weighted_banks, Bank, BankKey,
};

#[derive(Parser)]
#[command(name = "nuban", version, about = "Nigerian bank account (NUBAN) and card BIN lookups")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List known banks
    Banks {
        /// Only the curated list with legacy codes
        #[arg(long)]
        weighted: bool,
    },

    /// Look up one bank
    Bank {
        value: String,

        #[arg(long, value_enum, default_value_t = LookupKey::Code)]
        by: LookupKey,
    },

    /// Compute the check digit for a serial under a 6-digit bank code
    CheckDigit { serial: String, bank_code: String },

    /// Banks that could have issued an account number (offline)
    PossibleBanks {
        account_number: String,

        #[arg(long)]
        weighted: bool,
    },

    /// Resolve an account holder through a provider
    Validate {
        account_number: String,

        /// 6-digit code or legacy 3-digit code
        bank_code: String,

        /// paystack or flutterwave (defaults to NUBAN_PROVIDER)
        #[arg(long)]
        provider: Option<String>,

        /// Contact the provider even if the check digit does not match
        #[arg(long)]
        no_precheck: bool,
    },

    /// Resolve card issuer metadata for a 6-digit BIN
    CardBin {
        bin: String,

        #[arg(long)]
        provider: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LookupKey {
    Slug,
    Code,
    OldCode,
}

impl From<LookupKey> for BankKey {
    fn from(key: LookupKey) -> Self {
        match key {
            LookupKey::Slug => BankKey::Slug,
            LookupKey::Code => BankKey::Code,
            LookupKey::OldCode => BankKey::OldCode,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Banks { weighted } => {
            let banks = if weighted { weighted_banks() } else { all_banks() };
            print_banks(banks);
        }
        Command::Bank { value, by } => {
            let bank = get_bank(&value, by.into())
                .ok_or_else(|| anyhow!("No bank with {} {:?}", BankKey::from(by).as_str(), value))?;
            print_bank(bank);
        }
        Command::CheckDigit { serial, bank_code } => {
            let digit = compute_check_digit(&serial, &bank_code)?;
            println!("{}", digit);
        }
        Command::PossibleBanks { account_number, weighted } => {
            validate_account_number(&account_number)?;
            let candidates = if weighted { weighted_banks() } else { all_banks() };
            let banks = get_possible_issuers(&account_number, candidates);
            println!("🔍 {} possible bank(s) for {}", banks.len(), account_number);
            print_banks(&banks);
        }
        Command::Validate { account_number, bank_code, provider, no_precheck } => {
            run_validate(&account_number, &bank_code, provider.as_deref(), no_precheck)?;
        }
        Command::CardBin { bin, provider } => {
            run_card_bin(&bin, provider.as_deref())?;
        }
    }

    Ok(())
}

fn print_bank(bank: &Bank) {
    println!(
        "{:<6} {:<4} {:<38} {}",
        bank.code,
        bank.old_code.as_deref().unwrap_or("-"),
        bank.name,
        bank.slug
    );
}

fn print_banks(banks: &[Bank]) {
    for bank in banks {
        print_bank(bank);
    }
}

#[cfg(feature = "providers")]
fn run_validate(account_number: &str, bank_code: &str, provider: Option<&str>, no_precheck: bool) -> Result<()> {
    use nuban_validator::{Config, Provider, Validator};

    let config = Config::from_env()?;
    let provider = provider.map(str::parse::<Provider>).transpose()?;
    let validator = Validator::from_config(&config)?.with_precheck(config.precheck && !no_precheck);

    let runtime = tokio::runtime::Runtime::new()?;
    let details = runtime.block_on(validator.validate(account_number, bank_code, provider))?;

    println!("✓ {}", details.account_name);
    println!("  Account:  {}", details.account_number);
    println!("  Bank:     {} ({})", details.bank_name(), details.bank_code);
    println!("  Provider: {}", details.provider);
    Ok(())
}

#[cfg(feature = "providers")]
fn run_card_bin(bin: &str, provider: Option<&str>) -> Result<()> {
    use nuban_validator::{Config, Provider, Validator};

    let config = Config::from_env()?;
    let provider = provider.map(str::parse::<Provider>).transpose()?;
    let validator = Validator::from_config(&config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let card = runtime.block_on(validator.resolve_card(bin, provider))?;

    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    println!("💳 BIN {}", card.bin);
    println!("  Brand:    {}", show(&card.brand));
    println!("  Type:     {}", show(&card.card_type));
    println!("  Bank:     {}", show(&card.bank));
    println!("  Country:  {} ({})", show(&card.country_name), show(&card.country_code));
    println!("  Provider: {}", card.provider);
    Ok(())
}

#[cfg(not(feature = "providers"))]
fn run_validate(_: &str, _: &str, _: Option<&str>, _: bool) -> Result<()> {
    providers_unavailable()
}

#[cfg(not(feature = "providers"))]
fn run_card_bin(_: &str, _: Option<&str>) -> Result<()> {
    providers_unavailable()
}

#[cfg(not(feature = "providers"))]
fn providers_unavailable() -> Result<()> {
    eprintln!("❌ Provider lookups not available!");
    eprintln!("   Rebuild with: cargo build --features providers");
    eprintln!("   Offline commands (banks, bank, check-digit, possible-banks) still work.");
    std::process::exit(1);
}
