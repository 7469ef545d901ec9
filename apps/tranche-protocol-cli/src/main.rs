use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod round_state;

use error::CliResult;

#[derive(Parser)]
#[command(name = "tranche-protocol")]
#[command(about = "Tranche Protocol CLI - Vested Merkle airdrops")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a deterministic recipients CSV for testing
    GenerateFixtures {
        /// Number of recipients to generate
        #[arg(short, long)]
        count: u64,

        /// Seed for deterministic generation
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Output file path
        #[arg(short, long, default_value = "recipients.csv")]
        output: PathBuf,

        /// Minimum whole tokens per recipient
        #[arg(long, default_value = "1")]
        min_amount: u64,

        /// Maximum whole tokens per recipient
        #[arg(long, default_value = "1000")]
        max_amount: u64,
    },

    /// Build the Merkle tree and per-recipient proofs from a recipients CSV
    CompileAirdrop {
        /// Recipients CSV (address,amount)
        recipients_csv: PathBuf,

        /// Output airdrop data file
        #[arg(short, long, default_value = "airdrop.json")]
        output: PathBuf,
    },

    /// Verify a recipient's published proof against the airdrop root
    VerifyProof {
        /// Airdrop data file produced by compile-airdrop
        #[arg(short, long)]
        airdrop_data: PathBuf,

        /// Recipient address
        address: String,
    },

    /// Show what an address can claim at a point in time
    CheckEligibility {
        /// Airdrop data file produced by compile-airdrop
        #[arg(short, long)]
        airdrop_data: PathBuf,

        /// Round configuration (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Recipient address
        address: String,

        /// Evaluation time: unix seconds or RFC 3339 (defaults to now)
        #[arg(long)]
        now: Option<String>,
    },

    /// Claim unlocked tokens from the local pool
    ClaimTokens {
        /// Airdrop data file produced by compile-airdrop
        #[arg(short, long)]
        airdrop_data: PathBuf,

        /// Round configuration (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Recipient address
        address: String,

        /// Token amount to claim, or "all"
        #[arg(long, default_value = "all")]
        amount: String,

        /// Claim time: unix seconds or RFC 3339 (defaults to now)
        #[arg(long)]
        now: Option<String>,
    },

    /// Summarize claim progress for the round
    QueryClaims {
        /// Airdrop data file produced by compile-airdrop
        #[arg(short, long)]
        airdrop_data: PathBuf,

        /// Round configuration (YAML)
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs one command; `Ok(false)` means it completed but reported a negative result.
fn run(cli: Cli) -> CliResult<bool> {
    match cli.command {
        Commands::GenerateFixtures {
            count,
            seed,
            output,
            min_amount,
            max_amount,
        } => commands::generate_fixtures::execute(count, seed, output, min_amount, max_amount)
            .map(|_| true),

        Commands::CompileAirdrop {
            recipients_csv,
            output,
        } => commands::compile_airdrop::execute(recipients_csv, output).map(|_| true),

        Commands::VerifyProof {
            airdrop_data,
            address,
        } => commands::verify_proof::execute(airdrop_data, address),

        Commands::CheckEligibility {
            airdrop_data,
            config,
            address,
            now,
        } => commands::check_eligibility::execute(airdrop_data, config, address, now)
            .map(|_| true),

        Commands::ClaimTokens {
            airdrop_data,
            config,
            address,
            amount,
            now,
        } => commands::claim_tokens::execute(airdrop_data, config, address, amount, now)
            .map(|_| true),

        Commands::QueryClaims {
            airdrop_data,
            config,
        } => commands::query_claims::execute(airdrop_data, config).map(|_| true),
    }
}
