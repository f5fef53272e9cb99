//! Offline license key tool
//!
//! Usage:
//!   license-tool inspect customer.license
//!   license-tool verify --key license-public.key customer.license
//!   license-tool issue --private-key license-private.key --id 01-23-4567 \
//!       --name "A Licensee" --issued 2024-01-01 --expires 2025-01-01
//!
//! Logs go to stderr; stdout carries only command output.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use offline_license::SignatureAlgorithm;
use offline_license_cli::{inspect, issue, parse_date, read_input, verifier_config, verify, IssueRequest};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "license-tool")]
#[command(about = "Inspect, verify and issue offline license keys")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a license key without checking its signature
    Inspect {
        /// License file, or - for stdin
        license: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check a license key's signature and expiry date
    Verify {
        /// License file, or - for stdin
        license: PathBuf,

        /// DER X.509 public key (overrides the config file)
        #[arg(short, long)]
        key: Option<PathBuf>,

        /// Signature algorithm (overrides the config file)
        #[arg(short, long)]
        algorithm: Option<SignatureAlgorithm>,

        /// Verifier config file (defaults to the user config directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Sign a new license key
    Issue {
        /// DER PKCS#8 private key
        #[arg(short, long)]
        private_key: PathBuf,

        /// Signature algorithm
        #[arg(short, long, default_value = "rsa-sha1")]
        algorithm: SignatureAlgorithm,

        /// License identifier
        #[arg(long)]
        id: String,

        /// Licensee name
        #[arg(long)]
        name: String,

        /// Issue date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        issued: NaiveDate,

        /// Last valid day (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        expires: NaiveDate,
    },
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match args.command {
        Command::Inspect { license, json } => {
            let summary = inspect(&read_input(&license)?)?;
            println!("{}", summary.render(json)?);
        }
        Command::Verify {
            license,
            key,
            algorithm,
            config,
            json,
        } => {
            let verifier = verifier_config(config.as_deref(), key, algorithm)?.build_verifier()?;
            let summary = verify(&read_input(&license)?, &verifier)?;
            println!("{}", summary.render(json)?);
        }
        Command::Issue {
            private_key,
            algorithm,
            id,
            name,
            issued,
            expires,
        } => {
            let request = IssueRequest {
                identifier: id,
                licensed_name: name,
                issue_date: issued,
                expiry_date: expires,
            };
            print!("{}", issue(&private_key, algorithm, request)?);
        }
    }

    Ok(())
}
