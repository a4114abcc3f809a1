//! Command-line parsing for the `flatfinder` binary.
//!
//! Numeric arguments are taken as strings so they go through the same
//! validation as form input.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "flatfinder", version, about = "HDB resale affordability calculator")]
pub struct Cli {
    /// Settings file (YAML or TOML).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Housing grants for a salary and flat type.
    Grant {
        /// Monthly salary.
        #[arg(long)]
        salary: String,
        /// Flat type, e.g. "4-Room" or "4 ROOM".
        #[arg(long)]
        flat_type: String,
    },
    /// Affordability verdict for one listing price.
    Classify(ClassifyArgs),
    /// Effective-rate description for a loan product.
    LoanRate {
        #[arg(long)]
        loan_type: String,
        /// Tenure in years.
        #[arg(long)]
        tenure: f64,
    },
    /// Instalments and total interest for a loan product.
    Exposure {
        #[arg(long)]
        loan_type: String,
        #[arg(long)]
        principal: String,
        /// Tenure in years.
        #[arg(long)]
        tenure: f64,
    },
    /// Screen a town's resale listings for a buyer.
    Screen(ScreenArgs),
}

#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    #[arg(long)]
    pub preferred_price: String,
    #[arg(long)]
    pub listing_price: String,
    /// Monthly salary.
    #[arg(long)]
    pub salary: String,
    #[arg(long)]
    pub flat_type: String,
    #[arg(long)]
    pub cpf_balance: String,
}

#[derive(Debug, Parser)]
pub struct ScreenArgs {
    /// Buyer profile (TOML or JSON).
    #[arg(long, value_name = "FILE")]
    pub profile: PathBuf,
    /// Resale records: a datastore response or a record array (JSON).
    #[arg(long, value_name = "FILE")]
    pub listings: PathBuf,
    /// Town, e.g. "ANG MO KIO".
    #[arg(long)]
    pub town: String,
    /// Month to screen (YYYY-MM). Defaults to the current month.
    #[arg(long)]
    pub month: Option<String>,
}
