//! Command dispatch.
//!
//! Every command prints a JSON document on stdout. Logs go to stderr.

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde_json::json;

use flatfinder_config::{init_tracing, Settings};
use flatfinder_core::{
    calculate_grant, classify_listing, parse_amount, resolve_interest_exposure,
    resolve_loan_rate, tenure_months, BuyerProfile, FlatType, LoanType, MAX_TENURE_YEARS,
};
use flatfinder_tools::{format_sgd, ListingScreener, StaticListingSource, YearMonth};

use crate::cli::{ClassifyArgs, Cli, Command, ScreenArgs};

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    init_tracing(&settings.logging);
    log_startup(&cli, &settings);

    let output = match cli.command {
        Command::Grant { salary, flat_type } => grant(&salary, &flat_type)?,
        Command::Classify(args) => classify(&args),
        Command::LoanRate { loan_type, tenure } => json!({
            "loan_type": loan_type,
            "tenure_years": tenure,
            "description": resolve_loan_rate(&LoanType::parse(&loan_type), tenure),
        }),
        Command::Exposure {
            loan_type,
            principal,
            tenure,
        } => exposure(&loan_type, &principal, tenure)?,
        Command::Screen(args) => screen(&args, &settings).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

// Settings::load runs before a subscriber exists, so report its outcome here.
fn log_startup(cli: &Cli, settings: &Settings) {
    tracing::debug!(
        config = ?cli.config,
        log_level = %settings.logging.level,
        page_limit = settings.screening.page_limit,
        default_tenure_years = settings.screening.default_tenure_years,
        command = ?cli.command,
        "Starting flatfinder"
    );
}

fn grant(salary: &str, flat_type: &str) -> Result<serde_json::Value> {
    let salary = parse_amount("salary", salary)?;
    let flat_type = FlatType::parse(flat_type);
    let grant = calculate_grant(salary, &flat_type);

    Ok(json!({
        "flat_type": flat_type,
        "grant": grant,
        "display": {
            "singles_grant": format_sgd(grant.singles_grant_amount),
            "enhanced_grant": format_sgd(grant.enhanced_grant_amount),
            "total_grant": format_sgd(grant.total_grant),
        },
    }))
}

fn classify(args: &ClassifyArgs) -> serde_json::Value {
    let classification = classify_listing(
        &args.preferred_price,
        &args.listing_price,
        &args.salary,
        &FlatType::parse(&args.flat_type),
        &args.cpf_balance,
    );

    json!({ "color": classification })
}

fn exposure(loan_type: &str, principal: &str, tenure: f64) -> Result<serde_json::Value> {
    let principal = parse_amount("principal", principal)?;
    if tenure_months(tenure).is_none() {
        bail!("tenure must be more than 0 and at most {MAX_TENURE_YEARS} years, got {tenure}");
    }
    let loan_type = LoanType::parse(loan_type);

    let exposure = resolve_interest_exposure(&loan_type, principal, tenure)
        .ok_or_else(|| anyhow!("no rate schedule for loan type {:?}", loan_type.label()))?;

    Ok(json!({
        "loan_type": loan_type,
        "description": resolve_loan_rate(&loan_type, tenure),
        "exposure": exposure,
        "display": {
            "total_interest": format_sgd(exposure.total_interest),
            "total_repayment": format_sgd(exposure.total_repayment),
        },
    }))
}

async fn screen(args: &ScreenArgs, settings: &Settings) -> Result<serde_json::Value> {
    let profile = read_profile(&args.profile)?;
    let source = StaticListingSource::from_json_file(&args.listings)
        .with_context(|| format!("reading listings from {}", args.listings.display()))?;

    let screener = ListingScreener::new(Arc::new(source), settings.screening.clone());

    let report = match &args.month {
        Some(month) => {
            let month: YearMonth = month.parse()?;
            screener.screen_month(&profile, &args.town, month).await?
        }
        None => {
            let today = chrono::Local::now().date_naive();
            screener.screen(&profile, &args.town, today).await?
        }
    };

    Ok(serde_json::to_value(report)?)
}

fn read_profile(path: &Path) -> Result<BuyerProfile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading profile from {}", path.display()))?;

    let profile = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        _ => toml::from_str(&content)?,
    };

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_startup_event_names_settings_and_command() {
        let cli = Cli::try_parse_from([
            "flatfinder",
            "--config",
            "flatfinder.toml",
            "grant",
            "--salary",
            "4000",
            "--flat-type",
            "4-Room",
        ])
        .unwrap();

        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || log_startup(&cli, &Settings::default()));

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Starting flatfinder"), "{output}");
        assert!(output.contains("flatfinder.toml"), "{output}");
        assert!(output.contains("Grant"), "{output}");
        assert!(output.contains("page_limit=200"), "{output}");
    }

    #[test]
    fn test_grant_output() {
        let output = grant("4000", "5-Room").unwrap();
        assert_eq!(output["grant"]["total_grant"], 85_000.0);
        assert_eq!(output["display"]["total_grant"], "S$85,000");
        assert_eq!(output["flat_type"], "5-Room");
    }

    #[test]
    fn test_grant_rejects_bad_salary() {
        assert!(grant("lots", "4-Room").is_err());
    }

    #[test]
    fn test_classify_output() {
        let args = ClassifyArgs {
            preferred_price: "500000".into(),
            listing_price: "abc".into(),
            salary: "4000".into(),
            flat_type: "4-Room".into(),
            cpf_balance: "20000".into(),
        };
        assert_eq!(classify(&args)["color"], "gray");
    }

    #[test]
    fn test_exposure_unknown_loan_type() {
        assert!(exposure("Mystery Loan", "300000", 25.0).is_err());
        let output = exposure("HDB Housing Loan", "300000", 25.0).unwrap();
        assert_eq!(output["description"], "2.6% per annum");
    }

    #[test]
    fn test_exposure_rejects_out_of_range_tenure() {
        for tenure in [2e8, 0.0, -1.0, f64::NAN] {
            let err = exposure("HDB Housing Loan", "300000", tenure).unwrap_err();
            assert!(err.to_string().contains("tenure"), "{err}");
        }
        assert!(exposure("HDB Housing Loan", "300000", MAX_TENURE_YEARS).is_ok());
    }

    #[test]
    fn test_read_profile_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            "salary = 4000.0\nflat_type = \"4 ROOM\"\ncpf_balance = 20000.0\n\
             preferred_price = 500000.0\nloan_type = \"HDB Housing Loan\"\n"
        )
        .unwrap();

        let profile = read_profile(file.path()).unwrap();
        assert_eq!(profile.flat_type, FlatType::FourRoom);
        assert_eq!(profile.loan_type, LoanType::HdbHousingLoan);
    }
}
