use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use harbor_booking::{BookingDraft, BookingGate, SubmitRequest};
use harbor_core::PassportValidator;
use harbor_hold::HoldCalculator;
use harbor_shared::SystemClock;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app_config;
mod report;

use report::PassportInput;

#[derive(Debug, Parser)]
#[command(name = "harbor", about = "Passport eligibility and cruise hold checks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check a passport's remaining validity and, optionally, number and date of birth
    Passport {
        /// Expiry date, YYYY-MM-DD
        #[arg(long)]
        expiry: String,
        #[arg(long)]
        travel: Option<String>,
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        dob: Option<String>,
        /// Date of birth as printed in the passport
        #[arg(long)]
        passport_dob: Option<String>,
    },
    /// Show the hold window for a cruise of the given length
    Hold {
        #[arg(long)]
        nights: i64,
        /// RFC 3339 booking time, defaults to now
        #[arg(long)]
        booked_at: Option<DateTime<Utc>>,
    },
    /// Evaluate a booking draft (JSON) and optionally submit it
    Check {
        draft: PathBuf,
        #[arg(long)]
        submit: bool,
        #[arg(long, default_value = "cli")]
        agent: String,
        /// One of Interior, Ocean View, Balcony, Suite, Penthouse
        #[arg(long, default_value = "Interior")]
        cabin: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = app_config::Config::load().context("Failed to load config")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let policy = config
        .business_rules
        .hold_policy()
        .context("Invalid hold policy in configuration")?;
    tracing::debug!(tiers = policy.tiers().len(), "Hold policy loaded");

    match cli.command {
        Command::Passport {
            expiry,
            travel,
            number,
            dob,
            passport_dob,
        } => {
            let validator = PassportValidator::new(SystemClock);
            let report = report::passport_report(
                &validator,
                &expiry,
                PassportInput {
                    travel_date: travel.as_deref(),
                    passport_number: number.as_deref(),
                    date_of_birth: dob.as_deref(),
                    passport_dob: passport_dob.as_deref(),
                },
            );
            print_json(&report)
        }
        Command::Hold { nights, booked_at } => {
            let calculator = HoldCalculator::new(policy, SystemClock);
            let booked_at = booked_at.unwrap_or_else(|| calculator.now());
            print_json(&report::hold_report(&calculator, nights, booked_at))
        }
        Command::Check {
            draft,
            submit,
            agent,
            cabin,
        } => {
            let raw = std::fs::read_to_string(&draft)
                .with_context(|| format!("Failed to read {}", draft.display()))?;
            let draft: BookingDraft =
                serde_json::from_str(&raw).context("Booking draft is not valid JSON")?;
            let gate = BookingGate::new(policy, SystemClock);

            if !submit {
                return print_json(&gate.check(&draft));
            }

            let booking = gate.submit(
                &draft,
                SubmitRequest {
                    agent_id: agent,
                    cabin_category: cabin,
                    cabin_number: None,
                },
            )?;
            print_json(&booking)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
