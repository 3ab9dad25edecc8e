//!  Innkeeper Booking Checks
//!
//!  Copyright (C) 2026  Mamy Ratsimbazafy
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.
//!
//! # Examples
//!
//! ## Validate a date pair
//!
//! ```bash
//! innkeeper-checks dates --check-in 14/07/2026 --check-out 17/07/2026
//! ```
//!
//! ## Expected price
//!
//! ```bash
//! innkeeper-checks price --rate 100 --nights 3
//! ```
//!
//! ## What the extractors read from a label
//!
//! ```bash
//! innkeeper-checks extract "£1,250.00 x 2 nights"
//! ```
//!
//! ## Check a saved page
//!
//! ```bash
//! innkeeper-checks --json page --html reservation.html --today 2026-07-01
//! ```
//!
//! # Exit status
//!
//! 0 when the check passes, 1 when it reports problems or fails to run.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use innkeeper_booking_checks::{
    BookingFormCss, Decimal, DateRangeValidator, FeeSchedule, HtmlFieldReader, PriceCalculator,
    PriceSummaryText, check_booking_page, extract_nights_count, extract_price_value,
    extract_room_price_from_nights_text,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "innkeeper-checks")]
#[command(author, version, about = "Date and price checks for hotel booking pages")]
struct Args {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct FeeArgs {
    /// Cleaning fee charged once per booking (default 25.00)
    #[arg(long)]
    cleaning_fee: Option<Decimal>,

    /// Service fee charged once per booking (default 15.00)
    #[arg(long)]
    service_fee: Option<Decimal>,
}

impl FeeArgs {
    fn schedule(&self) -> FeeSchedule {
        let defaults = FeeSchedule::default();
        FeeSchedule {
            cleaning_fee: self.cleaning_fee.unwrap_or(defaults.cleaning_fee),
            service_fee: self.service_fee.unwrap_or(defaults.service_fee),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a check-in / check-out pair
    Dates {
        #[arg(short = 'i', long)]
        check_in: String,
        #[arg(short = 'o', long)]
        check_out: String,
        /// Reference date (YYYY-MM-DD), defaults to the local date
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Expected reservation price
    Price {
        #[arg(short = 'r', long)]
        rate: Decimal,
        #[arg(short = 'n', long)]
        nights: u32,
        #[arg(short = 'C', long, default_value = "£")]
        currency: String,
        #[command(flatten)]
        fees: FeeArgs,
    },

    /// Show what the extractors read from a display string
    Extract { text: String },

    /// Check a saved HTML snapshot of the booking page
    Page {
        #[arg(long)]
        html: PathBuf,
        /// JSON file overriding the CSS selectors
        #[arg(long)]
        selectors: Option<PathBuf>,
        #[arg(long)]
        today: Option<NaiveDate>,
        #[command(flatten)]
        fees: FeeArgs,
    },
}

#[derive(Serialize)]
struct Extracted {
    text: String,
    price_value: Decimal,
    nights_count: u32,
    room_price: Decimal,
}

fn validator_for(today: Option<NaiveDate>) -> DateRangeValidator {
    today
        .map(DateRangeValidator::new)
        .unwrap_or_else(DateRangeValidator::for_local_today)
}

fn load_css(path: Option<&PathBuf>) -> Result<BookingFormCss> {
    let Some(path) = path else {
        return Ok(BookingFormCss::default());
    };
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read selectors file {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse selectors file {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize result")?
    );
    Ok(())
}

fn print_problems(problems: &[String]) {
    for p in problems {
        println!("  ✗ {}", p);
    }
}

/// Returns whether the check passed.
fn run(args: Args) -> Result<bool> {
    match args.command {
        Command::Dates {
            check_in,
            check_out,
            today,
        } => {
            let validator = validator_for(today);
            let result = validator.validate(&check_in, &check_out);
            if args.json {
                print_json(&result)?;
            } else {
                println!("Today: {}", validator.today());
                match result.nights() {
                    Some(n) => println!("✓ Valid stay of {} night(s)", n),
                    None => {
                        println!("Invalid date range:");
                        print_problems(&result.errors);
                    }
                }
            }
            Ok(result.is_valid)
        }
        Command::Price {
            rate,
            nights,
            currency,
            fees,
        } => {
            let breakdown = PriceCalculator::new(fees.schedule())
                .breakdown(rate, nights)
                .with_context(|| format!("Total for {} x {} nights overflows", rate, nights))?;
            if args.json {
                print_json(&breakdown)?;
            } else {
                let lines = PriceSummaryText::render(&breakdown, &currency);
                println!("{}", lines.nights_line);
                println!("Cleaning fee  {}", lines.cleaning_fee);
                println!("Service fee   {}", lines.service_fee);
                println!("Total         {}", lines.total);
            }
            Ok(nights > 0)
        }
        Command::Extract { text } => {
            let extracted = Extracted {
                price_value: extract_price_value(&text),
                nights_count: extract_nights_count(&text),
                room_price: extract_room_price_from_nights_text(&text),
                text,
            };
            if args.json {
                print_json(&extracted)?;
            } else {
                println!("Price value:  {}", extracted.price_value);
                println!("Nights count: {}", extracted.nights_count);
                println!("Room price:   {}", extracted.room_price);
            }
            Ok(true)
        }
        Command::Page {
            html,
            selectors,
            today,
            fees,
        } => {
            let css = load_css(selectors.as_ref())?;
            let source = std::fs::read_to_string(&html)
                .with_context(|| format!("Failed to read page snapshot {}", html.display()))?;
            let reader = HtmlFieldReader::with_css(&source, &css)?;
            let report =
                check_booking_page(&reader, validator_for(today).today(), &fees.schedule());
            if args.json {
                print_json(&report)?;
            } else if report.is_ok() {
                println!("✓ Booking page is consistent");
            } else {
                println!("Booking page has {} problem(s):", report.problems.len());
                print_problems(&report.problems);
            }
            Ok(report.is_ok())
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".to_string().into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(tracing_subscriber::fmt::time::ChronoUtc::rfc_3339())
                .with_writer(std::io::stderr),
        )
        .init();

    let args = Args::parse();
    tracing::debug!("Parsed args: {:?}", args);

    match run(args) {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Check failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
