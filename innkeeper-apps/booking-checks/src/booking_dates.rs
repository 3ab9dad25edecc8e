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

//! # Booking Dates
//!
//! Side-effect free validation of check-in / check-out pairs as typed into a booking form.
//! "Today" is always supplied by the caller; only calendar dates are compared.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Date format used by the booking form date pickers.
pub const BOOKING_DATE_FORMAT: &str = "%d/%m/%Y";

static STRICT_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").unwrap());

// Culture-invariant fallbacks, tried in order after the strict form.
const LOOSE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%A, %d %B %Y",
];

const LOOSE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse a date the way the booking form accepts it.
///
/// Strict `dd/MM/yyyy` first, then a handful of culture-invariant layouts
/// (ISO dates and date-times, US `M/d/yyyy`, English month names).
/// Empty input never parses.
pub fn parse_booking_date(raw: &str) -> Option<NaiveDate> {
    if STRICT_DATE_RE.is_match(raw) {
        if let Ok(date) = NaiveDate::parse_from_str(raw, BOOKING_DATE_FORMAT) {
            return Some(date);
        }
    }

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let loose = parse_loose(trimmed);
    match loose {
        Some(date) => tracing::debug!("Loose date parse: '{}' -> {}", raw, date),
        None => tracing::debug!("Could not parse date from: '{}'", raw),
    }
    loose
}

fn parse_loose(s: &str) -> Option<NaiveDate> {
    LOOSE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            LOOSE_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Render a date as the booking form shows it (`dd/MM/yyyy`).
pub fn format_booking_date(date: NaiveDate) -> String {
    date.format(BOOKING_DATE_FORMAT).to_string()
}

/// Signed number of nights between two dates. Zero or negative for invalid stays.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DateRangeValidation {
    pub is_valid: bool,
    pub check_in: String,
    pub check_out: String,
    pub parsed_check_in: Option<NaiveDate>,
    pub parsed_check_out: Option<NaiveDate>,
    pub errors: Vec<String>,
    pub has_past_check_in: bool,
    pub has_invalid_date_order: bool,
    pub has_same_day_booking: bool,
}

impl DateRangeValidation {
    /// Length of the stay, only for a valid pair.
    pub fn nights(&self) -> Option<u32> {
        if !self.is_valid {
            return None;
        }
        let (check_in, check_out) = (self.parsed_check_in?, self.parsed_check_out?);
        u32::try_from(nights_between(check_in, check_out)).ok()
    }

    pub fn has_format_error(&self) -> bool {
        self.parsed_check_in.is_none() || self.parsed_check_out.is_none()
    }
}

/// Validate a raw check-in / check-out pair against `today`.
///
/// Never fails: unparseable input is reported as a format error in `errors`.
/// Messages come in detection order: format (check-in, then check-out),
/// past check-in, date order, same day.
pub fn validate_date_range(
    check_in_raw: &str,
    check_out_raw: &str,
    today: NaiveDate,
) -> DateRangeValidation {
    let parsed_check_in = parse_booking_date(check_in_raw);
    let parsed_check_out = parse_booking_date(check_out_raw);
    let mut errors = Vec::new();

    if parsed_check_in.is_none() {
        errors.push(format!(
            "Check-in date '{}' is not in a valid date format (expected dd/MM/yyyy)",
            check_in_raw
        ));
    }
    if parsed_check_out.is_none() {
        errors.push(format!(
            "Check-out date '{}' is not in a valid date format (expected dd/MM/yyyy)",
            check_out_raw
        ));
    }

    let has_past_check_in = parsed_check_in.is_some_and(|check_in| check_in < today);
    if let Some(check_in) = parsed_check_in.filter(|_| has_past_check_in) {
        errors.push(format!(
            "Check-in date {} is in the past (today is {})",
            format_booking_date(check_in),
            format_booking_date(today)
        ));
    }

    let mut has_invalid_date_order = false;
    let mut has_same_day_booking = false;
    if let (Some(check_in), Some(check_out)) = (parsed_check_in, parsed_check_out) {
        if check_out < check_in {
            has_invalid_date_order = true;
            errors.push(format!(
                "Check-out date {} is before check-in date {} (invalid date order)",
                format_booking_date(check_out),
                format_booking_date(check_in)
            ));
        } else if check_out == check_in {
            has_same_day_booking = true;
            errors.push(format!(
                "Check-in and check-out are on the same day ({}); a stay needs at least one night",
                format_booking_date(check_in)
            ));
        }
    }

    DateRangeValidation {
        is_valid: errors.is_empty(),
        check_in: check_in_raw.to_string(),
        check_out: check_out_raw.to_string(),
        parsed_check_in,
        parsed_check_out,
        errors,
        has_past_check_in,
        has_invalid_date_order,
        has_same_day_booking,
    }
}

/// Validator bound to a fixed "today".
#[derive(Debug, Clone, Copy)]
pub struct DateRangeValidator {
    today: NaiveDate,
}

impl DateRangeValidator {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Validator for the local calendar date.
    pub fn for_local_today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn validate(&self, check_in_raw: &str, check_out_raw: &str) -> DateRangeValidation {
        validate_date_range(check_in_raw, check_out_raw, self.today)
    }
}

/// A valid stay, used to fill the booking form in scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StayDates {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayDates {
    /// Stay of `nights` nights starting `lead_days` after `today`.
    /// `None` past the last date chrono can represent.
    pub fn starting_in(today: NaiveDate, lead_days: u32, nights: u32) -> Option<Self> {
        let check_in = today.checked_add_days(Days::new(u64::from(lead_days)))?;
        let check_out = check_in.checked_add_days(Days::new(u64::from(nights)))?;
        Some(Self {
            check_in,
            check_out,
        })
    }

    pub fn nights(&self) -> i64 {
        nights_between(self.check_in, self.check_out)
    }

    pub fn check_in_text(&self) -> String {
        format_booking_date(self.check_in)
    }

    pub fn check_out_text(&self) -> String {
        format_booking_date(self.check_out)
    }
}
