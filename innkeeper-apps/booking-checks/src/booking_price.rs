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

//! # Booking Price
//!
//! Expected reservation price (nights × rate + fixed fees) and extraction of
//! the numbers the reservation page displays. Extraction never fails: zero means
//! "could not extract".

use std::str::FromStr;

use innkeeper_money_text::{extract_amount, format_amount, within_tolerance};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use innkeeper_money_text::PRICE_TOLERANCE;

/// 25.00
pub const CLEANING_FEE: Decimal = Decimal::from_parts(2500, 0, 0, false, 2);
/// 15.00
pub const SERVICE_FEE: Decimal = Decimal::from_parts(1500, 0, 0, false, 2);

static NIGHTS_COUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)x\s*([0-9]+)\s*night").unwrap());
static ROOM_PRICE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[£$€¥]\s*([0-9]+(?:,[0-9]{3})*(?:\.[0-9]{2})?)").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FeeSchedule {
    pub cleaning_fee: Decimal,
    pub service_fee: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            cleaning_fee: CLEANING_FEE,
            service_fee: SERVICE_FEE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PriceBreakdown {
    pub nightly_rate: Decimal,
    pub nights: u32,
    pub cleaning_fee: Decimal,
    pub service_fee: Decimal,
    pub base_price: Decimal,
    pub total: Decimal,
}

impl PriceBreakdown {
    /// `None` when the base price or the total does not fit in a `Decimal`.
    pub fn new(nightly_rate: Decimal, nights: u32, fees: &FeeSchedule) -> Option<Self> {
        let base_price = nightly_rate.checked_mul(Decimal::from(nights))?;
        let total = base_price
            .checked_add(fees.cleaning_fee)?
            .checked_add(fees.service_fee)?;
        Some(Self {
            nightly_rate,
            nights,
            cleaning_fee: fees.cleaning_fee,
            service_fee: fees.service_fee,
            base_price,
            total,
        })
    }

    pub fn display_total(&self, symbol: &str) -> String {
        format_amount(self.total, symbol)
    }

    /// `"£100.00 x 3 nights"`, as shown on the reservation summary.
    pub fn display_nights_line(&self, symbol: &str) -> String {
        let unit = if self.nights == 1 { "night" } else { "nights" };
        format!(
            "{} x {} {}",
            format_amount(self.nightly_rate, symbol),
            self.nights,
            unit
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PriceCalculator {
    fees: FeeSchedule,
}

impl PriceCalculator {
    pub fn new(fees: FeeSchedule) -> Self {
        Self { fees }
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    pub fn breakdown(&self, nightly_rate: Decimal, nights: u32) -> Option<PriceBreakdown> {
        PriceBreakdown::new(nightly_rate, nights, &self.fees)
    }

    /// Zero when the total overflows, like any other amount that cannot be computed.
    pub fn expected_total(&self, nightly_rate: Decimal, nights: u32) -> Decimal {
        match self.breakdown(nightly_rate, nights) {
            Some(b) => b.total,
            None => {
                tracing::debug!(
                    "Expected total overflows for {} x {} nights",
                    nightly_rate,
                    nights
                );
                Decimal::ZERO
            }
        }
    }
}

/// `nightly_rate * nights + 25.00 + 15.00`, zero on overflow.
pub fn compute_expected_total(nightly_rate: Decimal, nights: u32) -> Decimal {
    PriceCalculator::default().expected_total(nightly_rate, nights)
}

/// Amount shown in a price label, e.g. `"£1,234.50"` -> `1234.50`. Zero when unreadable.
pub fn extract_price_value(display_text: &str) -> Decimal {
    extract_amount(display_text)
}

/// Night count from a label like `"£100 x 3 nights"`. Zero when absent.
pub fn extract_nights_count(display_text: &str) -> u32 {
    let nights = NIGHTS_COUNT_RE
        .captures(display_text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok());
    if nights.is_none() {
        tracing::debug!("Could not parse nights count from: '{}'", display_text);
    }
    nights.unwrap_or(0)
}

/// Room rate embedded in a nights label, e.g. `"£1,250.00 x 2 nights"` -> `1250.00`.
pub fn extract_room_price_from_nights_text(display_text: &str) -> Decimal {
    let price = ROOM_PRICE_RE
        .captures(display_text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| Decimal::from_str(&m.as_str().replace(',', "")).ok());
    if price.is_none() {
        tracing::debug!("Could not parse room price from: '{}'", display_text);
    }
    price.unwrap_or(Decimal::ZERO)
}

/// Computed and displayed amounts agree within [`PRICE_TOLERANCE`].
pub fn prices_match(expected: Decimal, actual: Decimal) -> bool {
    within_tolerance(expected, actual, PRICE_TOLERANCE)
}
