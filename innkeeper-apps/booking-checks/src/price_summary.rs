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

//! # Reservation Price Summary
//!
//! Checks the price summary box of the reservation page against the expected breakdown.

use innkeeper_money_text::format_amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::booking_price::{
    FeeSchedule, PriceBreakdown, extract_nights_count, extract_price_value,
    extract_room_price_from_nights_text, prices_match,
};

/// Raw labels of the summary box. Missing labels are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PriceSummaryText {
    pub nights_line: String,
    pub cleaning_fee: String,
    pub service_fee: String,
    pub total: String,
}

impl PriceSummaryText {
    /// Labels as the page renders them for `breakdown`.
    pub fn render(breakdown: &PriceBreakdown, symbol: &str) -> Self {
        Self {
            nights_line: breakdown.display_nights_line(symbol),
            cleaning_fee: format_amount(breakdown.cleaning_fee, symbol),
            service_fee: format_amount(breakdown.service_fee, symbol),
            total: breakdown.display_total(symbol),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PriceSummaryCheck {
    pub expected: Option<PriceBreakdown>,
    pub displayed_nights: u32,
    pub displayed_rate: Decimal,
    pub displayed_total: Decimal,
    pub mismatches: Vec<String>,
    pub is_consistent: bool,
}

pub fn check_price_summary(summary: &PriceSummaryText, fees: &FeeSchedule) -> PriceSummaryCheck {
    let displayed_nights = extract_nights_count(&summary.nights_line);
    let displayed_rate = extract_room_price_from_nights_text(&summary.nights_line);
    let displayed_total = extract_price_value(&summary.total);
    let mut mismatches = Vec::new();

    if displayed_nights == 0 {
        mismatches.push(format!(
            "Could not extract nights count from '{}'",
            summary.nights_line
        ));
    }
    if displayed_rate.is_zero() {
        mismatches.push(format!(
            "Could not extract room rate from '{}'",
            summary.nights_line
        ));
    }
    if displayed_total.is_zero() {
        mismatches.push(format!("Could not extract total from '{}'", summary.total));
    }

    let expected = if displayed_nights > 0 && !displayed_rate.is_zero() {
        let breakdown = PriceBreakdown::new(displayed_rate, displayed_nights, fees);
        if breakdown.is_none() {
            mismatches.push(format!(
                "Could not compute expected total for '{}'",
                summary.nights_line
            ));
        }
        breakdown
    } else {
        None
    };

    if let Some(exp) = &expected {
        let fee_lines = [
            ("Cleaning fee", &summary.cleaning_fee, exp.cleaning_fee),
            ("Service fee", &summary.service_fee, exp.service_fee),
        ];
        for (label, text, fee) in fee_lines {
            if text.trim().is_empty() {
                continue;
            }
            let shown = extract_price_value(text);
            if !prices_match(fee, shown) {
                mismatches.push(format!(
                    "{} shows {}, expected {}",
                    label,
                    format_amount(shown, ""),
                    format_amount(fee, "")
                ));
            }
        }

        if !displayed_total.is_zero() && !prices_match(exp.total, displayed_total) {
            mismatches.push(format!(
                "Total shows {}, expected {} ({} x {} nights + fees)",
                format_amount(displayed_total, ""),
                format_amount(exp.total, ""),
                format_amount(exp.nightly_rate, ""),
                exp.nights
            ));
        }
    }

    if !mismatches.is_empty() {
        tracing::debug!("Price summary mismatches: {:?}", mismatches);
    }

    PriceSummaryCheck {
        expected,
        displayed_nights,
        displayed_rate,
        displayed_total,
        is_consistent: mismatches.is_empty(),
        mismatches,
    }
}
