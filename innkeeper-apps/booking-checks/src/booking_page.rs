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

//! # Booking Page Report
//!
//! Runs the date and price checks on whatever a [`RawFieldReader`] saw on the page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::booking_dates::{DateRangeValidation, validate_date_range};
use crate::booking_price::FeeSchedule;
use crate::page_fields::RawFieldReader;
use crate::price_summary::{PriceSummaryCheck, check_price_summary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BookingPageReport {
    pub dates: DateRangeValidation,
    pub price: PriceSummaryCheck,
    /// Date errors, then price mismatches, then stay-length disagreement.
    pub problems: Vec<String>,
}

impl BookingPageReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

pub fn check_booking_page<R: RawFieldReader + ?Sized>(
    reader: &R,
    today: NaiveDate,
    fees: &FeeSchedule,
) -> BookingPageReport {
    let (check_in, check_out) = reader.read_stay_dates();
    let dates = validate_date_range(&check_in, &check_out, today);
    let price = check_price_summary(&reader.read_price_summary(), fees);

    let mut problems = dates.errors.clone();
    problems.extend(price.mismatches.iter().cloned());

    if let Some(stay_nights) = dates.nights() {
        if price.displayed_nights > 0 && price.displayed_nights != stay_nights {
            problems.push(format!(
                "Summary shows {} nights but the selected dates span {}",
                price.displayed_nights, stay_nights
            ));
        }
    }

    tracing::info!(
        "Booking page checked: {} problem(s), dates valid={}, price consistent={}",
        problems.len(),
        dates.is_valid,
        price.is_consistent
    );

    BookingPageReport {
        dates,
        price,
        problems,
    }
}
