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

// Library for innkeeper-booking-checks
// Date and price rules of the hotel booking pages, fed with strings scraped from the page

mod booking_dates;
mod booking_page;
mod booking_price;
mod page_fields;
mod price_summary;

pub use booking_dates::{
    BOOKING_DATE_FORMAT, DateRangeValidation, DateRangeValidator, StayDates, format_booking_date,
    nights_between, parse_booking_date, validate_date_range,
};
pub use booking_page::{BookingPageReport, check_booking_page};
pub use booking_price::{
    CLEANING_FEE, FeeSchedule, PRICE_TOLERANCE, PriceBreakdown, PriceCalculator, SERVICE_FEE,
    compute_expected_total, extract_nights_count, extract_price_value,
    extract_room_price_from_nights_text, prices_match,
};
pub use page_fields::{BookingFormCss, HtmlFieldReader, RawFieldReader};
pub use price_summary::{PriceSummaryCheck, PriceSummaryText, check_price_summary};

// Decimal is part of the public API
pub use rust_decimal::Decimal;
