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

//! Date-pair test vectors.
//!
//! Run with:
//!     cargo test --test t_booking_dates_fixtures

use std::fs;

use chrono::NaiveDate;
use innkeeper_booking_checks::validate_date_range;

#[derive(serde::Deserialize)]
struct DateVectorCase {
    name: String,
    check_in: String,
    check_out: String,
    is_valid: bool,
    has_past_check_in: bool,
    has_invalid_date_order: bool,
    has_same_day_booking: bool,
    error_count: usize,
}

#[derive(serde::Deserialize)]
struct DateVectors {
    description: String,
    today: NaiveDate,
    cases: Vec<DateVectorCase>,
}

fn load_vectors() -> DateVectors {
    let path = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures-booking-dates/date_vectors.json"
    );
    let data = fs::read_to_string(path).expect("Failed to read date_vectors.json");
    serde_json::from_str(&data).expect("Failed to parse date_vectors.json")
}

#[test]
fn test_date_vectors() {
    let vectors = load_vectors();
    println!("{} ({} cases)", vectors.description, vectors.cases.len());

    for case in &vectors.cases {
        let r = validate_date_range(&case.check_in, &case.check_out, vectors.today);
        assert_eq!(r.is_valid, case.is_valid, "{}: is_valid, errors={:?}", case.name, r.errors);
        assert_eq!(r.has_past_check_in, case.has_past_check_in, "{}: past", case.name);
        assert_eq!(
            r.has_invalid_date_order, case.has_invalid_date_order,
            "{}: order",
            case.name
        );
        assert_eq!(
            r.has_same_day_booking, case.has_same_day_booking,
            "{}: same day",
            case.name
        );
        assert_eq!(r.errors.len(), case.error_count, "{}: {:?}", case.name, r.errors);
        assert_eq!(r.is_valid, r.errors.is_empty(), "{}: invariant", case.name);
        assert_eq!(r.check_in, case.check_in, "{}: echo", case.name);
        assert_eq!(r.check_out, case.check_out, "{}: echo", case.name);
        println!("{} - OK", case.name);
    }
}

#[test]
fn test_results_serialize_snake_case() {
    let vectors = load_vectors();
    let r = validate_date_range("01/01/2025", "01/01/2025", vectors.today);
    let json = serde_json::to_value(&r).expect("serialize");
    assert_eq!(json["is_valid"], false);
    assert_eq!(json["has_same_day_booking"], true);
    assert_eq!(json["parsed_check_in"], "2025-01-01");
    assert!(json["errors"][0].as_str().unwrap().contains("same day"));
}
