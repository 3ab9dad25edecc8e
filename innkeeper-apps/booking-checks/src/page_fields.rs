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

//! # Page Fields
//!
//! Side-effect free extraction of the raw booking-form strings from an HTML snapshot
//! of the rendered page. Capturing the snapshot is the caller's business.

use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::price_summary::PriceSummaryText;

/// Source of the raw strings a booking page displays.
pub trait RawFieldReader {
    /// `(check_in, check_out)` exactly as shown; empty when the field is missing.
    fn read_stay_dates(&self) -> (String, String);

    fn read_price_summary(&self) -> PriceSummaryText;
}

/// CSS selectors for the booking form, as plain strings so they can come from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BookingFormCss {
    pub check_in: String,
    pub check_out: String,
    pub summary_row: String,
    pub row_cell: String,
}

impl Default for BookingFormCss {
    fn default() -> Self {
        Self {
            check_in: r#"input[name="checkin"]"#.to_string(),
            check_out: r#"input[name="checkout"]"#.to_string(),
            summary_row: r#"div.card-body div.d-flex.justify-content-between"#.to_string(),
            row_cell: "span".to_string(),
        }
    }
}

struct BookingFormSelectors {
    check_in: Selector,
    check_out: Selector,
    summary_row: Selector,
    row_cell: Selector,
}

impl BookingFormSelectors {
    fn compile(css: &BookingFormCss) -> Result<Self> {
        Ok(Self {
            check_in: parse_selector(&css.check_in)?,
            check_out: parse_selector(&css.check_out)?,
            summary_row: parse_selector(&css.summary_row)?,
            row_cell: parse_selector(&css.row_cell)?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid CSS selector '{}': {:?}", css, e))
}

fn collapse_whitespace(text: scraper::element_ref::Text<'_>) -> String {
    text.collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// [`RawFieldReader`] over a page snapshot.
pub struct HtmlFieldReader {
    document: Html,
    selectors: BookingFormSelectors,
}

impl HtmlFieldReader {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::with_css(html, &BookingFormCss::default())
    }

    pub fn with_css(html: &str, css: &BookingFormCss) -> Result<Self> {
        Ok(Self {
            document: Html::parse_document(html),
            selectors: BookingFormSelectors::compile(css)?,
        })
    }

    fn read_input(&self, selector: &Selector, field: &str) -> String {
        let Some(el) = self.document.select(selector).next() else {
            tracing::warn!("No {} field found in page snapshot", field);
            return String::new();
        };
        el.value()
            .attr("value")
            .map(str::to_string)
            .unwrap_or_else(|| collapse_whitespace(el.text()))
    }

    fn row_cells(&self, row: ElementRef<'_>) -> Vec<String> {
        row.select(&self.selectors.row_cell)
            .map(|cell| collapse_whitespace(cell.text()))
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl RawFieldReader for HtmlFieldReader {
    fn read_stay_dates(&self) -> (String, String) {
        (
            self.read_input(&self.selectors.check_in, "check-in"),
            self.read_input(&self.selectors.check_out, "check-out"),
        )
    }

    fn read_price_summary(&self) -> PriceSummaryText {
        let mut summary = PriceSummaryText::default();

        for row in self.document.select(&self.selectors.summary_row) {
            let cells = self.row_cells(row);
            let Some(label) = cells.first() else {
                continue;
            };
            let value = cells.last().cloned().unwrap_or_default();
            let lower = label.to_lowercase();

            if lower.contains("night") {
                summary.nights_line = label.clone();
            } else if lower.contains("cleaning") {
                summary.cleaning_fee = value;
            } else if lower.contains("service") {
                summary.service_fee = value;
            } else if lower.contains("total") {
                summary.total = value;
            }
        }

        if summary.total.is_empty() {
            tracing::warn!("No price summary total found in page snapshot");
        }
        summary
    }
}
