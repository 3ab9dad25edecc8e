//! Minimal thirtyfour WebDriver test for the booking demo reservation page
//!
//! Requirements: geckodriver running on localhost:4444
//! Run with: cargo test --test t_booking_page_thirtyfour -- --ignored --nocapture

use anyhow::Result;
use chrono::Local;
use innkeeper_booking_checks::{
    FeeSchedule, HtmlFieldReader, PriceSummaryText, RawFieldReader, StayDates, check_booking_page,
};
use thirtyfour::prelude::*;
use thirtyfour::{By, DesiredCapabilities, WebDriver};

const DEMO_URL: &str = "https://automationintesting.online";

async fn setup_driver() -> Result<WebDriver> {
    let caps = DesiredCapabilities::firefox();
    WebDriver::new("http://localhost:4444", caps)
        .await
        .map_err(|e| anyhow::anyhow!("WebDriver error: {}", e))
}

/// Date inputs read through the driver (React keeps them out of the markup),
/// everything else from the page source.
struct LiveFields {
    dates: (String, String),
    snapshot: HtmlFieldReader,
}

impl RawFieldReader for LiveFields {
    fn read_stay_dates(&self) -> (String, String) {
        self.dates.clone()
    }

    fn read_price_summary(&self) -> PriceSummaryText {
        self.snapshot.read_price_summary()
    }
}

async fn input_value(driver: &WebDriver, css: &str) -> String {
    match driver.query(By::Css(css)).first().await {
        Ok(el) => el.value().await.ok().flatten().unwrap_or_default(),
        Err(_) => String::new(),
    }
}

#[tokio::test]
#[ignore]
async fn test_reservation_page_full_flow() -> Result<()> {
    let today = Local::now().date_naive();
    let stay = StayDates::starting_in(today, 30, 3)
        .ok_or_else(|| anyhow::anyhow!("Stay out of calendar range"))?;

    let driver = setup_driver().await?;
    driver.goto("about:blank").await?;
    println!("SUCCESS: Connected and navigated");

    let url = format!(
        "{}/reservation/1?checkin={}&checkout={}",
        DEMO_URL,
        stay.check_in.format("%Y-%m-%d"),
        stay.check_out.format("%Y-%m-%d")
    );
    driver.goto(url.as_str()).await?;

    let has_summary = driver
        .query(By::XPath("//*[contains(text(), 'Price Summary')]"))
        .first()
        .await
        .is_ok();
    println!("Price summary found: {}", has_summary);

    let dates = (
        input_value(
            &driver,
            "input[name='checkin'], .react-datepicker__input-container input",
        )
        .await,
        input_value(&driver, "input[name='checkout']").await,
    );
    let html = driver.source().await?;
    driver.quit().await?;

    let fields = LiveFields {
        dates,
        snapshot: HtmlFieldReader::from_html(&html)?,
    };
    println!("Dates on page: {:?}", fields.read_stay_dates());
    println!("Summary on page: {:?}", fields.read_price_summary());

    let report = check_booking_page(&fields, today, &FeeSchedule::default());
    for p in &report.problems {
        println!("  problem: {}", p);
    }

    if report.price.is_consistent {
        println!("SUCCESS: Price summary matches {} nights", report.price.displayed_nights);
        Ok(())
    } else {
        Err(anyhow::anyhow!("FAILED: {:?}", report.price.mismatches))
    }
}
