//! Booking cost computation.
//!
//! Cost is computed once, at creation, from the requested duration and the
//! spot's rate. Hourly rates bill fractional hours linearly; day and month
//! rates bill whole units with the duration rounded UP to the next billing
//! unit, never down: a 25-hour booking at a day rate costs 2 days. The
//! final amount is rounded to cents.

use crate::error::{Error, Result};
use crate::spot::PriceType;
use chrono::Duration;

/// Hours in one day-rate billing unit.
const HOURS_PER_DAY: f64 = 24.0;
/// Hours in one month-rate billing unit (30 days).
const HOURS_PER_MONTH: f64 = 720.0;

/// Compute the total cost of a booking of `duration` at `price` per
/// `price_type` unit.
///
/// # Errors
///
/// Returns `Error::Validation` if the duration is not positive.
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use park_kit::{booking_cost, PriceType};
///
/// let cost = booking_cost(10.0, PriceType::Hour, Duration::minutes(150)).unwrap();
/// assert_eq!(cost, 25.0);
///
/// let cost = booking_cost(40.0, PriceType::Day, Duration::hours(25)).unwrap();
/// assert_eq!(cost, 80.0); // 25 h rounds up to 2 day-units
/// ```
pub fn booking_cost(price: f64, price_type: PriceType, duration: Duration) -> Result<f64> {
    if duration <= Duration::zero() {
        return Err(Error::Validation(
            "End time must be after start time".to_string(),
        ));
    }

    // Seconds, not minutes: a sub-minute duration must still bill at
    // least one day/month unit instead of truncating to zero hours.
    let hours = duration.num_seconds() as f64 / 3600.0;

    let cost = match price_type {
        PriceType::Hour => hours * price,
        PriceType::Day => (hours / HOURS_PER_DAY).ceil() * price,
        PriceType::Month => (hours / HOURS_PER_MONTH).ceil() * price,
    };

    Ok(round_to_cents(cost))
}

/// Round a currency amount to cents.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
