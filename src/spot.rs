//! Parking spot records and their closed status/pricing enumerations.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Listing status of a parking spot.
///
/// Only `Active` spots are bookable and listable. `Inactive` and
/// `Maintenance` spots stay in the store but never reach the availability
/// filter or the booking path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpotStatus {
    Active,
    Inactive,
    Maintenance,
}

impl fmt::Display for SpotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SpotStatus::Active => "ACTIVE",
            SpotStatus::Inactive => "INACTIVE",
            SpotStatus::Maintenance => "MAINTENANCE",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SpotStatus {
    type Err = Error;

    /// Parse a stored status string, case-insensitively.
    ///
    /// Persistence layers have been observed carrying both 'active' and
    /// 'ACTIVE'; normalization happens here, at the adapter boundary.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(SpotStatus::Active),
            "INACTIVE" => Ok(SpotStatus::Inactive),
            "MAINTENANCE" => Ok(SpotStatus::Maintenance),
            other => Err(Error::Backend(format!("unknown spot status '{}'", other))),
        }
    }
}

/// Billing unit of a spot's rate.
///
/// Determines the cost-computation rule in [`crate::pricing::booking_cost`]:
/// hourly rates bill fractional hours linearly, day and month rates bill
/// whole units with the duration rounded UP to the next unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    Hour,
    Day,
    Month,
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PriceType::Hour => "hour",
            PriceType::Day => "day",
            PriceType::Month => "month",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for PriceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hour" => Ok(PriceType::Hour),
            "day" => Ok(PriceType::Day),
            "month" => Ok(PriceType::Month),
            other => Err(Error::Backend(format!("unknown price type '{}'", other))),
        }
    }
}

/// A listed parking facility with a slot capacity and a price.
///
/// Created by an owner action via [`crate::registry::SpotRegistry`]; mutated
/// by owner edits and by booking-driven slot-count changes; removed by an
/// owner delete. The `version` field is an optimistic-concurrency counter
/// bumped on every store write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSpot {
    pub id: String,
    /// Owning principal.
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub description: String,
    /// Rate per billing unit, in whole currency (e.g. dollars).
    pub price: f64,
    pub price_type: PriceType,
    pub total_slots: u32,
    /// Currently free slots. Invariant: `available_slots <= total_slots`.
    pub available_slots: u32,
    pub status: SpotStatus,
    pub amenities: Vec<String>,
    pub opening_hours: String,
    pub phone: Option<String>,
    pub rating: f64,
    pub review_count: u32,
    pub version: u64,
}

impl ParkingSpot {
    /// True if the spot can accept a new booking right now.
    pub fn is_bookable(&self) -> bool {
        self.status == SpotStatus::Active && self.available_slots > 0
    }

    /// True if any amenity contains `keyword`, case-insensitively.
    pub fn has_amenity_like(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.amenities
            .iter()
            .any(|a| a.to_lowercase().contains(&keyword))
    }
}
