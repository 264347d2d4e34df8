//! Row types: the wire shape records take inside store backends.
//!
//! Rows carry statuses and price types as strings, the way relational
//! stores do. Conversion back into domain types goes through the closed
//! enums' `FromStr` impls, which normalize casing. This module is the
//! single mapping boundary between stored strings and the shared
//! enumerations: 'pending' and 'PENDING' both parse, anything else is a
//! backend error.

use crate::booking::{Booking, BookingStatus};
use crate::error::Error;
use crate::spot::{ParkingSpot, PriceType, SpotStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored shape of a [`ParkingSpot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotRow {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub description: String,
    pub price: f64,
    pub price_type: String,
    pub total_slots: u32,
    pub available_slots: u32,
    pub status: String,
    pub amenities: Vec<String>,
    pub opening_hours: String,
    pub phone: Option<String>,
    pub rating: f64,
    pub review_count: u32,
    pub version: u64,
}

impl From<&ParkingSpot> for SpotRow {
    fn from(spot: &ParkingSpot) -> Self {
        SpotRow {
            id: spot.id.clone(),
            owner_id: spot.owner_id.clone(),
            name: spot.name.clone(),
            address: spot.address.clone(),
            description: spot.description.clone(),
            price: spot.price,
            price_type: spot.price_type.to_string(),
            total_slots: spot.total_slots,
            available_slots: spot.available_slots,
            status: spot.status.to_string(),
            amenities: spot.amenities.clone(),
            opening_hours: spot.opening_hours.clone(),
            phone: spot.phone.clone(),
            rating: spot.rating,
            review_count: spot.review_count,
            version: spot.version,
        }
    }
}

impl TryFrom<SpotRow> for ParkingSpot {
    type Error = Error;

    fn try_from(row: SpotRow) -> Result<Self, Error> {
        let status: SpotStatus = row.status.parse()?;
        let price_type: PriceType = row.price_type.parse()?;
        Ok(ParkingSpot {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            address: row.address,
            description: row.description,
            price: row.price,
            price_type,
            total_slots: row.total_slots,
            available_slots: row.available_slots,
            status,
            amenities: row.amenities,
            opening_hours: row.opening_hours,
            phone: row.phone,
            rating: row.rating,
            review_count: row.review_count,
            version: row.version,
        })
    }
}

/// Stored shape of a [`Booking`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRow {
    pub id: String,
    pub spot_id: String,
    pub user_id: String,
    pub vehicle_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub reserved_end_time: DateTime<Utc>,
    pub actual_end_time: Option<DateTime<Utc>>,
    pub total_cost: f64,
    pub status: String,
    pub qr_code: String,
    pub pin: String,
    pub is_extended: bool,
    pub extended_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub version: u64,
}

impl BookingRow {
    /// Parse the row's status column into the shared enumeration.
    pub fn parsed_status(&self) -> Result<BookingStatus, Error> {
        self.status.parse()
    }
}

impl From<&Booking> for BookingRow {
    fn from(booking: &Booking) -> Self {
        BookingRow {
            id: booking.id.clone(),
            spot_id: booking.spot_id.clone(),
            user_id: booking.user_id.clone(),
            vehicle_id: booking.vehicle_id.clone(),
            start_time: booking.start_time,
            end_time: booking.end_time,
            reserved_end_time: booking.reserved_end_time,
            actual_end_time: booking.actual_end_time,
            total_cost: booking.total_cost,
            status: booking.status.to_string(),
            qr_code: booking.qr_code.clone(),
            pin: booking.pin.clone(),
            is_extended: booking.is_extended,
            extended_at: booking.extended_at,
            created_at: booking.created_at,
            version: booking.version,
        }
    }
}

impl TryFrom<BookingRow> for Booking {
    type Error = Error;

    fn try_from(row: BookingRow) -> Result<Self, Error> {
        let status = row.parsed_status()?;
        Ok(Booking {
            id: row.id,
            spot_id: row.spot_id,
            user_id: row.user_id,
            vehicle_id: row.vehicle_id,
            start_time: row.start_time,
            end_time: row.end_time,
            reserved_end_time: row.reserved_end_time,
            actual_end_time: row.actual_end_time,
            total_cost: row.total_cost,
            status,
            qr_code: row.qr_code,
            pin: row.pin,
            is_extended: row.is_extended,
            extended_at: row.extended_at,
            created_at: row.created_at,
            version: row.version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn booking() -> Booking {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        Booking {
            id: "booking_1".to_string(),
            spot_id: "spot_1".to_string(),
            user_id: "user_1".to_string(),
            vehicle_id: "vehicle_1".to_string(),
            start_time: start,
            end_time: start + chrono::Duration::hours(2),
            reserved_end_time: start + chrono::Duration::hours(2) + chrono::Duration::minutes(30),
            actual_end_time: None,
            total_cost: 20.0,
            status: BookingStatus::Pending,
            qr_code: "QR-1-abc".to_string(),
            pin: "1234".to_string(),
            is_extended: false,
            extended_at: None,
            created_at: start,
            version: 0,
        }
    }

    #[test]
    fn test_booking_row_roundtrip() {
        let b = booking();
        let row = BookingRow::from(&b);
        assert_eq!(row.status, "PENDING");

        let back: Booking = row.try_into().expect("Failed to convert row");
        assert_eq!(back, b);
    }

    #[test]
    fn test_status_normalized_from_any_casing() {
        let mut row = BookingRow::from(&booking());

        for raw in ["pending", "PENDING", "Pending"] {
            row.status = raw.to_string();
            let b: Booking = row.clone().try_into().expect("Failed to convert row");
            assert_eq!(b.status, BookingStatus::Pending);
        }
    }

    #[test]
    fn test_unknown_status_is_backend_error() {
        let mut row = BookingRow::from(&booking());
        row.status = "PARKED".to_string();

        let err = Booking::try_from(row).expect_err("Conversion should fail");
        assert!(matches!(err, Error::Backend(_)));
    }

    #[test]
    fn test_row_survives_json() {
        let row = BookingRow::from(&booking());
        let json = serde_json::to_string(&row).expect("Failed to serialize");
        let back: BookingRow = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(back, row);
    }
}
