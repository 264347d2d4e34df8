//! # park-kit
//!
//! A type-safe, storage-agnostic toolkit for parking-spot marketplaces.
//!
//! ## Features
//!
//! - **Spot Registry:** List, edit, and retire parking spots with slot inventory
//! - **Booking Ledger:** Full booking lifecycle (PENDING -> ACTIVE -> COMPLETED) with
//!   one-time extensions and cancellation
//! - **Entry Codes:** QR token and 4-digit PIN issued per booking, validated at the gate
//! - **Availability Filter:** Pure text/price/type/amenity filtering over spot listings
//! - **Storage Agnostic:** Bring your own [`ParkingStore`]; an in-memory backend ships
//!   for tests and prototypes
//! - **Production Ready:** Built-in logging, metrics support, and error handling
//!
//! ## Quick Start
//!
//! Use [`ParkingService`] for easy sharing across threads:
//!
//! ```ignore
//! use chrono::{Duration, Utc};
//! use park_kit::{
//!     CreateBooking, NewSpot, ParkingService, PriceType,
//!     store::InMemoryStore,
//! };
//!
//! // 1. Create the service (cheap to clone for thread sharing)
//! let service = ParkingService::new(InMemoryStore::new());
//!
//! // 2. List a spot
//! let spot = service.add_spot(NewSpot {
//!     owner_id: "owner_1".to_string(),
//!     name: "Central Plaza Parking".to_string(),
//!     address: "12 Plaza Ave".to_string(),
//!     description: String::new(),
//!     price: 10.0,
//!     price_type: PriceType::Hour,
//!     total_slots: 20,
//!     amenities: vec!["EV Charging".to_string()],
//!     opening_hours: "24/7".to_string(),
//!     phone: None,
//! }).await?;
//!
//! // 3. Book it
//! let start = Utc::now() + Duration::hours(1);
//! let booking = service.create_booking(CreateBooking {
//!     spot_id: spot.id.clone(),
//!     user_id: "user_1".to_string(),
//!     vehicle_id: "vehicle_1".to_string(),
//!     start_time: start,
//!     end_time: start + Duration::hours(2),
//! }).await?;
//!
//! // 4. Scan the code at the gate
//! let entered = service.validate_entry(&booking.qr_code).await?;
//! assert!(entered.is_some());
//! ```
//!
//! For finer control, use the components directly: [`SpotRegistry`],
//! [`BookingLedger`], and [`EntryValidator`] all take a [`ParkingStore`]
//! and can be composed however your application needs.

#[macro_use]
extern crate log;

pub mod booking;
pub mod credentials;
pub mod error;
pub mod filter;
pub mod ledger;
pub mod observability;
pub mod pricing;
pub mod registry;
pub mod service;
pub mod spot;
pub mod store;
pub mod validator;

// Re-exports for convenience
pub use booking::{Booking, BookingStatus};
pub use credentials::EntryCredentials;
pub use error::{Error, Result};
pub use filter::{filter_spots, ParkingType, SpotFilters};
pub use ledger::{BookingLedger, BookingPolicy, CreateBooking};
pub use observability::{LedgerMetrics, NoOpMetrics};
pub use pricing::booking_cost;
pub use registry::{NewSpot, SpotRegistry};
pub use service::ParkingService;
pub use spot::{ParkingSpot, PriceType, SpotStatus};
pub use store::{InMemoryStore, ParkingStore};
pub use validator::EntryValidator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
