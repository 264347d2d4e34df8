//! Persistence collaborator: store trait and backend implementations.
//!
//! The booking/validation core talks to its datastore exclusively through
//! [`ParkingStore`]. Every method is an atomic single-record operation
//! (read-by-id, filtered read, insert, versioned update); the core performs
//! no multi-row transactions. Implementations: in-memory (default, testing),
//! SQL stores, or any record CRUD API with row-level filtering.

use crate::booking::Booking;
use crate::error::Result;
use crate::spot::ParkingSpot;

pub mod inmemory;
pub mod row;

pub use inmemory::InMemoryStore;
pub use row::{BookingRow, SpotRow};

/// Trait for parking datastore implementations.
///
/// Abstracts record CRUD, decoupling the core from a specific database
/// client.
///
/// **IMPORTANT:** All methods use `&self` instead of `&mut self` to allow
/// concurrent access. Implementations should use interior mutability
/// (DashMap, connection pools, or external storage).
///
/// **VERSIONING:** `update_spot` and `update_booking` are compare-and-swap
/// operations: the passed record carries the version the caller read, and
/// the store refuses the write with `Error::Conflict` if the stored version
/// differs. This is the serialization point that keeps racing transitions
/// (extend vs. cancel, validate vs. cancel) from interleaving.
#[allow(async_fn_in_trait)]
pub trait ParkingStore: Send + Sync + Clone {
    /// Fetch a spot by id.
    ///
    /// # Returns
    /// - `Ok(Some(spot))` - Spot found
    /// - `Ok(None)` - Spot not found (not an error)
    ///
    /// # Errors
    /// Returns `Err` if the backend is unavailable
    async fn fetch_spot(&self, id: &str) -> Result<Option<ParkingSpot>>;

    /// Insert a new spot record.
    ///
    /// # Errors
    /// Returns `Err` on duplicate id or backend failure
    async fn insert_spot(&self, spot: &ParkingSpot) -> Result<()>;

    /// Replace a spot record if its stored version matches `spot.version`.
    ///
    /// Returns the updated record with the version bumped.
    ///
    /// # Errors
    /// - `Error::NotFound` if the spot does not exist
    /// - `Error::Conflict` if the stored version differs
    async fn update_spot(&self, spot: &ParkingSpot) -> Result<ParkingSpot>;

    /// Remove a spot record. Idempotent.
    ///
    /// # Errors
    /// Returns `Err` if the backend is unavailable
    async fn delete_spot(&self, id: &str) -> Result<()>;

    /// List all spots in Active status.
    ///
    /// # Errors
    /// Returns `Err` if the backend is unavailable
    async fn active_spots(&self) -> Result<Vec<ParkingSpot>>;

    /// Atomically adjust a spot's free-slot counter by `delta`.
    ///
    /// The result is clamped by validation, not silently: a delta that
    /// would push the counter below zero or above `total_slots` is refused.
    ///
    /// # Errors
    /// - `Error::NotFound` if the spot does not exist
    /// - `Error::Validation` if the adjustment violates `0 <= available <= total`
    async fn adjust_available_slots(&self, spot_id: &str, delta: i64) -> Result<ParkingSpot>;

    /// Fetch a booking by id.
    ///
    /// # Errors
    /// Returns `Err` if the backend is unavailable
    async fn fetch_booking(&self, id: &str) -> Result<Option<Booking>>;

    /// Insert a new booking record.
    ///
    /// # Errors
    /// Returns `Err` on duplicate id or backend failure
    async fn insert_booking(&self, booking: &Booking) -> Result<()>;

    /// Replace a booking record if its stored version matches
    /// `booking.version`. Returns the updated record with the version bumped.
    ///
    /// # Errors
    /// - `Error::NotFound` if the booking does not exist
    /// - `Error::Conflict` if the stored version differs
    async fn update_booking(&self, booking: &Booking) -> Result<Booking>;

    /// All bookings for a user, newest first. Terminal states included;
    /// bookings are never physically deleted.
    ///
    /// # Errors
    /// Returns `Err` if the backend is unavailable
    async fn bookings_for_user(&self, user_id: &str) -> Result<Vec<Booking>>;

    /// Find the live booking whose `qr_code` equals `code`.
    ///
    /// Live means Pending, Active, or Extended; terminal-state bookings are
    /// never matched.
    ///
    /// # Errors
    /// Returns `Err` if the backend is unavailable
    async fn find_live_by_qr(&self, code: &str) -> Result<Option<Booking>>;

    /// Find the live booking whose `pin` equals `code`.
    ///
    /// # Errors
    /// Returns `Err` if the backend is unavailable
    async fn find_live_by_pin(&self, code: &str) -> Result<Option<Booking>>;

    /// Health check - verify the store is accessible.
    ///
    /// Used for readiness probes.
    ///
    /// # Errors
    /// Returns `Err` if the store is not accessible
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}
