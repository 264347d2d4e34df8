//! In-memory parking store (default, thread-safe, async).
//!
//! Uses DashMap for lock-free concurrent access with per-key sharding.
//! Versioned updates and slot adjustments run under the entry lock of the
//! record's shard, so two writers racing on the same booking or spot are
//! serialized and the loser observes a version conflict.

use super::row::{BookingRow, SpotRow};
use super::ParkingStore;
use crate::booking::Booking;
use crate::error::{Error, Result};
use crate::spot::ParkingSpot;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Thread-safe async in-memory store.
///
/// Holds spots and bookings as [`SpotRow`]/[`BookingRow`] wire shapes, the
/// same way a relational adapter would, and converts at the boundary.
/// Suitable as the default backend and for deterministic tests.
///
/// # Example
///
/// ```no_run
/// use park_kit::store::{InMemoryStore, ParkingStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryStore::new();
///     assert!(store.health_check().await?);
///     assert_eq!(store.spot_count(), 0);
///     Ok(())
/// }
/// ```
#[derive(Clone, Default)]
pub struct InMemoryStore {
    spots: Arc<DashMap<String, SpotRow>>,
    bookings: Arc<DashMap<String, BookingRow>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        InMemoryStore {
            spots: Arc::new(DashMap::new()),
            bookings: Arc::new(DashMap::new()),
        }
    }

    /// Number of spot records.
    pub fn spot_count(&self) -> usize {
        self.spots.len()
    }

    /// Number of booking records, terminal states included.
    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }
}

impl ParkingStore for InMemoryStore {
    async fn fetch_spot(&self, id: &str) -> Result<Option<ParkingSpot>> {
        match self.spots.get(id) {
            Some(row) => {
                debug!("✓ InMemory spot GET {} -> HIT", id);
                Ok(Some(row.clone().try_into()?))
            }
            None => {
                debug!("✓ InMemory spot GET {} -> MISS", id);
                Ok(None)
            }
        }
    }

    async fn insert_spot(&self, spot: &ParkingSpot) -> Result<()> {
        match self.spots.entry(spot.id.clone()) {
            Entry::Vacant(vacant) => {
                vacant.insert(SpotRow::from(spot));
                debug!("✓ InMemory spot INSERT {}", spot.id);
                Ok(())
            }
            Entry::Occupied(_) => Err(Error::Backend(format!(
                "spot {} already exists",
                spot.id
            ))),
        }
    }

    async fn update_spot(&self, spot: &ParkingSpot) -> Result<ParkingSpot> {
        match self.spots.entry(spot.id.clone()) {
            Entry::Occupied(mut occupied) => {
                let found = occupied.get().version;
                if found != spot.version {
                    return Err(Error::Conflict {
                        expected: spot.version,
                        found,
                    });
                }
                let mut updated = spot.clone();
                updated.version += 1;
                occupied.insert(SpotRow::from(&updated));
                debug!(
                    "✓ InMemory spot UPDATE {} v{} -> v{}",
                    updated.id, spot.version, updated.version
                );
                Ok(updated)
            }
            Entry::Vacant(_) => Err(Error::NotFound(format!("spot {} not found", spot.id))),
        }
    }

    async fn delete_spot(&self, id: &str) -> Result<()> {
        self.spots.remove(id);
        warn!("⚠ InMemory spot DELETE {}", id);
        Ok(())
    }

    async fn active_spots(&self) -> Result<Vec<ParkingSpot>> {
        let mut spots = Vec::new();
        for row in self.spots.iter() {
            let spot: ParkingSpot = row.clone().try_into()?;
            if spot.status == crate::spot::SpotStatus::Active {
                spots.push(spot);
            }
        }
        // DashMap iteration order is arbitrary; present a stable listing.
        spots.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("✓ InMemory active_spots -> {} rows", spots.len());
        Ok(spots)
    }

    async fn adjust_available_slots(&self, spot_id: &str, delta: i64) -> Result<ParkingSpot> {
        match self.spots.entry(spot_id.to_string()) {
            Entry::Occupied(mut occupied) => {
                let row = occupied.get();
                let adjusted = row.available_slots as i64 + delta;
                if adjusted < 0 {
                    return Err(Error::Validation(format!(
                        "spot {} has no available slots",
                        spot_id
                    )));
                }
                if adjusted > row.total_slots as i64 {
                    return Err(Error::Validation(format!(
                        "spot {} slot release would exceed capacity",
                        spot_id
                    )));
                }

                let mut updated = row.clone();
                updated.available_slots = adjusted as u32;
                updated.version += 1;
                occupied.insert(updated.clone());
                debug!(
                    "✓ InMemory spot {} slots {:+} -> {}",
                    spot_id, delta, adjusted
                );
                updated.try_into()
            }
            Entry::Vacant(_) => Err(Error::NotFound(format!("spot {} not found", spot_id))),
        }
    }

    async fn fetch_booking(&self, id: &str) -> Result<Option<Booking>> {
        match self.bookings.get(id) {
            Some(row) => {
                debug!("✓ InMemory booking GET {} -> HIT", id);
                Ok(Some(row.clone().try_into()?))
            }
            None => {
                debug!("✓ InMemory booking GET {} -> MISS", id);
                Ok(None)
            }
        }
    }

    async fn insert_booking(&self, booking: &Booking) -> Result<()> {
        match self.bookings.entry(booking.id.clone()) {
            Entry::Vacant(vacant) => {
                vacant.insert(BookingRow::from(booking));
                debug!("✓ InMemory booking INSERT {}", booking.id);
                Ok(())
            }
            Entry::Occupied(_) => Err(Error::Backend(format!(
                "booking {} already exists",
                booking.id
            ))),
        }
    }

    async fn update_booking(&self, booking: &Booking) -> Result<Booking> {
        match self.bookings.entry(booking.id.clone()) {
            Entry::Occupied(mut occupied) => {
                let found = occupied.get().version;
                if found != booking.version {
                    return Err(Error::Conflict {
                        expected: booking.version,
                        found,
                    });
                }
                let mut updated = booking.clone();
                updated.version += 1;
                occupied.insert(BookingRow::from(&updated));
                debug!(
                    "✓ InMemory booking UPDATE {} ({}) v{} -> v{}",
                    updated.id, updated.status, booking.version, updated.version
                );
                Ok(updated)
            }
            Entry::Vacant(_) => Err(Error::NotFound(format!(
                "booking {} not found",
                booking.id
            ))),
        }
    }

    async fn bookings_for_user(&self, user_id: &str) -> Result<Vec<Booking>> {
        let mut bookings = Vec::new();
        for row in self.bookings.iter() {
            if row.user_id == user_id {
                bookings.push(row.clone().try_into()?);
            }
        }
        bookings.sort_by(|a: &Booking, b: &Booking| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    async fn find_live_by_qr(&self, code: &str) -> Result<Option<Booking>> {
        for row in self.bookings.iter() {
            if row.qr_code == code && row.parsed_status()?.is_live() {
                debug!("✓ InMemory live lookup by QR -> {}", row.id);
                return Ok(Some(row.clone().try_into()?));
            }
        }
        Ok(None)
    }

    async fn find_live_by_pin(&self, code: &str) -> Result<Option<Booking>> {
        for row in self.bookings.iter() {
            if row.pin == code && row.parsed_status()?.is_live() {
                debug!("✓ InMemory live lookup by PIN -> {}", row.id);
                return Ok(Some(row.clone().try_into()?));
            }
        }
        Ok(None)
    }

    async fn health_check(&self) -> Result<bool> {
        // In-memory store is always healthy
        Ok(true)
    }
}
