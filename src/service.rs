//! High-level parking service for applications.
//!
//! Provides a convenient wrapper around the registry, ledger, and validator
//! with Arc for easy sharing across threads.

use crate::booking::Booking;
use crate::error::Result;
use crate::filter::SpotFilters;
use crate::ledger::{BookingLedger, BookingPolicy, CreateBooking};
use crate::observability::LedgerMetrics;
use crate::registry::{NewSpot, SpotRegistry};
use crate::spot::{ParkingSpot, SpotStatus};
use crate::store::ParkingStore;
use crate::validator::EntryValidator;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// The explicit application-state object of the toolkit.
///
/// Wraps the three components in `Arc` for cheap cloning across request
/// handlers: no module-level singleton, no external `Arc<Mutex<>>`
/// wrappers. Since store backends use interior mutability and every
/// component takes `&self`, the whole service is shareable as-is.
///
/// # Example
///
/// ```ignore
/// use park_kit::{ParkingService, store::InMemoryStore};
///
/// let service = ParkingService::new(InMemoryStore::new());
///
/// // In your web handlers
/// let service_clone = service.clone(); // Cheap - just Arc increments
/// let booking = service_clone.create_booking(request).await?;
/// let entered = service_clone.validate_entry(&booking.pin).await?;
/// ```
#[derive(Clone)]
pub struct ParkingService<S: ParkingStore> {
    store: S,
    registry: Arc<SpotRegistry<S>>,
    ledger: Arc<BookingLedger<S>>,
    validator: Arc<EntryValidator<S>>,
}

impl<S: ParkingStore> ParkingService<S> {
    /// Create a service over the given store with the default policy.
    pub fn new(store: S) -> Self {
        Self::with_policy(store, BookingPolicy::default())
    }

    /// Create a service with a custom booking policy.
    pub fn with_policy(store: S, policy: BookingPolicy) -> Self {
        ParkingService {
            registry: Arc::new(SpotRegistry::new(store.clone())),
            ledger: Arc::new(BookingLedger::new(store.clone()).with_policy(policy)),
            validator: Arc::new(EntryValidator::new(store.clone())),
            store,
        }
    }

    /// Create a service with custom metrics shared by the ledger and the
    /// validator.
    pub fn with_metrics(store: S, metrics: Arc<dyn LedgerMetrics>) -> Self {
        ParkingService {
            registry: Arc::new(SpotRegistry::new(store.clone())),
            ledger: Arc::new(
                BookingLedger::new(store.clone()).with_metrics(Box::new(metrics.clone())),
            ),
            validator: Arc::new(EntryValidator::new(store.clone()).with_metrics(Box::new(metrics))),
            store,
        }
    }

    // ------------------------------------------------------------------
    // Spot registry
    // ------------------------------------------------------------------

    /// List a new spot.
    pub async fn add_spot(&self, new_spot: NewSpot) -> Result<ParkingSpot> {
        self.registry.add(new_spot).await
    }

    /// Fetch a spot by id.
    pub async fn spot(&self, id: &str) -> Result<Option<ParkingSpot>> {
        self.registry.get(id).await
    }

    /// Apply an owner edit to a spot.
    pub async fn update_spot(&self, spot: &ParkingSpot) -> Result<ParkingSpot> {
        self.registry.update(spot).await
    }

    /// Move a spot into a new listing status.
    pub async fn set_spot_status(&self, id: &str, status: SpotStatus) -> Result<ParkingSpot> {
        self.registry.set_status(id, status).await
    }

    /// Remove a spot record.
    pub async fn remove_spot(&self, id: &str) -> Result<()> {
        self.registry.remove(id).await
    }

    /// All spots currently listable.
    pub async fn list_spots(&self) -> Result<Vec<ParkingSpot>> {
        self.registry.list_active().await
    }

    /// Active spots narrowed by free-text query and filters.
    pub async fn search_spots(
        &self,
        query: &str,
        filters: &SpotFilters,
    ) -> Result<Vec<ParkingSpot>> {
        self.registry.search(query, filters).await
    }

    // ------------------------------------------------------------------
    // Booking ledger
    // ------------------------------------------------------------------

    /// Create a new PENDING booking from a checkout request.
    pub async fn create_booking(&self, request: CreateBooking) -> Result<Booking> {
        self.ledger.create(request).await
    }

    /// Apply the one-time extension to an active booking.
    pub async fn extend_booking(&self, booking_id: &str) -> Result<Booking> {
        self.ledger.extend(booking_id).await
    }

    /// Cancel a booking on behalf of its owner.
    pub async fn cancel_booking(&self, booking_id: &str, caller: &str) -> Result<Booking> {
        self.ledger.cancel(booking_id, caller).await
    }

    /// Complete an occupied booking.
    pub async fn complete_booking(&self, booking_id: &str) -> Result<Booking> {
        self.ledger.complete(booking_id).await
    }

    /// Fetch a booking by id.
    pub async fn booking(&self, booking_id: &str) -> Result<Option<Booking>> {
        self.ledger.get(booking_id).await
    }

    /// All of a user's bookings, newest first.
    pub async fn bookings_for_user(&self, user_id: &str) -> Result<Vec<Booking>> {
        self.ledger.bookings_for_user(user_id).await
    }

    // ------------------------------------------------------------------
    // Entry validation
    // ------------------------------------------------------------------

    /// Validate an entry code against the current wall clock.
    pub async fn validate_entry(&self, code: &str) -> Result<Option<Booking>> {
        self.validator.validate(code).await
    }

    /// Validate an entry code as of `now` (deterministic variant).
    pub async fn validate_entry_at(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>> {
        self.validator.validate_at(code, now).await
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    /// Verify the store is accessible.
    pub async fn health_check(&self) -> Result<bool> {
        self.store.health_check().await
    }

    /// Get a reference to the underlying store (for advanced use).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a reference to the booking ledger.
    pub fn ledger(&self) -> &BookingLedger<S> {
        &self.ledger
    }
}
