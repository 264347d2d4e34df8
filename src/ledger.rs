//! Booking ledger - creates, mutates, and queries reservation records.
//!
//! The ledger owns the booking state machine (see [`crate::booking`]) and is
//! driven by UI-issued commands: create, extend, cancel, complete. The
//! PENDING→ACTIVE promotion belongs to the entry validator, not the ledger.
//!
//! Every mutation is a versioned compare-and-swap against the store, so a
//! `extend` racing a `cancel` cannot interleave: exactly one writer wins
//! and the loser observes `Error::Conflict`.

use crate::booking::{Booking, BookingStatus};
use crate::credentials::EntryCredentials;
use crate::error::{Error, Result};
use crate::observability::{LedgerMetrics, NoOpMetrics};
use crate::pricing::booking_cost;
use crate::store::ParkingStore;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

/// Temporal policy knobs of the ledger.
#[derive(Clone, Debug)]
pub struct BookingPolicy {
    /// How far a single extension pushes `end_time` and
    /// `reserved_end_time`.
    pub extension_increment: Duration,
    /// Grace period between the nominal `end_time` and the hard
    /// `reserved_end_time` entry deadline, applied at creation.
    pub reservation_buffer: Duration,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        BookingPolicy {
            extension_increment: Duration::hours(1),
            reservation_buffer: Duration::minutes(30),
        }
    }
}

/// Input for the customer's checkout action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
    pub spot_id: String,
    pub user_id: String,
    pub vehicle_id: String,
    pub start_time: chrono::DateTime<Utc>,
    pub end_time: chrono::DateTime<Utc>,
}

/// Reservation ledger over a [`ParkingStore`].
///
/// # Example
///
/// ```ignore
/// use park_kit::{BookingLedger, CreateBooking, store::InMemoryStore};
///
/// let ledger = BookingLedger::new(InMemoryStore::new());
/// let booking = ledger.create(request).await?;
/// println!("PIN for the attendant: {}", booking.pin);
/// ```
pub struct BookingLedger<S: ParkingStore> {
    store: S,
    policy: BookingPolicy,
    metrics: Box<dyn LedgerMetrics>,
}

impl<S: ParkingStore> BookingLedger<S> {
    /// Create a ledger with the default policy (1 h extension, 30 min
    /// reservation buffer).
    pub fn new(store: S) -> Self {
        BookingLedger {
            store,
            policy: BookingPolicy::default(),
            metrics: Box::new(NoOpMetrics),
        }
    }

    /// Set a custom temporal policy.
    pub fn with_policy(mut self, policy: BookingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set a custom metrics handler.
    pub fn with_metrics(mut self, metrics: Box<dyn LedgerMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// The ledger's temporal policy.
    pub fn policy(&self) -> &BookingPolicy {
        &self.policy
    }

    /// Get store reference (for advanced use).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a new PENDING booking from a checkout request.
    ///
    /// Guards: the spot exists and is Active with a free slot, a vehicle is
    /// selected, `end_time > start_time`, and the computed cost is positive.
    /// On success a slot is reserved, credentials are issued, and the record
    /// is persisted with `reserved_end_time = end_time + reservation_buffer`.
    ///
    /// # Errors
    ///
    /// - `Error::Validation` - guard conditions unmet
    /// - `Error::NotFound` - unknown spot
    /// - `Error::Backend` - store failure
    pub async fn create(&self, request: CreateBooking) -> Result<Booking> {
        let timer = Instant::now();
        match self.create_inner(request).await {
            Ok(booking) => {
                self.metrics.record_created(&booking.id, timer.elapsed());
                info!("✓ Booking {} created in {:?}", booking.id, timer.elapsed());
                Ok(booking)
            }
            Err(e) => {
                self.metrics.record_rejected("create", &e.to_string());
                Err(e)
            }
        }
    }

    async fn create_inner(&self, request: CreateBooking) -> Result<Booking> {
        if request.vehicle_id.trim().is_empty() {
            return Err(Error::Validation("A vehicle is required".to_string()));
        }
        if request.user_id.trim().is_empty() {
            return Err(Error::Validation("A user is required".to_string()));
        }
        if request.end_time <= request.start_time {
            return Err(Error::Validation(
                "End time must be after start time".to_string(),
            ));
        }

        let spot = self
            .store
            .fetch_spot(&request.spot_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("spot {} not found", request.spot_id)))?;

        if spot.status != crate::spot::SpotStatus::Active {
            return Err(Error::Validation(format!(
                "Spot {} is not open for booking",
                spot.name
            )));
        }

        let duration = request.end_time - request.start_time;
        let total_cost = booking_cost(spot.price, spot.price_type, duration)?;
        if total_cost <= 0.0 {
            return Err(Error::Validation(
                "Booking cost must be positive".to_string(),
            ));
        }

        // Reserve the slot first; fails when the spot is full.
        self.store
            .adjust_available_slots(&request.spot_id, -1)
            .await?;

        let now = Utc::now();
        let credentials = EntryCredentials::issue(now);
        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            spot_id: request.spot_id,
            user_id: request.user_id,
            vehicle_id: request.vehicle_id,
            start_time: request.start_time,
            end_time: request.end_time,
            reserved_end_time: request.end_time + self.policy.reservation_buffer,
            actual_end_time: None,
            total_cost,
            status: BookingStatus::Pending,
            qr_code: credentials.qr_code,
            pin: credentials.pin,
            is_extended: false,
            extended_at: None,
            created_at: now,
            version: 0,
        };

        if let Err(e) = self.store.insert_booking(&booking).await {
            // Give the reserved slot back; the insert never happened.
            self.release_slot(&booking.spot_id).await;
            return Err(e);
        }

        Ok(booking)
    }

    /// Apply the one-time extension to an active booking.
    ///
    /// Pushes `end_time` and `reserved_end_time` forward by the policy's
    /// extension increment, flips `is_extended`, stamps `extended_at`, and
    /// moves the status to EXTENDED.
    ///
    /// # Errors
    ///
    /// - `Error::AlreadyExtended` - second extension attempt
    /// - `Error::Validation` - booking is not Active
    /// - `Error::NotFound` - unknown booking
    /// - `Error::Conflict` - lost a race against another writer
    pub async fn extend(&self, booking_id: &str) -> Result<Booking> {
        let timer = Instant::now();
        match self.extend_inner(booking_id).await {
            Ok(booking) => {
                self.metrics.record_extended(&booking.id, timer.elapsed());
                info!("✓ Booking {} extended in {:?}", booking.id, timer.elapsed());
                Ok(booking)
            }
            Err(e) => {
                self.metrics.record_rejected("extend", &e.to_string());
                Err(e)
            }
        }
    }

    async fn extend_inner(&self, booking_id: &str) -> Result<Booking> {
        let mut booking = self.fetch_required(booking_id).await?;

        if booking.is_extended {
            return Err(Error::AlreadyExtended(booking_id.to_string()));
        }
        if booking.status != BookingStatus::Active {
            return Err(Error::Validation(format!(
                "Only an active booking can be extended (status is {})",
                booking.status
            )));
        }

        booking.end_time += self.policy.extension_increment;
        booking.reserved_end_time += self.policy.extension_increment;
        booking.is_extended = true;
        booking.extended_at = Some(Utc::now());
        booking.status = BookingStatus::Extended;

        self.store.update_booking(&booking).await
    }

    /// Cancel a booking on behalf of its owner.
    ///
    /// Allowed from PENDING, ACTIVE, and EXTENDED; terminal states are
    /// refused. The reserved slot is released.
    ///
    /// # Errors
    ///
    /// - `Error::NotFound` - unknown booking, or `caller` does not own it
    /// - `Error::Validation` - booking is already terminal
    /// - `Error::Conflict` - lost a race against another writer
    pub async fn cancel(&self, booking_id: &str, caller: &str) -> Result<Booking> {
        let timer = Instant::now();
        match self.cancel_inner(booking_id, caller).await {
            Ok(booking) => {
                self.metrics.record_cancelled(&booking.id, timer.elapsed());
                info!(
                    "✓ Booking {} cancelled in {:?}",
                    booking.id,
                    timer.elapsed()
                );
                Ok(booking)
            }
            Err(e) => {
                self.metrics.record_rejected("cancel", &e.to_string());
                Err(e)
            }
        }
    }

    async fn cancel_inner(&self, booking_id: &str, caller: &str) -> Result<Booking> {
        let mut booking = self.fetch_required(booking_id).await?;

        // Ownership check deliberately answers like a missing record.
        if booking.user_id != caller {
            return Err(Error::NotFound(format!(
                "booking {} not found",
                booking_id
            )));
        }
        if booking.status.is_terminal() {
            return Err(Error::Validation(format!(
                "A {} booking cannot be cancelled",
                booking.status
            )));
        }

        booking.status = BookingStatus::Cancelled;
        let cancelled = self.store.update_booking(&booking).await?;
        self.release_slot(&cancelled.spot_id).await;
        Ok(cancelled)
    }

    /// Complete an occupied booking (external trigger: time elapsed or the
    /// owner closes it out). Stamps `actual_end_time` and releases the slot.
    ///
    /// # Errors
    ///
    /// - `Error::NotFound` - unknown booking
    /// - `Error::Validation` - booking is not Active or Extended
    /// - `Error::Conflict` - lost a race against another writer
    pub async fn complete(&self, booking_id: &str) -> Result<Booking> {
        let timer = Instant::now();
        match self.complete_inner(booking_id).await {
            Ok(booking) => {
                self.metrics.record_completed(&booking.id, timer.elapsed());
                info!(
                    "✓ Booking {} completed in {:?}",
                    booking.id,
                    timer.elapsed()
                );
                Ok(booking)
            }
            Err(e) => {
                self.metrics.record_rejected("complete", &e.to_string());
                Err(e)
            }
        }
    }

    async fn complete_inner(&self, booking_id: &str) -> Result<Booking> {
        let mut booking = self.fetch_required(booking_id).await?;

        if !booking.status.can_transition(BookingStatus::Completed) {
            return Err(Error::Validation(format!(
                "A {} booking cannot be completed",
                booking.status
            )));
        }

        booking.actual_end_time = Some(Utc::now());
        booking.status = BookingStatus::Completed;
        let completed = self.store.update_booking(&booking).await?;
        self.release_slot(&completed.spot_id).await;
        Ok(completed)
    }

    /// Fetch a booking by id.
    pub async fn get(&self, booking_id: &str) -> Result<Option<Booking>> {
        self.store.fetch_booking(booking_id).await
    }

    /// All of a user's bookings, newest first, terminal states included.
    pub async fn bookings_for_user(&self, user_id: &str) -> Result<Vec<Booking>> {
        self.store.bookings_for_user(user_id).await
    }

    async fn fetch_required(&self, booking_id: &str) -> Result<Booking> {
        self.store
            .fetch_booking(booking_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("booking {} not found", booking_id)))
    }

    async fn release_slot(&self, spot_id: &str) {
        // The booking outcome is already decided at this point; a failed
        // release is logged, not surfaced.
        if let Err(e) = self.store.adjust_available_slots(spot_id, 1).await {
            warn!("Failed to release slot on spot {}: {}", spot_id, e);
        }
    }
}
