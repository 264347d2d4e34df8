//! Entry validator - the attendant-facing access-control check.
//!
//! Given a code presented at physical entry (scanned QR token or typed
//! PIN), the validator resolves it to a live booking, checks the temporal
//! window, and promotes a PENDING booking to ACTIVE on first entry.
//!
//! The QR and PIN keyspaces are searched independently; a cross-field
//! collision (a PIN equal to another booking's QR string) matches two
//! distinct bookings and is rejected as ambiguous instead of silently
//! picking one.

use crate::booking::{Booking, BookingStatus};
use crate::error::{Error, Result};
use crate::observability::{LedgerMetrics, NoOpMetrics};
use crate::store::ParkingStore;
use chrono::{DateTime, Utc};
use futures::future;
use std::time::Instant;

/// Attendant-facing validator over a [`ParkingStore`].
pub struct EntryValidator<S: ParkingStore> {
    store: S,
    metrics: Box<dyn LedgerMetrics>,
}

impl<S: ParkingStore> EntryValidator<S> {
    /// Create a validator over the given store.
    pub fn new(store: S) -> Self {
        EntryValidator {
            store,
            metrics: Box::new(NoOpMetrics),
        }
    }

    /// Set a custom metrics handler.
    pub fn with_metrics(mut self, metrics: Box<dyn LedgerMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Validate an entry code against the current wall clock.
    ///
    /// See [`EntryValidator::validate_at`] for the full contract.
    pub async fn validate(&self, code: &str) -> Result<Option<Booking>> {
        self.validate_at(code, Utc::now()).await
    }

    /// Validate an entry code as of `now`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(booking))` - entry honored; a PENDING booking comes back
    ///   promoted to ACTIVE
    /// - `Ok(None)` - the code matches no live booking (stale, reused, or
    ///   mistyped codes fail closed; caller reports "invalid code")
    ///
    /// # Errors
    ///
    /// - `Error::NotStarted` - `now` is before the booking window opens;
    ///   status unchanged
    /// - `Error::Expired` - `now` is past `reserved_end_time`; status
    ///   unchanged
    /// - `Error::AmbiguousCode` - the code matches two distinct bookings
    ///   across the QR and PIN keyspaces
    /// - `Error::Conflict` - the promotion lost a race against another
    ///   writer
    pub async fn validate_at(&self, code: &str, now: DateTime<Utc>) -> Result<Option<Booking>> {
        let timer = Instant::now();
        match self.validate_inner(code, now).await {
            Ok(Some(booking)) => {
                self.metrics.record_validated(&booking.id, timer.elapsed());
                info!(
                    "✓ Entry validated for booking {} in {:?}",
                    booking.id,
                    timer.elapsed()
                );
                Ok(Some(booking))
            }
            Ok(None) => {
                debug!("✗ Entry code matched no live booking");
                Ok(None)
            }
            Err(e) => {
                self.metrics.record_rejected("validate", &e.to_string());
                Err(e)
            }
        }
    }

    async fn validate_inner(&self, code: &str, now: DateTime<Utc>) -> Result<Option<Booking>> {
        // The two keyspaces are independent; search them concurrently.
        let (by_qr, by_pin) = future::try_join(
            self.store.find_live_by_qr(code),
            self.store.find_live_by_pin(code),
        )
        .await?;

        let booking = match (by_qr, by_pin) {
            (Some(qr_match), Some(pin_match)) if qr_match.id != pin_match.id => {
                return Err(Error::AmbiguousCode(format!(
                    "code matches bookings {} and {}",
                    qr_match.id, pin_match.id
                )));
            }
            (Some(booking), _) | (None, Some(booking)) => booking,
            (None, None) => return Ok(None),
        };

        if now < booking.start_time {
            return Err(Error::NotStarted(booking.id));
        }
        if now > booking.reserved_end_time {
            return Err(Error::Expired(booking.id));
        }

        // First physical entry marks occupancy start.
        if booking.status == BookingStatus::Pending {
            let mut promoted = booking;
            promoted.status = BookingStatus::Active;
            return Ok(Some(self.store.update_booking(&promoted).await?));
        }

        Ok(Some(booking))
    }
}
