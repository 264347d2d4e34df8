//! Observability hooks for booking and validation operations.
//!
//! The ledger and validator report every lifecycle event through the
//! [`LedgerMetrics`] trait. Implement it to feed your monitoring system:
//!
//! ```ignore
//! use park_kit::observability::LedgerMetrics;
//! use std::time::Duration;
//!
//! struct PrometheusMetrics;
//!
//! impl LedgerMetrics for PrometheusMetrics {
//!     fn record_created(&self, _booking_id: &str, _duration: Duration) {
//!         // counter!("bookings_created").inc();
//!         // histogram!("booking_create_latency").record(duration);
//!     }
//!     // ... implement other methods
//! }
//!
//! // let service = ParkingService::with_metrics(store, Arc::new(PrometheusMetrics));
//! ```
//!
//! Default behavior (if not overridden) logs via the `log` crate; the
//! bundled [`NoOpMetrics`] silences everything.

use std::time::Duration;

/// Trait for booking-lifecycle metrics collection.
pub trait LedgerMetrics: Send + Sync {
    /// Record a booking creation.
    fn record_created(&self, booking_id: &str, duration: Duration) {
        debug!("Booking CREATED: {} took {:?}", booking_id, duration);
    }

    /// Record a successful entry validation.
    fn record_validated(&self, booking_id: &str, duration: Duration) {
        debug!("Entry VALIDATED: {} took {:?}", booking_id, duration);
    }

    /// Record a booking extension.
    fn record_extended(&self, booking_id: &str, duration: Duration) {
        debug!("Booking EXTENDED: {} took {:?}", booking_id, duration);
    }

    /// Record a cancellation.
    fn record_cancelled(&self, booking_id: &str, duration: Duration) {
        debug!("Booking CANCELLED: {} took {:?}", booking_id, duration);
    }

    /// Record a completion.
    fn record_completed(&self, booking_id: &str, duration: Duration) {
        debug!("Booking COMPLETED: {} took {:?}", booking_id, duration);
    }

    /// Record a rejected operation (validation failure, expired entry, ...).
    fn record_rejected(&self, operation: &str, error: &str) {
        warn!("Operation {} rejected: {}", operation, error);
    }
}

impl<M: LedgerMetrics + ?Sized> LedgerMetrics for std::sync::Arc<M> {
    fn record_created(&self, booking_id: &str, duration: Duration) {
        (**self).record_created(booking_id, duration);
    }
    fn record_validated(&self, booking_id: &str, duration: Duration) {
        (**self).record_validated(booking_id, duration);
    }
    fn record_extended(&self, booking_id: &str, duration: Duration) {
        (**self).record_extended(booking_id, duration);
    }
    fn record_cancelled(&self, booking_id: &str, duration: Duration) {
        (**self).record_cancelled(booking_id, duration);
    }
    fn record_completed(&self, booking_id: &str, duration: Duration) {
        (**self).record_completed(booking_id, duration);
    }
    fn record_rejected(&self, operation: &str, error: &str) {
        (**self).record_rejected(operation, error);
    }
}

/// Default metrics implementation (no-op).
#[derive(Clone, Default)]
pub struct NoOpMetrics;

impl LedgerMetrics for NoOpMetrics {
    fn record_created(&self, _booking_id: &str, _duration: Duration) {}
    fn record_validated(&self, _booking_id: &str, _duration: Duration) {}
    fn record_extended(&self, _booking_id: &str, _duration: Duration) {}
    fn record_cancelled(&self, _booking_id: &str, _duration: Duration) {}
    fn record_completed(&self, _booking_id: &str, _duration: Duration) {}
    fn record_rejected(&self, _operation: &str, _error: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_custom_metrics_receive_events() {
        #[derive(Clone, Default)]
        struct Counting {
            created: Arc<AtomicUsize>,
            rejected: Arc<AtomicUsize>,
        }

        impl LedgerMetrics for Counting {
            fn record_created(&self, _booking_id: &str, _duration: Duration) {
                self.created.fetch_add(1, Ordering::SeqCst);
            }
            fn record_rejected(&self, _operation: &str, _error: &str) {
                self.rejected.fetch_add(1, Ordering::SeqCst);
            }
        }

        let metrics = Counting::default();
        metrics.record_created("booking_1", Duration::from_millis(2));
        metrics.record_rejected("extend", "already extended");

        assert_eq!(metrics.created.load(Ordering::SeqCst), 1);
        assert_eq!(metrics.rejected.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_noop_metrics_is_silent() {
        let metrics = NoOpMetrics;
        metrics.record_validated("booking_1", Duration::from_millis(1));
        metrics.record_rejected("cancel", "not owner");
    }
}
