//! Error types for the parking toolkit.

use std::fmt;

/// Result type for parking operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the parking toolkit.
///
/// All ledger, validator, and store operations return `Result<T>` where `Result`
/// is defined as `std::result::Result<T, Error>`. Different error variants
/// represent different failure modes:
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed or missing booking/spot input.
    ///
    /// Raised when guard conditions on an operation are unmet.
    /// Common causes:
    /// - Missing vehicle on booking creation
    /// - `end_time` not after `start_time`
    /// - Spot not in Active status, or no free slot
    /// - Non-positive price or slot count on a new spot
    ///
    /// **Recovery:** Fix the input and retry the operation.
    Validation(String),

    /// Second extension attempt on a booking.
    ///
    /// A booking is extendable at most once; `is_extended` flips
    /// false→true exactly once and re-extension fails here.
    AlreadyExtended(String),

    /// Entry attempted before the booking window opens.
    ///
    /// Raised by entry validation when `now < start_time`.
    /// The booking status is left unchanged.
    NotStarted(String),

    /// Entry attempted after the reserved end time.
    ///
    /// Raised by entry validation when `now > reserved_end_time`.
    /// The booking status is left unchanged.
    Expired(String),

    /// Referenced record does not exist.
    ///
    /// Common causes:
    /// - Booking or spot id not present in the store
    /// - Caller does not own the booking it tries to mutate
    NotFound(String),

    /// A submitted entry code matched two distinct bookings across the
    /// QR and PIN keyspaces.
    ///
    /// Cross-field collisions are rejected rather than silently picking
    /// one match; the attendant should re-scan or fall back to the other
    /// credential.
    AmbiguousCode(String),

    /// Optimistic-concurrency conflict on a record update.
    ///
    /// Raised when the record's version changed between read and write,
    /// e.g. two extend calls racing, or a validation racing a cancel.
    /// Exactly one writer wins; the loser observes this error.
    ///
    /// **Recovery:** Re-read the record and decide whether the operation
    /// still applies.
    Conflict {
        /// Version the writer expected to find
        expected: u64,
        /// Version actually present in the store
        found: u64,
    },

    /// Store backend error (database, network, permission, constraint).
    ///
    /// The original cause is logged at the collaborator boundary; callers
    /// see this generic variant and may retry.
    Backend(String),

    /// Generic error with custom message.
    ///
    /// Used for errors that don't fit into other variants.
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(msg) => write!(f, "Validation error: {}", msg),
            Error::AlreadyExtended(msg) => {
                write!(f, "Booking has already been extended: {}", msg)
            }
            Error::NotStarted(msg) => write!(f, "Booking has not started yet: {}", msg),
            Error::Expired(msg) => write!(f, "Booking has expired: {}", msg),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::AmbiguousCode(msg) => write!(f, "Ambiguous entry code: {}", msg),
            Error::Conflict { expected, found } => {
                write!(
                    f,
                    "Version conflict: expected {}, found {}",
                    expected, found
                )
            }
            Error::Backend(msg) => write!(f, "Backend error: {}", msg),
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ============================================================================
// Conversions from other error types
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Backend(e.to_string())
    }
}

impl From<String> for Error {
    fn from(e: String) -> Self {
        Error::Other(e)
    }
}

impl From<&str> for Error {
    fn from(e: &str) -> Self {
        Error::Other(e.to_string())
    }
}
