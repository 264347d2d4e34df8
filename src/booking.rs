//! Booking records and the reservation state machine.
//!
//! A booking moves through a monotonic state machine:
//!
//! ```text
//! PENDING ──entry validated──▶ ACTIVE ──extend──▶ EXTENDED
//!    │                           │                   │
//!    │                           ├───────────────────┤
//!    └──cancel──▶ CANCELLED ◀────┘     complete      └──▶ COMPLETED
//! ```
//!
//! `Extended` is a side-branch of `Active`: the vehicle is still occupying
//! its slot, but the deadline has been pushed once. `Completed` and
//! `Cancelled` are terminal; no transition moves a booking backward, and
//! records are never physically deleted (terminal states persist for
//! history and reporting).

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Created but not yet validated at physical entry.
    Pending,
    /// Entry validated; the slot is occupied.
    Active,
    /// Active with the one-time deadline push applied.
    Extended,
    /// Finished normally. Terminal.
    Completed,
    /// Cancelled by the customer. Terminal.
    Cancelled,
}

impl BookingStatus {
    /// True for statuses an entry code can still match.
    ///
    /// Terminal-state bookings are never matched: a stale or reused
    /// code fails closed.
    pub fn is_live(self) -> bool {
        matches!(
            self,
            BookingStatus::Pending | BookingStatus::Active | BookingStatus::Extended
        )
    }

    /// True for statuses with no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Whether the state machine permits moving from `self` to `to`.
    pub fn can_transition(self, to: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, to),
            (Pending, Active)
                | (Pending, Cancelled)
                | (Active, Extended)
                | (Active, Completed)
                | (Active, Cancelled)
                | (Extended, Completed)
                | (Extended, Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Active => "ACTIVE",
            BookingStatus::Extended => "EXTENDED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for BookingStatus {
    type Err = Error;

    /// Parse a stored status string, case-insensitively.
    ///
    /// Upstream layers have historically disagreed on casing
    /// ('pending' vs 'PENDING'); this is the single normalization point.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(BookingStatus::Pending),
            "ACTIVE" => Ok(BookingStatus::Active),
            "EXTENDED" => Ok(BookingStatus::Extended),
            "COMPLETED" => Ok(BookingStatus::Completed),
            "CANCELLED" => Ok(BookingStatus::Cancelled),
            other => Err(Error::Backend(format!(
                "unknown booking status '{}'",
                other
            ))),
        }
    }
}

/// A reservation of one slot at a spot for a time window, bound to a
/// vehicle and a user.
///
/// `qr_code` and `pin` are issued once at creation and immutable afterwards.
/// `reserved_end_time` is the hard entry deadline and always satisfies
/// `reserved_end_time >= end_time`. The `version` field is an
/// optimistic-concurrency counter bumped on every store write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub spot_id: String,
    pub user_id: String,
    pub vehicle_id: String,
    pub start_time: DateTime<Utc>,
    /// Nominal end of the paid window.
    pub end_time: DateTime<Utc>,
    /// Hard cutoff after which entry is no longer honored.
    pub reserved_end_time: DateTime<Utc>,
    /// Set when the booking is completed.
    pub actual_end_time: Option<DateTime<Utc>>,
    /// Computed at creation from duration and the spot's rate, in cents-rounded
    /// whole currency.
    pub total_cost: f64,
    pub status: BookingStatus,
    pub qr_code: String,
    pub pin: String,
    pub is_extended: bool,
    pub extended_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub version: u64,
}

impl Booking {
    /// True if `code` matches either credential.
    pub fn matches_code(&self, code: &str) -> bool {
        self.qr_code == code || self.pin == code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_case_insensitive() {
        for raw in ["pending", "PENDING", "Pending"] {
            assert_eq!(
                raw.parse::<BookingStatus>().expect("Failed to parse"),
                BookingStatus::Pending
            );
        }
        assert!("unknown".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_status_display_roundtrip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Active,
            BookingStatus::Extended,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            let parsed = status
                .to_string()
                .parse::<BookingStatus>()
                .expect("Failed to parse");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_live_and_terminal() {
        assert!(BookingStatus::Pending.is_live());
        assert!(BookingStatus::Active.is_live());
        assert!(BookingStatus::Extended.is_live());
        assert!(!BookingStatus::Completed.is_live());
        assert!(!BookingStatus::Cancelled.is_live());

        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::Extended.is_terminal());
    }

    #[test]
    fn test_transitions_are_monotonic() {
        use BookingStatus::*;

        assert!(Pending.can_transition(Active));
        assert!(Pending.can_transition(Cancelled));
        assert!(Active.can_transition(Extended));
        assert!(Active.can_transition(Completed));
        assert!(Extended.can_transition(Cancelled));

        // No transition moves a booking backward or out of a terminal state.
        assert!(!Active.can_transition(Pending));
        assert!(!Extended.can_transition(Active));
        assert!(!Completed.can_transition(Active));
        assert!(!Cancelled.can_transition(Pending));
        assert!(!Completed.can_transition(Cancelled));
    }
}
