//! Entry credential issuance (QR token + numeric PIN).
//!
//! Every booking is bound to two independent credentials at creation time:
//! a QR token presented by scanning, and a 4-digit PIN typed manually when
//! scanning is unavailable. Generation cannot fail; uniqueness is
//! probabilistic (timestamp plus random suffix for the token, uniform
//! random digits for the PIN) and cross-field collisions are rejected at
//! validation time rather than here.

use chrono::{DateTime, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of the random suffix in a QR token.
const QR_SUFFIX_LEN: usize = 9;

/// The `(qr_code, pin)` pair bound 1:1 to a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryCredentials {
    /// Scannable token, e.g. `QR-1735689600000-a1b2c3d4e`.
    ///
    /// Unique enough to serve as a lookup key; not cryptographically
    /// hardened.
    pub qr_code: String,
    /// 4-digit numeric string for manual entry.
    pub pin: String,
}

impl EntryCredentials {
    /// Issue a fresh credential pair for a booking being created at `now`.
    pub fn issue(now: DateTime<Utc>) -> Self {
        let mut rng = rand::rng();

        let suffix: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(QR_SUFFIX_LEN)
            .map(char::from)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let qr_code = format!("QR-{}-{}", now.timestamp_millis(), suffix);

        let pin = rng.random_range(1000..10_000).to_string();

        EntryCredentials { qr_code, pin }
    }
}
