//! Clock for the airserv domain.
//!
//! Timestamps are UTC and never carry more than microsecond precision, the
//! precision the store keeps, so a service or an activity entry read back
//! compares equal to the one that was written.

use chrono::{DateTime, Duration, DurationRound, Utc};

/// Creation, modification and activity time.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time, truncated to whole microseconds.
#[must_use]
pub fn now() -> Timestamp {
    truncate(Utc::now())
}

/// Drop anything finer than a microsecond.
#[must_use]
pub fn truncate(ts: Timestamp) -> Timestamp {
    ts.duration_trunc(Duration::microseconds(1)).unwrap_or(ts)
}

/// The instant `age` ago. Anything recorded strictly before it is older than `age`.
#[must_use]
pub fn cutoff(age: Duration) -> Timestamp {
    now() - age
}
