//! Clock port for obtaining the current time.

use chrono::{DateTime, FixedOffset};

/// Provides the current local wall-clock time.
///
/// The offset is kept so a replayed cassette names files exactly as the
/// recorded run did, regardless of the replaying machine's time zone.
pub trait Clock: Send + Sync {
    /// Returns the current local time with its UTC offset.
    fn now(&self) -> DateTime<FixedOffset>;
}
