//! Time source for connection timestamps and idle-age computation.

use chrono::{DateTime, Utc};

/// Wall-clock source.
///
/// Injected into the registry so idle eviction can be tested without
/// sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// [`Clock`] backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
