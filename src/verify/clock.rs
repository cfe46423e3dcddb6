//! Injectable time source.
//!
//! Every timestamp in the report comes from a [`Clock`], so tests can pin
//! "now" and reproduce the date arithmetic exactly.

use chrono::{DateTime, FixedOffset, Local};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// Current time with its UTC offset.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the system clock in the local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    /// Pin the clock to an RFC 3339 timestamp.
    pub fn from_rfc3339(s: &str) -> crate::Result<Self> {
        DateTime::parse_from_rfc3339(s)
            .map(FixedClock)
            .map_err(|_| crate::DepVerifyError::DateParse(s.to_string()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_is_stable() {
        let clock = FixedClock::from_rfc3339("2025-11-30T09:15:00+02:00").unwrap();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn test_fixed_clock_rejects_garbage() {
        assert!(FixedClock::from_rfc3339("yesterday").is_err());
    }

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
