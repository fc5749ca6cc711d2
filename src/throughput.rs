//! Conversion of a timed transfer into megabits per second.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::params;

/// Throughput in megabits per second, rounded to two decimals.
///
/// Always finite and non-negative. A transfer whose duration is too short to
/// measure yields [`Throughput::ZERO`] instead of an infinite or NaN rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Throughput(f64);

impl Throughput {
    /// The value reported when nothing could be measured.
    pub const ZERO: Throughput = Throughput(0.0);

    /// Throughput of `bytes` transferred over `elapsed`.
    pub fn from_transfer(bytes: u64, elapsed: Duration) -> Self {
        if elapsed < params::MIN_MEASURABLE_ELAPSED {
            return Throughput::ZERO;
        }
        let megabits = bytes as f64 * params::BITS_PER_BYTE / params::BITS_PER_MEGABIT;
        let mbps = megabits / elapsed.as_secs_f64();
        if !mbps.is_finite() {
            return Throughput::ZERO;
        }
        Throughput(round2(mbps))
    }

    /// Value in Mbps.
    pub fn mbps(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Throughput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} Mbps", self.0)
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_megabytes_in_one_second() {
        let t = Throughput::from_transfer(10_000_000, Duration::from_secs(1));
        assert_eq!(t.mbps(), 80.0);
    }

    #[test]
    fn one_megabyte_in_half_a_second() {
        let t = Throughput::from_transfer(1_000_000, Duration::from_millis(500));
        assert_eq!(t.mbps(), 16.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        // 8 Mbit over 3 s = 2.666..
        let t = Throughput::from_transfer(1_000_000, Duration::from_secs(3));
        assert_eq!(t.mbps(), 2.67);

        // 123_456 bytes over 1 s = 0.987648 Mbit/s
        let t = Throughput::from_transfer(123_456, Duration::from_secs(1));
        assert_eq!(t.mbps(), 0.99);
    }

    #[test]
    fn zero_elapsed_is_zero() {
        let t = Throughput::from_transfer(1_000_000, Duration::ZERO);
        assert_eq!(t, Throughput::ZERO);
        assert!(t.mbps().is_finite());

        let t = Throughput::from_transfer(1_000_000, Duration::from_nanos(10));
        assert_eq!(t, Throughput::ZERO);
    }

    #[test]
    fn empty_body_is_zero() {
        let t = Throughput::from_transfer(0, Duration::from_secs(2));
        assert_eq!(t.mbps(), 0.0);
    }

    #[test]
    fn display_and_json() {
        let t = Throughput::from_transfer(1_000_000, Duration::from_secs(1));
        assert_eq!(t.to_string(), "8.00 Mbps");
        assert_eq!(serde_json::to_string(&t).unwrap(), "8.0");
    }
}
