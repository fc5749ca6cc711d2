//! Download quality buckets.

use std::fmt;

use serde::{Serialize, Serializer};

/// Connection quality derived from a download throughput.
///
/// Variants are ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quality {
    /// Nothing measured, or zero throughput.
    NoConnection,
    /// Below 1 Mbps.
    Poor,
    /// 1 Mbps up to 5 Mbps.
    Fair,
    /// 5 Mbps up to 10 Mbps.
    Good,
    /// 10 Mbps up to 30 Mbps.
    VeryGood,
    /// 30 Mbps and above.
    Excellent,
}

impl Quality {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Quality::NoConnection => "No Connection",
            Quality::Poor => "Poor",
            Quality::Fair => "Fair",
            Quality::Good => "Good",
            Quality::VeryGood => "Very Good",
            Quality::Excellent => "Excellent",
        }
    }

    /// Classify a download throughput in Mbps.
    pub fn from_mbps(mbps: f64) -> Self {
        // NaN fails every comparison, so it has to be caught up front.
        if mbps.is_nan() || mbps <= 0.0 {
            Quality::NoConnection
        } else if mbps < 1.0 {
            Quality::Poor
        } else if mbps < 5.0 {
            Quality::Fair
        } else if mbps < 10.0 {
            Quality::Good
        } else if mbps < 30.0 {
            Quality::VeryGood
        } else {
            Quality::Excellent
        }
    }
}

/// Classify a download throughput in Mbps. See [`Quality::from_mbps`].
pub fn classify(mbps: f64) -> Quality {
    Quality::from_mbps(mbps)
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Quality {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_half_open() {
        let cases = [
            (0.0, "No Connection"),
            (-5.0, "No Connection"),
            (0.01, "Poor"),
            (0.99, "Poor"),
            (1.0, "Fair"),
            (4.99, "Fair"),
            (5.0, "Good"),
            (9.99, "Good"),
            (10.0, "Very Good"),
            (29.99, "Very Good"),
            (30.0, "Excellent"),
            (1000.0, "Excellent"),
        ];
        for (mbps, label) in cases {
            assert_eq!(classify(mbps).label(), label, "classify({mbps})");
        }
    }

    #[test]
    fn non_finite_inputs() {
        assert_eq!(classify(f64::NAN), Quality::NoConnection);
        assert_eq!(classify(f64::NEG_INFINITY), Quality::NoConnection);
        assert_eq!(classify(f64::INFINITY), Quality::Excellent);
    }

    #[test]
    fn monotonic_in_throughput() {
        let mut prev = classify(-1.0);
        let mut mbps = -1.0;
        while mbps < 50.0 {
            let q = classify(mbps);
            assert!(q >= prev, "{q} after {prev} at {mbps}");
            prev = q;
            mbps += 0.25;
        }
        assert_eq!(prev, Quality::Excellent);
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&Quality::VeryGood).unwrap();
        assert_eq!(json, r#""Very Good""#);
    }
}
