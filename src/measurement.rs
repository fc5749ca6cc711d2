//! Probe result types.

use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::throughput::Throughput;

/// Which probe produced a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    /// Download (server-to-client) probe.
    Download,
    /// Upload (client-to-server) probe.
    Upload,
}

/// Outcome of one successful probe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    /// Which probe ran.
    pub test: TestKind,
    /// Payload bytes transferred (body bytes read, or bytes posted).
    pub bytes: u64,
    /// Wall-clock time from start of the request to end of the transfer.
    #[serde(rename = "elapsed_secs", serialize_with = "as_secs")]
    pub elapsed: Duration,
    /// Resulting throughput.
    #[serde(rename = "mbps")]
    pub throughput: Throughput,
    /// Set when the download stopped at its time budget before the body ended.
    pub truncated: bool,
}

impl Measurement {
    pub(crate) fn new(test: TestKind, bytes: u64, elapsed: Duration, truncated: bool) -> Self {
        Measurement {
            test,
            bytes,
            elapsed,
            throughput: Throughput::from_transfer(bytes, elapsed),
            truncated,
        }
    }
}

fn as_secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throughput_is_derived() {
        let m = Measurement::new(TestKind::Upload, 1_000_000, Duration::from_millis(500), false);
        assert_eq!(m.throughput.mbps(), 16.0);
    }

    #[test]
    fn serialize_measurement() {
        let m = Measurement::new(TestKind::Download, 10_000_000, Duration::from_secs(1), true);
        let json = serde_json::to_value(&m).unwrap();

        assert_eq!(json["test"], "download");
        assert_eq!(json["bytes"], 10_000_000);
        assert_eq!(json["elapsed_secs"], 1.0);
        assert_eq!(json["mbps"], 80.0);
        assert_eq!(json["truncated"], true);
    }
}
