//! Per-test outcomes and the combined report.

use serde::Serialize;

use crate::error::Result;
use crate::measurement::Measurement;
use crate::quality::Quality;

/// Result of one probe inside a [`Report`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    /// The probe completed.
    Measured(Measurement),
    /// The probe failed; `error` describes why.
    Failed {
        /// Display text of the error.
        error: String,
    },
}

impl Outcome {
    /// Throughput to display; failures show as 0.0.
    pub fn mbps(&self) -> f64 {
        match self {
            Outcome::Measured(m) => m.throughput.mbps(),
            Outcome::Failed { .. } => 0.0,
        }
    }

    /// True if no measurement was taken.
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

impl From<Result<Measurement>> for Outcome {
    fn from(res: Result<Measurement>) -> Self {
        match res {
            Ok(m) => Outcome::Measured(m),
            Err(e) => Outcome::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// Download, upload and the quality derived from the download.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Download probe result.
    pub download: Outcome,
    /// Upload probe result.
    pub upload: Outcome,
    /// Classification of the download throughput.
    pub quality: Quality,
}

impl Report {
    /// A failed download counts as zero throughput, so it classifies the
    /// same as a measured zero: [`Quality::NoConnection`].
    pub fn new(download: Outcome, upload: Outcome) -> Self {
        let quality = Quality::from_mbps(download.mbps());
        Report {
            download,
            upload,
            quality,
        }
    }
}
