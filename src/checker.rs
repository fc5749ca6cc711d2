//! Runs the download and upload tests and reports their results.

use std::io;

use tokio::time::timeout;
use tracing::{debug, warn};

use crate::cancel::{CancelHandle, CancelToken};
use crate::config::{DownloadConfig, UploadConfig};
use crate::emitter::Emitter;
use crate::error::{ProbeError, Result};
use crate::measurement::{Measurement, TestKind};
use crate::quality::Quality;
use crate::summary::{Outcome, Report};
use crate::{download, upload};

/// Entry point for running speed checks.
///
/// Holds the default probe configuration and a cancellation handle shared
/// by every probe it starts. Probes run one at a time; the checker keeps no
/// state between calls, so it can be reused freely.
pub struct SpeedChecker {
    download: DownloadConfig,
    upload: UploadConfig,
    cancel: CancelHandle,
}

impl SpeedChecker {
    /// Checker using the default configs.
    pub fn new() -> Self {
        SpeedChecker::with_configs(DownloadConfig::default(), UploadConfig::default())
    }

    /// Checker using the given configs.
    pub fn with_configs(download: DownloadConfig, upload: UploadConfig) -> Self {
        SpeedChecker {
            download,
            upload,
            cancel: CancelHandle::new(),
        }
    }

    /// Settings used by download tests.
    pub fn download_config(&self) -> &DownloadConfig {
        &self.download
    }

    /// Settings used by upload tests.
    pub fn upload_config(&self) -> &UploadConfig {
        &self.upload
    }

    /// Handle that aborts any probe currently running on this checker.
    pub fn cancel_handle(&self) -> &CancelHandle {
        &self.cancel
    }

    /// Download throughput in Mbps, or 0.0 if the probe failed.
    ///
    /// `url` overrides the configured target for this call only.
    pub async fn measure_download_speed(&self, url: Option<&str>) -> f64 {
        let config = match url {
            Some(url) => self.download.clone().with_url(url),
            None => self.download.clone(),
        };
        match self.try_measure_download(&config).await {
            Ok(m) => m.throughput.mbps(),
            Err(e) => {
                warn!(url = %config.url, error = %e, "download probe failed");
                0.0
            }
        }
    }

    /// Upload throughput in Mbps, or 0.0 if the probe failed.
    ///
    /// `url` overrides the configured target for this call only.
    pub async fn measure_upload_speed(&self, url: Option<&str>) -> f64 {
        let config = match url {
            Some(url) => self.upload.clone().with_url(url),
            None => self.upload.clone(),
        };
        match self.try_measure_upload(&config).await {
            Ok(m) => m.throughput.mbps(),
            Err(e) => {
                warn!(url = %config.url, error = %e, "upload probe failed");
                0.0
            }
        }
    }

    /// Classify a download throughput. See [`Quality::from_mbps`].
    pub fn network_quality(&self, download_mbps: f64) -> Quality {
        Quality::from_mbps(download_mbps)
    }

    /// Download with `config`, honouring cancellation and the deadline.
    pub async fn try_measure_download(&self, config: &DownloadConfig) -> Result<Measurement> {
        guarded(self.cancel.token(), config.deadline, download::run(config)).await
    }

    /// Upload with `config`, honouring cancellation and the deadline.
    pub async fn try_measure_upload(&self, config: &UploadConfig) -> Result<Measurement> {
        guarded(self.cancel.token(), config.deadline, upload::run(config)).await
    }

    /// Measure download, then upload, then classify the download.
    ///
    /// Probe failures end up in the [`Report`]; only errors writing to the
    /// emitter are returned.
    pub async fn run(&self, emitter: &mut dyn Emitter) -> io::Result<Report> {
        emitter.on_starting(TestKind::Download)?;
        let download = self.try_measure_download(&self.download).await;
        let download = report_outcome(emitter, TestKind::Download, download)?;

        emitter.on_starting(TestKind::Upload)?;
        let upload = self.try_measure_upload(&self.upload).await;
        let upload = report_outcome(emitter, TestKind::Upload, upload)?;

        let report = Report::new(download, upload);
        debug!(quality = %report.quality, "speed check complete");
        emitter.on_report(&report)?;
        Ok(report)
    }
}

impl Default for SpeedChecker {
    fn default() -> Self {
        SpeedChecker::new()
    }
}

fn report_outcome(
    emitter: &mut dyn Emitter,
    test: TestKind,
    res: Result<Measurement>,
) -> io::Result<Outcome> {
    match &res {
        Ok(m) => emitter.on_measurement(m)?,
        Err(e) => {
            warn!(?test, error = %e, "probe failed");
            emitter.on_error(test, &e.to_string())?;
        }
    }
    Ok(res.into())
}

// Runs `probe` until it finishes, the deadline passes, or the token fires.
async fn guarded<F>(
    mut token: CancelToken,
    deadline: Option<std::time::Duration>,
    probe: F,
) -> Result<Measurement>
where
    F: Future<Output = Result<Measurement>>,
{
    if token.is_cancelled() {
        return Err(ProbeError::Cancelled);
    }

    let bounded = async {
        match deadline {
            Some(limit) => timeout(limit, probe)
                .await
                .unwrap_or_else(|_elapsed| Err(ProbeError::Timeout(limit))),
            None => probe.await,
        }
    };

    tokio::select! {
        biased;
        _ = token.cancelled() => Err(ProbeError::Cancelled),
        res = bounded => res,
    }
}
