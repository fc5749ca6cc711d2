//! Download probe.
//!
//! Issues one GET against the configured target and reads the body until it
//! ends or [`DownloadConfig::max_duration`] elapses, whichever comes first.
//! Waiting for the next chunk is bounded by the same budget, so a stalled or
//! trickling server cannot hold the probe past it.

use futures_util::StreamExt;
use tokio::time::{Instant, timeout_at};
use tracing::debug;

use crate::config::DownloadConfig;
use crate::error::{ProbeError, Result};
use crate::measurement::{Measurement, TestKind};

/// Run the download probe with `config`.
pub async fn run(config: &DownloadConfig) -> Result<Measurement> {
    let url = config.target()?;
    let client = config.http_client()?;
    let failed =
        |e: reqwest::Error| ProbeError::from_reqwest(e, config.connect_timeout, config.read_timeout);

    let start = Instant::now();
    let budget_end = start + config.max_duration;
    debug!(%url, budget = ?config.max_duration, "download probe starting");

    let response = match timeout_at(budget_end, client.get(url).send()).await {
        Ok(res) => res.map_err(failed)?,
        Err(_elapsed) => return Err(ProbeError::Timeout(config.max_duration)),
    };

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(ProbeError::Status(status));
    }

    let mut body = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    let mut truncated = false;

    loop {
        match timeout_at(budget_end, body.next()).await {
            Ok(Some(chunk)) => {
                let chunk = chunk.map_err(failed)?;
                total_bytes += chunk.len() as u64;
                if start.elapsed() > config.max_duration {
                    truncated = true;
                    break;
                }
            }
            Ok(None) => break,
            // budget ran out while waiting; keep what was read so far
            Err(_elapsed) => {
                truncated = true;
                break;
            }
        }
    }

    let elapsed = start.elapsed();
    drop(body);

    let measurement = Measurement::new(TestKind::Download, total_bytes, elapsed, truncated);
    debug!(
        bytes = measurement.bytes,
        elapsed = ?measurement.elapsed,
        truncated,
        mbps = measurement.throughput.mbps(),
        "download probe finished"
    );
    Ok(measurement)
}
