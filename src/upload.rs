//! Upload probe.
//!
//! POSTs a constant-filled payload of [`UploadConfig::payload_size`] bytes
//! and drains the response before stopping the clock. The whole payload is
//! always sent; there is no mid-transfer cap.

use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use tokio::time::Instant;
use tracing::debug;

use crate::config::UploadConfig;
use crate::error::{ProbeError, Result};
use crate::measurement::{Measurement, TestKind};

/// Run the upload probe with `config`.
pub async fn run(config: &UploadConfig) -> Result<Measurement> {
    let url = config.target()?;
    let client = config.http_client()?;
    let failed =
        |e: reqwest::Error| ProbeError::from_reqwest(e, config.connect_timeout, config.read_timeout);
    let payload = Bytes::from(vec![config.fill_byte; config.payload_size]);
    let payload_bytes = payload.len() as u64;

    let start = Instant::now();
    debug!(%url, payload_bytes, "upload probe starting");

    let response = client
        .post(url)
        .header(CONTENT_TYPE, "application/octet-stream")
        .body(payload)
        .send()
        .await
        .map_err(failed)?;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(ProbeError::Status(status));
    }

    // The exchange only counts once the server's reply is fully read.
    let mut body = response.bytes_stream();
    let mut drained: u64 = 0;
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(failed)?;
        drained += chunk.len() as u64;
    }

    let elapsed = start.elapsed();
    let measurement = Measurement::new(TestKind::Upload, payload_bytes, elapsed, false);
    debug!(
        elapsed = ?measurement.elapsed,
        response_bytes = drained,
        mbps = measurement.throughput.mbps(),
        "upload probe finished"
    );
    Ok(measurement)
}
