//! Per-probe configuration.
//!
//! Defaults come from [`params`](crate::params); every field can be
//! overridden per call with the `with_*` setters.

use std::time::Duration;

use url::Url;

use crate::error::{ProbeError, Result};
use crate::params;

/// Settings for the download probe.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadConfig {
    /// Target fetched with GET.
    pub url: String,
    /// Timeout for establishing the connection.
    pub connect_timeout: Duration,
    /// Timeout for a single read.
    pub read_timeout: Duration,
    /// Body reading stops once this much time has passed since the start.
    pub max_duration: Duration,
    /// Overall bound on the call, including connection setup.
    pub deadline: Option<Duration>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        DownloadConfig {
            url: params::DOWNLOAD_URL.into(),
            connect_timeout: params::CONNECT_TIMEOUT,
            read_timeout: params::READ_TIMEOUT,
            max_duration: params::DOWNLOAD_MAX_DURATION,
            deadline: None,
        }
    }
}

impl DownloadConfig {
    /// Target URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Limit on establishing the connection.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Limit on waiting for each read from the server.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Time budget after which the body stops being read.
    pub fn with_max_duration(mut self, max_duration: Duration) -> Self {
        self.max_duration = max_duration;
        self
    }

    /// Hard limit on the whole probe, or `None` for no limit.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub(crate) fn target(&self) -> Result<Url> {
        parse_target(&self.url)
    }

    pub(crate) fn http_client(&self) -> Result<reqwest::Client> {
        build_client(self.connect_timeout, self.read_timeout)
    }
}

/// Settings for the upload probe.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadConfig {
    /// Target the payload is POSTed to.
    pub url: String,
    /// Timeout for establishing the connection.
    pub connect_timeout: Duration,
    /// Timeout for a single read.
    pub read_timeout: Duration,
    /// Number of payload bytes to send.
    pub payload_size: usize,
    /// Byte the payload is filled with.
    pub fill_byte: u8,
    /// Overall bound on the call.
    pub deadline: Option<Duration>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        UploadConfig {
            url: params::UPLOAD_URL.into(),
            connect_timeout: params::CONNECT_TIMEOUT,
            read_timeout: params::READ_TIMEOUT,
            payload_size: params::UPLOAD_PAYLOAD_SIZE,
            fill_byte: params::UPLOAD_FILL_BYTE,
            deadline: None,
        }
    }
}

impl UploadConfig {
    /// Target URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Limit on establishing the connection.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Limit on waiting for each read from the server.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Number of bytes to send.
    pub fn with_payload_size(mut self, payload_size: usize) -> Self {
        self.payload_size = payload_size;
        self
    }

    /// Hard limit on the whole probe, or `None` for no limit.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub(crate) fn target(&self) -> Result<Url> {
        parse_target(&self.url)
    }

    pub(crate) fn http_client(&self) -> Result<reqwest::Client> {
        build_client(self.connect_timeout, self.read_timeout)
    }
}

fn parse_target(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ProbeError::InvalidUrl(url::ParseError::RelativeUrlWithoutBase)),
    }
}

fn build_client(connect_timeout: Duration, read_timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(connect_timeout)
        .read_timeout(read_timeout)
        .build()?;
    Ok(client)
}
