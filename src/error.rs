//! Failures that prevent a measurement.

use std::time::Duration;

use thiserror::Error;

/// Why a probe failed to produce a measurement.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Target is not an http(s) URL.
    #[error("bad target URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// DNS, refused connection or TLS failure.
    #[error("connection failed: {0}")]
    Connect(Box<reqwest::Error>),
    /// A connect, read or overall time limit ran out.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    /// Server answered with a 4xx or 5xx status.
    #[error("server responded with {0}")]
    Status(reqwest::StatusCode),
    /// Any other transport or stream error.
    #[error("http error: {0}")]
    Http(Box<reqwest::Error>),
    /// Stopped through a [`CancelHandle`](crate::cancel::CancelHandle).
    #[error("probe cancelled")]
    Cancelled,
}

impl ProbeError {
    /// True when the failure means the target could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ProbeError::Connect(_) | ProbeError::InvalidUrl(_))
    }

    /// Classify a transport error. reqwest does not say how long it waited,
    /// so timeouts report the configured limit that applied.
    pub(crate) fn from_reqwest(
        e: reqwest::Error,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Self {
        if e.is_timeout() {
            ProbeError::Timeout(timeout_limit(e.is_connect(), connect_timeout, read_timeout))
        } else if e.is_connect() {
            ProbeError::Connect(Box::new(e))
        } else if let Some(status) = e.status() {
            ProbeError::Status(status)
        } else {
            ProbeError::Http(Box::new(e))
        }
    }
}

fn timeout_limit(
    during_connect: bool,
    connect_timeout: Duration,
    read_timeout: Duration,
) -> Duration {
    if during_connect {
        connect_timeout
    } else {
        read_timeout
    }
}

// reducing size of ProbeError by putting large element in the Box
impl From<reqwest::Error> for ProbeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            ProbeError::Connect(Box::new(e))
        } else {
            ProbeError::Http(Box::new(e))
        }
    }
}

/// Result of a probe.
pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_covers_bad_urls() {
        let err: ProbeError = url::Url::parse("not a url").unwrap_err().into();
        assert!(err.is_unreachable());
        assert!(!ProbeError::Cancelled.is_unreachable());
        assert!(!ProbeError::Timeout(Duration::from_secs(1)).is_unreachable());
    }

    #[test]
    fn timeout_reports_the_limit_that_applied() {
        let connect = Duration::from_secs(3);
        let read = Duration::from_millis(250);
        assert_eq!(timeout_limit(true, connect, read), connect);
        assert_eq!(timeout_limit(false, connect, read), read);
    }

    #[test]
    fn status_message() {
        let err = ProbeError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "server responded with 500 Internal Server Error");
    }
}
