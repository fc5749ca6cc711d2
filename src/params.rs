//! Default targets and tuning parameters.

use std::time::Duration;

/// Default target for the download probe.
pub const DOWNLOAD_URL: &str = "https://www.google.com";

/// Default target for the upload probe. Must accept a POST body.
pub const UPLOAD_URL: &str = "https://httpbin.org/post";

/// Timeout for establishing a connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for a single read. Resets after every successful read.
pub const READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Time after which the download probe stops reading the body.
pub const DOWNLOAD_MAX_DURATION: Duration = Duration::from_secs(10);

/// Size of the synthetic upload payload (1 MB).
pub const UPLOAD_PAYLOAD_SIZE: usize = 1_000_000;

/// Byte the upload payload is filled with.
pub const UPLOAD_FILL_BYTE: u8 = b'a';

/// Bits per byte.
pub const BITS_PER_BYTE: f64 = 8.0;

/// Bits per megabit (decimal, as speed tests report).
pub const BITS_PER_MEGABIT: f64 = 1_000_000.0;

/// Elapsed times below this are treated as unmeasurable.
pub const MIN_MEASURABLE_ELAPSED: Duration = Duration::from_micros(1);
