//! An HTTP speed check library.
//!
//! Measures download throughput with a time-boxed GET, upload throughput
//! with a fixed-size POST, and maps the download result onto a coarse
//! [`Quality`](quality::Quality) label. Probes run one after another on a
//! single connection each.
//!
//! # Quick start
//!
//! ```no_run
//! use speed_checker::checker::SpeedChecker;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let checker = SpeedChecker::new();
//! let download = checker.measure_download_speed(None).await;
//! let upload = checker.measure_upload_speed(None).await;
//! println!(
//!     "{download} Mbps down, {upload} Mbps up: {}",
//!     checker.network_quality(download)
//! );
//! # }
//! ```
//!
//! The `measure_*` methods report any failure as 0.0 Mbps. Use
//! [`SpeedChecker::try_measure_download`](checker::SpeedChecker::try_measure_download)
//! and friends to tell an unreachable target apart from a slow one.

#![warn(missing_docs)]

pub mod cancel;
pub mod checker;
pub mod config;
pub mod download;
pub mod emitter;
pub mod error;
pub mod measurement;
pub mod params;
pub mod quality;
pub mod summary;
pub mod throughput;
pub mod upload;
