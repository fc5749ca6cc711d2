//! Output formatting for speed check events.
//!
//! The [`Emitter`] trait defines callbacks for each stage of a run.
//! Two implementations are provided:
//! - [`HumanReadableEmitter`] — status lines and a results block on a terminal.
//! - [`JsonEmitter`] — one JSON object per line, suitable for machine consumption.

use std::io::{self, Write};

use serde::Serialize;

use crate::measurement::{Measurement, TestKind};
use crate::summary::Report;

#[derive(Serialize)]
#[serde(tag = "type")]
enum Event<'a> {
    Starting { test: TestKind },
    Error { test: TestKind, error: &'a str },
    Measurement { measurement: &'a Measurement },
    Report { report: &'a Report },
}

/// Callbacks for speed check lifecycle events.
pub trait Emitter {
    /// Called when a probe is about to begin.
    fn on_starting(&mut self, test: TestKind) -> io::Result<()>;
    /// Called when a probe fails.
    fn on_error(&mut self, test: TestKind, err: &str) -> io::Result<()>;
    /// Called when a probe completes.
    fn on_measurement(&mut self, m: &Measurement) -> io::Result<()>;
    /// Called after both probes, with the final report.
    fn on_report(&mut self, r: &Report) -> io::Result<()>;
}

/// Emits human-readable progress and results to a writer.
pub struct HumanReadableEmitter<W: Write> {
    out: W,
}

impl<W: Write> HumanReadableEmitter<W> {
    /// Create a new emitter writing to `out`.
    pub fn new(out: W) -> Self {
        HumanReadableEmitter { out }
    }
}

fn noun(test: TestKind) -> &'static str {
    match test {
        TestKind::Download => "download",
        TestKind::Upload => "upload",
    }
}

impl<W: Write> Emitter for HumanReadableEmitter<W> {
    fn on_starting(&mut self, test: TestKind) -> io::Result<()> {
        writeln!(self.out, "Measuring {} speed...", noun(test))?;
        self.out.flush()
    }

    fn on_error(&mut self, test: TestKind, err: &str) -> io::Result<()> {
        writeln!(self.out, "{} test failed: {err}", noun(test))
    }

    fn on_measurement(&mut self, m: &Measurement) -> io::Result<()> {
        let note = if m.truncated { " (time limit reached)" } else { "" };
        writeln!(
            self.out,
            "{} bytes in {:.2} s{note}",
            m.bytes,
            m.elapsed.as_secs_f64()
        )
    }

    fn on_report(&mut self, r: &Report) -> io::Result<()> {
        writeln!(self.out, "\nTest completed\n")?;
        writeln!(self.out, "{:>16}: {:>8.2} Mbps", "Download Speed", r.download.mbps())?;
        writeln!(self.out, "{:>16}: {:>8.2} Mbps", "Upload Speed", r.upload.mbps())?;
        writeln!(self.out, "{:>16}: {}", "Network Quality", r.quality)?;
        self.out.flush()
    }
}

/// Emits one JSON object per line for each event.
pub struct JsonEmitter<W: Write> {
    out: W,
}

impl<W: Write> JsonEmitter<W> {
    /// Create a new JSON emitter writing to `out`.
    pub fn new(out: W) -> Self {
        JsonEmitter { out }
    }

    fn emit(&mut self, event: &Event) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        writeln!(self.out)
    }
}

impl<W: Write> Emitter for JsonEmitter<W> {
    fn on_starting(&mut self, test: TestKind) -> io::Result<()> {
        self.emit(&Event::Starting { test })
    }

    fn on_error(&mut self, test: TestKind, err: &str) -> io::Result<()> {
        self.emit(&Event::Error { test, error: err })
    }

    fn on_measurement(&mut self, m: &Measurement) -> io::Result<()> {
        self.emit(&Event::Measurement { measurement: m })
    }

    fn on_report(&mut self, r: &Report) -> io::Result<()> {
        self.emit(&Event::Report { report: r })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::error::ProbeError;
    use crate::summary::Outcome;

    use super::*;

    fn sample_report() -> Report {
        Report::new(
            Outcome::Measured(Measurement::new(
                TestKind::Download,
                3_000_000,
                Duration::from_secs(2),
                false,
            )),
            Outcome::from(Err::<Measurement, _>(ProbeError::Cancelled)),
        )
    }

    #[test]
    fn human_readable_report() {
        let mut buf = Vec::new();
        let mut emitter = HumanReadableEmitter::new(&mut buf);

        emitter.on_report(&sample_report()).unwrap();

        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Test completed"));
        assert!(out.contains("12.00 Mbps"));
        assert!(out.contains("0.00 Mbps"));
        assert!(out.contains("Network Quality: Very Good"));
    }

    #[test]
    fn human_readable_truncated_note() {
        let mut buf = Vec::new();
        let mut emitter = HumanReadableEmitter::new(&mut buf);
        let m = Measurement::new(TestKind::Download, 8192, Duration::from_secs(10), true);

        emitter.on_measurement(&m).unwrap();

        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("8192 bytes"));
        assert!(out.contains("time limit reached"));
    }

    #[test]
    fn json_emitter_valid() {
        let mut buf = Vec::new();
        let mut emitter = JsonEmitter::new(&mut buf);

        emitter.on_starting(TestKind::Upload).unwrap();
        emitter.on_report(&sample_report()).unwrap();

        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "Starting");
        assert_eq!(lines[0]["test"], "upload");
        assert_eq!(lines[1]["type"], "Report");
        assert_eq!(lines[1]["report"]["quality"], "Very Good");
    }
}
