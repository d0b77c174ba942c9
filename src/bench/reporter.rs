/*!
 * Benchmark Reporter
 *
 * Prints each primitive's name once, followed by its aggregate timing.
 *
 * # Design: Caller-Owned Announcement Set
 *
 * Benchmark drivers (criterion in particular) invoke the same benchmark body
 * many times. Instead of process-wide "already printed" flags, the reporter
 * owns the set of announced primitives and the driver passes the reporter in.
 */

use super::harness::RunReport;
use crate::core::errors::ReportResult;
use crate::core::sync::PrimitiveKind;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::io::{self, Stdout, Write};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Header line plus one indented summary line
    #[default]
    Text,
    /// One JSON object per line; headers are tracked but not written
    Json,
}

impl ReportFormat {
    /// `BENCH_REPORT_JSON=1|true` selects JSON
    pub fn from_env() -> Self {
        let use_json = std::env::var("BENCH_REPORT_JSON")
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false);
        if use_json {
            ReportFormat::Json
        } else {
            ReportFormat::Text
        }
    }
}

/// Serialized reporter over any writer
pub struct Reporter<W: Write + Send> {
    format: ReportFormat,
    announced: Mutex<HashSet<PrimitiveKind>>,
    out: Mutex<W>,
}

impl Reporter<Stdout> {
    pub fn stdout(format: ReportFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write + Send> Reporter<W> {
    pub fn new(out: W, format: ReportFormat) -> Self {
        Self {
            format,
            announced: Mutex::new(HashSet::new()),
            out: Mutex::new(out),
        }
    }

    /// Print the header for `kind` unless it was already printed
    ///
    /// Returns `true` the first time only.
    pub fn announce(&self, kind: PrimitiveKind) -> ReportResult<bool> {
        if !self.announced.lock().insert(kind) {
            return Ok(false);
        }

        if self.format == ReportFormat::Text {
            let mut out = self.out.lock();
            writeln!(out, "{}:", kind.name())?;
            out.flush()?;
        }
        Ok(true)
    }

    /// Announce (if needed) and write the aggregate timing
    pub fn emit(&self, report: &RunReport) -> ReportResult<()> {
        self.announce(report.primitive)?;

        let mut out = self.out.lock();
        match self.format {
            ReportFormat::Text => writeln!(
                out,
                "  {} actors x {} trials: total {:?}, {:.2}µs/trial",
                report.actors,
                report.trials,
                report.total(),
                report.mean_trial_us
            )?,
            ReportFormat::Json => {
                serde_json::to_writer(&mut *out, report)?;
                writeln!(out)?;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Recover the writer (tests inspect captured output)
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn report(kind: PrimitiveKind) -> RunReport {
        RunReport {
            primitive: kind,
            actors: 10,
            trials: 4,
            total_us: 2_000,
            mean_trial_us: 500.0,
        }
    }

    #[test]
    fn test_header_printed_once() {
        let reporter = Reporter::new(Vec::new(), ReportFormat::Text);

        assert!(reporter.announce(PrimitiveKind::Mutex).unwrap());
        assert!(!reporter.announce(PrimitiveKind::Mutex).unwrap());
        reporter.emit(&report(PrimitiveKind::Mutex)).unwrap();
        reporter.emit(&report(PrimitiveKind::Mutex)).unwrap();

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(text.matches("Mutex:").count(), 1);
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec![
                "Mutex:",
                "  10 actors x 4 trials: total 2ms, 500.00µs/trial",
                "  10 actors x 4 trials: total 2ms, 500.00µs/trial",
            ]
        );
    }

    #[test]
    fn test_emit_announces_unseen_kind() {
        let reporter = Reporter::new(Vec::new(), ReportFormat::Text);
        reporter.emit(&report(PrimitiveKind::Barrier)).unwrap();
        assert!(!reporter.announce(PrimitiveKind::Barrier).unwrap());
        assert!(reporter.announce(PrimitiveKind::Monitor).unwrap());

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.starts_with("Barrier:\n"));
        assert!(text.ends_with("Monitor:\n"));
    }

    #[test]
    fn test_json_lines() {
        let reporter = Reporter::new(Vec::new(), ReportFormat::Json);
        reporter.emit(&report(PrimitiveKind::SpinLock)).unwrap();

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        let parsed: RunReport = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(parsed, report(PrimitiveKind::SpinLock));
        assert!(text.contains("\"primitive\":\"spin_lock\""));
    }
}
