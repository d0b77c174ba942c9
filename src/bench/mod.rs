/*!
 * Benchmark Driver
 * Harness, reporting, and the full seven-primitive suite
 */

mod harness;
mod reporter;

pub use harness::{Harness, RunReport};
pub use reporter::{ReportFormat, Reporter};

use crate::core::config::BenchConfig;
use crate::core::errors::BenchResult;
use crate::core::sync::{self, PrimitiveKind};
use std::io::Write;

/// Run every primitive with `config`, reporting as each finishes
pub fn run_suite<W: Write + Send>(
    config: &BenchConfig,
    reporter: &Reporter<W>,
) -> BenchResult<Vec<RunReport>> {
    let harness = Harness::from_config(config);

    PrimitiveKind::ALL
        .iter()
        .map(|&kind| -> BenchResult<RunReport> {
            let primitive = sync::build(kind, config)?;
            reporter.announce(kind)?;
            let report = harness.run(primitive.as_ref(), config.trials)?;
            reporter.emit(&report)?;
            Ok(report)
        })
        .collect()
}
