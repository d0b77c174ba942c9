/*!
 * Sync Bench Library
 * Concurrency primitive benchmarks and a partition/map/reduce demo
 */

pub mod aggregate;
pub mod bench;
pub mod core;
pub mod monitoring;

// Re-exports
pub use bench::{run_suite, Harness, ReportFormat, Reporter, RunReport};
pub use crate::core::errors::*;
pub use crate::core::sync::{Primitive, PrimitiveKind};
pub use crate::core::BenchConfig;
pub use monitoring::init_tracing;
