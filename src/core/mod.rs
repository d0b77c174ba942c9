/*!
 * Core Module
 * Synchronization primitives, configuration and error handling
 */

pub mod config;
pub mod errors;
pub mod limits;
pub mod sync;

// Re-export for convenience
pub use config::BenchConfig;
pub use errors::*;
