/*!
 * Aggregation Demo
 *
 * Sequential vs parallel statistics over a worker list, built on a generic
 * partition/map/reduce utility. Independent of the primitive benchmarks.
 */

mod partition;
mod workers;

pub use partition::{map_parallel, map_reduce, map_sequential, partition};
pub use workers::{
    analyze, average_age, generate_workers, max_salary_near_age, sample_workers, Analysis, Mode,
    Worker, POSITIONS,
};
