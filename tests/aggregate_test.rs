/*!
 * Aggregation Demo Tests
 *
 * Sequential and parallel analyses agree, and partitioning covers the input
 */

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sync_bench::aggregate::{
    analyze, average_age, generate_workers, map_reduce, partition, sample_workers, Mode,
};

#[test]
fn test_sample_roster_analysis() {
    let workers = sample_workers();

    // Chunks: [0], [1], [2, 3, 4] -> chunk means 30, 32, 28 -> 30
    let seq = analyze(&workers, "D", Mode::Sequential);
    assert_eq!(seq.average_age, 30.0);
    assert_eq!(seq.max_salary, 60_000.0);

    let par = analyze(&workers, "D", Mode::Parallel);
    assert_eq!(par.average_age, seq.average_age);
    assert_eq!(par.max_salary, seq.max_salary);
    assert_eq!(par.mode, Mode::Parallel);
}

#[test]
fn test_empty_chunks_excluded_from_mean() {
    let workers = sample_workers();

    // "S" holders only live in the last chunk
    let analysis = analyze(&workers, "S", Mode::Sequential);
    assert_eq!(analysis.average_age, 41.0);
    assert_eq!(analysis.max_salary, 75_000.0);
}

#[test]
fn test_unknown_position() {
    let analysis = analyze(&sample_workers(), "X", Mode::Parallel);
    assert_eq!(analysis.average_age, 0.0);
    assert_eq!(analysis.max_salary, 0.0);
}

#[test]
fn test_generated_workers_modes_agree() {
    let mut rng = StdRng::seed_from_u64(2024);
    let workers = generate_workers(30_000, &mut rng);

    let seq = analyze(&workers, "D", Mode::Sequential);
    let par = analyze(&workers, "D", Mode::Parallel);

    assert_eq!(par.average_age, seq.average_age);
    assert_eq!(par.max_salary, seq.max_salary);
    assert!(seq.average_age >= 20.0 && seq.average_age <= 60.0);

    // Mean of chunk means stays close to the population mean on uniform data
    let population = average_age(&workers, "D");
    assert!((seq.average_age - population).abs() < 1.0);
}

proptest! {
    #[test]
    fn prop_partition_covers_input(items in proptest::collection::vec(any::<u16>(), 0..200), parts in 1usize..8) {
        let chunks = partition(&items, parts);
        prop_assert_eq!(chunks.len(), parts);

        let joined: Vec<u16> = chunks.concat();
        prop_assert_eq!(joined, items.clone());

        let base = items.len() / parts;
        for chunk in &chunks[..parts - 1] {
            prop_assert_eq!(chunk.len(), base);
        }
    }

    #[test]
    fn prop_parallel_sum_matches(items in proptest::collection::vec(0u32..1000, 0..500)) {
        let sum = |chunk: &[u32]| chunk.iter().map(|&x| x as u64).sum::<u64>();
        let seq = map_reduce(&items, 3, false, sum, 0u64, |a, b| a + b);
        let par = map_reduce(&items, 3, true, sum, 0u64, |a, b| a + b);
        prop_assert_eq!(seq, par);
    }
}
