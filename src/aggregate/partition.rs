/*!
 * Partition / Map / Reduce
 *
 * Split a slice into a fixed number of chunks, map each chunk (sequentially
 * or on one scoped thread per chunk), then fold the per-chunk results.
 */

use std::thread;

/// Split `items` into `parts` chunks of `len / parts` items
///
/// The last chunk absorbs the remainder, so when `len < parts` every chunk
/// but the last is empty. `parts == 0` yields no chunks.
pub fn partition<T>(items: &[T], parts: usize) -> Vec<&[T]> {
    if parts == 0 {
        return Vec::new();
    }

    let chunk = items.len() / parts;
    (0..parts)
        .map(|i| {
            let start = i * chunk;
            let end = if i == parts - 1 { items.len() } else { start + chunk };
            &items[start..end]
        })
        .collect()
}

/// Map every chunk on the calling thread, in order
pub fn map_sequential<T, R, M>(chunks: &[&[T]], map: M) -> Vec<R>
where
    M: Fn(&[T]) -> R,
{
    chunks.iter().map(|&chunk| map(chunk)).collect()
}

/// Map every chunk on its own scoped thread; results keep chunk order
pub fn map_parallel<T, R, M>(chunks: &[&[T]], map: M) -> Vec<R>
where
    T: Sync,
    R: Send,
    M: Fn(&[T]) -> R + Sync,
{
    let map = &map;
    thread::scope(|s| {
        let handles: Vec<_> = chunks
            .iter()
            .map(|&chunk| s.spawn(move || map(chunk)))
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(payload) => std::panic::resume_unwind(payload),
            })
            .collect()
    })
}

/// Partition, map, then fold in chunk order
pub fn map_reduce<T, R, A, M, F>(
    items: &[T],
    parts: usize,
    parallel: bool,
    map: M,
    init: A,
    fold: F,
) -> A
where
    T: Sync,
    R: Send,
    M: Fn(&[T]) -> R + Sync,
    F: FnMut(A, R) -> A,
{
    let chunks = partition(items, parts);
    let mapped = if parallel {
        map_parallel(&chunks, map)
    } else {
        map_sequential(&chunks, map)
    };
    mapped.into_iter().fold(init, fold)
}
