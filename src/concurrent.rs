//! Batched parallel map with a concurrency bound
//!
//! [`concurrent_map`] splits its input into contiguous batches of at most
//! `concurrency` items. Items within a batch run in parallel on rayon's
//! pool; batches run strictly one after another. The output keeps the input
//! order no matter which item of a batch finishes first.
//!
//! A failing item fails the whole call, but only after every item of its
//! batch has settled. Later batches are never started.

use std::num::NonZeroUsize;

use rayon::prelude::*;

/// Apply `f` to every item, at most `concurrency` at a time.
///
/// `f` receives the item and its index in `items`. The returned vector lines
/// up with `items`. When several items of the failing batch error, the error
/// of the lowest index is returned unchanged.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
/// use chain_registry::concurrent::concurrent_map;
///
/// let doubled = concurrent_map(NonZeroUsize::new(2).unwrap(), &[1, 2, 3, 4, 5], |x, _| {
///     Ok::<_, String>(x * 2)
/// })
/// .unwrap();
/// assert_eq!(doubled, vec![2, 4, 6, 8, 10]);
/// ```
pub fn concurrent_map<A, B, E, F>(concurrency: NonZeroUsize, items: &[A], f: F) -> Result<Vec<B>, E>
where
    A: Sync,
    B: Send,
    E: Send,
    F: Fn(&A, usize) -> Result<B, E> + Sync,
{
    let batch_size = concurrency.get();
    let mut output = Vec::with_capacity(items.len());

    for (batch_index, batch) in items.chunks(batch_size).enumerate() {
        let offset = batch_index * batch_size;

        // Collecting every result lets the whole batch settle before any
        // error is surfaced
        let settled: Vec<Result<B, E>> = batch
            .par_iter()
            .enumerate()
            .map(|(i, item)| f(item, offset + i))
            .collect();

        for result in settled {
            output.push(result?);
        }
    }

    Ok(output)
}
