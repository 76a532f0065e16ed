// src/dispatch.rs

use crate::error::SzzError;
use indicatif::ProgressBar;
use std::any::Any;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

/// Workers for a dispatch: the request, if any, capped by the host's cores.
pub fn worker_count(requested: Option<usize>) -> usize {
    let available = thread::available_parallelism().map_or(1, |n| n.get());
    requested.map_or(available, |n| n.clamp(1, available))
}

/// Splits `0..len` into `workers` contiguous ranges of `len / workers`
/// items each, the remainder going to the last range.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let split = len / workers;
    (0..workers)
        .map(|i| {
            let start = i * split;
            let end = if i + 1 == workers { len } else { start + split };
            start..end
        })
        .collect()
}

fn split_slices<'a, T>(mut items: &'a mut [T], ranges: &[Range<usize>]) -> Vec<&'a mut [T]> {
    let mut slices = Vec::with_capacity(ranges.len());
    for range in ranges {
        let (head, tail) = std::mem::take(&mut items).split_at_mut(range.len());
        slices.push(head);
        items = tail;
    }
    slices
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

/// Runs `work` over every item, one worker per contiguous slice.
///
/// A fresh pool is built for each call and joined before returning. Each
/// worker only touches its own slice. A worker that panics abandons the rest
/// of its slice; the panic is logged and siblings carry on, so the items
/// may come back partially processed.
pub fn dispatch<T, F>(items: &mut [T], workers: usize, label: &str, work: F) -> Result<(), SzzError>
where
    T: Send,
    F: Fn(&mut T) + Sync,
{
    if items.is_empty() {
        return Ok(());
    }
    let ranges = partition(items.len(), workers);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(ranges.len())
        .thread_name(|i| format!("szz-worker-{i}"))
        .build()?;

    let bar = ProgressBar::new(items.len() as u64);
    bar.set_message(label.to_string());
    tracing::debug!(items = items.len(), workers = ranges.len(), label, "dispatching");

    let slices = split_slices(items, &ranges);
    let work = &work;
    let bar_ref = &bar;
    pool.scope(|scope| {
        for (worker, slice) in slices.into_iter().enumerate() {
            scope.spawn(move |_| {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    for item in slice.iter_mut() {
                        work(item);
                        bar_ref.inc(1);
                    }
                }));
                if let Err(payload) = outcome {
                    tracing::error!(worker, label, "worker failed: {}", panic_message(&*payload));
                }
            });
        }
    });

    bar.finish_with_message(format!("{label} complete"));
    Ok(())
}
