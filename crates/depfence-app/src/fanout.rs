//! Per-unit fan-out with a join barrier.
//!
//! Every item becomes one task. Results go through a channel sized to the task count, so no
//! producer ever blocks, and are drained once all tasks have joined. Output order follows input
//! order regardless of completion order.

use anyhow::Context;
use rayon::ThreadPoolBuilder;
use std::sync::mpsc::{SyncSender, sync_channel};

/// Slots used by bounded fan-out when the caller does not choose.
pub const DEFAULT_CONCURRENCY: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fanout {
    /// One task per item, all spawned at once on rayon's global pool. No bound is imposed
    /// here; how many run at the same time is up to the global pool's thread count.
    Unbounded,
    /// At most `n` tasks in flight, protecting a slow graph adapter.
    Bounded(usize),
}

pub fn fan_out<T, R, F>(items: &[T], mode: Fanout, op: F) -> anyhow::Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    let (tx, rx) = sync_channel(items.len().max(1));

    match mode {
        Fanout::Unbounded => rayon::scope(|s| spawn_all(s, items, &op, &tx)),
        Fanout::Bounded(slots) => {
            let pool = ThreadPoolBuilder::new()
                .num_threads(slots.max(1))
                .thread_name(|i| format!("depfence-fanout-{i}"))
                .build()
                .context("build bounded worker pool")?;
            pool.scope(|s| spawn_all(s, items, &op, &tx));
        }
    }
    drop(tx);

    let mut results: Vec<(usize, R)> = rx.into_iter().collect();
    results.sort_by_key(|(idx, _)| *idx);
    Ok(results.into_iter().map(|(_, r)| r).collect())
}

fn spawn_all<'scope, T, R, F>(
    s: &rayon::Scope<'scope>,
    items: &'scope [T],
    op: &'scope F,
    tx: &SyncSender<(usize, R)>,
) where
    T: Sync,
    R: Send + 'scope,
    F: Fn(&T) -> R + Sync,
{
    for (idx, item) in items.iter().enumerate() {
        let tx = tx.clone();
        s.spawn(move |_| {
            // The receiver outlives the scope, so sending cannot fail.
            let _ = tx.send((idx, op(item)));
        });
    }
}
