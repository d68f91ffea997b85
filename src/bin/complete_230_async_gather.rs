//! Two coroutines run concurrently on one thread and are joined in
//! submission order.
//!
//! Run with: cargo run --bin complete_230_async_gather

use futures::stream::{FuturesUnordered, StreamExt};
use std::convert::Infallible;
use std::future::Future;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinError;
use tokio::time::sleep;

const GREETING_DELAY: Duration = Duration::from_secs(1);

// =============================================================================
// Milestone 1: Join primitive
// =============================================================================

#[derive(Error, Debug)]
pub enum GatherError<E> {
    #[error("task {index} failed: {error}")]
    Failed { index: usize, error: E },

    #[error("task {index} panicked: {error}")]
    Panicked { index: usize, error: JoinError },
}

/// Runs every operation as its own task and waits for all of them.
///
/// Results come back in submission order. The first failure to complete is
/// returned as soon as it happens; tasks still running at that point are
/// detached and finish on their own, unobserved.
pub async fn try_gather<I, F, T, E>(operations: I) -> Result<Vec<T>, GatherError<E>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    let mut pending: FuturesUnordered<_> = operations
        .into_iter()
        .enumerate()
        .map(|(index, operation)| {
            let handle = tokio::spawn(operation);
            async move { (index, handle.await) }
        })
        .collect();

    let mut results: Vec<Option<T>> = (0..pending.len()).map(|_| None).collect();

    while let Some((index, outcome)) = pending.next().await {
        match outcome {
            Ok(Ok(value)) => results[index] = Some(value),
            Ok(Err(error)) => return Err(GatherError::Failed { index, error }),
            Err(error) => return Err(GatherError::Panicked { index, error }),
        }
    }

    Ok(results.into_iter().flatten().collect())
}

/// [`try_gather`] for operations that cannot fail.
pub async fn gather<I, F, T>(operations: I) -> Result<Vec<T>, GatherError<Infallible>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    try_gather(
        operations
            .into_iter()
            .map(|operation| async move { Ok::<T, Infallible>(operation.await) }),
    )
    .await
}

// =============================================================================
// Milestone 2: The lesson itself
// =============================================================================

fn current_thread() -> String {
    let current = thread::current();
    format!("{} {:?}", current.name().unwrap_or("unnamed"), current.id())
}

async fn hello(name: String, delay: Duration) -> String {
    println!("Hello {}! ({})", name, current_thread());
    sleep(delay).await;
    println!("Hello {} again! ({})", name, current_thread());
    name
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), GatherError<Infallible>> {
    let names = gather([
        hello("Bob".to_string(), GREETING_DELAY),
        hello("Alice".to_string(), GREETING_DELAY),
    ])
    .await?;
    println!("{:?}", names);
    Ok(())
}
