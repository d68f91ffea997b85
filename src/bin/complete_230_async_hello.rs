//! A single coroutine: print, suspend, resume, print.
//!
//! Run with: cargo run --bin complete_230_async_hello

use std::time::Duration;
use tokio::time::sleep;

const GREETING_DELAY: Duration = Duration::from_secs(1);

async fn hello(delay: Duration) {
    println!("Hello!");
    // Suspends this task; the thread is free to run others meanwhile.
    sleep(delay).await;
    println!("Hello again!");
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    hello(GREETING_DELAY).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_hello_resumes_after_delay() {
        let start = Instant::now();
        hello(GREETING_DELAY).await;
        assert!(start.elapsed() >= GREETING_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hello_does_not_block_other_tasks() {
        let start = Instant::now();
        let other = tokio::spawn(async move { Instant::now() - start });

        hello(GREETING_DELAY).await;

        let other_ran_after = other.await.unwrap();
        assert!(other_ran_after < GREETING_DELAY);
    }
}
