//! Bounded fan-out / fan-in over a list of fetch targets.
//!
//! A fixed pool of workers pulls targets from a shared cursor, performs one GET per
//! target and sends the outcome over a single channel. The channel closes once every
//! worker has dropped its sender, which is how the merge loop learns that all work is
//! done. Every target yields exactly one [`FetchOutcome`], in completion order. A fetch
//! that panics is reported for its own target and the worker moves on to the next one.

use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::transport::{get_within, Transport};
use crate::uri::FetchTarget;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Result of fetching one target, before decoding.
#[derive(Debug)]
pub struct FetchOutcome {
    pub target: FetchTarget,
    pub result: Result<Vec<u8>, FetchError>,
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct Collector<T> {
    transport: Arc<T>,
    concurrency: usize,
    request_timeout: Duration,
    batch_deadline: Option<Duration>,
}

impl<T> Clone for Collector<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            concurrency: self.concurrency,
            request_timeout: self.request_timeout,
            batch_deadline: self.batch_deadline,
        }
    }
}

impl<T: Transport> Collector<T> {
    pub fn new(transport: Arc<T>, config: &ClientConfig) -> Self {
        Self {
            transport,
            concurrency: config.concurrency.max(1),
            request_timeout: config.request_timeout,
            batch_deadline: config.batch_deadline,
        }
    }

    /// Fetch every target and return one outcome per target.
    ///
    /// Individual failures never abort the batch. If the batch deadline expires, targets
    /// that have not reported yet are returned as [`FetchError::DeadlineExceeded`].
    pub async fn collect(&self, targets: Vec<FetchTarget>) -> Vec<FetchOutcome> {
        let total = targets.len();
        if total == 0 {
            return Vec::new();
        }

        let targets: Arc<[FetchTarget]> = targets.into();
        let cursor = Arc::new(AtomicUsize::new(0));
        // Room for every outcome, so a worker never waits on the merge loop.
        let (tx, mut rx) = mpsc::channel::<(usize, FetchOutcome)>(total);

        let mut workers = JoinSet::new();
        for _ in 0..self.concurrency.min(total) {
            let transport = Arc::clone(&self.transport);
            let targets = Arc::clone(&targets);
            let cursor = Arc::clone(&cursor);
            let tx = tx.clone();
            let limit = self.request_timeout;

            workers.spawn(async move {
                loop {
                    let index = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(target) = targets.get(index) else {
                        break;
                    };
                    let fetch = get_within(transport.as_ref(), target.uri(), limit);
                    let result = match AssertUnwindSafe(fetch).catch_unwind().await {
                        Ok(result) => result,
                        Err(_) => {
                            warn!("fetch of {} panicked", target.uri());
                            Err(FetchError::Abandoned {
                                uri: target.uri().to_string(),
                            })
                        }
                    };
                    let outcome = FetchOutcome {
                        target: target.clone(),
                        result,
                    };
                    if tx.send((index, outcome)).await.is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        let mut reported = vec![false; total];
        let mut outcomes = Vec::with_capacity(total);

        let merge = async {
            while let Some((index, outcome)) = rx.recv().await {
                log_outcome(&outcome);
                reported[index] = true;
                outcomes.push(outcome);
            }
        };

        let expired = match self.batch_deadline {
            Some(deadline) => tokio::time::timeout(deadline, merge).await.is_err(),
            None => {
                merge.await;
                false
            }
        };

        if expired {
            workers.abort_all();
            // Keep whatever finished between the deadline and the abort.
            rx.close();
            while let Ok((index, outcome)) = rx.try_recv() {
                log_outcome(&outcome);
                reported[index] = true;
                outcomes.push(outcome);
            }
            warn!(
                "batch deadline expired with {} of {} targets outstanding",
                total - outcomes.len(),
                total
            );
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                if e.is_panic() {
                    warn!("fetch worker panicked: {e}");
                }
            }
        }

        for (index, target) in targets.iter().enumerate() {
            if reported[index] {
                continue;
            }
            let uri = target.uri().to_string();
            let error = if expired {
                FetchError::DeadlineExceeded { uri }
            } else {
                FetchError::Abandoned { uri }
            };
            outcomes.push(FetchOutcome {
                target: target.clone(),
                result: Err(error),
            });
        }

        debug_assert_eq!(outcomes.len(), total);
        outcomes
    }
}

fn log_outcome(outcome: &FetchOutcome) {
    match &outcome.result {
        Ok(body) => debug!(
            "fetched {} ({} bytes)",
            outcome.target.uri(),
            body.len()
        ),
        Err(e) => debug!("fetch of {} failed: {e}", outcome.target.uri()),
    }
}
