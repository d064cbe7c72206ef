//! Ordered bounded executor
//!
//! Runs an async operation over a list of items with at most `concurrency`
//! in flight and returns the results in input order. With a deadline, items
//! not yet started when it passes are reported as not started instead of
//! being run.

use futures::stream::{self, StreamExt};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum operations in flight
    pub concurrency: usize,
    /// Time after which no new item is started
    pub deadline: Option<Duration>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            deadline: None,
        }
    }
}

impl ExecutorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set concurrency limit
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }
}

/// Result for one input item
#[derive(Debug, Clone)]
pub struct ExecutedItem<R> {
    /// Position of the item in the input
    pub index: usize,
    /// `None` when the deadline passed before the item was started
    pub result: Option<R>,
    pub duration: Duration,
}

pub struct OrderedExecutor {
    config: ExecutorConfig,
}

impl OrderedExecutor {
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Run `operation` for every item; output order equals input order
    pub async fn execute<T, R, F, Fut>(
        &self,
        items: impl IntoIterator<Item = T>,
        operation: F,
    ) -> Vec<ExecutedItem<R>>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = R>,
    {
        let cutoff = self.config.deadline.map(|d| Instant::now() + d);
        let operation = &operation;

        let mut results: Vec<ExecutedItem<R>> = stream::iter(items.into_iter().enumerate())
            .map(|(index, item)| async move {
                // Evaluated when the stream admits the item, not when it is queued
                if cutoff.is_some_and(|cutoff| Instant::now() >= cutoff) {
                    return ExecutedItem {
                        index,
                        result: None,
                        duration: Duration::ZERO,
                    };
                }

                let start = Instant::now();
                let value = operation(item).await;
                ExecutedItem {
                    index,
                    result: Some(value),
                    duration: start.elapsed(),
                }
            })
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;

        results.sort_by_key(|item| item.index);
        results
    }
}
