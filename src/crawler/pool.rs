//! Fixed-size worker pool
//!
//! Workers are tokio tasks sharing one task queue and one result queue. Every job
//! taken from the task queue is acknowledged with [`TaskQueue::task_done`] once its
//! result (if any) has been pushed, which lets [`TaskQueue::join`] wait for the
//! queue to drain.

use crate::crawler::task::{CrawlResult, CrawlTask};
use crate::CrawlError;
use kanal::{AsyncReceiver, AsyncSender};
use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// A unit of work on the task queue
#[derive(Debug)]
pub enum Job {
    /// Fetch a page and report its links
    Crawl(CrawlTask),
    /// Stop the worker that receives it
    Shutdown,
}

/// Multi-consumer job queue with completion tracking
pub struct TaskQueue {
    sender: AsyncSender<Job>,
    receiver: AsyncReceiver<Job>,
    unfinished: AtomicUsize,
    all_done: Notify,
}

impl TaskQueue {
    pub fn new() -> Self {
        let (sender, receiver) = kanal::unbounded_async();
        Self {
            sender,
            receiver,
            unfinished: AtomicUsize::new(0),
            all_done: Notify::new(),
        }
    }

    /// Enqueues a job; it counts as unfinished until acknowledged
    pub async fn put(&self, job: Job) -> Result<(), CrawlError> {
        self.unfinished.fetch_add(1, Ordering::SeqCst);
        if let Err(e) = self.sender.send(job).await {
            self.task_done();
            return Err(CrawlError::WorkerPool(format!("task queue closed: {}", e)));
        }
        Ok(())
    }

    /// Waits for the next job, or `None` once the queue is closed
    pub async fn get(&self) -> Option<Job> {
        self.receiver.recv().await.ok()
    }

    /// Acknowledges one job taken with [`TaskQueue::get`]
    pub fn task_done(&self) {
        match self
            .unfinished
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        {
            Ok(1) => self.all_done.notify_waiters(),
            Ok(_) => {}
            Err(_) => tracing::error!("task_done called more times than jobs were queued"),
        }
    }

    /// Jobs queued or in progress
    pub fn unfinished(&self) -> usize {
        self.unfinished.load(Ordering::SeqCst)
    }

    /// Waits until every queued job has been acknowledged
    pub async fn join(&self) {
        loop {
            let notified = self.all_done.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.unfinished() == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// A fixed set of crawl workers
pub struct WorkerPool {
    tasks: Arc<TaskQueue>,
    results: AsyncReceiver<CrawlResult>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `size` workers (at least one) sharing `client`
    pub fn start(size: usize, client: Client) -> Self {
        let size = size.max(1);
        let tasks = Arc::new(TaskQueue::new());
        let (result_tx, results) = kanal::unbounded_async();

        let workers = (0..size)
            .map(|id| {
                tokio::spawn(run_worker(
                    id,
                    Arc::clone(&tasks),
                    result_tx.clone(),
                    client.clone(),
                ))
            })
            .collect();

        tracing::debug!("Started {} workers", size);

        Self {
            tasks,
            results,
            workers,
        }
    }

    /// Number of workers in the pool
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Queues a page for crawling
    pub async fn submit(&self, task: CrawlTask) -> Result<(), CrawlError> {
        self.tasks.put(Job::Crawl(task)).await
    }

    /// Waits for the next finished page
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlResult)` - Links from one fetched page
    /// * `Err(CrawlError::WorkerPool)` - Every worker has exited
    pub async fn next_result(&self) -> Result<CrawlResult, CrawlError> {
        self.results
            .recv()
            .await
            .map_err(|e| CrawlError::WorkerPool(format!("result queue closed: {}", e)))
    }

    /// Sends one shutdown sentinel per worker and waits for all of them to exit
    pub async fn shutdown(self) -> Result<(), CrawlError> {
        for _ in 0..self.workers.len() {
            self.tasks.put(Job::Shutdown).await?;
        }

        self.tasks.join().await;

        for handle in self.workers {
            if let Err(e) = handle.await {
                tracing::error!("Worker exited abnormally: {}", e);
            }
        }

        tracing::debug!("All workers stopped");
        Ok(())
    }
}

async fn run_worker(
    id: usize,
    tasks: Arc<TaskQueue>,
    results: AsyncSender<CrawlResult>,
    client: Client,
) {
    tracing::trace!("Worker {} started", id);

    while let Some(job) = tasks.get().await {
        match job {
            Job::Shutdown => {
                tasks.task_done();
                break;
            }
            Job::Crawl(task) => {
                tracing::debug!("Worker {} crawling {}", id, task.url());
                let result = task.execute(&client).await;
                if results.send(result).await.is_err() {
                    tracing::warn!("Worker {}: result queue closed, dropping result", id);
                }
                tasks.task_done();
            }
        }
    }

    tracing::trace!("Worker {} stopped", id);
}
