// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Bounded worker pool that runs one instance query per job.
//!
//! Jobs are queued up front on a shared channel. Each worker pulls the next
//! job, queries it under a per-request deadline and sends any instances found
//! as one batch on the result channel. The result channel closes when the last
//! worker drops its sender, which ends collection.

use crate::config::NamespaceScope;
use crate::constants::workers::WORKERS_PER_CPU;
use crate::error::KgcrError;
use crate::kubernetes::InstanceQuery;
use crate::scan::aggregate::collect_batches;
use crate::scan::deadline::ScanDeadline;
use crate::types::{FoundResource, Job};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio::time::timeout_at;
use tracing::{debug, error, instrument};

/// Number of workers to start: `min(max_workers, jobs, cpus * 3)`, at least one
/// when there is work.
pub fn worker_count(jobs: usize, cpus: usize, max_workers: usize) -> usize {
    if jobs == 0 {
        return 0;
    }
    max_workers
        .min(jobs)
        .min(cpus.saturating_mul(WORKERS_PER_CPU))
        .max(1)
}

pub fn available_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Everything the pool observed before finishing or hitting the deadline
#[derive(Debug, Default)]
pub struct PoolOutcome {
    pub resources: Vec<FoundResource>,
    pub failed_jobs: usize,
    /// The deadline fired before every job was run
    pub truncated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerExit {
    Drained,
    Cancelled,
}

struct Worker {
    id: usize,
    queue: Arc<Mutex<mpsc::Receiver<Job>>>,
    results: mpsc::Sender<Vec<FoundResource>>,
    client: Arc<dyn InstanceQuery>,
    scope: NamespaceScope,
    deadline: ScanDeadline,
    request_timeout: Duration,
    failed: Arc<AtomicUsize>,
}

/// Run every job at most once across a bounded set of workers.
#[instrument(skip_all, fields(jobs = jobs.len(), scope = %scope))]
pub async fn run_pool(
    jobs: Vec<Job>,
    client: Arc<dyn InstanceQuery>,
    scope: &NamespaceScope,
    deadline: ScanDeadline,
    request_timeout: Duration,
    max_workers: usize,
) -> PoolOutcome {
    let total = jobs.len();
    let workers = worker_count(total, available_cpus(), max_workers);
    if workers == 0 {
        return PoolOutcome::default();
    }
    debug!("Starting {} workers for {} jobs", workers, total);

    let (job_tx, job_rx) = mpsc::channel::<Job>(total);
    let (result_tx, result_rx) = mpsc::channel::<Vec<FoundResource>>(total);
    let queue = Arc::new(Mutex::new(job_rx));
    let failed = Arc::new(AtomicUsize::new(0));

    let mut set = JoinSet::new();
    for id in 0..workers {
        let worker = Worker {
            id,
            queue: queue.clone(),
            results: result_tx.clone(),
            client: client.clone(),
            scope: scope.clone(),
            deadline,
            request_timeout,
            failed: failed.clone(),
        };
        set.spawn(worker.run());
    }
    drop(result_tx);

    let mut truncated = false;
    for job in jobs {
        tokio::select! {
            biased;
            _ = deadline.fired() => {
                debug!("Deadline fired while dispatching jobs");
                truncated = true;
                break;
            }
            sent = job_tx.send(job) => {
                if sent.is_err() {
                    truncated = true;
                    break;
                }
            }
        }
    }
    drop(job_tx);

    let resources = collect_batches(result_rx, total).await;

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(WorkerExit::Drained) => {}
            Ok(WorkerExit::Cancelled) => truncated = true,
            Err(e) => error!("Worker task failed: {}", e),
        }
    }

    PoolOutcome {
        resources,
        failed_jobs: failed.load(Ordering::Relaxed),
        truncated,
    }
}

impl Worker {
    async fn run(self) -> WorkerExit {
        // Reused between jobs, never shared with other workers
        let mut scratch: Vec<FoundResource> = Vec::new();

        loop {
            if self.deadline.expired() {
                return WorkerExit::Cancelled;
            }

            let next = tokio::select! {
                biased;
                _ = self.deadline.fired() => return WorkerExit::Cancelled,
                job = async { self.queue.lock().await.recv().await } => job,
            };
            let Some(job) = next else {
                return WorkerExit::Drained;
            };

            scratch.clear();
            let request_deadline = self.deadline.request_deadline(self.request_timeout);
            let query = self.client.list_instances(&job.coordinate, &self.scope);

            let listed = tokio::select! {
                biased;
                _ = self.deadline.fired() => return WorkerExit::Cancelled,
                listed = timeout_at(request_deadline, query) => listed
                    .unwrap_or(Err(KgcrError::RequestTimeout(self.request_timeout))),
            };

            match listed {
                Ok(instances) => {
                    scratch.extend(instances.into_iter().map(|instance| FoundResource {
                        crd_name: job.crd_name.clone(),
                        resource_name: job.coordinate.plural.clone(),
                        namespace: instance.namespace,
                        instance_name: instance.name,
                    }));
                }
                Err(e) => {
                    self.failed.fetch_add(1, Ordering::Relaxed);
                    debug!(
                        worker = self.id,
                        crd = %job.crd_name,
                        reason = e.failure_kind(),
                        "Skipping CRD: {}",
                        e
                    );
                    continue;
                }
            }

            if scratch.is_empty() {
                continue;
            }

            let batch: Vec<FoundResource> = scratch.drain(..).collect();
            tokio::select! {
                biased;
                _ = self.deadline.fired() => return WorkerExit::Cancelled,
                sent = self.results.send(batch) => {
                    if sent.is_err() {
                        return WorkerExit::Cancelled;
                    }
                }
            }
        }
    }
}
