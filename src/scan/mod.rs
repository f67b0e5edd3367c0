// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The discovery pipeline: list CRDs, filter them, fan instance queries out
//! over a worker pool, then collect and sort what came back.

pub mod aggregate;
pub mod deadline;
pub mod filter;
pub mod pool;
pub mod sort;

use crate::config::ScanConfig;
use crate::error::{KgcrError, Result};
use crate::kubernetes::{CrdCatalog, InstanceQuery};
use crate::types::FoundResource;
use deadline::ScanDeadline;
use std::sync::Arc;
use tokio::time::timeout_at;
use tracing::{info, instrument, warn};

/// Result of a scan that got past the CRD listing
#[derive(Debug)]
pub enum ScanOutcome {
    /// No CRD was namespace-scoped with a usable version; nothing was queried
    NoNamespacedCrds,
    Completed(ScanReport),
}

#[derive(Debug, Default)]
pub struct ScanReport {
    /// Sorted by CRD name, resource name, namespace and instance name
    pub resources: Vec<FoundResource>,
    pub crds_scanned: usize,
    /// Instance queries that failed and contributed nothing
    pub failed_jobs: usize,
    /// The overall deadline fired before every instance query finished
    pub timed_out: bool,
}

/// Run one scan against the given collaborators.
///
/// Failing or timing out while listing CRDs is an error. Once instance queries
/// have started, the deadline only truncates the report.
#[instrument(skip_all, fields(scope = %config.scope))]
pub async fn run_scan(
    catalog: &dyn CrdCatalog,
    instances: Arc<dyn InstanceQuery>,
    config: &ScanConfig,
) -> Result<ScanOutcome> {
    let deadline = ScanDeadline::after(config.timeout);

    let crds = timeout_at(deadline.instant(), catalog.list_crds())
        .await
        .map_err(|_| KgcrError::CatalogTimeout(config.timeout))??;
    info!("Found {} CRDs in the cluster", crds.len());

    let jobs = filter::build_jobs(&crds);
    if jobs.is_empty() {
        info!("No namespaced CRDs to scan");
        return Ok(ScanOutcome::NoNamespacedCrds);
    }

    let crds_scanned = jobs.len();
    let outcome = pool::run_pool(
        jobs,
        instances,
        &config.scope,
        deadline,
        config.request_timeout,
        config.max_workers,
    )
    .await;

    if outcome.failed_jobs > 0 {
        info!(
            "{} of {} CRDs could not be queried and were skipped",
            outcome.failed_jobs, crds_scanned
        );
    }
    if outcome.truncated {
        warn!(
            "Scan deadline of {:?} exceeded, results are incomplete",
            config.timeout
        );
    }

    let mut resources = outcome.resources;
    sort::sort_resources(&mut resources);

    Ok(ScanOutcome::Completed(ScanReport {
        resources,
        crds_scanned,
        failed_jobs: outcome.failed_jobs,
        timed_out: outcome.truncated,
    }))
}
