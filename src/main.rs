// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use kgcr::cli::Args;
use kgcr::kubernetes::{connect, KubeCatalog, KubeInstances};
use kgcr::output::{render, NO_NAMESPACED_CRDS};
use kgcr::scan::{run_scan, ScanOutcome};

/// Exit status when the deadline cut the scan short
const EXIT_INCOMPLETE: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr so stdout only carries the table
    let default_level = if args.verbose { "kgcr=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let connection = connect(&args.cluster_options())
        .await
        .context("Error loading kubeconfig")?;

    let config = args.scan_config(connection.context_namespace.as_deref());
    info!("Scanning namespace: {}", config.scope);
    debug!(
        "Timeout {:?}, per-request timeout {:?}",
        config.timeout, config.request_timeout
    );

    let catalog = KubeCatalog::new(connection.client.clone());
    let instances = Arc::new(KubeInstances::new(connection.client));

    let outcome = run_scan(&catalog, instances, &config).await?;

    let mut stdout = std::io::stdout().lock();
    let report = match outcome {
        ScanOutcome::NoNamespacedCrds => {
            writeln!(stdout, "{}", NO_NAMESPACED_CRDS)?;
            return Ok(ExitCode::SUCCESS);
        }
        ScanOutcome::Completed(report) => report,
    };
    debug!(
        "Scanned {} CRDs, {} skipped after errors, {} resources found",
        report.crds_scanned,
        report.failed_jobs,
        report.resources.len()
    );

    writeln!(stdout, "{}", render(&report.resources, &config.scope))?;
    stdout.flush()?;

    if report.timed_out {
        eprintln!(
            "Warning: scan did not finish within {:?}; results are incomplete",
            config.timeout
        );
        return Ok(ExitCode::from(EXIT_INCOMPLETE));
    }

    Ok(ExitCode::SUCCESS)
}
