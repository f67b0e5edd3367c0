// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Command-line arguments

use crate::config::{ClusterOptions, NamespaceScope, ScanConfig};
use crate::constants::timeouts::MAX_DURATION;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "kgcr")]
#[command(version, about = "List every instance of every namespaced custom resource")]
pub struct Args {
    /// Namespace to scan. Defaults to the current context's namespace, or "default".
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Scan all namespaces
    #[arg(short = 'A', long)]
    pub all_namespaces: bool,

    /// Deadline for the whole scan (e.g. 30s, 1m30s, 500ms)
    #[arg(long, env = "KGCR_TIMEOUT", default_value = "30s", value_parser = parse_duration)]
    pub timeout: Duration,

    /// Deadline for listing the instances of a single CRD
    #[arg(long, default_value = "5s", value_parser = parse_duration)]
    pub request_timeout: Duration,

    /// Path to the kubeconfig file. If not set, uses KUBECONFIG or ~/.kube/config
    #[arg(long, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use instead of the current context
    #[arg(long)]
    pub context: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn cluster_options(&self) -> ClusterOptions {
        ClusterOptions {
            kubeconfig: self.kubeconfig.clone(),
            context: self.context.clone(),
        }
    }

    /// Build the scan configuration once the context's namespace is known
    pub fn scan_config(&self, context_namespace: Option<&str>) -> ScanConfig {
        let scope = NamespaceScope::resolve(
            self.namespace.as_deref(),
            self.all_namespaces,
            context_namespace,
        );
        ScanConfig::new(scope)
            .with_timeout(self.timeout)
            .with_request_timeout(self.request_timeout)
    }
}

/// Parse a Go-style duration such as `30s`, `1m30s`, `1h` or `250ms`.
/// A bare number is taken as seconds.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("empty duration".to_string());
    }
    if let Ok(secs) = input.parse::<u64>() {
        return bounded(Duration::from_secs(secs), input);
    }

    let mut total = Duration::ZERO;
    let mut rest = input;
    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .ok_or_else(|| format!("missing unit in duration '{}'", input))?;
        if digits == 0 {
            return Err(format!("invalid duration '{}'", input));
        }
        let value: f64 = rest[..digits]
            .parse()
            .map_err(|_| format!("invalid number in duration '{}'", input))?;
        rest = &rest[digits..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let seconds_per_unit = match &rest[..unit_len] {
            "ms" => 0.001,
            "s" => 1.0,
            "m" => 60.0,
            "h" => 3600.0,
            unit => return Err(format!("unknown unit '{}' in duration '{}'", unit, input)),
        };
        rest = &rest[unit_len..];

        total = Duration::try_from_secs_f64(value * seconds_per_unit)
            .ok()
            .and_then(|part| total.checked_add(part))
            .ok_or_else(|| too_long(input))?;
    }

    bounded(total, input)
}

fn too_long(input: &str) -> String {
    format!("duration '{}' exceeds the maximum of {:?}", input, MAX_DURATION)
}

/// Accept only durations in `(0, MAX_DURATION]`
fn bounded(duration: Duration, input: &str) -> Result<Duration, String> {
    if duration.is_zero() {
        Err(format!("duration '{}' must be greater than zero", input))
    } else if duration > MAX_DURATION {
        Err(too_long(input))
    } else {
        Ok(duration)
    }
}
