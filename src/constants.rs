// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Worker pool sizing
pub mod workers {
    /// Upper bound on concurrent list calls against the API server
    pub const MAX_WORKERS: usize = 20;
    /// Workers started per available CPU core
    pub const WORKERS_PER_CPU: usize = 3;
}

/// Timeouts applied to the scan and to individual API requests
pub mod timeouts {
    use std::time::Duration;

    /// Overall deadline for a run, including the CRD listing
    pub const SCAN_TIMEOUT: Duration = Duration::from_secs(30);
    /// Deadline for a single instance list request
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
    /// TCP connect timeout for the Kubernetes client
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Timeout for reading a response from the API server
    pub const READ_TIMEOUT: Duration = Duration::from_secs(30);
    /// Longest duration accepted on the command line
    pub const MAX_DURATION: Duration = Duration::from_secs(24 * 3600);
}

/// Namespace used when neither the flags nor the kubeconfig context name one
pub const DEFAULT_NAMESPACE: &str = "default";

/// The CRD scope value for namespace-scoped resources
pub const NAMESPACED_SCOPE: &str = "Namespaced";
