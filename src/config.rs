// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::timeouts::{REQUEST_TIMEOUT, SCAN_TIMEOUT};
use crate::constants::workers::MAX_WORKERS;
use crate::constants::DEFAULT_NAMESPACE;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Which namespaces an instance query covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceScope {
    Single(String),
    All,
}

impl NamespaceScope {
    /// Resolve the scope from the command line and the active kubeconfig context.
    ///
    /// `all_namespaces` wins over an explicit namespace. An empty explicit
    /// namespace counts as unset.
    pub fn resolve(
        explicit: Option<&str>,
        all_namespaces: bool,
        context_namespace: Option<&str>,
    ) -> Self {
        if all_namespaces {
            return NamespaceScope::All;
        }

        let namespace = explicit
            .filter(|ns| !ns.is_empty())
            .or(context_namespace.filter(|ns| !ns.is_empty()))
            .unwrap_or(DEFAULT_NAMESPACE);

        NamespaceScope::Single(namespace.to_string())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, NamespaceScope::All)
    }

    /// The namespace to pass to a namespaced list call, `None` for all namespaces
    pub fn namespace(&self) -> Option<&str> {
        match self {
            NamespaceScope::Single(ns) => Some(ns),
            NamespaceScope::All => None,
        }
    }
}

impl fmt::Display for NamespaceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamespaceScope::Single(ns) => write!(f, "{}", ns),
            NamespaceScope::All => write!(f, "<all>"),
        }
    }
}

/// How to reach the cluster
#[derive(Debug, Clone, Default)]
pub struct ClusterOptions {
    /// Explicit kubeconfig path; otherwise KUBECONFIG or ~/.kube/config
    pub kubeconfig: Option<PathBuf>,
    /// Context to use instead of the kubeconfig's current context
    pub context: Option<String>,
}

/// Immutable settings for one scan, built once at startup
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub scope: NamespaceScope,
    /// Overall deadline covering the CRD listing and every instance query
    pub timeout: Duration,
    /// Deadline for a single instance query, capped by the overall deadline
    pub request_timeout: Duration,
    pub max_workers: usize,
}

impl ScanConfig {
    pub fn new(scope: NamespaceScope) -> Self {
        Self {
            scope,
            timeout: SCAN_TIMEOUT,
            request_timeout: REQUEST_TIMEOUT,
            max_workers: MAX_WORKERS,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}
