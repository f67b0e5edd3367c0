// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KgcrError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Error listing CRDs: {0}")]
    CatalogError(String),

    #[error("Timed out after {0:?} while listing CRDs")]
    CatalogTimeout(Duration),

    #[error("Request timed out after {0:?}")]
    RequestTimeout(Duration),
}

impl KgcrError {
    /// Short label describing why an instance query failed, used in logs.
    pub fn failure_kind(&self) -> &'static str {
        match self {
            KgcrError::KubeError(kube::Error::Api(resp)) => match resp.code {
                401 | 403 => "forbidden",
                404 => "not-found",
                _ => "api-error",
            },
            KgcrError::RequestTimeout(_) => "timeout",
            _ => "other",
        }
    }
}

pub type Result<T> = std::result::Result<T, KgcrError>;
