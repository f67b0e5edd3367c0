// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Listing the CRDs registered in the cluster

use crate::error::{KgcrError, Result};
use crate::types::CrdDescriptor;
use async_trait::async_trait;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{api::ListParams, Api, Client};
use tracing::{debug, instrument};

/// Source of CRD descriptors for a scan
#[async_trait]
pub trait CrdCatalog: Send + Sync {
    async fn list_crds(&self) -> Result<Vec<CrdDescriptor>>;
}

/// CRD catalog backed by the apiextensions.k8s.io/v1 API
#[derive(Clone)]
pub struct KubeCatalog {
    client: Client,
}

impl KubeCatalog {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CrdCatalog for KubeCatalog {
    #[instrument(skip(self))]
    async fn list_crds(&self) -> Result<Vec<CrdDescriptor>> {
        let crds: Api<CustomResourceDefinition> = Api::all(self.client.clone());
        let crd_list = crds
            .list(&ListParams::default())
            .await
            .map_err(|e| KgcrError::CatalogError(e.to_string()))?;

        debug!("Listed {} CRDs", crd_list.items.len());

        Ok(crd_list.items.iter().map(CrdDescriptor::from).collect())
    }
}
