// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Listing the instances of a single custom resource type

use crate::config::NamespaceScope;
use crate::error::Result;
use crate::types::{InstanceRef, QueryCoordinate};
use async_trait::async_trait;
use kube::{
    api::{DynamicObject, ListParams},
    Api, Client, ResourceExt,
};
use tracing::{instrument, trace};

/// Lists instances of one resource type, in one namespace or in all of them
#[async_trait]
pub trait InstanceQuery: Send + Sync {
    async fn list_instances(
        &self,
        coordinate: &QueryCoordinate,
        scope: &NamespaceScope,
    ) -> Result<Vec<InstanceRef>>;
}

/// Instance query backed by the dynamic API
#[derive(Clone)]
pub struct KubeInstances {
    client: Client,
}

impl KubeInstances {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InstanceQuery for KubeInstances {
    #[instrument(
        skip(self, coordinate),
        fields(resource = %coordinate.plural, version = %coordinate.api_version())
    )]
    async fn list_instances(
        &self,
        coordinate: &QueryCoordinate,
        scope: &NamespaceScope,
    ) -> Result<Vec<InstanceRef>> {
        let ar = coordinate.api_resource();
        let api: Api<DynamicObject> = match scope.namespace() {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, &ar),
            None => Api::all_with(self.client.clone(), &ar),
        };

        let list = api.list(&ListParams::default()).await?;
        trace!("Listed {} instances", list.items.len());

        Ok(list
            .items
            .iter()
            .map(|item| InstanceRef {
                name: item.name_any(),
                namespace: item.namespace().unwrap_or_default(),
            })
            .collect())
    }
}
