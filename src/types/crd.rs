// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::NAMESPACED_SCOPE;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{discovery::ApiResource, ResourceExt};

/// Whether instances of a custom resource live inside a namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrdScope {
    Namespaced,
    Cluster,
}

impl CrdScope {
    /// Anything other than `Namespaced` is treated as cluster-scoped.
    pub fn parse(scope: &str) -> Self {
        if scope == NAMESPACED_SCOPE {
            CrdScope::Namespaced
        } else {
            CrdScope::Cluster
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrdVersion {
    pub name: String,
    pub storage: bool,
}

/// One custom resource type registered in the cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrdDescriptor {
    pub name: String,
    pub group: String,
    pub kind: String,
    pub plural: String,
    pub scope: CrdScope,
    pub versions: Vec<CrdVersion>,
}

impl CrdDescriptor {
    /// The version flagged for storage, else the first declared version.
    pub fn storage_version(&self) -> Option<&str> {
        self.versions
            .iter()
            .find(|v| v.storage)
            .or_else(|| self.versions.first())
            .map(|v| v.name.as_str())
            .filter(|name| !name.is_empty())
    }

    pub fn is_namespaced(&self) -> bool {
        self.scope == CrdScope::Namespaced
    }
}

impl From<&CustomResourceDefinition> for CrdDescriptor {
    fn from(crd: &CustomResourceDefinition) -> Self {
        Self {
            name: crd.name_any(),
            group: crd.spec.group.clone(),
            kind: crd.spec.names.kind.clone(),
            plural: crd.spec.names.plural.clone(),
            scope: CrdScope::parse(&crd.spec.scope),
            versions: crd
                .spec
                .versions
                .iter()
                .map(|v| CrdVersion {
                    name: v.name.clone(),
                    storage: v.storage,
                })
                .collect(),
        }
    }
}

/// Group, version and plural resource name used to address instances of a CRD
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryCoordinate {
    pub group: String,
    pub version: String,
    pub plural: String,
    pub kind: String,
}

impl QueryCoordinate {
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    pub fn api_resource(&self) -> ApiResource {
        ApiResource {
            group: self.group.clone(),
            version: self.version.clone(),
            api_version: self.api_version(),
            kind: self.kind.clone(),
            plural: self.plural.clone(),
        }
    }
}

/// A single unit of work for the worker pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub crd_name: String,
    pub coordinate: QueryCoordinate,
}
