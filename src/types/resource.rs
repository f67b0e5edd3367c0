// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// An instance returned by the instance query: its name and owning namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRef {
    pub name: String,
    pub namespace: String,
}

/// One discovered custom resource instance.
///
/// Field order defines the derived ordering: CRD name, resource name,
/// namespace, then instance name, each compared by code point.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FoundResource {
    pub crd_name: String,
    pub resource_name: String,
    pub namespace: String,
    pub instance_name: String,
}
