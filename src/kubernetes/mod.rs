// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes collaborators: client creation, CRD catalog and instance listing.

pub mod catalog;
pub mod client;
pub mod instances;

pub use catalog::{CrdCatalog, KubeCatalog};
pub use client::{connect, ClusterConnection};
pub use instances::{InstanceQuery, KubeInstances};
