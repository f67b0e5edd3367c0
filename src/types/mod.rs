// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Domain types shared by the scan pipeline and its collaborators.

pub mod crd;
pub mod resource;

pub use crd::{CrdDescriptor, CrdScope, CrdVersion, Job, QueryCoordinate};
pub use resource::{FoundResource, InstanceRef};
