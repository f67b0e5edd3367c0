// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Deterministic ordering of scan results.

use crate::types::FoundResource;

/// Order results by CRD name, resource name, namespace, then instance name.
pub fn sort_resources(resources: &mut [FoundResource]) {
    resources.sort();
}
