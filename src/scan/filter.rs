// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Selecting the CRDs worth querying and computing their query coordinates.

use crate::types::{CrdDescriptor, Job, QueryCoordinate};
use tracing::trace;

/// Build one job per namespaced CRD with a resolvable storage version
pub fn build_jobs(crds: &[CrdDescriptor]) -> Vec<Job> {
    crds.iter().filter_map(job_for).collect()
}

fn job_for(crd: &CrdDescriptor) -> Option<Job> {
    if !crd.is_namespaced() {
        trace!("Skipping cluster-scoped CRD {}", crd.name);
        return None;
    }

    let Some(version) = crd.storage_version() else {
        trace!("Skipping CRD {} without a storage version", crd.name);
        return None;
    };

    Some(Job {
        crd_name: crd.name.clone(),
        coordinate: QueryCoordinate {
            group: crd.group.clone(),
            version: version.to_string(),
            plural: crd.plural.clone(),
            kind: crd.kind.clone(),
        },
    })
}
