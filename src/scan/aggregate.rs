// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Fan-in of per-job result batches.

use crate::types::FoundResource;
use tokio::sync::mpsc;

/// Drain result batches until every sender is gone, flattening them into one list.
pub async fn collect_batches(
    mut batches: mpsc::Receiver<Vec<FoundResource>>,
    capacity: usize,
) -> Vec<FoundResource> {
    let mut all = Vec::with_capacity(capacity);
    while let Some(batch) = batches.recv().await {
        all.extend(batch);
    }
    all
}
